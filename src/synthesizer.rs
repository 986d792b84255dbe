// Transaction synthesizer: draws client/card pairs from the roster and
// emits labeled transaction records with a layered fraud policy.
use chrono::{Duration, NaiveDateTime, Timelike};
use rand::prelude::*;

use crate::error::GeneratorError;
use crate::population::{Client, CITIES};

pub const BANKS: [&str; 6] = [
    "Sberbank",
    "VTB",
    "Tinkoff",
    "Alfa-Bank",
    "Gazprombank",
    "Raiffeisenbank",
];
pub const OPERATION_TYPES: [&str; 4] = ["purchase", "transfer", "withdrawal", "online_payment"];
pub const DEVICES: [&str; 4] = ["android", "ios", "web", "pos_terminal"];
pub const STATUS_COMPLETED: &str = "completed";

// Base fraud layer: probability and the disjoint amount supports
const BASE_FRAUD_RATE: f64 = 0.03;
const FRAUD_AMOUNT_MIN: f64 = 5_000.0;
const FRAUD_AMOUNT_MAX: f64 = 300_000.0;
const LEGIT_AMOUNT_MIN: f64 = 50.0;
const LEGIT_AMOUNT_MAX: f64 = 50_000.0;

// Amplification layer: late-night transactions get an additional,
// independent chance of being marked fraudulent. Monotonic: this rule
// can only upgrade a record to fraud, never downgrade one.
const NIGHT_HOUR_END: u32 = 6;
const NIGHT_FRAUD_RATE: f64 = 0.1;

// Probability that the transaction's IP geolocates to the client's home city
const HOME_IP_RATE: f64 = 0.8;

// Timestamps are drawn from the last year
const TIMESTAMP_WINDOW_SECS: i64 = 365 * 24 * 3600;

#[derive(Debug, Clone)]
pub struct Transaction {
    pub transaction_id: String,
    pub client_id: u32,
    pub client_name: String,
    pub client_age: i64,
    pub bank: &'static str,
    pub card_number: String,
    pub card_age: i64,
    pub currency: &'static str,
    pub amount: f64,
    pub operation_type: &'static str,
    pub timestamp: NaiveDateTime,
    pub is_fraud: bool,
    pub city: &'static str,
    pub ip_city: &'static str,
    pub device: &'static str,
    pub status: &'static str,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// Generates the transaction stream against an already-built roster
// Inputs: roster, number of transactions, the generation instant, the run's RNG
// Outputs: transactions with unique ids, or InvalidInput for an empty roster
// Key steps, per transaction:
// 1. Pick a client (with replacement) and one of their cards
// 2. Derive client_age (floor days/365) and card_age (days since issue)
// 3. Sample bank, operation type, device, timestamp, ip_city
// 4. Base fraud layer: 3% fraud with amount [5000, 300000], else [50, 50000]
// 5. Amplification layer: hour < 6 adds an independent 10% fraud upgrade
pub fn generate_transactions(
    roster: &[Client],
    transaction_count: u64,
    now: NaiveDateTime,
    rng: &mut StdRng,
) -> Result<Vec<Transaction>, GeneratorError> {
    if roster.is_empty() {
        return Err(GeneratorError::InvalidInput(
            "cannot synthesize transactions against an empty client roster".to_string(),
        ));
    }

    let today = now.date();
    let mut transactions = Vec::with_capacity(transaction_count as usize);
    for i in 0..transaction_count {
        let client = roster.choose(rng).ok_or_else(|| {
            GeneratorError::InvalidInput("cannot select a client from an empty roster".to_string())
        })?;
        // every generated client owns at least one card; a cardless client
        // can only come from a hand-built roster and is invalid input
        let card = client.cards.choose(rng).ok_or_else(|| {
            GeneratorError::InvalidInput(format!("client {} owns no cards", client.client_id))
        })?;

        // Intentionally approximate: whole years by floor(day count / 365)
        let client_age = (today - client.birth_date).num_days() / 365;
        let card_age = (today - card.issue_date).num_days();

        let bank = BANKS.choose(rng).copied().unwrap_or("Sberbank");
        let operation_type = OPERATION_TYPES.choose(rng).copied().unwrap_or("purchase");
        let device = DEVICES.choose(rng).copied().unwrap_or("web");
        let timestamp = now - Duration::seconds(rng.gen_range(0..=TIMESTAMP_WINDOW_SECS));

        let ip_city = if rng.gen::<f64>() < HOME_IP_RATE {
            client.city
        } else {
            // independent draw, may coincidentally equal the home city
            CITIES.choose(rng).copied().unwrap_or("Moscow")
        };

        // Base layer ties the fraud label to a specific amount range; the
        // supports overlap in [5000, 50000) so amount alone is only a
        // weak discriminator there.
        let mut is_fraud = rng.gen::<f64>() < BASE_FRAUD_RATE;
        let amount = if is_fraud {
            round2(rng.gen_range(FRAUD_AMOUNT_MIN..=FRAUD_AMOUNT_MAX))
        } else {
            round2(rng.gen_range(LEGIT_AMOUNT_MIN..=LEGIT_AMOUNT_MAX))
        };

        // Amplification never touches the already-sampled amount
        if timestamp.hour() < NIGHT_HOUR_END && rng.gen::<f64>() < NIGHT_FRAUD_RATE {
            is_fraud = true;
        }

        transactions.push(Transaction {
            transaction_id: format!("TX{:08}", i + 1),
            client_id: client.client_id,
            client_name: client.name.clone(),
            client_age,
            bank,
            card_number: card.number.clone(),
            card_age,
            currency: card.currency,
            amount,
            operation_type,
            timestamp,
            is_fraud,
            city: client.city,
            ip_city,
            device,
            status: STATUS_COMPLETED,
        });
    }
    Ok(transactions)
}
