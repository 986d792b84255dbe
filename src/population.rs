// Population module: builds the immutable roster of clients and their
// payment cards that the transaction synthesizer samples from.
use chrono::{Duration, NaiveDate};
use rand::prelude::*;

pub const CLIENT_ID_OFFSET: u32 = 1000;

pub const CURRENCIES: [&str; 3] = ["RUB", "USD", "EUR"];
pub const CITIES: [&str; 8] = [
    "Moscow",
    "Saint Petersburg",
    "Novosibirsk",
    "Yekaterinburg",
    "Kazan",
    "Nizhny Novgorod",
    "Samara",
    "Omsk",
];

const FIRST_NAMES: [&str; 8] = [
    "Ivan", "Maria", "Alexei", "Olga", "Dmitry", "Anna", "Sergei", "Elena",
];
const LAST_NAMES: [&str; 8] = [
    "Ivanov", "Petrova", "Smirnov", "Kuznetsova", "Popov", "Sokolova", "Volkov", "Morozova",
];

// Age band for generated clients, in whole years at generation time
const MIN_AGE_YEARS: i64 = 18;
const MAX_AGE_YEARS: i64 = 80;
// Registration dates are drawn from the last 3 years
const REGISTRATION_WINDOW_DAYS: i64 = 3 * 365;

#[derive(Debug, Clone)]
pub struct Card {
    pub number: String,
    pub currency: &'static str,
    pub issue_date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct Client {
    pub client_id: u32,
    pub name: String,
    pub birth_date: NaiveDate,
    pub registration_date: NaiveDate,
    pub city: &'static str,
    pub cards: Vec<Card>,
}

// Synthesizes a display-formatted card number (four 4-digit groups).
// Format-only: no Luhn check, and uniqueness is not guaranteed.
fn card_number(rng: &mut StdRng) -> String {
    let groups: Vec<String> = (0..4).map(|_| format!("{:04}", rng.gen_range(0..10000u32))).collect();
    groups.join(" ")
}

fn generate_card(registration_date: NaiveDate, today: NaiveDate, rng: &mut StdRng) -> Card {
    // issue_date is uniform over [registration_date, today] inclusive
    let span = (today - registration_date).num_days();
    let issue_date = registration_date + Duration::days(rng.gen_range(0..=span));
    Card {
        number: card_number(rng),
        currency: CURRENCIES.choose(rng).copied().unwrap_or("RUB"),
        issue_date,
    }
}

// Generates the client roster
// Inputs: number of clients, the generation date, and the run's RNG
// Outputs: ordered roster with unique, contiguous client ids
// Key steps:
// 1. Assign sequential ids starting at CLIENT_ID_OFFSET
// 2. Draw birth_date so the client is 18-80 years old today
// 3. Draw registration_date uniformly over the last 3 years
// 4. Attach 1-3 cards, each issued between registration and today
pub fn generate_population(client_count: u32, today: NaiveDate, rng: &mut StdRng) -> Vec<Client> {
    let mut roster = Vec::with_capacity(client_count as usize);
    for i in 0..client_count {
        let age_days = rng.gen_range(MIN_AGE_YEARS * 365..=MAX_AGE_YEARS * 365);
        let birth_date = today - Duration::days(age_days);
        let registration_date = today - Duration::days(rng.gen_range(0..=REGISTRATION_WINDOW_DAYS));

        let card_count = rng.gen_range(1..=3);
        let cards = (0..card_count)
            .map(|_| generate_card(registration_date, today, rng))
            .collect();

        let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Ivan");
        let last = LAST_NAMES.choose(rng).copied().unwrap_or("Ivanov");

        roster.push(Client {
            client_id: CLIENT_ID_OFFSET + i,
            name: format!("{} {}", first, last),
            birth_date,
            registration_date,
            city: CITIES.choose(rng).copied().unwrap_or("Moscow"),
            cards,
        });
    }
    roster
}
