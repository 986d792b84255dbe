use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Timelike};
use serde::{Serialize, Serializer};

use crate::error::GeneratorError;
use crate::synthesizer::Transaction;

// One output row per transaction. Field order here is the column order in
// the file; hour/weekday/month are derived from the timestamp at
// serialization time and are not part of the generation model.
#[derive(Debug, Serialize)]
struct TransactionRow<'a> {
    transaction_id: &'a str,
    client_id: u32,
    client_name: &'a str,
    client_age: i64,
    bank: &'a str,
    card_number: &'a str,
    card_age: i64,
    currency: &'a str,
    #[serde(serialize_with = "two_decimals")]
    amount: f64,
    operation_type: &'a str,
    timestamp: String,
    is_fraud: u8,
    city: &'a str,
    ip_city: &'a str,
    device: &'a str,
    status: &'a str,
    hour: u32,
    weekday: u32,
    month: u32,
}

fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.2}", value))
}

impl<'a> TransactionRow<'a> {
    fn from_transaction(tx: &'a Transaction) -> Self {
        TransactionRow {
            transaction_id: &tx.transaction_id,
            client_id: tx.client_id,
            client_name: &tx.client_name,
            client_age: tx.client_age,
            bank: tx.bank,
            card_number: &tx.card_number,
            card_age: tx.card_age,
            currency: tx.currency,
            amount: tx.amount,
            operation_type: tx.operation_type,
            timestamp: tx.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            is_fraud: tx.is_fraud as u8,
            city: tx.city,
            ip_city: tx.ip_city,
            device: tx.device,
            status: tx.status,
            hour: tx.timestamp.hour(),
            // Monday = 0, matching the usual dataframe convention
            weekday: tx.timestamp.weekday().num_days_from_monday(),
            month: tx.timestamp.month(),
        }
    }
}

// Serializes every transaction to an in-memory CSV buffer, then writes the
// file in one shot: a failure anywhere leaves no partial output behind.
pub fn encode_dataset(transactions: &[Transaction]) -> Result<Vec<u8>, GeneratorError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for tx in transactions {
        wtr.serialize(TransactionRow::from_transaction(tx))?;
    }
    wtr.flush()?;
    wtr.into_inner()
        .map_err(|e| GeneratorError::Io(e.into_error()))
}

// Writes the dataset to disk and reports its size in bytes. The buffer
// goes to a sibling temp file first and is renamed onto the destination,
// so an interrupted or failed write never leaves a partial dataset there.
pub fn write_dataset(path: &Path, transactions: &[Transaction]) -> Result<u64, GeneratorError> {
    let buffer = encode_dataset(transactions)?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    fs::write(&tmp_path, &buffer)?;
    if let Err(err) = fs::rename(&tmp_path, path) {
        fs::remove_file(&tmp_path).ok();
        return Err(err.into());
    }
    Ok(buffer.len() as u64)
}
