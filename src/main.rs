// Main module for the synthetic fraud dataset generator. Orchestrates
// population generation, transaction synthesis, and CSV output.
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use clap::Parser;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use csv_writer::write_dataset;
use error::GeneratorError;
use population::generate_population;
use synthesizer::generate_transactions;

mod csv_writer;
mod error;
mod population;
mod synthesizer;

#[derive(Parser)]
#[command(name = "fraud_dataset")]
#[command(about = "Generates a labeled synthetic card-transaction dataset", version)]
struct Cli {
    /// Number of transactions to generate
    #[arg(short, long, default_value_t = 10_000)]
    transactions: u64,
    /// Number of clients in the synthetic population
    #[arg(short, long, default_value_t = 1_000)]
    clients: u32,
    /// Output CSV path
    #[arg(short, long, default_value = "fraud_dataset.csv")]
    output: PathBuf,
    /// RNG seed for reproducible output (entropy-seeded when omitted).
    /// Byte-identical reruns also need --now pinned, since dates and
    /// timestamps are sampled relative to the generation instant.
    #[arg(short, long)]
    seed: Option<u64>,
    /// Generation instant override, ISO 8601 (e.g. 2026-08-25T12:00:00);
    /// defaults to the current local time
    #[arg(long)]
    now: Option<NaiveDateTime>,
}

// Runs one generation pass end to end
// Key steps:
// 1. Validate counts (non-positive values are rejected up front)
// 2. Build the client roster
// 3. Synthesize the transaction stream against it
// 4. Write the CSV and print the run summary
fn run(cli: &Cli) -> Result<(), GeneratorError> {
    if cli.transactions == 0 {
        return Err(GeneratorError::InvalidInput(
            "transaction count must be positive".to_string(),
        ));
    }
    if cli.clients == 0 {
        return Err(GeneratorError::InvalidInput(
            "client count must be positive".to_string(),
        ));
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let now = cli.now.unwrap_or_else(|| Local::now().naive_local());

    info!("generating population of {} clients", cli.clients);
    let roster = generate_population(cli.clients, now.date(), &mut rng);

    info!("synthesizing {} transactions", cli.transactions);
    let transactions = generate_transactions(&roster, cli.transactions, now, &mut rng)?;

    let bytes = write_dataset(&cli.output, &transactions)?;

    let fraud_count = transactions.iter().filter(|tx| tx.is_fraud).count();
    let fraud_rate = fraud_count as f64 / transactions.len().max(1) as f64;
    println!("Dataset written to {}", cli.output.display());
    println!("Rows: {}", transactions.len());
    println!("Fraudulent: {} ({:.2}%)", fraud_count, fraud_rate * 100.0);
    println!("Output size: {:.1} KiB", bytes as f64 / 1024.0);

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        error!("generation failed: {}", err);
        std::process::exit(1);
    }
}
