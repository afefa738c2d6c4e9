use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;
use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};

use budget_tracker::{
    SqliteSlot, TRANSACTIONS_SLOT_KEY, Transaction, TransactionStore, TransactionType,
    initialize_db,
};

/// A utility for creating a test database for the budget tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test transactions...");

    let slot = SqliteSlot::new(Arc::new(Mutex::new(conn)), TRANSACTIONS_SLOT_KEY);
    let mut store = TransactionStore::initialize(slot);
    let today = OffsetDateTime::now_utc().date();

    // Oldest first since the store puts new transactions at the front.
    for (day, description, cents, transaction_type, category) in [
        (1, "Salário", 500_000, TransactionType::Income, "Salário"),
        (2, "Aluguel", 150_000, TransactionType::Expense, "Moradia"),
        (3, "Mercado", 45_990, TransactionType::Expense, "Alimentação"),
        (5, "Uber", 3_250, TransactionType::Expense, "Transporte"),
        (8, "Projeto freelance", 80_000, TransactionType::Income, "Freelance"),
        (10, "Farmácia", 8_740, TransactionType::Expense, "Saúde"),
        (12, "Cinema", 6_000, TransactionType::Expense, "Lazer"),
        (15, "Restaurante", 12_500, TransactionType::Expense, "Alimentação"),
    ] {
        let date = Date::from_calendar_date(today.year(), today.month(), day.min(today.day()))?;

        store.add(Transaction::build(
            description,
            Decimal::new(cents, 2),
            transaction_type,
            category,
            date,
        ));
    }

    println!("Created {} transactions.", store.len());
    println!("Success!");

    Ok(())
}
