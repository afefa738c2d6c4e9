//! Stores the transaction collection as a single serialized string in a
//! named key-value slot.
//!
//! The store only ever reads or writes the whole collection, so a slot holds
//! one JSON array (newest transaction first) and nothing else.

use std::{
    fmt::Debug,
    sync::{Arc, Mutex},
};

use rusqlite::{Connection, OptionalExtension};

use crate::{
    Error,
    transaction::{AMOUNT_LIMIT, Transaction},
};

/// The name of the slot that holds the transaction collection.
pub const TRANSACTIONS_SLOT_KEY: &str = "budget-transactions";

/// A durable location holding one string value.
pub trait KeyValueSlot: Debug {
    /// Get the stored value, or `None` if nothing has been saved yet.
    ///
    /// # Errors
    /// Returns an error if the underlying storage could not be read.
    fn load(&self) -> Result<Option<String>, Error>;

    /// Replace the stored value with `value`.
    ///
    /// # Errors
    /// Returns an error if the underlying storage could not be written.
    fn save(&self, value: &str) -> Result<(), Error>;
}

impl<T: KeyValueSlot + ?Sized> KeyValueSlot for Box<T> {
    fn load(&self) -> Result<Option<String>, Error> {
        (**self).load()
    }

    fn save(&self, value: &str) -> Result<(), Error> {
        (**self).save(value)
    }
}

/// A slot backed by a row in the SQLite `key_value` table.
///
/// The table must exist, see [crate::initialize_db].
#[derive(Debug, Clone)]
pub struct SqliteSlot {
    connection: Arc<Mutex<Connection>>,
    key: String,
}

impl SqliteSlot {
    /// Create a slot for `key` in the database behind `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>, key: &str) -> Self {
        Self {
            connection,
            key: key.to_owned(),
        }
    }
}

impl KeyValueSlot for SqliteSlot {
    fn load(&self) -> Result<Option<String>, Error> {
        let connection = self
            .connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::StoreLockError)?;

        connection
            .query_row(
                "SELECT value FROM key_value WHERE key = ?1",
                (&self.key,),
                |row| row.get(0),
            )
            .optional()
            .map_err(Error::from)
    }

    fn save(&self, value: &str) -> Result<(), Error> {
        let connection = self
            .connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::StoreLockError)?;

        connection.execute(
            "INSERT INTO key_value (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (&self.key, value),
        )?;

        Ok(())
    }
}

/// A slot that lives in memory.
///
/// Clones share the same value, which lets tests inspect what a store saved.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    value: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot that already holds `value`.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: Arc::new(Mutex::new(Some(value.to_owned()))),
        }
    }
}

impl KeyValueSlot for MemorySlot {
    fn load(&self) -> Result<Option<String>, Error> {
        self.value
            .lock()
            .map(|value| value.clone())
            .map_err(|_| Error::StoreLockError)
    }

    fn save(&self, value: &str) -> Result<(), Error> {
        let mut slot = self.value.lock().map_err(|_| Error::StoreLockError)?;
        *slot = Some(value.to_owned());

        Ok(())
    }
}

/// Create the table that backs [SqliteSlot].
///
/// # Errors
/// Returns an error if the table cannot be created.
pub fn create_key_value_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS key_value (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Serialize the whole collection as a JSON array, preserving its order.
///
/// # Errors
/// Returns [Error::SerializationError] if serialization fails.
pub fn serialize_transactions(transactions: &[Transaction]) -> Result<String, Error> {
    serde_json::to_string(transactions).map_err(Error::from)
}

/// Parse a collection written by [serialize_transactions].
///
/// The document is accepted or rejected as a whole: a single malformed
/// record, or one with a negative amount or an amount of at least
/// [AMOUNT_LIMIT], rejects the entire collection.
///
/// # Errors
/// Returns [Error::SerializationError] if `text` is not a valid collection,
/// or [Error::InvalidPersistedData] if a record breaks the data model.
pub fn deserialize_transactions(text: &str) -> Result<Vec<Transaction>, Error> {
    let transactions: Vec<Transaction> = serde_json::from_str(text)?;

    if let Some(transaction) = transactions
        .iter()
        .find(|t| t.amount.is_sign_negative() || t.amount >= AMOUNT_LIMIT)
    {
        return Err(Error::InvalidPersistedData(format!(
            "transaction {} has the out of range amount {}",
            transaction.id, transaction.amount
        )));
    }

    Ok(transactions)
}
