//! Defines the core data models for transactions.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

// ============================================================================
// MODELS
// ============================================================================

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Amounts must be less than this, so the largest amount is R$ 999.999.999,99.
///
/// Amounts below this limit with at most [AMOUNT_DECIMAL_PLACES] decimal
/// places are saved as JSON numbers without losing precision.
pub const AMOUNT_LIMIT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// The number of decimal places an amount may have, i.e. whole cents.
pub const AMOUNT_DECIMAL_PLACES: u32 = 2;

/// Whether `amount` is greater than zero, below [AMOUNT_LIMIT] and has at
/// most [AMOUNT_DECIMAL_PLACES] decimal places.
pub fn is_valid_amount(amount: Decimal) -> bool {
    amount > Decimal::ZERO
        && amount < AMOUNT_LIMIT
        && amount.normalize().scale() <= AMOUNT_DECIMAL_PLACES
}

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned, e.g. a salary.
    Income,
    /// Money spent, e.g. rent.
    Expense,
}

impl TransactionType {
    /// The value used for this type in forms and in the persisted JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// The label shown to the user, e.g. "Receita".
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Receita",
            TransactionType::Expense => "Despesa",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies a transaction within the store.
///
/// New IDs are random UUIDs, but any string is accepted when loading so that
/// collections written with other ID schemes still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Generate a new, unique ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are only created by [TransactionStore::add](crate::TransactionStore::add)
/// and are never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned, always a positive magnitude.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// The category, e.g. "Moradia" or "Salário".
    pub category: String,
    /// Whether the transaction is an income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// When the transaction happened.
    #[serde(with = "iso_date")]
    pub date: Date,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [NewTransaction] for discoverability.
    pub fn build(
        description: &str,
        amount: Decimal,
        transaction_type: TransactionType,
        category: &str,
        date: Date,
    ) -> NewTransaction {
        NewTransaction {
            description: description.to_owned(),
            amount,
            category: category.to_owned(),
            transaction_type,
            date,
        }
    }
}

/// A transaction that has not been given an ID yet.
///
/// Pass it to [TransactionStore::add](crate::TransactionStore::add) to record it.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// A text description of what the transaction was for.
    pub description: String,

    /// The monetary amount of the transaction.
    ///
    /// Always a positive magnitude. Whether the money was earned or spent is
    /// given by [NewTransaction::transaction_type].
    ///
    /// # Examples
    /// - `3000.00` - Salary deposit
    /// - `45.99` - Supermarket
    /// - `1200.00` - Rent payment
    pub amount: Decimal,

    /// The category of the transaction, e.g. "Alimentação", "Transporte", "Moradia".
    pub category: String,

    /// Whether the transaction is an income or an expense.
    pub transaction_type: TransactionType,

    /// The date when the transaction occurred.
    pub date: Date,
}

impl NewTransaction {
    /// Give the transaction an ID.
    pub(crate) fn finalize(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            description: self.description,
            amount: self.amount,
            category: self.category,
            transaction_type: self.transaction_type,
            date: self.date,
        }
    }
}

impl From<Transaction> for NewTransaction {
    fn from(transaction: Transaction) -> Self {
        Self {
            description: transaction.description,
            amount: transaction.amount,
            category: transaction.category,
            transaction_type: transaction.transaction_type,
            date: transaction.date,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
