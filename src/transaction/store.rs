//! The in-memory transaction collection and its persistence side effects.

use crate::{
    persistence::{KeyValueSlot, deserialize_transactions, serialize_transactions},
    transaction::{NewTransaction, Transaction, TransactionId},
};

/// Owns the ordered collection of transactions for the session.
///
/// The newest transaction is always first. Every change is written to the
/// store's [KeyValueSlot] as a complete serialization of the collection
/// immediately after the in-memory change.
#[derive(Debug)]
pub struct TransactionStore<S: KeyValueSlot> {
    transactions: Vec<Transaction>,
    slot: S,
}

impl<S: KeyValueSlot> TransactionStore<S> {
    /// Create a store with the collection previously saved in `slot`.
    ///
    /// Starts empty if the slot has never been written, cannot be read, or
    /// holds data that does not parse as a collection of transactions. This
    /// function never fails.
    pub fn initialize(slot: S) -> Self {
        let transactions = match slot.load() {
            Ok(Some(text)) => deserialize_transactions(&text).unwrap_or_else(|error| {
                tracing::warn!("Discarding unreadable saved transactions: {error}");
                Vec::new()
            }),
            Ok(None) => {
                tracing::debug!("No saved transactions found, starting empty");
                Vec::new()
            }
            Err(error) => {
                tracing::warn!("Could not load saved transactions: {error}");
                Vec::new()
            }
        };

        tracing::info!("Loaded {} transactions", transactions.len());

        Self { transactions, slot }
    }

    /// Record `candidate` as the newest transaction and return it with its new ID.
    ///
    /// The candidate is not validated, that is the job of whatever produced it.
    pub fn add(&mut self, candidate: NewTransaction) -> Transaction {
        let transaction = candidate.finalize(TransactionId::generate());
        self.transactions.insert(0, transaction.clone());
        tracing::debug!("Added transaction {}", transaction.id);

        self.persist();

        transaction
    }

    /// Remove the transaction with `id`, returning it if it existed.
    ///
    /// Removing an ID that is not in the store is not an error; the
    /// collection is left unchanged and `None` is returned.
    pub fn remove(&mut self, id: &TransactionId) -> Option<Transaction> {
        let removed = self
            .transactions
            .iter()
            .position(|transaction| &transaction.id == id)
            .map(|index| self.transactions.remove(index));

        match removed {
            Some(_) => tracing::debug!("Removed transaction {id}"),
            None => tracing::debug!("Tried to remove transaction {id} but it was not in the store"),
        }

        self.persist();

        removed
    }

    /// All transactions, newest first.
    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Get the transaction with `id`.
    pub fn get(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| &transaction.id == id)
    }

    /// The number of transactions in the store.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the store holds no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Write the whole collection to the slot.
    ///
    /// Failures are logged and otherwise ignored: the in-memory collection
    /// stays authoritative for the rest of the session.
    fn persist(&self) {
        let result =
            serialize_transactions(&self.transactions).and_then(|text| self.slot.save(&text));

        if let Err(error) = result {
            tracing::error!("Could not save transactions: {error}");
        }
    }
}
