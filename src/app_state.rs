//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use crate::{persistence::KeyValueSlot, transaction::TransactionStore};

/// The transaction store shared between request handlers.
pub type SharedTransactionStore = Arc<Mutex<TransactionStore<Box<dyn KeyValueSlot + Send>>>>;

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The transactions recorded by the user.
    pub store: SharedTransactionStore,

    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] with the transactions saved in `slot`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "America/Sao_Paulo".
    pub fn new(slot: Box<dyn KeyValueSlot + Send>, local_timezone: &str) -> Self {
        Self {
            store: Arc::new(Mutex::new(TransactionStore::initialize(slot))),
            local_timezone: local_timezone.to_owned(),
        }
    }
}
