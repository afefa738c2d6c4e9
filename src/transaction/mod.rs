//! Transaction management for the budgeting application.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the `NewTransaction` candidate for creating transactions
//! - The `TransactionStore` that owns the transactions and saves every change
//! - The form, list and delete endpoints used by the dashboard

mod category;
mod core;
mod delete_endpoint;
mod form;
mod list;
mod store;

pub use category::{categories_for, is_valid_category};
pub use core::{
    AMOUNT_LIMIT, NewTransaction, Transaction, TransactionId, TransactionType, is_valid_amount,
};
pub use delete_endpoint::delete_transaction_endpoint;
pub use form::{create_transaction_endpoint, get_category_field, transaction_form};
pub use list::{get_transactions_json, transaction_list};
pub use store::TransactionStore;

#[cfg(test)]
pub use form::TransactionForm;
