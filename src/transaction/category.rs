//! The fixed set of categories a transaction can be filed under.
//!
//! Categories depend on the transaction type. They are only checked when a
//! transaction is submitted through the form; the store accepts any string.

use crate::transaction::TransactionType;

/// Categories for income transactions.
pub const INCOME_CATEGORIES: [&str; 4] = ["Salário", "Freelance", "Investimentos", "Outros"];

/// Categories for expense transactions.
pub const EXPENSE_CATEGORIES: [&str; 7] = [
    "Alimentação",
    "Transporte",
    "Moradia",
    "Lazer",
    "Saúde",
    "Educação",
    "Outros",
];

/// The categories that may be chosen for `transaction_type`, in display order.
pub fn categories_for(transaction_type: TransactionType) -> &'static [&'static str] {
    match transaction_type {
        TransactionType::Income => &INCOME_CATEGORIES,
        TransactionType::Expense => &EXPENSE_CATEGORIES,
    }
}

/// Whether `category` is one of the categories for `transaction_type`.
pub fn is_valid_category(transaction_type: TransactionType, category: &str) -> bool {
    categories_for(transaction_type).contains(&category)
}
