//! Monthly totals and category breakdowns derived from the transaction list.
//!
//! Every function here is pure: it only reads the transactions it is given
//! and the reference [Period], so the same inputs always give the same output.

use rust_decimal::Decimal;
use serde::Serialize;
use time::{Date, Month, UtcOffset};

use crate::{
    timezone::today,
    transaction::{Transaction, TransactionType},
};

/// A calendar month of a specific year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    /// The calendar year, e.g. 2024.
    pub year: i32,
    /// The month within [Period::year].
    pub month: Month,
}

impl Period {
    /// Create a period for `month` of `year`.
    pub fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// The period containing `date`.
    pub fn containing(date: Date) -> Self {
        Self::new(date.year(), date.month())
    }

    /// The month that is current right now at the UTC offset `offset`.
    pub fn current(offset: UtcOffset) -> Self {
        Self::containing(today(offset))
    }

    /// Whether `date` falls within this month and year.
    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

/// Totals for the transactions of one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    /// The sum of all income.
    pub total_income: Decimal,
    /// The sum of all expenses.
    pub total_expenses: Decimal,
    /// Income minus expenses. Negative when more was spent than earned.
    pub balance: Decimal,
    /// How many transactions the period has.
    pub transaction_count: usize,
}

/// The summed expenses for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category name.
    pub category: String,
    /// The sum of the expense amounts filed under [CategoryTotal::category].
    pub total: Decimal,
}

/// The transactions dated within `period`, in their original order.
pub fn filter_by_period(transactions: &[Transaction], period: Period) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|transaction| period.contains(transaction.date))
        .collect()
}

/// Sums the amounts of the transactions of type `transaction_type`.
///
/// Returns zero for an empty list. Saturates at [Decimal::MAX] instead of
/// overflowing.
pub fn sum_by_type<'a, I>(transactions: I, transaction_type: TransactionType) -> Decimal
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|transaction| transaction.transaction_type == transaction_type)
        .fold(Decimal::ZERO, |total, transaction| {
            total.saturating_add(transaction.amount)
        })
}

/// Calculates the income, expense and balance totals for `period`.
pub fn monthly_summary(transactions: &[Transaction], period: Period) -> MonthlySummary {
    let in_period = filter_by_period(transactions, period);

    let total_income = sum_by_type(in_period.iter().copied(), TransactionType::Income);
    let total_expenses = sum_by_type(in_period.iter().copied(), TransactionType::Expense);

    MonthlySummary {
        total_income,
        total_expenses,
        balance: total_income.saturating_sub(total_expenses),
        transaction_count: in_period.len(),
    }
}

/// Groups the expenses of `period` by category.
///
/// Categories appear in the order they are first seen in `transactions`.
/// Income is ignored, and the result is empty when the period has no expenses.
pub fn category_breakdown(transactions: &[Transaction], period: Period) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    let expenses = filter_by_period(transactions, period)
        .into_iter()
        .filter(|transaction| transaction.transaction_type == TransactionType::Expense);

    for transaction in expenses {
        match totals
            .iter_mut()
            .find(|total| total.category == transaction.category)
        {
            Some(total) => total.total = total.total.saturating_add(transaction.amount),
            None => totals.push(CategoryTotal {
                category: transaction.category.clone(),
                total: transaction.amount,
            }),
        }
    }

    totals
}
