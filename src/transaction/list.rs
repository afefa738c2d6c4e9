//! The list of recorded transactions, as HTML and as JSON.

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    app_state::SharedTransactionStore,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, CARD_STYLE, CATEGORY_BADGE_STYLE, EXPENSE_TEXT_STYLE,
        INCOME_TEXT_STYLE, format_currency, format_date,
    },
    transaction::{Transaction, TransactionType},
};

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct TransactionListState {
    /// The store to read transactions from.
    pub store: SharedTransactionStore,
}

impl FromRef<AppState> for TransactionListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// A route handler that responds with every transaction as JSON, newest first.
///
/// The body has the same layout as the saved transaction collection.
pub async fn get_transactions_json(State(state): State<TransactionListState>) -> Response {
    let store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire transaction store lock: {error}");
            return Error::StoreLockError.into_response();
        }
    };

    Json(store.list().to_vec()).into_response()
}

/// Renders the card listing `transactions` in the order given, each with a delete button.
pub fn transaction_list(transactions: &[Transaction]) -> Markup {
    html! {
        section class=(CARD_STYLE) id="transaction-list"
        {
            @if transactions.is_empty() {
                div class="py-8 text-center text-gray-500 dark:text-gray-400"
                {
                    p class="mb-2 text-lg font-medium" { "Nenhuma transação encontrada" }
                    p class="text-sm"
                    {
                        "Adicione sua primeira transação para começar a acompanhar seu orçamento."
                    }
                }
            } @else {
                h2 class="text-xl font-bold" { "Transações Recentes" }
                p class="mb-4 text-sm text-gray-500 dark:text-gray-400"
                {
                    "Histórico de suas receitas e despesas"
                }

                ul class="space-y-3"
                {
                    @for transaction in transactions {
                        (transaction_row(transaction))
                    }
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let (sign, amount_style) = match transaction.transaction_type {
        TransactionType::Income => ("+", INCOME_TEXT_STYLE),
        TransactionType::Expense => ("-", EXPENSE_TEXT_STYLE),
    };
    let delete_url = format_endpoint(endpoints::TRANSACTION, transaction.id.as_str());

    html! {
        li
            data-transaction-id=(transaction.id)
            class="flex items-center justify-between gap-4 p-4 rounded-lg border
                border-gray-200 dark:border-gray-700"
        {
            div
            {
                div class="flex items-center gap-2 mb-1"
                {
                    h3 class="font-medium text-sm" { (transaction.description) }
                    span class=(CATEGORY_BADGE_STYLE) { (transaction.category) }
                }

                p class="text-xs text-gray-500 dark:text-gray-400"
                {
                    time datetime=(transaction.date) { (format_date(transaction.date)) }
                }
            }

            div class="flex items-center gap-3"
            {
                span class={ "font-semibold " (amount_style) }
                {
                    (sign) " " (format_currency(transaction.amount))
                }

                button
                    type="button"
                    hx-delete=(delete_url)
                    hx-target="#dashboard-content"
                    hx-target-error="#alert-container"
                    hx-swap="outerHTML"
                    aria-label={ "Remover " (transaction.description) }
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Remover"
                }
            }
        }
    }
}
