use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    AppState, Error,
    aggregation::Period,
    alert::Alert,
    app_state::SharedTransactionStore,
    dashboard::dashboard_content,
    timezone::get_local_offset,
    transaction::TransactionId,
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The store to remove transactions from.
    pub store: SharedTransactionStore,
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for deleting a transaction.
///
/// Responds with the refreshed dashboard content and a confirmation alert.
/// Deleting a transaction that does not exist is not an error, since the end
/// result is the same.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<String>,
) -> Response {
    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezone(state.local_timezone).into_alert_response();
    };

    let mut store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire transaction store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    let transaction_id = TransactionId::from(transaction_id);
    match store.remove(&transaction_id) {
        Some(_) => tracing::info!("Removed transaction {transaction_id}"),
        None => tracing::warn!("Tried to remove missing transaction {transaction_id}"),
    }

    let alert = Alert::Success {
        message: "Transação removida".to_owned(),
        details: "A transação foi removida do seu orçamento.".to_owned(),
    };

    // The status code has to be 200 OK or HTMX will not swap in the content.
    html! {
        (dashboard_content(store.list(), Period::current(local_offset)))
        (alert.into_html())
    }
    .into_response()
}
