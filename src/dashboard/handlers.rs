//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - The dashboard content that is re-rendered after a transaction is removed
//! - State and query types used by the handler

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    aggregation::{Period, category_breakdown, monthly_summary},
    alert::Alert,
    app_state::SharedTransactionStore,
    dashboard::{
        cards::summary_cards_view,
        charts::{ECHARTS_SCRIPT_URL, category_chart_view},
    },
    html::{HeadElement, PAGE_CONTAINER_STYLE, base, format_currency},
    timezone::{get_local_offset, today},
    transaction::{Transaction, TransactionId, transaction_form, transaction_list},
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The store holding the user's transactions.
    pub store: SharedTransactionStore,
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters for the dashboard page.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// The ID of a transaction that was just added, used to confirm the addition.
    pub added: Option<String>,
}

/// Display a page with the current month's summary, the form for adding
/// transactions and the transaction list.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    let local_offset = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezone(state.local_timezone.clone())
    })?;
    let today = today(local_offset);

    let store = state
        .store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire transaction store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let alert = query
        .added
        .and_then(|id| store.get(&TransactionId::from(id)))
        .map(added_alert);

    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            header class="w-full max-w-6xl mb-6"
            {
                h1 class="text-3xl font-bold tracking-tight" { "Calculadora de Orçamento" }
                p class="text-gray-500 dark:text-gray-400"
                {
                    "Gerencie suas finanças pessoais de forma inteligente"
                }
            }

            div class="grid grid-cols-1 lg:grid-cols-3 gap-6 w-full max-w-6xl"
            {
                div { (transaction_form(today)) }

                div class="lg:col-span-2"
                {
                    (dashboard_content(store.list(), Period::containing(today)))
                }
            }
        }
    };

    let scripts = [HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned())];

    Ok(base("Painel", &scripts, &content, alert).into_response())
}

/// Renders the parts of the dashboard derived from the transactions: the
/// summary cards and category chart for `period`, and the full transaction list.
pub(crate) fn dashboard_content(transactions: &[Transaction], period: Period) -> Markup {
    let summary = monthly_summary(transactions, period);
    let breakdown = category_breakdown(transactions, period);

    html! {
        div id="dashboard-content" class="space-y-6"
        {
            (summary_cards_view(&summary, period))
            (category_chart_view(&breakdown))
            (transaction_list(transactions))
        }
    }
}

fn added_alert(transaction: &Transaction) -> Alert {
    Alert::Success {
        message: "Transação adicionada!".to_owned(),
        details: format!(
            "{} de {} adicionada com sucesso.",
            transaction.transaction_type.label(),
            format_currency(transaction.amount)
        ),
    }
}
