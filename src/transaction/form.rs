//! The form for recording a new transaction and the endpoints behind it.

use std::str::FromStr;

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, macros::format_description};

use crate::{
    AppState, Error,
    app_state::SharedTransactionStore,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    timezone::{get_local_offset, today},
    transaction::{
        NewTransaction, Transaction, TransactionType, categories_for, is_valid_amount,
        is_valid_category,
    },
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The store the new transaction is added to.
    pub store: SharedTransactionStore,
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The form data for creating a transaction.
///
/// Fields are kept as the raw text the user entered so that bad input can be
/// reported with an alert rather than a generic rejection.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransactionForm {
    /// Text detailing the transaction.
    pub description: String,
    /// The value of the transaction in Reais, e.g. "45.99".
    pub amount: String,
    /// One of the categories for [TransactionForm::transaction_type].
    pub category: String,
    /// Whether the transaction is an income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The date when the transaction occurred as "YYYY-MM-DD", defaults to today.
    #[serde(default)]
    pub date: Option<String>,
}

impl TransactionForm {
    /// Check the submitted values and convert them into a transaction that
    /// is ready to be added to the store.
    ///
    /// `today` is used when no date was submitted.
    ///
    /// # Errors
    /// Returns an error if the description is empty, the amount is not a
    /// positive number of whole cents below one billion, the category does not belong to the
    /// transaction type, or the date cannot be parsed.
    pub fn validate(self, today: Date) -> Result<NewTransaction, Error> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        let amount = parse_amount(&self.amount)?;

        if !is_valid_category(self.transaction_type, &self.category) {
            return Err(Error::InvalidCategory(self.category));
        }

        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => today,
            Some(text) => Date::parse(text, format_description!("[year]-[month]-[day]"))
                .map_err(|_| Error::InvalidDate(text.to_owned()))?,
        };

        Ok(Transaction::build(
            description,
            amount,
            self.transaction_type,
            &self.category,
            date,
        ))
    }
}

/// Parse a positive amount of whole cents below [AMOUNT_LIMIT](crate::transaction::AMOUNT_LIMIT),
/// accepting either a dot or a comma as the decimal separator.
fn parse_amount(text: &str) -> Result<Decimal, Error> {
    let text = text.trim();

    match Decimal::from_str(&text.replace(',', ".")) {
        Ok(amount) if is_valid_amount(amount) => Ok(amount.normalize()),
        _ => Err(Error::InvalidAmount(text.to_owned())),
    }
}

/// A route handler for creating a new transaction, redirects to the dashboard on success.
///
/// The redirect carries the new transaction's ID so the dashboard can
/// confirm what was added.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezone(state.local_timezone).into_alert_response();
    };

    let candidate = match form.validate(today(local_offset)) {
        Ok(candidate) => candidate,
        Err(error) => {
            tracing::debug!("Rejected transaction form: {error}");
            return error.into_alert_response();
        }
    };

    let mut store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire transaction store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    let transaction = store.add(candidate);
    tracing::info!(
        "Added {} transaction {} for {}",
        transaction.transaction_type,
        transaction.id,
        transaction.amount
    );

    (
        HxRedirect(format!(
            "{}?added={}",
            endpoints::DASHBOARD_VIEW,
            transaction.id
        )),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

/// The query for [get_category_field].
#[derive(Debug, Deserialize)]
pub struct CategoryFieldQuery {
    /// The transaction type to list categories for.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

/// A route handler that renders the category select for a transaction type.
///
/// The form swaps this in whenever the selected type changes.
pub async fn get_category_field(Query(query): Query<CategoryFieldQuery>) -> Markup {
    category_field(query.transaction_type)
}

/// Renders the category select with the categories for `transaction_type`.
pub fn category_field(transaction_type: TransactionType) -> Markup {
    html! {
        div id="category-field"
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Categoria"
            }

            select
                name="category"
                id="category"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" disabled selected { "Selecione a categoria" }

                @for category in categories_for(transaction_type) {
                    option value=(category) { (category) }
                }
            }
        }
    }
}

/// Renders the card with the form for adding a transaction.
///
/// The type defaults to expense and the date to `today`.
pub fn transaction_form(today: Date) -> Markup {
    let default_type = TransactionType::Expense;

    html! {
        section class=(CARD_STYLE)
        {
            h2 class="text-xl font-bold" { "Nova Transação" }
            p class="mb-4 text-sm text-gray-500 dark:text-gray-400"
            {
                "Adicione uma nova receita ou despesa ao seu orçamento"
            }

            form
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target-error="#alert-container"
                class="space-y-4"
            {
                div
                {
                    label
                        for="description"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Descrição"
                    }

                    input
                        name="description"
                        id="description"
                        type="text"
                        placeholder="Ex: Supermercado, Salário..."
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div class="grid grid-cols-1 md:grid-cols-2 gap-4"
                {
                    div
                    {
                        label
                            for="amount"
                            class=(FORM_LABEL_STYLE)
                        {
                            "Valor (R$)"
                        }

                        input
                            name="amount"
                            id="amount"
                            type="number"
                            step="0.01"
                            min="0.01"
                            max="999999999.99"
                            placeholder="0,00"
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    div
                    {
                        label
                            for="date"
                            class=(FORM_LABEL_STYLE)
                        {
                            "Data"
                        }

                        input
                            name="date"
                            id="date"
                            type="date"
                            value=(today)
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                div class="grid grid-cols-1 md:grid-cols-2 gap-4"
                {
                    div
                    {
                        label
                            for="type"
                            class=(FORM_LABEL_STYLE)
                        {
                            "Tipo"
                        }

                        select
                            name="type"
                            id="type"
                            required
                            hx-get=(endpoints::CATEGORY_FIELD)
                            hx-trigger="change"
                            hx-target="#category-field"
                            hx-swap="outerHTML"
                            class=(FORM_TEXT_INPUT_STYLE)
                        {
                            @for transaction_type in [TransactionType::Income, TransactionType::Expense] {
                                option
                                    value=(transaction_type.as_str())
                                    selected[transaction_type == default_type]
                                {
                                    (transaction_type.label())
                                }
                            }
                        }
                    }

                    (category_field(default_type))
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE)
                {
                    "Adicionar Transação"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::Body,
        extract::{Query, State},
        http::{Response, StatusCode},
        response::IntoResponse,
    };
    use axum_extra::extract::Form;
    use rust_decimal_macros::dec;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        Error,
        persistence::{KeyValueSlot, MemorySlot},
        test_utils::{
            assert_form_input, assert_form_select, assert_form_submit_button,
            assert_hx_endpoint, assert_valid_html, must_get_form, parse_html_fragment,
        },
        transaction::{Transaction, TransactionStore, TransactionType},
    };

    use super::{
        CategoryFieldQuery, CreateTransactionState, TransactionForm, create_transaction_endpoint,
        get_category_field, transaction_form,
    };

    fn get_test_state() -> CreateTransactionState {
        let slot: Box<dyn KeyValueSlot + Send> = Box::new(MemorySlot::new());

        CreateTransactionState {
            store: Arc::new(Mutex::new(TransactionStore::initialize(slot))),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn rent_form() -> TransactionForm {
        TransactionForm {
            description: "Aluguel".to_owned(),
            amount: "1200".to_owned(),
            category: "Moradia".to_owned(),
            transaction_type: TransactionType::Expense,
            date: Some("2024-05-02".to_owned()),
        }
    }

    #[test]
    fn validate_accepts_complete_form() {
        let got = rent_form().validate(date!(2024 - 05 - 20)).unwrap();

        assert_eq!(
            got,
            Transaction::build(
                "Aluguel",
                dec!(1200),
                TransactionType::Expense,
                "Moradia",
                date!(2024 - 05 - 02)
            )
        );
    }

    #[test]
    fn validate_defaults_date_to_today() {
        for date in [None, Some(String::new())] {
            let form = TransactionForm { date, ..rent_form() };

            let got = form.validate(date!(2024 - 05 - 20)).unwrap();

            assert_eq!(got.date, date!(2024 - 05 - 20));
        }
    }

    #[test]
    fn validate_trims_description() {
        let form = TransactionForm {
            description: "  Aluguel \n".to_owned(),
            ..rent_form()
        };

        let got = form.validate(date!(2024 - 05 - 20)).unwrap();

        assert_eq!(got.description, "Aluguel");
    }

    #[test]
    fn validate_rejects_blank_description() {
        for description in ["", "   "] {
            let form = TransactionForm {
                description: description.to_owned(),
                ..rent_form()
            };

            assert_eq!(
                form.validate(date!(2024 - 05 - 20)),
                Err(Error::EmptyDescription)
            );
        }
    }

    #[test]
    fn validate_rejects_non_positive_or_missing_amount() {
        for amount in ["", "0", "0.00", "-5", "abc"] {
            let form = TransactionForm {
                amount: amount.to_owned(),
                ..rent_form()
            };

            assert_eq!(
                form.validate(date!(2024 - 05 - 20)),
                Err(Error::InvalidAmount(amount.to_owned())),
                "want amount {amount:?} to be rejected"
            );
        }
    }

    #[test]
    fn validate_rejects_fractions_of_cents_and_huge_amounts() {
        for amount in [
            "0.001",
            "1234567.123456789012",
            "1000000000",
            "50000000000000000000000000000",
            "999999999999999999999999999999999",
        ] {
            let form = TransactionForm {
                amount: amount.to_owned(),
                ..rent_form()
            };

            assert_eq!(
                form.validate(date!(2024 - 05 - 20)),
                Err(Error::InvalidAmount(amount.to_owned())),
                "want amount {amount:?} to be rejected"
            );
        }
    }

    #[test]
    fn validate_accepts_largest_amount() {
        let form = TransactionForm {
            amount: "999999999,99".to_owned(),
            ..rent_form()
        };

        let got = form.validate(date!(2024 - 05 - 20)).unwrap();

        assert_eq!(got.amount, dec!(999999999.99));
    }

    #[test]
    fn validate_accepts_comma_decimal_separator() {
        let form = TransactionForm {
            amount: "45,99".to_owned(),
            ..rent_form()
        };

        let got = form.validate(date!(2024 - 05 - 20)).unwrap();

        assert_eq!(got.amount, dec!(45.99));
    }

    #[test]
    fn validate_rejects_category_of_other_type() {
        let form = TransactionForm {
            category: "Salário".to_owned(),
            ..rent_form()
        };

        assert_eq!(
            form.validate(date!(2024 - 05 - 20)),
            Err(Error::InvalidCategory("Salário".to_owned()))
        );
    }

    #[test]
    fn validate_rejects_bad_date() {
        let form = TransactionForm {
            date: Some("02/05/2024".to_owned()),
            ..rent_form()
        };

        assert_eq!(
            form.validate(date!(2024 - 05 - 20)),
            Err(Error::InvalidDate("02/05/2024".to_owned()))
        );
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let state = get_test_state();

        let response = create_transaction_endpoint(State(state.clone()), Form(rent_form()))
            .await
            .into_response();

        let store = state.store.lock().unwrap();
        assert_eq!(store.len(), 1);
        let transaction = &store.list()[0];
        assert_eq!(transaction.description, "Aluguel");
        assert_eq!(transaction.amount, dec!(1200));
        assert_redirects_to_dashboard(response, &format!("/dashboard?added={}", transaction.id));
    }

    #[tokio::test]
    async fn invalid_form_creates_nothing() {
        let state = get_test_state();
        let form = TransactionForm {
            amount: "0".to_owned(),
            ..rent_form()
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.store.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_timezone_creates_nothing() {
        let state = CreateTransactionState {
            local_timezone: "Middle/Earth".to_owned(),
            ..get_test_state()
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(rent_form()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(state.store.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn category_field_lists_categories_for_type() {
        let markup = get_category_field(Query(CategoryFieldQuery {
            transaction_type: TransactionType::Income,
        }))
        .await;

        let html = Html::parse_fragment(&markup.into_string());
        assert_valid_html(&html);
        let options: Vec<_> = html
            .select(&Selector::parse("select[name=category] option[value]").unwrap())
            .filter_map(|option| option.value().attr("value"))
            .filter(|value| !value.is_empty())
            .collect();
        assert_eq!(
            options,
            vec!["Salário", "Freelance", "Investimentos", "Outros"]
        );
    }

    #[tokio::test]
    async fn form_posts_to_transactions_api() {
        let response = transaction_form(date!(2024 - 05 - 20)).into_response();

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, "/api/transactions", "hx-post");
        assert_form_input(&form, "description", "text");
        assert_form_input(&form, "amount", "number");
        assert_form_input(&form, "date", "date");
        assert_form_select(&form, "type", "expense");
        assert_form_select(&form, "category", "");
        assert_form_submit_button(&form);
    }

    #[tokio::test]
    async fn form_date_defaults_to_today() {
        let response = transaction_form(date!(2024 - 05 - 20)).into_response();

        let html = parse_html_fragment(response).await;
        let date_input = html
            .select(&Selector::parse("input[name=date]").unwrap())
            .next()
            .expect("No date input found");
        assert_eq!(date_input.value().attr("value"), Some("2024-05-20"));
    }

    #[track_caller]
    fn assert_redirects_to_dashboard(response: Response<Body>, want: &str) {
        let location = response
            .headers()
            .get("hx-redirect")
            .expect("expected response to have the header hx-redirect");
        assert_eq!(location, want, "got redirect to {location:?}, want {want}");
    }
}
