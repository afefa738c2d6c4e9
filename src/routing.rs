//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get},
};

use crate::{
    AppState,
    dashboard::get_dashboard_page,
    endpoints,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_category_field,
        get_transactions_json,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(
            endpoints::TRANSACTIONS_API,
            get(get_transactions_json).post(create_transaction_endpoint),
        )
        .route(endpoints::TRANSACTION, delete(delete_transaction_endpoint))
        .route(endpoints::CATEGORY_FIELD, get(get_category_field))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}


#[cfg(test)]
mod router_tests {
    use axum_test::TestServer;
    use rust_decimal_macros::dec;

    use crate::{
        AppState, build_router, endpoints,
        endpoints::format_endpoint,
        persistence::{KeyValueSlot, MemorySlot, deserialize_transactions},
        transaction::{Transaction, TransactionForm, TransactionType},
    };

    fn get_test_server(slot: MemorySlot) -> TestServer {
        let state = AppState::new(Box::new(slot), "Etc/UTC");

        TestServer::new(build_router(state))
    }

    fn salary_form() -> TransactionForm {
        TransactionForm {
            description: "Salário".to_owned(),
            amount: "3000".to_owned(),
            category: "Salário".to_owned(),
            transaction_type: TransactionType::Income,
            date: None,
        }
    }

    #[tokio::test]
    async fn add_list_and_remove_transaction() {
        let slot = MemorySlot::new();
        let server = get_test_server(slot.clone());

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .form(&salary_form())
            .await;
        response.assert_status_see_other();

        let transactions: Vec<Transaction> =
            server.get(endpoints::TRANSACTIONS_API).await.json();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].amount, dec!(3000));
        assert_eq!(
            response.header("hx-redirect"),
            format!("/dashboard?added={}", transactions[0].id).as_str()
        );

        server
            .delete(&format_endpoint(
                endpoints::TRANSACTION,
                transactions[0].id.as_str(),
            ))
            .await
            .assert_status_ok();

        let transactions: Vec<Transaction> =
            server.get(endpoints::TRANSACTIONS_API).await.json();
        assert!(transactions.is_empty());
        let saved = deserialize_transactions(&slot.load().unwrap().unwrap()).unwrap();
        assert!(saved.is_empty());
    }

    #[tokio::test]
    async fn rejected_form_shows_alert() {
        let server = get_test_server(MemorySlot::new());

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .form(&TransactionForm {
                description: String::new(),
                ..salary_form()
            })
            .await;

        response.assert_status_bad_request();
        assert!(response.text().contains("Descrição obrigatória"));
        let transactions: Vec<Transaction> =
            server.get(endpoints::TRANSACTIONS_API).await.json();
        assert!(transactions.is_empty());
    }

    #[tokio::test]
    async fn huge_amounts_are_rejected_and_dashboard_keeps_working() {
        let server = get_test_server(MemorySlot::new());

        for _ in 0..2 {
            server
                .post(endpoints::TRANSACTIONS_API)
                .form(&TransactionForm {
                    amount: "50000000000000000000000000000".to_owned(),
                    ..salary_form()
                })
                .await
                .assert_status_bad_request();
        }

        server
            .get(endpoints::DASHBOARD_VIEW)
            .await
            .assert_status_ok();
        server
            .get(endpoints::DASHBOARD_VIEW)
            .await
            .assert_status_ok();
        let transactions: Vec<Transaction> =
            server.get(endpoints::TRANSACTIONS_API).await.json();
        assert!(transactions.is_empty());
    }

    #[tokio::test]
    async fn starts_with_saved_transactions() {
        let slot = MemorySlot::with_value(
            r#"[{"id": "1714608000000", "description": "Aluguel", "amount": 1200, "category": "Moradia", "type": "expense", "date": "2024-05-02"}]"#,
        );
        let server = get_test_server(slot);

        let transactions: Vec<Transaction> =
            server.get(endpoints::TRANSACTIONS_API).await.json();

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].id.as_str(), "1714608000000");
    }

    #[tokio::test]
    async fn dashboard_renders() {
        let server = get_test_server(MemorySlot::new());

        let response = server.get(endpoints::DASHBOARD_VIEW).await;

        response.assert_status_ok();
        assert!(response.text().contains("Calculadora de Orçamento"));
    }

    #[tokio::test]
    async fn category_field_follows_type() {
        let server = get_test_server(MemorySlot::new());

        let response = server
            .get(endpoints::CATEGORY_FIELD)
            .add_query_param("type", "expense")
            .await;

        response.assert_status_ok();
        assert!(response.text().contains("Alimentação"));
        assert!(!response.text().contains("Freelance"));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server(MemorySlot::new());

        server.get("/nope").await.assert_status_not_found();
    }
}
