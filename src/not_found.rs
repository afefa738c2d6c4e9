//! The 404 page.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// Marker for responses that should render the 404 page.
pub struct NotFoundError;

impl IntoResponse for NotFoundError {
    fn into_response(self) -> Response {
        (
            StatusCode::NOT_FOUND,
            Html(
                error_view(
                    "Não encontrado",
                    "404",
                    "Página não encontrada.",
                    "O endereço pode estar errado ou a página foi removida.",
                )
                .into_string(),
            ),
        )
            .into_response()
    }
}

/// Route handler for any path that does not match a route.
pub async fn get_404_not_found() -> Response {
    NotFoundError.into_response()
}
