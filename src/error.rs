//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, internal_server_error::InternalServerError, not_found::NotFoundError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction was submitted without a description.
    #[error("the transaction description cannot be empty")]
    EmptyDescription,

    /// A transaction was submitted with an amount that is not a positive
    /// number of whole cents below [AMOUNT_LIMIT](crate::transaction::AMOUNT_LIMIT).
    ///
    /// The direction of a transaction is given by its type, so amounts are
    /// always positive magnitudes.
    #[error(
        "the transaction amount must be greater than zero and less than one billion \
         with at most two decimal places, got {0}"
    )]
    InvalidAmount(String),

    /// A transaction was submitted with a category that does not belong to
    /// the categories for its type.
    #[error("\"{0}\" is not a valid category for this transaction type")]
    InvalidCategory(String),

    /// A transaction was submitted with a date that is not in the format
    /// "YYYY-MM-DD".
    #[error("\"{0}\" is not a valid date")]
    InvalidDate(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// The transaction collection could not be converted to or from JSON.
    ///
    /// The string holds the message of the original `serde_json` error.
    #[error("could not (de)serialize transactions as JSON: {0}")]
    SerializationError(String),

    /// A persisted collection parsed as JSON but broke an invariant of the
    /// data model, e.g. a negative amount.
    #[error("the persisted transactions are invalid: {0}")]
    InvalidPersistedData(String),

    /// Could not acquire the lock on the transaction store.
    #[error("could not acquire the transaction store lock")]
    StoreLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::SerializationError(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezone(timezone) => InternalServerError {
                description: "Fuso horário inválido",
                fix: &format!(
                    "Não foi possível obter o fuso horário \"{timezone}\". Verifique as \
                    configurações do servidor e use um nome canônico, por exemplo \
                    \"America/Sao_Paulo\"."
                ),
            }
            .into_response(),
            Error::StoreLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::EmptyDescription => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Descrição obrigatória".to_owned(),
                    details: "Informe uma descrição para a transação.".to_owned(),
                },
            ),
            Error::InvalidAmount(amount) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Valor inválido".to_owned(),
                    details: format!(
                        "O valor deve ser maior que zero, menor que R$ 1.000.000.000,00 \
                         e ter no máximo duas casas decimais, mas foi {amount}."
                    ),
                },
            ),
            Error::InvalidCategory(category) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Categoria inválida".to_owned(),
                    details: format!(
                        "\"{category}\" não é uma categoria válida para o tipo escolhido."
                    ),
                },
            ),
            Error::InvalidDate(date) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Data inválida".to_owned(),
                    details: format!("\"{date}\" não é uma data válida."),
                },
            ),
            Error::InvalidTimezone(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Fuso horário inválido".to_owned(),
                    details: format!(
                        "Não foi possível obter o fuso horário \"{timezone}\". Verifique as \
                        configurações do servidor."
                    ),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Algo deu errado".to_owned(),
                        details: "Ocorreu um erro inesperado, verifique os logs do servidor."
                            .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::Error;

    #[test]
    fn no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }

    #[test]
    fn json_errors_keep_message() {
        let json_error = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let want = json_error.to_string();

        let error: Error = json_error.into();

        assert_eq!(error, Error::SerializationError(want));
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        for error in [
            Error::EmptyDescription,
            Error::InvalidAmount("0".to_owned()),
            Error::InvalidCategory("Pets".to_owned()),
            Error::InvalidDate("ontem".to_owned()),
        ] {
            let response = error.into_alert_response();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn lock_error_is_internal_server_error() {
        let response = Error::StoreLockError.into_alert_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
