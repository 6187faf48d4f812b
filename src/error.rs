use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Invalid input{}: {reason}", for_field(.field))]
    #[diagnostic(code(shadowshield::invalid_input))]
    InvalidInput {
        field: Option<String>,
        expected: Option<String>,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    #[diagnostic(code(shadowshield::server))]
    Server(String),
}

fn for_field(field: &Option<String>) -> String {
    field
        .as_deref()
        .map(|f| format!(" for '{f}'"))
        .unwrap_or_default()
}

impl Error {
    pub fn invalid(field: &str, expected: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: Some(field.to_string()),
            expected: Some(expected.to_string()),
            reason: reason.into(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidInput {
                field,
                expected,
                reason,
            } => {
                let body = serde_json::json!({
                    "error": "invalid_input",
                    "field": field,
                    "expected": expected,
                    "message": reason,
                });
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            other => {
                tracing::error!(error = %other, "request failed");
                let body = serde_json::json!({ "error": other.to_string() });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
