use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use dealerdesk_core::CoreError;
use dealerdesk_core::validation::ValidationErrors;
use dealerdesk_core::window::WindowError;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error(transparent)]
    InvalidPeriod(#[from] WindowError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
            AuthError::InvalidPeriod(_) => StatusCode::BAD_REQUEST,
            AuthError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AuthError::Validation(errors) => serde_json::json!({ "errors": errors }),
            AuthError::Forbidden(msg) | AuthError::Internal(msg) => {
                serde_json::json!({ "error": msg })
            }
            AuthError::InvalidPeriod(e) => serde_json::json!({ "error": e.to_string() }),
        };
        (status, axum::Json(body)).into_response()
    }
}

impl From<CoreError> for AuthError {
    fn from(e: CoreError) -> Self {
        AuthError::Internal(e.to_string())
    }
}
