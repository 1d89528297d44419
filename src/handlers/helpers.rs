use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::sync::MutexGuard;

use crate::api::ApiError;
use crate::error::CalculatorError;
use crate::models::{AppState, CalculatorSession};

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "message": message.into() }))).into_response()
}

impl IntoResponse for CalculatorError {
    fn into_response(self) -> Response {
        match &self {
            CalculatorError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "message": self.to_string(), "errors": errors })),
            )
                .into_response(),
            CalculatorError::Api(ApiError::NotConfigured) => {
                json_error(StatusCode::SERVICE_UNAVAILABLE, self.to_string())
            }
            CalculatorError::Api(_) => {
                tracing::warn!(error = %self, "backend call failed");
                json_error(StatusCode::BAD_GATEWAY, self.to_string())
            }
            CalculatorError::UnknownTier { .. } | CalculatorError::NoSuchItem { .. } => {
                json_error(StatusCode::NOT_FOUND, self.to_string())
            }
            CalculatorError::InvalidStep { .. } => json_error(StatusCode::CONFLICT, self.to_string()),
            CalculatorError::Invoice(_) => {
                tracing::error!(error = %self, "invoice handling failed");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        }
    }
}

/// Lock the calculator session. A poisoned lock still holds usable state.
pub fn lock_session(state: &AppState) -> MutexGuard<'_, CalculatorSession> {
    state
        .session
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Reject edits outside the config step.
pub fn ensure_editable(session: &CalculatorSession, action: &'static str) -> Result<(), CalculatorError> {
    if session.step.allows_editing() {
        Ok(())
    } else {
        Err(CalculatorError::InvalidStep { action, step: session.step })
    }
}
