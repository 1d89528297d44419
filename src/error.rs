/// Error types for calculator operations
use thiserror::Error;

use crate::api::ApiError;
use crate::models::ValidationErrors;
use crate::wizard::CalculatorStep;

/// Errors surfaced by the calculator services
#[derive(Debug, Error)]
pub enum CalculatorError {
    /// Form input failed validation; nothing was sent to the backend
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// Backend call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The requested storage tier is not offered in the region
    #[error("Storage tier '{tier_id}' is not available in region '{region}'")]
    UnknownTier { tier_id: String, region: String },

    /// No item at the given position
    #[error("No {what} at position {index}")]
    NoSuchItem { what: &'static str, index: usize },

    /// Action not allowed in the current step
    #[error("Cannot {action} from the {step} step")]
    InvalidStep { action: &'static str, step: CalculatorStep },

    /// Generated invoice could not be decoded or written
    #[error("Invoice error: {0}")]
    Invoice(String),
}
