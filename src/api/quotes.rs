use serde_json::Value;

use crate::models::{PricingResult, QuoteResponse};
use super::client::{api_call, unwrap_envelope, ApiContext};
use super::error::ApiError;

const MULTI_QUOTE_ENDPOINT: &str = "/multi-quote";

/// Ask the backend to price a preview payload. `Ok(None)` when the response
/// carries no aggregate.
pub async fn request_pricing(ctx: &ApiContext, payload: &Value) -> Result<Option<PricingResult>, ApiError> {
    let response = post_multi_quote(ctx, payload).await?;
    Ok(response.pricing)
}

/// Submit an invoice/lead request.
pub async fn submit_quote(ctx: &ApiContext, payload: &Value) -> Result<QuoteResponse, ApiError> {
    let response = post_multi_quote(ctx, payload).await?;
    tracing::info!(
        invoices = response.invoices.len(),
        lead = response.lead.is_some(),
        "quote submitted"
    );
    Ok(response)
}

async fn post_multi_quote(ctx: &ApiContext, payload: &Value) -> Result<QuoteResponse, ApiError> {
    let raw = api_call(ctx, "POST", MULTI_QUOTE_ENDPOINT, Some(payload), None).await?;
    match unwrap_envelope(raw) {
        Value::Null => Ok(QuoteResponse::default()),
        body => serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string())),
    }
}
