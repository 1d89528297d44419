use crate::models::Country;
use super::client::{api_call, decode_list, ApiContext};
use super::error::ApiError;

/// Load billing countries with their currency fields.
pub async fn load_countries(ctx: &ApiContext) -> Result<Vec<Country>, ApiError> {
    let payload = api_call(ctx, "GET", "/countries", None, None).await?;
    decode_list(payload, "countries")
}
