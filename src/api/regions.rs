use crate::models::Region;
use super::client::{api_call, decode_list, ApiContext};
use super::error::ApiError;

/// Load the regions the current tenant can price in.
pub async fn load_regions(ctx: &ApiContext) -> Result<Vec<Region>, ApiError> {
    let payload = api_call(ctx, "GET", "/regions", None, None).await?;
    let regions: Vec<Region> = decode_list(payload, "regions")?;
    Ok(regions
        .into_iter()
        .filter(|r| r.is_active.unwrap_or(true))
        .collect())
}
