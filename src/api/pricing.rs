use crate::models::{PriceTierOption, ProductCategory};
use super::client::{api_call, decode_list, ApiContext};
use super::error::ApiError;

/// Load priced options for one `(region, category, country)` scope.
///
/// An empty country is left out of the query so the backend falls back to
/// the tenant's default pricing.
pub async fn load_price_options(
    ctx: &ApiContext,
    region: &str,
    category: ProductCategory,
    country: &str,
) -> Result<Vec<PriceTierOption>, ApiError> {
    let mut params = vec![
        ("region".to_string(), region.to_string()),
        ("category".to_string(), category.as_str().to_string()),
    ];
    if !country.trim().is_empty() {
        params.push(("country".to_string(), country.trim().to_uppercase()));
    }
    let payload = api_call(ctx, "GET", "/pricing", None, Some(&params)).await?;
    let options: Vec<PriceTierOption> = decode_list(payload, category.as_str())?;
    tracing::debug!(region, %category, count = options.len(), "loaded price options");
    Ok(options)
}
