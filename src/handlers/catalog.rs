use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::{load_countries, load_price_options, load_regions};
use crate::error::CalculatorError;
use crate::models::{AppState, Country, PriceTierOption, ProductCategory, Region, ValidationErrors};
use crate::pricing::{resolve_tier_currency, resolve_unit_price};

use super::helpers::lock_session;

/// GET /api/regions
pub async fn regions_get(State(state): State<AppState>) -> Result<Json<Vec<Region>>, CalculatorError> {
    Ok(Json(load_regions(&state.api).await?))
}

/// GET /api/countries
pub async fn countries_get(State(state): State<AppState>) -> Result<Json<Vec<Country>>, CalculatorError> {
    Ok(Json(load_countries(&state.api).await?))
}

#[derive(Debug, Deserialize)]
pub struct PricingQuery {
    pub region: Option<String>,
    pub category: Option<String>,
    pub country: Option<String>,
}

/// A tier option with its resolved unit price and currency.
#[derive(Debug, Serialize)]
pub struct PricedOption {
    #[serde(flatten)]
    pub option: PriceTierOption,
    pub resolved_unit_price: f64,
    pub resolved_currency: String,
}

/// GET /api/pricing?region=&category=&country=
pub async fn pricing_get(
    State(state): State<AppState>,
    Query(q): Query<PricingQuery>,
) -> Result<Json<Vec<PricedOption>>, CalculatorError> {
    let mut errors = ValidationErrors::default();
    let region = q.region.as_deref().map(str::trim).unwrap_or("").to_string();
    if region.is_empty() {
        errors.add("region", "Region is required");
    }
    let category = q.category.as_deref().and_then(ProductCategory::from_str);
    if category.is_none() {
        errors.add("category", "Unknown product category");
    }
    let category = errors.into_result(category)?.unwrap_or(ProductCategory::ComputeInstance);

    let (country, currency) = {
        let session = lock_session(&state);
        (
            q.country.clone().unwrap_or_else(|| session.country()),
            session.currency.currency().to_string(),
        )
    };

    let options = load_price_options(&state.api, &region, category, &country).await?;
    let priced = options
        .into_iter()
        .map(|option| PricedOption {
            resolved_unit_price: resolve_unit_price(&option),
            resolved_currency: resolve_tier_currency(&option, Some(&currency)),
            option,
        })
        .collect();
    Ok(Json(priced))
}
