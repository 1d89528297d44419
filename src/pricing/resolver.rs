use crate::models::{PriceTierOption, PriceView};

use super::FALLBACK_CURRENCY;

/// Unit price of a tier option.
///
/// Walks effective → tenant → admin views (local price before USD), then the
/// option's own `price_local`, `price_usd` and `unit_price`. The first finite
/// value wins; with none set the price is 0.
pub fn resolve_unit_price(option: &PriceTierOption) -> f64 {
    let (effective, tenant, admin) = views(option);
    let chain = [
        effective.and_then(|v| v.price_local),
        effective.and_then(|v| v.price_usd),
        tenant.and_then(|v| v.price_local),
        tenant.and_then(|v| v.price_usd),
        admin.and_then(|v| v.price_local),
        admin.and_then(|v| v.price_usd),
        option.price_local,
        option.price_usd,
        option.unit_price,
    ];
    chain
        .into_iter()
        .flatten()
        .find(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Display currency of a tier option, with the calculator's currency and
/// then USD as the last fallbacks.
pub fn resolve_tier_currency(option: &PriceTierOption, calculator_default: Option<&str>) -> String {
    let (effective, tenant, admin) = views(option);
    [
        effective.and_then(|v| v.currency.as_deref()),
        tenant.and_then(|v| v.currency.as_deref()),
        admin.and_then(|v| v.currency.as_deref()),
        option.currency.as_deref(),
        calculator_default,
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .find(|c| !c.is_empty())
    .map(str::to_uppercase)
    .unwrap_or_else(|| FALLBACK_CURRENCY.to_string())
}

/// Find the option a stored id refers to.
pub fn find_tier<'a>(options: &'a [PriceTierOption], tier_id: &str) -> Option<&'a PriceTierOption> {
    options.iter().find(|o| o.matches(tier_id))
}

fn views(option: &PriceTierOption) -> (Option<&PriceView>, Option<&PriceView>, Option<&PriceView>) {
    match option.pricing.as_ref() {
        Some(p) => (p.effective.as_ref(), p.tenant.as_ref(), p.admin.as_ref()),
        None => (None, None, None),
    }
}
