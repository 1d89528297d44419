use futures_util::future::join_all;
use rust_decimal::Decimal;

use crate::api::{load_price_options, request_pricing, submit_quote, ApiContext};
use crate::error::CalculatorError;
use crate::models::{
    DiscountSpec, ProductCategory, QuoteResponse, QuoteSubmission, StorageDisplay, StorageDraft, StorageItem,
};
use crate::pricing::{aggregate, estimate_pricing, find_tier, resolve_tier_currency, resolve_unit_price, PriceBook, QuoteSummary};

use crate::utils::{to_decimal, to_f64};

use super::quote_service::{build_pricing_payload, build_quote_payload};
use super::workload_service::Workload;

/// Resolve a storage draft against the region's object-storage tiers.
pub async fn resolve_storage_item(
    ctx: &ApiContext,
    draft: &StorageDraft,
    country: &str,
    calculator_currency: &str,
) -> Result<StorageItem, CalculatorError> {
    let request = draft.validate()?;
    let options = load_price_options(ctx, &request.region, ProductCategory::ObjectStorageConfiguration, country).await?;
    let tier = find_tier(&options, &request.tier_id).ok_or_else(|| CalculatorError::UnknownTier {
        tier_id: request.tier_id.clone(),
        region: request.region.clone(),
    })?;

    let unit_price = to_decimal(resolve_unit_price(tier));
    let total = unit_price * Decimal::from(request.quantity) * Decimal::from(request.months);
    let (unit_price, total_price) = (to_f64(unit_price), to_f64(total));
    let currency = resolve_tier_currency(tier, Some(calculator_currency));
    tracing::debug!(tier = %request.tier_id, unit_price, total_price, %currency, "storage tier priced");

    Ok(StorageItem {
        region: request.region,
        tier_id: request.tier_id,
        productable_id: tier.productable_id(),
        quantity: request.quantity,
        months: request.months,
        unit_price,
        total_price,
        currency,
        display: Some(StorageDisplay {
            tier_name: Some(tier.display_name()),
            region_name: None,
        }),
    })
}

/// Fetch every price table the workload needs, concurrently. Tables that
/// fail to load are left out and price at zero.
pub async fn load_price_book(ctx: &ApiContext, workload: &Workload, country: &str) -> PriceBook {
    let keys = PriceBook::required_keys(&workload.items);
    let fetches = keys.iter().map(|(region, category)| async move {
        let result = load_price_options(ctx, region, *category, country).await;
        (region, *category, result)
    });

    let mut book = PriceBook::default();
    for (region, category, result) in join_all(fetches).await {
        match result {
            Ok(options) => book.insert(region, category, options),
            Err(e) => tracing::warn!(%e, region = %region, %category, "price table unavailable"),
        }
    }
    book
}

/// Price the workload for the summary step.
///
/// Uses the backend aggregate from a preview `/multi-quote` call; if that
/// fails or comes back without pricing, falls back to a local estimate.
pub async fn price_workload(
    ctx: &ApiContext,
    workload: &Workload,
    country: &str,
    currency: &str,
    discount: Option<&DiscountSpec>,
) -> QuoteSummary {
    if workload.is_empty() {
        return aggregate(None, &[], Some(currency)).with_discount_label(discount);
    }

    let payload = build_pricing_payload(workload, country, discount);
    let backend = match request_pricing(ctx, &payload).await {
        Ok(Some(pricing)) => Some(pricing),
        Ok(None) => {
            tracing::warn!("backend returned no pricing aggregate; estimating locally");
            None
        }
        Err(e) => {
            tracing::warn!(%e, "backend pricing unavailable; estimating locally");
            None
        }
    };

    match backend {
        Some(pricing) => aggregate(Some(&pricing), &workload.storage, Some(currency)).with_discount_label(discount),
        None => {
            let book = load_price_book(ctx, workload, country).await;
            let estimate = estimate_pricing(&workload.items, &book, currency);
            aggregate(Some(&estimate), &workload.storage, Some(currency))
                .with_discount_label(discount)
                .mark_estimated()
        }
    }
}

/// Validate and send an invoice/lead request.
pub async fn submit(
    ctx: &ApiContext,
    workload: &Workload,
    country: &str,
    submission: &QuoteSubmission,
    discount: Option<&DiscountSpec>,
) -> Result<QuoteResponse, CalculatorError> {
    submission.validate()?;
    if let Some(d) = discount {
        d.validate()?;
    }
    let payload = build_quote_payload(workload, country, submission, discount);
    Ok(submit_quote(ctx, &payload).await?)
}
