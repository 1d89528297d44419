use rust_decimal::prelude::*;
use serde::Serialize;

use crate::models::{DiscountSpec, PricingResult, QuoteLine, StorageItem};
use crate::utils::{to_decimal, to_f64};

use super::FALLBACK_CURRENCY;

/// Where the storage lines of a summary came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageSource {
    /// Already folded into the backend totals.
    Backend,
    /// Tracked by the calculator and added on top of the backend totals.
    Client,
}

/// Totals and line tables for the summary step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteSummary {
    pub compute_lines: Vec<QuoteLine>,
    pub storage_lines: Vec<QuoteLine>,
    pub storage_source: StorageSource,
    pub storage_subtotal: f64,
    pub storage_tax: f64,
    pub subtotal: f64,
    pub tax: f64,
    pub discount: f64,
    pub pre_discount_subtotal: Option<f64>,
    pub total: f64,
    pub currency: String,
    pub discount_label: Option<String>,
    /// True when the base figures are a local estimate rather than the backend's.
    pub estimated: bool,
}

impl QuoteSummary {
    pub fn is_empty(&self) -> bool {
        self.compute_lines.is_empty() && self.storage_lines.is_empty()
    }

    pub fn with_discount_label(mut self, discount: Option<&DiscountSpec>) -> Self {
        self.discount_label = discount.map(|d| d.describe(&self.currency));
        self
    }

    pub fn mark_estimated(mut self) -> Self {
        self.estimated = true;
        self
    }
}

/// Combine the backend aggregate with client-tracked storage.
///
/// When the backend reports storage as included (with lines), its figures
/// are used unchanged. Otherwise client storage is added to the base and
/// taxed at the backend's effective rate. The discount is always the
/// backend's; it is never recomputed here.
pub fn aggregate(
    pricing: Option<&PricingResult>,
    storage: &[StorageItem],
    selected_currency: Option<&str>,
) -> QuoteSummary {
    let empty = PricingResult::default();
    let base = pricing.unwrap_or(&empty);
    let compute_lines: Vec<QuoteLine> = base.lines.iter().map(QuoteLine::from_value).collect();

    let (storage_lines, storage_source, storage_subtotal, storage_tax, subtotal, tax, total) =
        match base.included_storage() {
            Some(block) => (
                block.lines.iter().map(QuoteLine::from_value).collect::<Vec<_>>(),
                StorageSource::Backend,
                block.subtotal,
                block.tax,
                base.subtotal,
                base.tax,
                base.total,
            ),
            None => {
                let base_subtotal = to_decimal(base.subtotal);
                let base_tax = to_decimal(base.tax);
                let storage_subtotal: Decimal = storage.iter().map(|s| to_decimal(s.total_price)).sum();
                let storage_tax = if base_subtotal.is_zero() {
                    Decimal::ZERO
                } else {
                    storage_subtotal * base_tax / base_subtotal
                };
                (
                    storage.iter().map(QuoteLine::from).collect(),
                    StorageSource::Client,
                    to_f64(storage_subtotal),
                    to_f64(storage_tax),
                    to_f64(base_subtotal + storage_subtotal),
                    to_f64(base_tax + storage_tax),
                    to_f64(to_decimal(base.total) + storage_subtotal + storage_tax),
                )
            }
        };

    let currency = display_currency(base, &storage_lines, selected_currency);

    QuoteSummary {
        compute_lines,
        storage_lines,
        storage_source,
        storage_subtotal,
        storage_tax,
        subtotal,
        tax,
        discount: base.discount,
        pre_discount_subtotal: base.pre_discount_subtotal,
        total,
        currency,
        discount_label: None,
        estimated: false,
    }
}

/// Backend currency, then the first storage line's, then the calculator's, then USD.
fn display_currency(base: &PricingResult, storage_lines: &[QuoteLine], selected: Option<&str>) -> String {
    [
        base.currency.as_deref(),
        storage_lines.first().and_then(|l| l.currency.as_deref()),
        selected,
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .find(|c| !c.is_empty())
    .map(str::to_uppercase)
    .unwrap_or_else(|| FALLBACK_CURRENCY.to_string())
}
