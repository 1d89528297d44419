use std::collections::{BTreeSet, HashMap};

use rust_decimal::prelude::*;
use serde_json::json;

use crate::models::{PriceTierOption, PricingResult, ProductCategory, WorkloadItem};
use crate::utils::{to_decimal, to_f64};

use super::resolver::{find_tier, resolve_tier_currency, resolve_unit_price};

/// Price tables fetched for each `(region, category)` a workload touches.
#[derive(Debug, Clone, Default)]
pub struct PriceBook {
    tables: HashMap<(String, ProductCategory), Vec<PriceTierOption>>,
}

impl PriceBook {
    /// Every `(region, category)` pair needed to estimate `items`, deduplicated.
    pub fn required_keys(items: &[WorkloadItem]) -> Vec<(String, ProductCategory)> {
        let mut keys = BTreeSet::new();
        for item in items {
            let region = &item.region;
            keys.insert((region.clone(), ProductCategory::ComputeInstance));
            keys.insert((region.clone(), ProductCategory::OsImage));
            if !item.volume_types.is_empty() {
                keys.insert((region.clone(), ProductCategory::VolumeType));
            }
            if item.bandwidth_id.is_some() {
                keys.insert((region.clone(), ProductCategory::Bandwidth));
            }
            if item.floating_ip_id.is_some() {
                keys.insert((region.clone(), ProductCategory::Ip));
            }
            if item.cross_connect_id.is_some() {
                keys.insert((region.clone(), ProductCategory::CrossConnect));
            }
        }
        keys.into_iter().collect()
    }

    pub fn insert(&mut self, region: &str, category: ProductCategory, options: Vec<PriceTierOption>) {
        self.tables.insert((region.to_string(), category), options);
    }

    pub fn options(&self, region: &str, category: ProductCategory) -> &[PriceTierOption] {
        self.tables
            .get(&(region.to_string(), category))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn lookup(&self, region: &str, category: ProductCategory, id: &str) -> Option<&PriceTierOption> {
        find_tier(self.options(region, category), id)
    }
}

/// Approximate the backend aggregate from price tables.
///
/// Tax and discount are zero: neither can be derived client-side. Tiers
/// missing from the book price at zero.
pub fn estimate_pricing(items: &[WorkloadItem], book: &PriceBook, currency: &str) -> PricingResult {
    let mut lines = Vec::new();
    let mut subtotal = Decimal::ZERO;

    for item in items {
        let instances = Decimal::from(item.number_of_instances);
        let months = Decimal::from(item.months);
        let mut components: Vec<(ProductCategory, &str, Decimal)> = vec![
            (ProductCategory::ComputeInstance, item.compute_instance_id.as_str(), instances),
            (ProductCategory::OsImage, item.os_image_id.as_str(), instances),
        ];
        for volume in &item.volume_types {
            components.push((
                ProductCategory::VolumeType,
                volume.volume_type_id.as_str(),
                Decimal::from(volume.storage_size_gb) * instances,
            ));
        }
        if let Some(id) = item.bandwidth_id.as_deref() {
            components.push((ProductCategory::Bandwidth, id, Decimal::from(item.bandwidth_count.unwrap_or(1))));
        }
        if let Some(id) = item.floating_ip_id.as_deref() {
            components.push((ProductCategory::Ip, id, Decimal::from(item.floating_ip_count.unwrap_or(1))));
        }
        if let Some(id) = item.cross_connect_id.as_deref() {
            components.push((ProductCategory::CrossConnect, id, Decimal::ONE));
        }

        for (category, id, quantity) in components {
            let tier = book.lookup(&item.region, category, id);
            let unit_price = tier.map(|t| to_decimal(resolve_unit_price(t))).unwrap_or(Decimal::ZERO);
            let total = unit_price * quantity * months;
            let name = tier
                .map(|t| format!("{}: {}", category.label(), t.display_name()))
                .unwrap_or_else(|| format!("{}: {}", category.label(), id));
            subtotal += total;
            lines.push(json!({
                "name": name,
                "region": item.region,
                "quantity": to_f64(quantity),
                "unit_price": to_f64(unit_price),
                "total": to_f64(total),
                "currency": tier.map(|t| resolve_tier_currency(t, Some(currency))).unwrap_or_else(|| currency.to_string()),
                "term_months": item.months,
                "meta": {"category": category.as_str(), "id": id, "priced": tier.is_some()},
            }));
        }
    }

    let subtotal = to_f64(subtotal);
    PricingResult {
        subtotal,
        tax: 0.0,
        discount: 0.0,
        total: subtotal,
        currency: Some(currency.to_string()),
        pre_discount_subtotal: Some(subtotal),
        lines,
        object_storage: None,
    }
}
