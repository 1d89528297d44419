use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::storage_item::StorageItem;
use crate::utils::json_converter::{first_present, first_string};
use crate::utils::number::amount;

/// Uniform line shape used by every summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteLine {
    pub name: String,
    pub region: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
    pub currency: Option<String>,
    pub term_months: u32,
    #[serde(default)]
    pub meta: Value,
}

impl QuoteLine {
    /// Normalise a backend line. Key aliases are tried in order; missing or
    /// unreadable numbers read as zero.
    pub fn from_value(raw: &Value) -> QuoteLine {
        let name = first_string(raw, &["name", "product_name", "label", "description"])
            .unwrap_or_else(|| "Item".to_string());
        let region = first_string(raw, &["region", "region_code", "region_name"]).unwrap_or_default();
        let quantity = first_present(raw, &["quantity", "qty", "number_of_instances", "count"])
            .and_then(amount)
            .unwrap_or(0.0);
        let unit_price = first_present(raw, &["unit_price", "price", "unit_amount"])
            .and_then(amount)
            .unwrap_or(0.0);
        let total = first_present(raw, &["total", "total_price", "line_total", "amount"])
            .and_then(amount)
            .unwrap_or(0.0);
        let currency = first_string(raw, &["currency", "currency_code"]).map(|c| c.to_uppercase());
        let term_months = first_present(raw, &["term_months", "months", "term"])
            .and_then(amount)
            .filter(|m| *m > 0.0)
            .map(|m| m as u32)
            .unwrap_or(0);
        let meta = raw.get("meta").cloned().unwrap_or(Value::Null);
        QuoteLine {
            name,
            region,
            quantity,
            unit_price,
            total,
            currency,
            term_months,
            meta,
        }
    }
}

impl From<&StorageItem> for QuoteLine {
    fn from(item: &StorageItem) -> Self {
        let name = item
            .display
            .as_ref()
            .and_then(|d| d.tier_name.clone())
            .unwrap_or_else(|| format!("Object storage ({})", item.tier_id));
        QuoteLine {
            name,
            region: item.region.clone(),
            quantity: item.quantity as f64,
            unit_price: item.unit_price,
            total: item.total_price,
            currency: Some(item.currency.clone()),
            term_months: item.months,
            meta: serde_json::json!({ "tier_id": item.tier_id }),
        }
    }
}
