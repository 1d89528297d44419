use serde::Deserialize;

use super::discount::DiscountSpec;
use super::quote_request::QuoteSubmission;
use super::storage_item::StorageDraft;
use super::workload_item::WorkloadDraft;

/// Workload description read by `quoter quote <file>`.
///
/// ```json
/// {
///   "country_code": "NG",
///   "workloads": [{"region": "lagos-1", "compute_instance_id": 4, "os_image_id": 2}],
///   "storage": [{"region": "lagos-1", "tier_id": "hot", "quantity": 2, "months": 12}],
///   "discount": {"type": "percent", "value": 10, "label": "Launch"},
///   "submission": {"mode": "invoice", "email": "ops@example.com", "bill_to_name": "Ops Team"}
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteFile {
    #[serde(default, alias = "country")]
    pub country_code: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, alias = "items")]
    pub workloads: Vec<WorkloadDraft>,
    #[serde(default, alias = "object_storage_items")]
    pub storage: Vec<StorageDraft>,
    #[serde(default)]
    pub discount: Option<DiscountSpec>,
    #[serde(default)]
    pub submission: Option<QuoteSubmission>,
}

impl QuoteFile {
    pub fn parse(text: &str) -> Result<QuoteFile, serde_json::Error> {
        serde_json::from_str(text)
    }
}
