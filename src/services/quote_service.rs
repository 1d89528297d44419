use std::path::{Path, PathBuf};

use base64::{engine::general_purpose, Engine as _};
use serde_json::{json, Map, Value};

use crate::error::CalculatorError;
use crate::models::{DiscountSpec, LeadMeta, QuoteResponse, QuoteSubmission};
use crate::utils::safe_pdf_filename;

use super::workload_service::Workload;

const DISPLAY_KEY: &str = "_display";

/// Serialise items for the backend with UI-only `_display` fields removed.
fn wire_items<T: serde::Serialize>(items: &[T]) -> Vec<Value> {
    items
        .iter()
        .filter_map(|item| serde_json::to_value(item).ok())
        .map(|mut v| {
            strip_display_fields(&mut v);
            v
        })
        .collect()
}

/// Remove every `_display` key, at any depth.
pub fn strip_display_fields(value: &mut Value) {
    match value {
        Value::Object(obj) => {
            obj.remove(DISPLAY_KEY);
            for v in obj.values_mut() {
                strip_display_fields(v);
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(strip_display_fields),
        _ => {}
    }
}

fn base_payload(workload: &Workload, country_code: &str, discount: Option<&DiscountSpec>) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert("items".into(), Value::Array(wire_items(&workload.items)));
    body.insert("object_storage_items".into(), Value::Array(wire_items(&workload.storage)));
    body.insert("country_code".into(), Value::from(country_code.trim().to_uppercase()));
    if let Some(d) = discount {
        body.insert("global_discount".into(), json!(d));
    }
    body
}

/// Payload asking the backend for the aggregate only.
pub fn build_pricing_payload(workload: &Workload, country_code: &str, discount: Option<&DiscountSpec>) -> Value {
    let mut body = base_payload(workload, country_code, discount);
    body.insert("preview".into(), Value::Bool(true));
    body.insert("create_lead".into(), Value::Bool(false));
    body.insert("generate_invoice".into(), Value::Bool(false));
    Value::Object(body)
}

/// Payload for an invoice or lead submission. A lead is always requested.
pub fn build_quote_payload(
    workload: &Workload,
    country_code: &str,
    submission: &QuoteSubmission,
    discount: Option<&DiscountSpec>,
) -> Value {
    let mut body = base_payload(workload, country_code, discount);
    body.insert("create_lead".into(), Value::Bool(true));
    body.insert("generate_invoice".into(), Value::Bool(submission.generates_invoice()));
    let country = country_code.trim().to_uppercase();
    match submission {
        QuoteSubmission::Invoice(invoice) => {
            body.insert("invoice".into(), json!(invoice));
            body.insert("lead".into(), json!(LeadMeta::from_invoice(invoice, &country)));
        }
        QuoteSubmission::Lead(lead) => {
            let mut lead = lead.clone();
            if lead.country.trim().is_empty() {
                lead.country = country;
            }
            body.insert("lead".into(), json!(lead));
        }
    }
    Value::Object(body)
}

/// Decode a base64 PDF, tolerating a `data:` URI prefix and line breaks.
pub fn decode_pdf(encoded: &str) -> Result<Vec<u8>, CalculatorError> {
    let payload = match encoded.split_once("base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => encoded,
    };
    let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    general_purpose::STANDARD
        .decode(cleaned.as_bytes())
        .map_err(|e| CalculatorError::Invoice(format!("invalid base64 PDF: {}", e)))
}

fn default_invoice_name(index: usize, total: usize) -> String {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    if total > 1 {
        format!("invoice-{}-{}.pdf", stamp, index + 1)
    } else {
        format!("invoice-{}.pdf", stamp)
    }
}

/// Write every returned invoice into `dir`. Entries without a PDF are skipped.
pub async fn save_invoices(response: &QuoteResponse, dir: &Path) -> Result<Vec<PathBuf>, CalculatorError> {
    let with_pdf: Vec<_> = response
        .invoices
        .iter()
        .filter_map(|inv| inv.pdf.as_deref().filter(|p| !p.trim().is_empty()).map(|pdf| (inv, pdf)))
        .collect();
    if with_pdf.is_empty() {
        return Ok(Vec::new());
    }

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| CalculatorError::Invoice(format!("cannot create {}: {}", dir.display(), e)))?;

    let total = with_pdf.len();
    let mut written = Vec::with_capacity(total);
    for (index, (invoice, pdf)) in with_pdf.into_iter().enumerate() {
        let bytes = decode_pdf(pdf)?;
        let name = invoice
            .filename
            .as_deref()
            .and_then(safe_pdf_filename)
            .unwrap_or_else(|| default_invoice_name(index, total));
        let path = dir.join(name);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| CalculatorError::Invoice(format!("cannot write {}: {}", path.display(), e)))?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "invoice saved");
        written.push(path);
    }
    Ok(written)
}
