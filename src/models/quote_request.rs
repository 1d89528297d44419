use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::pricing_result::PricingResult;
use super::validation::ValidationErrors;

/// Invoice metadata entered on the submission step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceMeta {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub bill_to_name: String,
    #[serde(default)]
    pub notes: String,
}

/// CRM lead contact details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadMeta {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub country: String,
}

impl LeadMeta {
    /// Lead contact derived from an invoice's bill-to details.
    pub fn from_invoice(invoice: &InvoiceMeta, country: &str) -> LeadMeta {
        let name = invoice.bill_to_name.trim();
        let (first_name, last_name) = match name.split_once(char::is_whitespace) {
            Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
            None => (name.to_string(), String::new()),
        };
        LeadMeta {
            first_name,
            last_name,
            email: invoice.email.trim().to_string(),
            country: country.to_string(),
            ..Default::default()
        }
    }
}

/// What the final step asks the backend to produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum QuoteSubmission {
    /// Generate an invoice PDF; a lead is always created with it.
    Invoice(InvoiceMeta),
    /// Create a CRM lead only.
    Lead(LeadMeta),
}

impl QuoteSubmission {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        match self {
            QuoteSubmission::Invoice(meta) => {
                if meta.email.trim().is_empty() {
                    errors.add("email", "Email is required");
                }
                if meta.bill_to_name.trim().is_empty() {
                    errors.add("bill_to_name", "Bill-to name is required");
                }
            }
            QuoteSubmission::Lead(meta) => {
                if meta.first_name.trim().is_empty() {
                    errors.add("first_name", "First name is required");
                }
                if meta.email.trim().is_empty() {
                    errors.add("email", "Email is required");
                }
            }
        }
        errors.into_result(())
    }

    pub fn generates_invoice(&self) -> bool {
        matches!(self, QuoteSubmission::Invoice(_))
    }
}

/// A generated invoice document, base64-encoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedInvoice {
    #[serde(default)]
    pub pdf: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

/// Response body of `POST /multi-quote`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    #[serde(default)]
    pub invoices: Vec<GeneratedInvoice>,
    #[serde(default)]
    pub pricing: Option<PricingResult>,
    #[serde(default)]
    pub lead: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_from_invoice_splits_name() {
        let invoice = InvoiceMeta {
            bill_to_name: "Ada  Lovelace King".into(),
            email: " ada@example.com ".into(),
            ..Default::default()
        };
        let lead = LeadMeta::from_invoice(&invoice, "GB");
        assert_eq!(lead.first_name, "Ada");
        assert_eq!(lead.last_name, "Lovelace King");
        assert_eq!(lead.email, "ada@example.com");
        assert_eq!(lead.country, "GB");
    }

    #[test]
    fn submission_is_tagged_by_mode() {
        let s: QuoteSubmission = serde_json::from_str(
            r#"{"mode":"lead","first_name":"Grace","email":"g@example.com"}"#,
        )
        .unwrap();
        assert!(!s.generates_invoice());
        assert!(s.validate().is_ok());
    }

    #[test]
    fn invoice_requires_email_and_name() {
        let err = QuoteSubmission::Invoice(InvoiceMeta::default()).validate().unwrap_err();
        assert_eq!(err.get("email"), Some("Email is required"));
        assert_eq!(err.get("bill_to_name"), Some("Bill-to name is required"));
    }
}
