use askama::Template;

use crate::models::{CalculatorSession, QuoteLine};
use crate::pricing::{QuoteSummary, StorageSource};
use crate::utils::format_money;

/// A preformatted table row.
pub struct SummaryRow {
    pub name: String,
    pub region: String,
    pub quantity: String,
    pub unit_price: String,
    pub term: String,
    pub total: String,
}

impl SummaryRow {
    fn from_line(line: &QuoteLine, fallback_currency: &str) -> Self {
        let currency = line.currency.as_deref().unwrap_or(fallback_currency);
        SummaryRow {
            name: line.name.clone(),
            region: line.region.clone(),
            quantity: trim_quantity(line.quantity),
            unit_price: format_money(line.unit_price, currency),
            term: format!("{} mo", line.term_months),
            total: format_money(line.total, currency),
        }
    }
}

fn trim_quantity(q: f64) -> String {
    if q.fract() == 0.0 {
        format!("{}", q as i64)
    } else {
        format!("{:.2}", q)
    }
}

#[derive(Template)]
#[template(path = "summary.html")]
pub struct SummaryTemplate {
    pub step: String,
    pub country: String,
    pub currency: String,
    pub has_summary: bool,
    pub estimated: bool,
    pub compute_rows: Vec<SummaryRow>,
    pub storage_rows: Vec<SummaryRow>,
    pub storage_note: String,
    pub subtotal: String,
    pub tax: String,
    pub has_discount: bool,
    pub discount: String,
    pub discount_label: String,
    pub has_pre_discount: bool,
    pub pre_discount_subtotal: String,
    pub total: String,
}

impl SummaryTemplate {
    pub fn from_session(session: &CalculatorSession) -> Self {
        let country = session.country();
        let step = session.step.to_string();
        match &session.last_summary {
            Some(summary) => Self::from_summary(summary, step, country),
            None => SummaryTemplate {
                step,
                country,
                currency: session.currency.currency().to_string(),
                has_summary: false,
                estimated: false,
                compute_rows: Vec::new(),
                storage_rows: Vec::new(),
                storage_note: String::new(),
                subtotal: String::new(),
                tax: String::new(),
                has_discount: false,
                discount: String::new(),
                discount_label: String::new(),
                has_pre_discount: false,
                pre_discount_subtotal: String::new(),
                total: String::new(),
            },
        }
    }

    pub fn from_summary(summary: &QuoteSummary, step: String, country: String) -> Self {
        let cur = summary.currency.as_str();
        let storage_note = match summary.storage_source {
            StorageSource::Backend => "Object storage is included in the totals above.".to_string(),
            StorageSource::Client => format!(
                "Object storage adds {} plus an estimated {} tax.",
                format_money(summary.storage_subtotal, cur),
                format_money(summary.storage_tax, cur)
            ),
        };
        SummaryTemplate {
            step,
            country,
            currency: cur.to_string(),
            has_summary: true,
            estimated: summary.estimated,
            compute_rows: summary.compute_lines.iter().map(|l| SummaryRow::from_line(l, cur)).collect(),
            storage_rows: summary.storage_lines.iter().map(|l| SummaryRow::from_line(l, cur)).collect(),
            storage_note,
            subtotal: format_money(summary.subtotal, cur),
            tax: format_money(summary.tax, cur),
            has_discount: summary.discount != 0.0,
            discount: format_money(-summary.discount, cur),
            discount_label: summary.discount_label.clone().unwrap_or_else(|| "Discount".to_string()),
            has_pre_discount: summary.pre_discount_subtotal.is_some(),
            pre_discount_subtotal: format_money(summary.pre_discount_subtotal.unwrap_or(0.0), cur),
            total: format_money(summary.total, cur),
        }
    }
}
