use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::api::ApiContext;
use crate::models::{Country, DiscountSpec};
use crate::pricing::{CurrencyTracker, QuoteSummary};
use crate::services::Workload;
use crate::wizard::CalculatorStep;

/// The single calculator hosted by the web console.
#[derive(Debug, Clone, Default)]
pub struct CalculatorSession {
    pub workload: Workload,
    pub step: CalculatorStep,
    pub currency: CurrencyTracker,
    pub discount: Option<DiscountSpec>,
    pub last_summary: Option<QuoteSummary>,
    /// The country was chosen before the country list could be read.
    pub currency_pending: bool,
}

/// Read-only view of a session returned by the JSON API.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub step: CalculatorStep,
    pub country: Option<String>,
    pub currency: String,
    pub workload: Workload,
    pub discount: Option<DiscountSpec>,
    pub summary: Option<QuoteSummary>,
}

impl CalculatorSession {
    pub fn new(default_currency: &str) -> Self {
        Self {
            currency: CurrencyTracker::new(default_currency),
            ..Default::default()
        }
    }

    pub fn country(&self) -> String {
        self.currency.country().unwrap_or_default().to_string()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            step: self.step,
            country: self.currency.country().map(str::to_string),
            currency: self.currency.currency().to_string(),
            workload: self.workload.clone(),
            discount: self.discount.clone(),
            summary: self.last_summary.clone(),
        }
    }

    /// Any edit invalidates the last summary.
    pub fn touch(&mut self) {
        self.last_summary = None;
    }

    pub fn select_country(&mut self, country_code: &str, countries: &[Country]) {
        self.currency.select_country(country_code, countries);
        self.currency_pending = countries.is_empty() && !country_code.trim().is_empty();
        self.touch();
    }

    /// Settle a country picked without a country list. No-op otherwise.
    pub fn resolve_pending_currency(&mut self, countries: &[Country]) {
        if !self.currency_pending || countries.is_empty() {
            return;
        }
        let country = self.country();
        let before = self.currency.currency().to_string();
        if self.currency.select_country(&country, countries) != before {
            self.touch();
        }
        self.currency_pending = false;
    }

    /// Close a submission that is still in flight. A step moved by `back`
    /// meanwhile stays where it is.
    pub fn complete_submission(&mut self) -> bool {
        if self.step != CalculatorStep::Submission {
            return false;
        }
        self.step = CalculatorStep::Done;
        true
    }
}

#[derive(Clone)]
pub struct AppState {
    pub api: ApiContext,
    pub default_currency: String,
    pub invoice_dir: std::path::PathBuf,
    pub session: Arc<Mutex<CalculatorSession>>,
}

impl AppState {
    pub fn new(api: ApiContext, default_currency: &str, default_country: &str, invoice_dir: std::path::PathBuf) -> Self {
        let mut session = CalculatorSession::new(default_currency);
        if !default_country.trim().is_empty() {
            // Currency follows once the country list is first read.
            session.select_country(default_country, &[]);
        }
        Self {
            api,
            default_currency: default_currency.to_string(),
            invoice_dir,
            session: Arc::new(Mutex::new(session)),
        }
    }
}
