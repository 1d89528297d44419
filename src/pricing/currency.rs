use crate::models::Country;

use super::FALLBACK_CURRENCY;

/// Currency for a billing country.
///
/// Falls back to `previous` (the calculator's current selection) and then
/// to USD when the country is unknown or has no currency configured.
pub fn resolve_country_currency(country_code: &str, countries: &[Country], previous: Option<&str>) -> String {
    countries
        .iter()
        .find(|c| c.matches(country_code))
        .and_then(Country::currency_hint)
        .or_else(|| {
            previous
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_uppercase)
        })
        .unwrap_or_else(|| FALLBACK_CURRENCY.to_string())
}

/// Sticky currency selection that follows the billing country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyTracker {
    country: Option<String>,
    currency: String,
}

impl Default for CurrencyTracker {
    fn default() -> Self {
        Self::new(FALLBACK_CURRENCY)
    }
}

impl CurrencyTracker {
    pub fn new(initial_currency: &str) -> Self {
        let initial = initial_currency.trim();
        Self {
            country: None,
            currency: if initial.is_empty() {
                FALLBACK_CURRENCY.to_string()
            } else {
                initial.to_uppercase()
            },
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Re-resolve for a (possibly unchanged) country and return the result.
    pub fn select_country(&mut self, country_code: &str, countries: &[Country]) -> &str {
        let code = country_code.trim().to_uppercase();
        self.currency = resolve_country_currency(&code, countries, Some(&self.currency));
        self.country = if code.is_empty() { None } else { Some(code) };
        &self.currency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn countries() -> Vec<Country> {
        serde_json::from_value(json!([
            {"iso2": "NG", "name": "Nigeria", "currency_code": "ngn"},
            {"code": "gb", "name": "United Kingdom", "currencyCode": "GBP"},
            {"iso2": "KE", "name": "Kenya", "currency_symbol": "ksh"},
            {"iso2": "AQ", "name": "Antarctica"}
        ]))
        .unwrap()
    }

    #[test]
    fn matches_case_insensitively() {
        assert_eq!(resolve_country_currency("ng", &countries(), None), "NGN");
        assert_eq!(resolve_country_currency("GB", &countries(), None), "GBP");
        assert_eq!(resolve_country_currency("ke", &countries(), None), "KSH");
    }

    #[test]
    fn unknown_or_empty_country_keeps_previous() {
        assert_eq!(resolve_country_currency("FR", &countries(), Some("eur")), "EUR");
        assert_eq!(resolve_country_currency("AQ", &countries(), Some("NGN")), "NGN");
        assert_eq!(resolve_country_currency("AQ", &countries(), None), "USD");
        assert_eq!(resolve_country_currency("", &[], Some("  ")), "USD");
    }

    #[test]
    fn tracker_is_sticky_and_idempotent() {
        let list = countries();
        let mut t = CurrencyTracker::new("usd");
        assert_eq!(t.select_country("ng", &list), "NGN");
        assert_eq!(t.country(), Some("NG"));
        assert_eq!(t.select_country("ng", &list), "NGN");
        assert_eq!(t.select_country("AQ", &list), "NGN");
        assert_eq!(t.select_country("GB", &list), "GBP");
    }
}
