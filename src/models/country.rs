use serde::{Deserialize, Serialize};

/// A billing country as returned by `GET /countries`.
///
/// Tenants configure currencies through different admin screens, so the
/// currency can land in any of five fields.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Country {
    #[serde(default)]
    pub iso2: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, rename = "currencyCode")]
    pub currency_code_alt: Option<String>,
    #[serde(default)]
    pub currency_symbol: Option<String>,
    #[serde(default, rename = "currencySymbol")]
    pub currency_symbol_alt: Option<String>,
}

impl Country {
    /// Case-insensitive match on `iso2` or `code`.
    pub fn matches(&self, country_code: &str) -> bool {
        let wanted = country_code.trim();
        if wanted.is_empty() {
            return false;
        }
        [self.iso2.as_deref(), self.code.as_deref()]
            .into_iter()
            .flatten()
            .any(|c| c.trim().eq_ignore_ascii_case(wanted))
    }

    /// First populated currency field, upper-cased.
    pub fn currency_hint(&self) -> Option<String> {
        [
            &self.currency_code,
            &self.currency,
            &self.currency_code_alt,
            &self.currency_symbol,
            &self.currency_symbol_alt,
        ]
        .into_iter()
        .filter_map(|f| f.as_deref())
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_uppercase)
    }

    pub fn display_code(&self) -> String {
        self.iso2
            .clone()
            .or_else(|| self.code.clone())
            .unwrap_or_default()
            .to_uppercase()
    }
}
