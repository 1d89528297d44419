use serde::{Deserialize, Serialize};

use crate::utils::number::lenient_opt_string;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Region {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub code: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Region {
    /// The value the pricing endpoint expects in its `region` parameter.
    pub fn key(&self) -> String {
        self.code
            .clone()
            .or_else(|| self.id.clone())
            .unwrap_or_else(|| self.name.clone())
    }

    pub fn matches(&self, key: &str) -> bool {
        let key = key.trim();
        [self.code.as_deref(), self.id.as_deref()]
            .into_iter()
            .flatten()
            .any(|k| k.eq_ignore_ascii_case(key))
    }
}
