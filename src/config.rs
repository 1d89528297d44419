use std::env;
use std::path::{Path, PathBuf};

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_BASE_URL: &str = "";
pub const DEFAULT_API_TOKEN: &str = "";
pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_COUNTRY: &str = "";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_INVOICE_OUTPUT_DIR: &str = ".";

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()))
}

pub fn get_api_token() -> String {
    env::var("API_TOKEN").unwrap_or_else(|_| DEFAULT_API_TOKEN.to_string())
}

/// Currency used when neither the backend nor the billing country yields one.
pub fn get_default_currency() -> String {
    let raw = env::var("DEFAULT_CURRENCY").unwrap_or_default();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_CURRENCY.to_string()
    } else {
        trimmed.to_uppercase()
    }
}

pub fn get_default_country() -> String {
    env::var("DEFAULT_COUNTRY")
        .unwrap_or_else(|_| DEFAULT_COUNTRY.to_string())
        .trim()
        .to_uppercase()
}

pub fn get_request_timeout_secs() -> u64 {
    env::var("REQUEST_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
}

pub fn get_invoice_output_dir() -> PathBuf {
    let raw = env::var("INVOICE_OUTPUT_DIR").unwrap_or_default();
    if raw.trim().is_empty() {
        PathBuf::from(DEFAULT_INVOICE_OUTPUT_DIR)
    } else {
        PathBuf::from(raw.trim())
    }
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "http://localhost:5000".to_string()
    } else {
        trimmed.to_string()
    }
}
