//! In-process stand-in for the pricing backend.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::{engine::general_purpose, Engine as _};
use serde_json::{json, Value};

use quoter::api::{self, ApiContext};

pub const TOKEN: &str = "test-token";
pub const PDF_BYTES: &[u8] = b"%PDF-1.4 quoter test";

#[derive(Clone, Default)]
pub struct FakeBackend {
    /// Every body POSTed to /multi-quote, in order.
    pub quotes: Arc<Mutex<Vec<Value>>>,
    /// Answer /multi-quote with a 500.
    pub fail_quotes: bool,
    /// Ask the backend to report storage as already included.
    pub storage_included: bool,
}

impl FakeBackend {
    pub fn received(&self) -> Vec<Value> {
        self.quotes.lock().unwrap().clone()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"message": "Unauthenticated."}))).into_response()
}

async fn regions(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({"data": {"data": [
        {"id": 1, "code": "lagos-1", "name": "Lagos", "country": "NG", "is_active": true},
        {"id": 2, "code": "old-dc", "name": "Retired", "is_active": false},
        {"id": 3, "code": "nairobi-1", "name": "Nairobi"}
    ]}}))
    .into_response()
}

async fn countries(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({"data": [
        {"iso2": "NG", "name": "Nigeria", "currency_code": "NGN"},
        {"code": "KE", "name": "Kenya", "currencyCode": "kes"},
        {"iso2": "GH", "name": "Ghana"}
    ]}))
    .into_response()
}

async fn pricing(headers: HeaderMap, Query(q): Query<HashMap<String, String>>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let category = q.get("category").map(String::as_str).unwrap_or("");
    let options = match category {
        "compute_instance" => json!([
            {"id": "c-small", "name": "Small", "pricing": {"effective": {"price_local": "12.50", "currency": "NGN"}}},
            {"id": "c-large", "name": "Large", "pricing": {"admin": {"price_usd": 40}}}
        ]),
        "os_image" => json!([{"id": "ubuntu", "name": "Ubuntu 24.04", "unit_price": 0}]),
        "object_storage_configuration" => json!([
            {"id": "tier-1", "product": {"name": "Hot 1TB", "productable_id": 9}, "pricing": {"tenant": {"price_usd": 5}}},
            "not an option"
        ]),
        _ => json!([]),
    };
    Json(json!({"data": options})).into_response()
}

async fn multi_quote(State(fake): State<FakeBackend>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    fake.quotes.lock().unwrap().push(body.clone());
    if fake.fail_quotes {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"message": "pricing engine down"}))).into_response();
    }

    let mut pricing = json!({
        "subtotal": 100,
        "tax": 10,
        "discount": 0,
        "total": 110,
        "currency": "NGN",
        "lines": [{"name": "Small", "region": "lagos-1", "quantity": 1, "unit_price": 100, "total": 100, "term_months": 1}]
    });
    if fake.storage_included {
        pricing["object_storage"] = json!({
            "lines": [{"name": "Hot 1TB", "region": "lagos-1", "quantity": 2, "unit_price": 5, "total": 10}],
            "subtotal": 10,
            "tax": 1,
            "included_in_totals": true
        });
    }

    if body.get("preview").and_then(Value::as_bool) == Some(true) {
        return Json(json!({"data": {"pricing": pricing}})).into_response();
    }
    if body.get("generate_invoice").and_then(Value::as_bool) == Some(true) {
        return Json(json!({
            "invoices": [{"pdf": general_purpose::STANDARD.encode(PDF_BYTES), "filename": "../Quote 42"}],
            "pricing": pricing,
            "lead": {"id": 7},
            "message": "Quote sent"
        }))
        .into_response();
    }
    Json(json!({"lead": {"id": 8}, "message": "Lead created"})).into_response()
}

pub fn router(fake: FakeBackend) -> Router {
    Router::new()
        .route("/regions", get(regions))
        .route("/countries", get(countries))
        .route("/pricing", get(pricing))
        .route("/multi-quote", post(multi_quote))
        .with_state(fake)
}

/// Serve `router` on an ephemeral port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub async fn start(fake: FakeBackend) -> ApiContext {
    api::set_silent(true);
    let base = spawn(router(fake)).await;
    ApiContext::new(reqwest::Client::new(), base, TOKEN)
}
