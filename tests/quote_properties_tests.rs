use askama::Template;
use quoter::models::{CalculatorSession, PriceTierOption, PricingResult, ProductCategory, WorkloadDraft};
use quoter::pricing::{aggregate, estimate_pricing, resolve_country_currency, resolve_unit_price, PriceBook, QuoteSummary};
use quoter::services::Workload;
use quoter::templates::SummaryTemplate;
use serde_json::json;

fn option(v: serde_json::Value) -> PriceTierOption {
    serde_json::from_value(v).unwrap()
}

fn book() -> PriceBook {
    let mut book = PriceBook::default();
    book.insert(
        "r1",
        ProductCategory::ComputeInstance,
        vec![
            option(json!({"id": "small", "pricing": {"effective": {"price_usd": 10}}})),
            option(json!({"id": "large", "pricing": {"admin": {"price_usd": 40}}})),
        ],
    );
    book.insert("r1", ProductCategory::OsImage, vec![option(json!({"id": "debian", "unit_price": 2}))]);
    book.insert("r1", ProductCategory::VolumeType, vec![option(json!({"id": "ssd", "price_local": "0.5"}))]);
    book
}

fn draft(compute: &str, instances: u32) -> WorkloadDraft {
    serde_json::from_value(json!({
        "region": "r1",
        "compute_instance_id": compute,
        "os_image_id": "debian",
        "number_of_instances": instances,
        "months": 3,
        "volumes": [{"volume_type_id": "ssd", "storage_size_gb": 20}]
    }))
    .unwrap()
}

fn totals(workload: &Workload) -> QuoteSummary {
    let estimate = estimate_pricing(&workload.items, &book(), "USD");
    aggregate(Some(&estimate), &workload.storage, Some("USD"))
}

#[test]
fn test_remove_and_readd_gives_same_totals() {
    let mut workload = Workload::default();
    workload.add_item(&draft("small", 2)).unwrap();
    workload.add_item(&draft("large", 1)).unwrap();
    let before = totals(&workload);
    // small: (10 + 2 + 0.5×20) × 2 × 3 = 132; large: (40 + 2 + 10) × 1 × 3 = 156
    assert_eq!(before.total, 288.0);

    workload.remove_item(0).unwrap();
    assert_eq!(totals(&workload).total, 156.0);
    workload.add_item(&draft("small", 2)).unwrap();

    let after = totals(&workload);
    assert_eq!(after.subtotal, before.subtotal);
    assert_eq!(after.total, before.total);
    assert_eq!(after.compute_lines.len(), before.compute_lines.len());
}

#[test]
fn test_only_admin_usd_price_is_used_verbatim() {
    for price in [0.0, 0.01, 7.5, 1234.56] {
        let tier = option(json!({"id": "x", "pricing": {"admin": {"price_usd": price}}}));
        assert_eq!(resolve_unit_price(&tier), price);
    }
    assert_eq!(resolve_unit_price(&option(json!({"id": "bare"}))), 0.0);
}

#[test]
fn test_percent_discount_is_displayed_from_backend() {
    let pricing: PricingResult = serde_json::from_value(json!({
        "pre_discount_subtotal": 200,
        "discount": 40,
        "subtotal": 160,
        "tax": 16,
        "total": 176,
        "currency": "USD"
    }))
    .unwrap();
    let discount = serde_json::from_value(json!({"type": "percent", "value": 20, "label": "Spring"})).unwrap();
    let summary = aggregate(Some(&pricing), &[], None).with_discount_label(Some(&discount));
    assert_eq!(summary.discount, 40.0);
    assert_eq!(summary.total, 176.0);
    assert_eq!(summary.discount_label.as_deref(), Some("Spring (20%)"));
}

#[test]
fn test_currency_resolution_is_idempotent() {
    let countries = vec![serde_json::from_value(json!({"iso2": "ZA", "currency": "zar"})).unwrap()];
    let first = resolve_country_currency("za", &countries, Some("USD"));
    let second = resolve_country_currency("za", &countries, Some(&first));
    assert_eq!(first, "ZAR");
    assert_eq!(first, second);
}

#[test]
fn test_empty_summary_renders_without_rows() {
    let summary = aggregate(None, &[], Some("EUR"));
    assert_eq!(summary.total, 0.0);
    assert!(summary.is_empty());

    let html = SummaryTemplate::from_summary(&summary, "summary".into(), String::new())
        .render()
        .unwrap();
    assert!(html.contains("EUR 0.00"));
    assert!(!html.contains("<td>Item"));
    assert_eq!(html.matches("<tr><td>").count(), 2);
}

#[test]
fn test_session_page_before_pricing() {
    let session = CalculatorSession::new("gbp");
    let html = SummaryTemplate::from_session(&session).render().unwrap();
    assert!(html.contains("No summary yet"));
    assert!(html.contains("Currency: GBP"));
}
