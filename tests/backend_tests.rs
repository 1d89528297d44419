mod common;

use common::{start, FakeBackend, PDF_BYTES};
use quoter::api::{self, ApiContext, ApiError};
use quoter::models::{InvoiceMeta, LeadMeta, ProductCategory, QuoteSubmission, StorageDraft, WorkloadDraft};
use quoter::pricing::{resolve_country_currency, resolve_unit_price, StorageSource};
use quoter::services::{self, Workload};
use quoter::CalculatorError;

fn small_vm(months: u32) -> WorkloadDraft {
    WorkloadDraft {
        region: Some("lagos-1".into()),
        compute_instance_id: Some("c-small".into()),
        os_image_id: Some("ubuntu".into()),
        months: Some(months),
        ..Default::default()
    }
}

fn storage_draft() -> StorageDraft {
    StorageDraft {
        region: Some("lagos-1".into()),
        tier_id: Some("9".into()),
        quantity: Some(2),
        months: Some(3),
    }
}

#[tokio::test]
async fn test_regions_unwrap_nested_envelope_and_skip_inactive() {
    let ctx = start(FakeBackend::default()).await;
    let regions = api::load_regions(&ctx).await.unwrap();
    let codes: Vec<_> = regions.iter().map(|r| r.key()).collect();
    assert_eq!(codes, vec!["lagos-1", "nairobi-1"]);
}

#[tokio::test]
async fn test_wrong_token_surfaces_backend_message() {
    let good = start(FakeBackend::default()).await;
    let ctx = ApiContext::new(reqwest::Client::new(), good.base_url.clone(), "nope");
    let err = api::load_countries(&ctx).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Unauthenticated.");
}

#[tokio::test]
async fn test_unconfigured_base_url_fails_fast() {
    let ctx = ApiContext::new(reqwest::Client::new(), "", "token");
    let err = api::load_regions(&ctx).await.unwrap_err();
    assert!(matches!(err, ApiError::NotConfigured));
}

#[tokio::test]
async fn test_price_options_are_resolved() {
    let ctx = start(FakeBackend::default()).await;
    let options = api::load_price_options(&ctx, "lagos-1", ProductCategory::ComputeInstance, "ng")
        .await
        .unwrap();
    let prices: Vec<f64> = options.iter().map(resolve_unit_price).collect();
    assert_eq!(prices, vec![12.5, 40.0]);

    // Malformed entries are dropped, not fatal.
    let storage = api::load_price_options(&ctx, "lagos-1", ProductCategory::ObjectStorageConfiguration, "")
        .await
        .unwrap();
    assert_eq!(storage.len(), 1);
}

#[tokio::test]
async fn test_country_currency_from_backend_list() {
    let ctx = start(FakeBackend::default()).await;
    let countries = api::load_countries(&ctx).await.unwrap();
    assert_eq!(resolve_country_currency("ng", &countries, Some("USD")), "NGN");
    assert_eq!(resolve_country_currency("KE", &countries, Some("USD")), "KES");
    assert_eq!(resolve_country_currency("GH", &countries, Some("EUR")), "EUR");
    assert_eq!(resolve_country_currency("ZZ", &countries, None), "USD");
}

#[tokio::test]
async fn test_storage_item_resolves_by_productable_id() {
    let ctx = start(FakeBackend::default()).await;
    let item = services::resolve_storage_item(&ctx, &storage_draft(), "NG", "NGN").await.unwrap();
    assert_eq!(item.unit_price, 5.0);
    assert_eq!(item.total_price, 30.0);
    // The tier carries no currency of its own.
    assert_eq!(item.currency, "NGN");
    assert_eq!(item.productable_id.as_deref(), Some("9"));
    assert_eq!(item.display.and_then(|d| d.tier_name).as_deref(), Some("Hot 1TB"));
}

#[tokio::test]
async fn test_unknown_storage_tier() {
    let ctx = start(FakeBackend::default()).await;
    let draft = StorageDraft { tier_id: Some("missing".into()), ..storage_draft() };
    let err = services::resolve_storage_item(&ctx, &draft, "NG", "NGN").await.unwrap_err();
    assert!(matches!(err, CalculatorError::UnknownTier { .. }));
}

#[tokio::test]
async fn test_invalid_storage_draft_never_calls_backend() {
    let ctx = ApiContext::new(reqwest::Client::new(), "", "token");
    let draft = StorageDraft { region: None, ..storage_draft() };
    let err = services::resolve_storage_item(&ctx, &draft, "NG", "NGN").await.unwrap_err();
    match err {
        CalculatorError::Validation(errors) => assert_eq!(errors.get("region"), Some("Region is required")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_price_workload_adds_client_storage_on_top() {
    let fake = FakeBackend::default();
    let ctx = start(fake.clone()).await;
    let mut workload = Workload::default();
    workload.add_item(&small_vm(1)).unwrap();
    let storage = services::resolve_storage_item(&ctx, &storage_draft(), "NG", "NGN").await.unwrap();
    workload.add_storage(storage);

    let summary = services::price_workload(&ctx, &workload, "ng", "NGN", None).await;
    assert!(!summary.estimated);
    assert_eq!(summary.storage_source, StorageSource::Client);
    assert_eq!(summary.subtotal, 130.0);
    assert!((summary.storage_tax - 3.0).abs() < 1e-9);
    assert!((summary.total - 143.0).abs() < 1e-9);
    assert_eq!(summary.currency, "NGN");

    let sent = fake.received();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["preview"], true);
    assert_eq!(sent[0]["country_code"], "NG");
    assert!(sent[0]["items"][0].get("_display").is_none());
    assert!(sent[0]["object_storage_items"][0].get("_display").is_none());
}

#[tokio::test]
async fn test_price_workload_uses_backend_storage_when_included() {
    let fake = FakeBackend { storage_included: true, ..Default::default() };
    let ctx = start(fake).await;
    let mut workload = Workload::default();
    workload.add_item(&small_vm(1)).unwrap();
    let storage = services::resolve_storage_item(&ctx, &storage_draft(), "NG", "NGN").await.unwrap();
    workload.add_storage(storage);

    let summary = services::price_workload(&ctx, &workload, "NG", "NGN", None).await;
    assert_eq!(summary.storage_source, StorageSource::Backend);
    assert_eq!(summary.subtotal, 100.0);
    assert_eq!(summary.total, 110.0);
    assert_eq!(summary.storage_subtotal, 10.0);
}

#[tokio::test]
async fn test_price_workload_falls_back_to_estimate() {
    let fake = FakeBackend { fail_quotes: true, ..Default::default() };
    let ctx = start(fake).await;
    let mut workload = Workload::default();
    workload.add_item(&small_vm(2)).unwrap();

    let summary = services::price_workload(&ctx, &workload, "NG", "NGN", None).await;
    assert!(summary.estimated);
    // 12.50 × 1 instance × 2 months; the OS image is free.
    assert_eq!(summary.subtotal, 25.0);
    assert_eq!(summary.tax, 0.0);
    assert_eq!(summary.total, 25.0);
    assert_eq!(summary.compute_lines.len(), 2);
}

#[tokio::test]
async fn test_submit_invoice_saves_pdf() {
    let fake = FakeBackend::default();
    let ctx = start(fake.clone()).await;
    let mut workload = Workload::default();
    workload.add_item(&small_vm(1)).unwrap();

    let submission = QuoteSubmission::Invoice(InvoiceMeta {
        subject: "Lagos pilot".into(),
        email: "ops@example.com".into(),
        bill_to_name: "Ada Obi".into(),
        notes: String::new(),
    });
    let response = services::submit(&ctx, &workload, "NG", &submission, None).await.unwrap();
    assert_eq!(response.message.as_deref(), Some("Quote sent"));

    let dir = tempfile::tempdir().unwrap();
    let saved = services::save_invoices(&response, dir.path()).await.unwrap();
    assert_eq!(saved, vec![dir.path().join("Quote_42.pdf")]);
    assert_eq!(std::fs::read(&saved[0]).unwrap(), PDF_BYTES);

    let sent = fake.received();
    assert_eq!(sent[0]["generate_invoice"], true);
    assert_eq!(sent[0]["create_lead"], true);
    assert_eq!(sent[0]["lead"]["first_name"], "Ada");
    assert_eq!(sent[0]["lead"]["country"], "NG");
}

#[tokio::test]
async fn test_submit_lead_only() {
    let fake = FakeBackend::default();
    let ctx = start(fake.clone()).await;
    let mut workload = Workload::default();
    workload.add_item(&small_vm(1)).unwrap();

    let submission = QuoteSubmission::Lead(LeadMeta {
        first_name: "Grace".into(),
        email: "grace@example.com".into(),
        ..Default::default()
    });
    let response = services::submit(&ctx, &workload, "KE", &submission, None).await.unwrap();
    assert!(response.invoices.is_empty());
    assert!(response.lead.is_some());

    let dir = tempfile::tempdir().unwrap();
    assert!(services::save_invoices(&response, dir.path()).await.unwrap().is_empty());
    assert_eq!(fake.received()[0]["generate_invoice"], false);
    assert_eq!(fake.received()[0]["lead"]["country"], "KE");
}

#[tokio::test]
async fn test_submit_failure_carries_backend_message() {
    let fake = FakeBackend { fail_quotes: true, ..Default::default() };
    let ctx = start(fake).await;
    let mut workload = Workload::default();
    workload.add_item(&small_vm(1)).unwrap();

    let submission = QuoteSubmission::Lead(LeadMeta {
        first_name: "Grace".into(),
        email: "grace@example.com".into(),
        ..Default::default()
    });
    let err = services::submit(&ctx, &workload, "KE", &submission, None).await.unwrap_err();
    assert_eq!(err.to_string(), "pricing engine down");
}

#[tokio::test]
async fn test_incomplete_submission_is_rejected_locally() {
    let fake = FakeBackend::default();
    let ctx = start(fake.clone()).await;
    let workload = Workload::default();
    let submission = QuoteSubmission::Invoice(InvoiceMeta::default());
    let err = services::submit(&ctx, &workload, "NG", &submission, None).await.unwrap_err();
    assert!(matches!(err, CalculatorError::Validation(_)));
    assert!(fake.received().is_empty());
}
