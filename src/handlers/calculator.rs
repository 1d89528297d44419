use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::load_countries;
use crate::error::CalculatorError;
use crate::models::{AppState, DiscountSpec, QuoteSubmission, SessionView, StorageDraft, WorkloadDraft};
use crate::services::{price_workload, resolve_storage_item, save_invoices, submit};
use crate::wizard::CalculatorStep;

use super::helpers::{ensure_editable, lock_session};

/// GET /api/calculator
pub async fn session_get(State(state): State<AppState>) -> Json<SessionView> {
    Json(lock_session(&state).view())
}

/// POST /api/calculator/workloads
pub async fn workload_add(
    State(state): State<AppState>,
    Json(draft): Json<WorkloadDraft>,
) -> Result<impl IntoResponse, CalculatorError> {
    let mut session = lock_session(&state);
    ensure_editable(&session, "add a workload")?;
    let index = session.workload.add_item(&draft)?;
    session.touch();
    Ok((StatusCode::CREATED, Json(json!({ "index": index, "session": session.view() }))))
}

/// DELETE /api/calculator/workloads/:index
pub async fn workload_remove(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<SessionView>, CalculatorError> {
    let mut session = lock_session(&state);
    ensure_editable(&session, "remove a workload")?;
    session
        .workload
        .remove_item(index)
        .ok_or(CalculatorError::NoSuchItem { what: "workload", index })?;
    session.touch();
    Ok(Json(session.view()))
}

/// POST /api/calculator/storage
pub async fn storage_add(
    State(state): State<AppState>,
    Json(draft): Json<StorageDraft>,
) -> Result<impl IntoResponse, CalculatorError> {
    let (country, currency) = {
        let session = lock_session(&state);
        ensure_editable(&session, "add object storage")?;
        (session.country(), session.currency.currency().to_string())
    };
    let item = resolve_storage_item(&state.api, &draft, &country, &currency).await?;

    let mut session = lock_session(&state);
    ensure_editable(&session, "add object storage")?;
    let index = session.workload.add_storage(item);
    session.touch();
    Ok((StatusCode::CREATED, Json(json!({ "index": index, "session": session.view() }))))
}

/// DELETE /api/calculator/storage/:index
pub async fn storage_remove(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<SessionView>, CalculatorError> {
    let mut session = lock_session(&state);
    ensure_editable(&session, "remove object storage")?;
    session
        .workload
        .remove_storage(index)
        .ok_or(CalculatorError::NoSuchItem { what: "storage item", index })?;
    session.touch();
    Ok(Json(session.view()))
}

#[derive(Debug, Deserialize)]
pub struct CountryForm {
    pub country_code: String,
}

/// PUT /api/calculator/country
///
/// An unreachable country list keeps the current currency.
pub async fn country_put(
    State(state): State<AppState>,
    Json(form): Json<CountryForm>,
) -> Json<SessionView> {
    let countries = match load_countries(&state.api).await {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(%e, "country list unavailable; keeping current currency");
            Vec::new()
        }
    };
    let mut session = lock_session(&state);
    session.select_country(&form.country_code, &countries);
    tracing::info!(country = %form.country_code, currency = session.currency.currency(), "billing country selected");
    Json(session.view())
}

/// PUT /api/calculator/discount — `null` clears it.
pub async fn discount_put(
    State(state): State<AppState>,
    Json(discount): Json<Option<DiscountSpec>>,
) -> Result<Json<SessionView>, CalculatorError> {
    if let Some(d) = &discount {
        d.validate()?;
    }
    let mut session = lock_session(&state);
    session.discount = discount;
    session.touch();
    Ok(Json(session.view()))
}

/// POST /api/calculator/summary
pub async fn summary_post(State(state): State<AppState>) -> Result<Json<SessionView>, CalculatorError> {
    let (workload, country, currency, discount) = {
        let session = lock_session(&state);
        let allowed = match session.step {
            CalculatorStep::Config => session.step.next(!session.workload.is_empty()).is_some(),
            CalculatorStep::Summary => true,
            _ => false,
        };
        if !allowed {
            return Err(CalculatorError::InvalidStep { action: "price the quote", step: session.step });
        }
        (
            session.workload.clone(),
            session.country(),
            session.currency.currency().to_string(),
            session.discount.clone(),
        )
    };

    let summary = price_workload(&state.api, &workload, &country, &currency, discount.as_ref()).await;

    let mut session = lock_session(&state);
    if session.workload != workload {
        tracing::debug!("workload changed while pricing; discarding summary");
        return Ok(Json(session.view()));
    }
    session.last_summary = Some(summary);
    session.step = CalculatorStep::Summary;
    Ok(Json(session.view()))
}

/// POST /api/calculator/back
pub async fn back_post(State(state): State<AppState>) -> Result<Json<SessionView>, CalculatorError> {
    let mut session = lock_session(&state);
    let previous = session
        .step
        .back()
        .ok_or(CalculatorError::InvalidStep { action: "go back", step: session.step })?;
    session.step = previous;
    Ok(Json(session.view()))
}

#[derive(Debug, Serialize)]
pub struct SubmitResult {
    pub saved_invoices: Vec<String>,
    pub lead: Option<serde_json::Value>,
    pub message: Option<String>,
    pub session: SessionView,
}

/// POST /api/calculator/submit
pub async fn submit_post(
    State(state): State<AppState>,
    Json(submission): Json<QuoteSubmission>,
) -> Result<Json<SubmitResult>, CalculatorError> {
    let (workload, country, discount) = {
        let mut session = lock_session(&state);
        match session.step {
            CalculatorStep::Summary => session.step = CalculatorStep::Submission,
            CalculatorStep::Submission => {}
            step => return Err(CalculatorError::InvalidStep { action: "submit the quote", step }),
        }
        (session.workload.clone(), session.country(), session.discount.clone())
    };

    let response = submit(&state.api, &workload, &country, &submission, discount.as_ref()).await?;
    let saved = save_invoices(&response, &state.invoice_dir).await?;

    let mut session = lock_session(&state);
    if !session.complete_submission() {
        tracing::debug!(step = ?session.step, "step moved while submitting; leaving it");
    }
    Ok(Json(SubmitResult {
        saved_invoices: saved.iter().map(|p| p.display().to_string()).collect(),
        lead: response.lead,
        message: response.message,
        session: session.view(),
    }))
}
