use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::models::AppState;
use crate::templates::SummaryTemplate;

use super::helpers::lock_session;

/// GET /summary — printable view of the last priced summary.
pub async fn summary_page(State(state): State<AppState>) -> Response {
    let template = {
        let session = lock_session(&state);
        SummaryTemplate::from_session(&session)
    };
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(%e, "failed to render summary page");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render summary").into_response()
        }
    }
}
