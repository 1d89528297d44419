use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::load_countries;
use crate::models::AppState;

use super::helpers::lock_session;

/// Settle the currency of a default country once the country list loads.
/// Until then requests see the configured default currency.
pub async fn resolve_pending_currency(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let pending = lock_session(&state).currency_pending;
    if pending {
        match load_countries(&state.api).await {
            Ok(countries) => {
                let mut session = lock_session(&state);
                session.resolve_pending_currency(&countries);
                tracing::info!(
                    country = %session.country(),
                    currency = session.currency.currency(),
                    "default country currency resolved"
                );
            }
            Err(e) => tracing::warn!(%e, "country list unavailable; default currency kept for now"),
        }
    }
    next.run(request).await
}
