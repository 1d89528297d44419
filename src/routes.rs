use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use axum::http::header::CACHE_CONTROL;
use axum::http::HeaderValue;

use crate::models::AppState;
use crate::handlers::{calculator, catalog, middleware, summary};

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/regions", get(catalog::regions_get))
        .route("/countries", get(catalog::countries_get))
        .route("/pricing", get(catalog::pricing_get))
        .route("/calculator", get(calculator::session_get))
        .route("/calculator/workloads", post(calculator::workload_add))
        .route("/calculator/workloads/:index", delete(calculator::workload_remove))
        .route("/calculator/storage", post(calculator::storage_add))
        .route("/calculator/storage/:index", delete(calculator::storage_remove))
        .route("/calculator/country", put(calculator::country_put))
        .route("/calculator/discount", put(calculator::discount_put))
        .route("/calculator/summary", post(calculator::summary_post))
        .route("/calculator/back", post(calculator::back_post))
        .route("/calculator/submit", post(calculator::submit_post))
        // Prices change underneath the calculator; never cache API answers.
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    Router::new()
        .route("/summary", get(summary::summary_page))
        .nest("/api", api)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::resolve_pending_currency,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
