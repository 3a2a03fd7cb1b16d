use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::assistant::assistant_routes;
use super::auth::auth_routes;
use super::health::health_check;
use super::pages::page_routes;
use super::predictions::prediction_routes;
use crate::auth::security_headers_layer;
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(page_routes())
        .merge(auth_routes())
        .merge(prediction_routes())
        .merge(assistant_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security_headers_layer()),
        )
        .with_state(state)
}
