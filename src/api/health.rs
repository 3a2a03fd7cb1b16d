use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "cardio-predict",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.model.version(),
        "model_trees": state.model.tree_count(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
