use axum::Json;
use serde_json::{json, Value};

/// GET /health — liveness only; never touches the model provider.
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}
