use axum::Json;
use serde_json::{Value, json};

/// Handler for `GET /api/health` — liveness check.
pub async fn health() -> Json<Value> {
    Json(json!({ "success": true, "message": "ok" }))
}
