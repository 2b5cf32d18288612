use axum::Json;

/// GET / — API liveness and welcome payload
pub async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "success",
        "message": "Welcome to the Gallery API"
    }))
}
