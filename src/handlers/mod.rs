pub mod favorites;
pub mod monuments;

use axum::extract::State;
use axum::response::{IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service descriptor
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "message": "Monuments catalog API",
        "data": {
            "name": "monuments-api",
            "version": version,
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "monuments": "POST /api/monuments (public)",
                "favorites": "POST|DELETE /api/favorites/:monumentId, GET /api/favorites (protected)",
            }
        }
    }))
}

/// GET /health - liveness probe with a store ping
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "message": "ok",
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("health check failed: {}", e);
            (
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "message": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now,
                        "database": "unavailable"
                    }
                })),
            )
        }
    }
}
