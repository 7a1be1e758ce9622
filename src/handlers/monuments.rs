use axum::extract::State;
use axum::Json;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::api::ApiResponse;
use crate::database::models::MonumentPayload;
use crate::database::{Monument, NewMonument};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateMonumentRequest {
    #[serde(default)]
    pub monument: MonumentPayload,
}

/// POST /api/monuments - create a monument and broadcast its arrival
pub async fn create_monument(
    State(state): State<AppState>,
    Json(body): Json<CreateMonumentRequest>,
) -> Result<ApiResponse<Monument>, ApiError> {
    let new_monument = NewMonument::validate(body.monument)?;

    let created = state
        .store
        .insert_monument(new_monument)
        .await
        .map_err(|e| {
            ApiError::persistence(
                e,
                "The monument could not be created. Please try again shortly.",
            )
        })?;

    // Best-effort broadcast: a publish failure must never turn a successful
    // creation into an error response.
    notify_new_monument(&state, &created);

    let message = format!("Monument '{}' has been created.", created.title);
    Ok(ApiResponse::created(message, created))
}

fn notify_new_monument(state: &AppState, monument: &Monument) {
    let Some(publisher) = &state.publisher else {
        return;
    };

    let payload = json!({
        "id": monument.id,
        "title": monument.title,
        "description": monument.description,
        "createdAt": created_at_iso(monument.created),
    });

    if let Err(e) = publisher.emit("newMonument", payload) {
        tracing::error!("failed to publish newMonument event: {}", e);
    }
}

/// ISO-8601 with the sub-second fraction removed, e.g. `2024-01-15T10:30:00Z`.
fn created_at_iso(created: DateTime<Utc>) -> String {
    created.to_rfc3339_opts(SecondsFormat::Secs, true)
}
