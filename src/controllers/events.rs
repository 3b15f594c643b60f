use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

use crate::auth::Claims;
use crate::error::AppError;
use crate::extract::AppJson;
use crate::models::event::{generate_event_id, now_timestamp, Event};
use crate::store::StoreError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/{id}",
            put(update_event).get(get_event).delete(delete_event),
        )
}

// GET /api/events
async fn list_events(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let events = state
        .store
        .list_events()
        .await
        .map_err(AppError::storage("failed to load events"))?;

    Ok(Json(json!({
        "count": events.len(),
        "events": events,
    })))
}

// GET /api/events/{id}
async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let event = state
        .store
        .get_event(&id)
        .await
        .map_err(AppError::storage("failed to load event"))?
        .ok_or(AppError::NotFound("event"))?;

    Ok(Json(json!({ "event": event })))
}

// POST /api/events
async fn create_event(
    State(state): State<Arc<AppState>>,
    claims: Claims,
    AppJson(mut event): AppJson<Event>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if event.id.is_empty() {
        event.id = generate_event_id();
    }
    event.recompute_balance()?;
    if event.created_at.is_empty() {
        event.created_at = now_timestamp();
    }

    state.store.insert_event(&event).await.map_err(|e| match e {
        StoreError::Duplicate(id) => AppError::Conflict(format!("event {} already exists", id)),
        other => AppError::storage("failed to save event")(other),
    })?;

    info!("Event {} created by user {}", event.id, claims.user_id);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "event created", "event": event })),
    ))
}

// PUT /api/events/{id}
async fn update_event(
    State(state): State<Arc<AppState>>,
    claims: Claims,
    Path(id): Path<String>,
    AppJson(mut event): AppJson<Event>,
) -> Result<Json<Value>, AppError> {
    // Целевая строка всегда определяется путем, id из тела на нее не влияет
    if event.id.is_empty() {
        event.id = id.clone();
    } else if event.id != id {
        debug!("Ignoring body id {} for update of {}", event.id, id);
    }
    event.recompute_balance()?;

    let updated = state
        .store
        .update_event(&id, &event)
        .await
        .map_err(AppError::storage("failed to update event"))?
        .ok_or(AppError::NotFound("event"))?;

    info!("Event {} updated by user {}", id, claims.user_id);

    Ok(Json(json!({ "message": "event updated", "event": updated })))
}

// DELETE /api/events/{id}
async fn delete_event(
    State(state): State<Arc<AppState>>,
    claims: Claims,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let deleted = state
        .store
        .delete_event(&id)
        .await
        .map_err(AppError::storage("failed to delete event"))?;

    if !deleted {
        return Err(AppError::NotFound("event"));
    }

    info!("Event {} deleted by user {}", id, claims.user_id);

    Ok(Json(json!({ "message": "event deleted", "id": id })))
}
