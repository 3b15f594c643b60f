use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::auth::Claims;
use crate::error::AppError;
use crate::extract::AppJson;
use crate::models::UserProfile;
use crate::AppState;

pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/login", post(login))
}

pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/profile", get(profile))
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

// POST /api/login
async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    req.validate()
        .map_err(|_| AppError::BadRequest("invalid body".to_string()))?;

    let (user, token) = state
        .auth
        .login(state.store.as_ref(), &req.email, &req.password)
        .await?;

    info!("User {} logged in", user.id);

    Ok(Json(json!({
        "message": "Login successful",
        "access_token": token,
        "user": UserProfile::from(&user),
    })))
}

// GET /api/profile
async fn profile(claims: Claims) -> Json<Value> {
    Json(json!({ "user": claims }))
}
