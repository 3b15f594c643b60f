use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::AppState;

/// Маршруты под `/admin`; гейт роли навешивается в `controllers::routes`.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/admin/test", get(admin_test))
}

async fn admin_test() -> Json<Value> {
    Json(json!({ "message": "Admin route working" }))
}
