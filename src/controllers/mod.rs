pub mod admin;
pub mod auth;
pub mod events;

use axum::{middleware, Router};
use std::sync::Arc;

use crate::middleware::{require_admin, require_auth};
use crate::AppState;

/// Все маршруты API. Монтируются под `/api`.
pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let admin = admin::routes().route_layer(middleware::from_fn(require_admin));

    let protected = Router::new()
        .merge(auth::protected_routes())
        .merge(events::routes())
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .merge(auth::public_routes())
        .merge(protected)
}
