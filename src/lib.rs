pub mod auth;
pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod extract;
pub mod importer;
pub mod middleware;
pub mod models;
pub mod store;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn store::Store>,
    pub auth: auth::Authenticator,
    pub config: config::Config,
}

impl AppState {
    pub fn new(
        config: config::Config,
        store: Arc<dyn store::Store>,
    ) -> Result<Arc<Self>, bcrypt::BcryptError> {
        let auth = auth::Authenticator::new(&config.auth)?;
        Ok(Arc::new(Self { store, auth, config }))
    }
}

/// Полное приложение: API под `/api`, CORS и трассировка запросов.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = middleware::cors_layer(&state.config.cors);

    Router::new()
        .route("/", get(|| async { "Event Planner API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes(state.clone()))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
