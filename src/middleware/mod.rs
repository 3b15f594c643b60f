use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{debug, warn};

use crate::auth::Claims;
use crate::config::CorsConfig;
use crate::error::AppError;
use crate::AppState;

/// Проверяет токен из заголовка `Authorization` и кладет claims в extensions запроса.
///
/// Значение заголовка целиком считается токеном, префикс `Bearer ` не отрезается.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = {
        let token = match req.headers().get(header::AUTHORIZATION) {
            None => return Err(AppError::Unauthorized("Missing token")),
            Some(value) if value.is_empty() => return Err(AppError::Unauthorized("Missing token")),
            Some(value) => value
                .to_str()
                .map_err(|_| AppError::Unauthorized("Invalid token"))?,
        };

        // Причину (подпись, срок, формат) клиенту не раскрываем
        state.auth.verify_token(token).map_err(|e| {
            debug!("Token rejected: {}", e);
            AppError::Unauthorized("Invalid token")
        })?
    };

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Пропускает только роль `Admin`. Ставится внутри `require_auth`.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let role = req
        .extensions()
        .get::<Claims>()
        .map(|claims| (claims.user_id, claims.role.clone()));

    match role {
        None => Err(AppError::Unauthorized("Missing token")),
        Some((user_id, role)) if !role.is_admin() => {
            warn!("User {} with role {} denied admin access", user_id, role);
            Err(AppError::Forbidden)
        }
        Some(_) => Ok(next.run(req).await),
    }
}

// Claims extractor: доступен только за require_auth
impl<S> FromRequestParts<S> for Claims
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or(AppError::Unauthorized("Missing token"))
    }
}

pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::CONTENT_LENGTH])
        .allow_credentials(true)
        .max_age(Duration::from_secs(12 * 60 * 60))
}
