//! Ошибки HTTP-слоя. Каждая превращается в `{"error": "..."}` с нужным статусом.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

use crate::models::event::BalanceOverflow;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Отсутствующий или недействительный токен.
    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("Admin access only")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    /// Детали ошибки хранилища пишутся в лог, клиент видит только `context`.
    #[error("{context}")]
    Storage {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("{0}")]
    Internal(&'static str),
}

impl AppError {
    pub fn storage(context: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Storage { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Storage { .. } | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Storage { context, source } = &self {
            error!("{}: {:?}", context, source);
        }

        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("Rejected request body: {}", rejection.body_text());
        AppError::BadRequest("invalid body".to_string())
    }
}

impl From<BalanceOverflow> for AppError {
    fn from(_: BalanceOverflow) -> Self {
        AppError::BadRequest("invalid body".to_string())
    }
}
