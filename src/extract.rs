use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json`, у которого любая ошибка разбора тела превращается в 400 `{"error": ...}`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
