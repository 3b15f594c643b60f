//! Доступ к хранилищу пользователей и мероприятий.
//!
//! Обработчики работают только через [`Store`], поэтому в тестах
//! PostgreSQL подменяется хранилищем в памяти.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Event, User};

#[cfg(test)]
pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("event {0} already exists")]
    Duplicate(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Точное совпадение по email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Newest first.
    async fn list_events(&self) -> Result<Vec<Event>, StoreError>;

    async fn get_event(&self, id: &str) -> Result<Option<Event>, StoreError>;

    /// Вставка; занятый идентификатор дает [`StoreError::Duplicate`].
    async fn insert_event(&self, event: &Event) -> Result<(), StoreError>;

    /// Вставка с `ON CONFLICT DO NOTHING`. `false`, если идентификатор уже занят.
    async fn insert_event_if_absent(&self, event: &Event) -> Result<bool, StoreError>;

    /// Обновляет строку `id` одним атомарным запросом и возвращает ее новое состояние.
    /// Идентификатор внутри `event` игнорируется. Пустой `created_at` сохраняет прежнее значение.
    async fn update_event(&self, id: &str, event: &Event) -> Result<Option<Event>, StoreError>;

    /// `false`, если строки не было.
    async fn delete_event(&self, id: &str) -> Result<bool, StoreError>;
}
