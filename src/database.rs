use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};
use std::time::Duration;
use tracing::info;

use crate::models::{Event, User};
use crate::store::{Store, StoreError};

const EVENT_COLUMNS: &str = "id, event_name, customer_name, phone, address, data_type, created_by, \
     paid, balance, total_cost, status, venue, date_time, created_at";

#[derive(Clone)]
pub struct Database {
    pub pool: Pool<Postgres>,
}

impl Database {
    pub async fn new(database_url: &str, pool_size: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        // Проверяем соединение сразу, чтобы упасть на старте, а не на первом запросе
        sqlx::query("SELECT 1").execute(&pool).await?;

        Ok(Database { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }

    pub async fn current_database(&self) -> Result<String, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT current_database()")
            .fetch_one(&self.pool)
            .await
    }

    async fn insert(&self, event: &Event, on_conflict: &str) -> Result<u64, sqlx::Error> {
        let sql = format!(
            "INSERT INTO events ({EVENT_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             {on_conflict}"
        );

        let result = sqlx::query(&sql)
            .bind(&event.id)
            .bind(&event.event_name)
            .bind(&event.customer_name)
            .bind(&event.phone)
            .bind(&event.address)
            .bind(&event.data_type)
            .bind(&event.created_by)
            .bind(event.paid)
            .bind(event.balance)
            .bind(event.total_cost)
            .bind(&event.status)
            .bind(&event.venue)
            .bind(&event.date_time)
            .bind(&event.created_at)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl Store for Database {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, role FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY created_at DESC, id");
        let events = sqlx::query_as::<_, Event>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }

    async fn get_event(&self, id: &str) -> Result<Option<Event>, StoreError> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");
        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(event)
    }

    async fn insert_event(&self, event: &Event) -> Result<(), StoreError> {
        match self.insert(event, "").await {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::Duplicate(event.id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn insert_event_if_absent(&self, event: &Event) -> Result<bool, StoreError> {
        let rows = self.insert(event, "ON CONFLICT (id) DO NOTHING").await?;
        Ok(rows > 0)
    }

    async fn update_event(&self, id: &str, event: &Event) -> Result<Option<Event>, StoreError> {
        // Один запрос: чтение старого created_at и запись не разделены,
        // гонки с параллельным DELETE нет.
        let sql = format!(
            "UPDATE events
             SET event_name = $1,
                 customer_name = $2,
                 phone = $3,
                 address = $4,
                 data_type = $5,
                 created_by = $6,
                 paid = $7,
                 balance = $8,
                 total_cost = $9,
                 status = $10,
                 venue = $11,
                 date_time = $12,
                 created_at = COALESCE(NULLIF($13, ''), created_at)
             WHERE id = $14
             RETURNING {EVENT_COLUMNS}"
        );

        let updated = sqlx::query_as::<_, Event>(&sql)
            .bind(&event.event_name)
            .bind(&event.customer_name)
            .bind(&event.phone)
            .bind(&event.address)
            .bind(&event.data_type)
            .bind(&event.created_by)
            .bind(event.paid)
            .bind(event.balance)
            .bind(event.total_cost)
            .bind(&event.status)
            .bind(&event.venue)
            .bind(&event.date_time)
            .bind(&event.created_at)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    async fn delete_event(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
