use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// Запись о мероприятии. JSON-поля в camelCase, как их шлет фронтенд.
///
/// Все поля необязательны во входящем JSON: отсутствующие и `null` получают значения по умолчанию.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub event_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_by: String,
    #[serde(deserialize_with = "null_as_default")]
    pub paid: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub balance: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_cost: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub venue: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
}

// null в JSON трактуется как отсутствующее значение
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Баланс не помещается в i64.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceOverflow;

impl Event {
    /// Пересчитывает баланс; значение от клиента всегда отбрасывается.
    pub fn recompute_balance(&mut self) -> Result<(), BalanceOverflow> {
        self.balance = self
            .total_cost
            .checked_sub(self.paid)
            .ok_or(BalanceOverflow)?;
        Ok(())
    }

    /// Is this entry plausibly an event rather than some other record?
    pub fn looks_like_event(&self) -> bool {
        !self.event_name.is_empty() || self.total_cost != 0
    }
}

/// Уникальный идентификатор на основе времени в наносекундах.
/// Случайный суффикс защищает от совпадений при одновременных запросах.
pub fn generate_event_id() -> String {
    let now = Utc::now();
    let nanos = now
        .timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros() * 1_000);
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("ev_{}_{}", nanos, &suffix[..8])
}

/// Текущее время в RFC 3339 (UTC).
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
