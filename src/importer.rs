//! Разовая загрузка мероприятий из JSON-выгрузки.
//!
//! Ожидается документ вида `{"events": {"<key>": {...event...}, "users": ..., ...}}`.
//! Сервисом не вызывается, используется только бинарником `import_events`.

use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::models::Event;
use crate::store::Store;

/// Ключи в секции `events`, которые не являются мероприятиями.
pub const NON_EVENT_KEYS: [&str; 2] = ["users", "auditLogs"];

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("no 'events' section found in document")]
    MissingEventsSection,

    #[error("failed to parse document: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub duplicates: usize,
    pub failed: usize,
}

pub fn parse_document(raw: &str) -> Result<Vec<Event>, ImportError> {
    let doc: Value = serde_json::from_str(raw)?;
    extract_events(&doc)
}

/// Достает мероприятия из документа, пропуская служебные и нераспознанные записи.
pub fn extract_events(doc: &Value) -> Result<Vec<Event>, ImportError> {
    let section = doc
        .get("events")
        .and_then(Value::as_object)
        .ok_or(ImportError::MissingEventsSection)?;

    info!("Found {} items in events section", section.len());

    let mut events = Vec::with_capacity(section.len());
    for (key, value) in section {
        if NON_EVENT_KEYS.contains(&key.as_str()) {
            info!("Skipping non-event key {}", key);
            continue;
        }

        let mut event: Event = match serde_json::from_value(value.clone()) {
            Ok(event) => event,
            Err(e) => {
                warn!("Failed to parse key {} as event: {}", key, e);
                continue;
            }
        };

        if !event.looks_like_event() {
            info!("Skipping non-event entry {}", key);
            continue;
        }

        if event.id.is_empty() {
            event.id = key.clone();
        }
        if event.recompute_balance().is_err() {
            warn!("Skipping {}: balance overflows", key);
            continue;
        }

        events.push(event);
    }

    Ok(events)
}

/// Вставляет мероприятия, уже существующие идентификаторы пропускаются.
pub async fn import_events(store: &dyn Store, events: &[Event]) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for event in events {
        match store.insert_event_if_absent(event).await {
            Ok(true) => {
                summary.inserted += 1;
                let customer = if event.customer_name.is_empty() {
                    "(no name)"
                } else {
                    &event.customer_name
                };
                info!(
                    "Inserted {} - {} - {} ({})",
                    event.id,
                    customer,
                    event.event_name,
                    event.date_time.trim()
                );
            }
            Ok(false) => {
                summary.duplicates += 1;
                info!("Skipped duplicate {}", event.id);
            }
            Err(e) => {
                summary.failed += 1;
                error!("Insert error for id={}: {:?}", event.id, e);
            }
        }
    }

    summary
}
