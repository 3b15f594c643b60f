use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

use super::{Store, StoreError};
use crate::models::{Event, User};

/// Хранилище в памяти для тестов обработчиков.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    events: Mutex<BTreeMap<String, Event>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub fn event(&self, id: &str) -> Option<Event> {
        self.events.lock().unwrap().get(id).cloned()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        let mut events: Vec<Event> = self.events.lock().unwrap().values().cloned().collect();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(events)
    }

    async fn get_event(&self, id: &str) -> Result<Option<Event>, StoreError> {
        Ok(self.event(id))
    }

    async fn insert_event(&self, event: &Event) -> Result<(), StoreError> {
        if self.insert_event_if_absent(event).await? {
            Ok(())
        } else {
            Err(StoreError::Duplicate(event.id.clone()))
        }
    }

    async fn insert_event_if_absent(&self, event: &Event) -> Result<bool, StoreError> {
        let mut events = self.events.lock().unwrap();
        if events.contains_key(&event.id) {
            return Ok(false);
        }
        events.insert(event.id.clone(), event.clone());
        Ok(true)
    }

    async fn update_event(&self, id: &str, event: &Event) -> Result<Option<Event>, StoreError> {
        let mut events = self.events.lock().unwrap();
        let Some(existing) = events.get_mut(id) else {
            return Ok(None);
        };

        let created_at = if event.created_at.is_empty() {
            existing.created_at.clone()
        } else {
            event.created_at.clone()
        };
        *existing = Event {
            id: id.to_string(),
            created_at,
            ..event.clone()
        };
        Ok(Some(existing.clone()))
    }

    async fn delete_event(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.events.lock().unwrap().remove(id).is_some())
    }
}
