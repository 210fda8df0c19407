//! Event store kept in memory.

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use super::RemoteStore;
use crate::error::{CalboardError, CalboardResult};
use crate::event::{CalendarEvent, EventDraft, EventPatch};

/// Holds events for the lifetime of the process. Ids are sequential.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: RwLock<Vec<CalendarEvent>>,
    next_id: Mutex<u64>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<CalendarEvent>) -> Self {
        InMemoryEventStore {
            events: RwLock::new(events),
            next_id: Mutex::new(0),
        }
    }

    /// Copy of the stored events, for assertions.
    pub fn snapshot(&self) -> Vec<CalendarEvent> {
        self.events.read().clone()
    }
}

#[async_trait]
impl RemoteStore for InMemoryEventStore {
    async fn fetch_events(&self) -> CalboardResult<Vec<CalendarEvent>> {
        Ok(self.snapshot())
    }

    async fn create_event(&self, draft: &EventDraft) -> CalboardResult<CalendarEvent> {
        let id = {
            let mut next = self.next_id.lock();
            *next += 1;
            format!("mem-{}", *next)
        };
        let event = CalendarEvent::from_draft(id, draft);
        self.events.write().push(event.clone());
        Ok(event)
    }

    async fn update_event(&self, id: &str, patch: &EventPatch) -> CalboardResult<()> {
        let mut events = self.events.write();
        let event = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CalboardError::EventNotFound(id.to_string()))?;
        patch.apply(event);
        Ok(())
    }

    async fn delete_event(&self, id: &str) -> CalboardResult<()> {
        let mut events = self.events.write();
        let before = events.len();
        events.retain(|e| e.id != id);
        if events.len() == before {
            return Err(CalboardError::EventNotFound(id.to_string()));
        }
        Ok(())
    }
}
