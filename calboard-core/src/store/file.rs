//! Event store backed by a JSON file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use super::{JsonFile, RemoteStore};
use crate::error::{CalboardError, CalboardResult};
use crate::event::{CalendarEvent, EventDraft, EventPatch};

/// Stores every event in one `events.json` file.
///
/// Writes inside one process are serialized; ids are random v4 UUIDs.
#[derive(Debug)]
pub struct FileEventStore {
    file: JsonFile<CalendarEvent>,
    lock: Mutex<()>,
}

impl FileEventStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileEventStore {
            file: JsonFile::new(path),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[async_trait]
impl RemoteStore for FileEventStore {
    #[instrument(skip(self), fields(path = %self.path().display()))]
    async fn fetch_events(&self) -> CalboardResult<Vec<CalendarEvent>> {
        let _guard = self.lock.lock().await;
        let events = self.file.load().await?;
        debug!(count = events.len(), "Loaded events");
        Ok(events)
    }

    #[instrument(skip(self, draft), fields(title = %draft.title))]
    async fn create_event(&self, draft: &EventDraft) -> CalboardResult<CalendarEvent> {
        let _guard = self.lock.lock().await;
        let mut events = self.file.load().await?;

        let event = CalendarEvent::from_draft(uuid::Uuid::new_v4().to_string(), draft);
        events.push(event.clone());
        self.file.save(&events).await?;

        debug!(id = %event.id, "Created event");
        Ok(event)
    }

    #[instrument(skip(self, patch))]
    async fn update_event(&self, id: &str, patch: &EventPatch) -> CalboardResult<()> {
        let _guard = self.lock.lock().await;
        let mut events = self.file.load().await?;

        let event = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CalboardError::EventNotFound(id.to_string()))?;
        patch.apply(event);

        self.file.save(&events).await
    }

    #[instrument(skip(self))]
    async fn delete_event(&self, id: &str) -> CalboardResult<()> {
        let _guard = self.lock.lock().await;
        let mut events = self.file.load().await?;

        let before = events.len();
        events.retain(|e| e.id != id);
        if events.len() == before {
            return Err(CalboardError::EventNotFound(id.to_string()));
        }

        self.file.save(&events).await
    }
}
