//! Remote event storage.
//!
//! The calendar page never reaches into storage directly: it is handed a
//! `RemoteStore` at construction and issues the four operations below.

mod file;
mod json_file;
mod memory;

pub use file::FileEventStore;
pub use json_file::JsonFile;
pub use memory::InMemoryEventStore;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::CalboardResult;
use crate::event::{CalendarEvent, EventDraft, EventPatch};

/// Backend that owns the persistent copy of the events.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Load every event.
    async fn fetch_events(&self) -> CalboardResult<Vec<CalendarEvent>>;

    /// Create an event. The store assigns the identifier.
    async fn create_event(&self, draft: &EventDraft) -> CalboardResult<CalendarEvent>;

    /// Apply a partial update to an existing event.
    async fn update_event(&self, id: &str, patch: &EventPatch) -> CalboardResult<()>;

    async fn delete_event(&self, id: &str) -> CalboardResult<()>;
}
