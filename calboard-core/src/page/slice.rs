//! Page-level calendar state and its reducers.

use chrono::{DateTime, Utc};

use crate::event::{CalendarEvent, EventPatch};

/// Slots highlighted by a click-and-drag on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Everything the calendar page keeps about events between renders.
#[derive(Debug, Clone, Default)]
pub struct CalendarSlice {
    is_loading: bool,
    error: Option<String>,
    events: Vec<CalendarEvent>,
    open_modal: bool,
    selected_event_id: Option<String>,
    selected_range: Option<SelectedRange>,
}

impl CalendarSlice {
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn is_modal_open(&self) -> bool {
        self.open_modal
    }

    pub fn selected_event_id(&self) -> Option<&str> {
        self.selected_event_id.as_deref()
    }

    pub fn selected_range(&self) -> Option<SelectedRange> {
        self.selected_range
    }

    pub fn selected_event(&self) -> Option<&CalendarEvent> {
        let id = self.selected_event_id.as_deref()?;
        self.find(id)
    }

    pub fn find(&self, id: &str) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    // REDUCERS:

    pub fn start_loading(&mut self) {
        self.is_loading = true;
    }

    pub fn has_error(&mut self, message: impl Into<String>) {
        self.is_loading = false;
        self.error = Some(message.into());
    }

    pub fn set_events(&mut self, events: Vec<CalendarEvent>) {
        self.is_loading = false;
        self.error = None;
        self.events = events;
    }

    pub fn add_event(&mut self, event: CalendarEvent) {
        self.events.push(event);
    }

    /// Returns false when the event is no longer in the slice.
    pub fn apply_patch(&mut self, id: &str, patch: &EventPatch) -> bool {
        match self.events.iter_mut().find(|e| e.id == id) {
            Some(event) => {
                patch.apply(event);
                true
            }
            None => false,
        }
    }

    pub fn remove_event(&mut self, id: &str) {
        self.events.retain(|e| e.id != id);
    }

    pub fn select_event(&mut self, id: impl Into<String>) {
        self.open_modal = true;
        self.selected_event_id = Some(id.into());
    }

    pub fn select_range(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) {
        self.open_modal = true;
        self.selected_range = Some(SelectedRange { start, end });
    }

    pub fn open_modal(&mut self) {
        self.open_modal = true;
    }

    pub fn close_modal(&mut self) {
        self.open_modal = false;
        self.selected_event_id = None;
        self.selected_range = None;
    }
}
