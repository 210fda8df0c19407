//! The calendar page.
//!
//! Wires the pieces together the way the dashboard page does: events are
//! fetched into a `CalendarSlice`, filtered on every read, and edited through
//! the injected `RemoteStore`. Remote calls run as spawned tasks; the
//! returned `JoinHandle` resolves once the slice has been updated.
//!
//! Failed remote calls are logged and otherwise swallowed. There is no retry
//! and no rollback: the only visible difference is the missing success
//! notification.

mod request;
mod slice;

pub use slice::{CalendarSlice, SelectedRange};

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use validator::{Validate, ValidationErrors};

use crate::engine::RenderingEngine;
use crate::event::{CalendarEvent, EventColor, EventDraft, EventPatch};
use crate::filter::{FilterCriteria, apply_filter};
use crate::navigation::NavigationController;
use crate::notify::{Notifier, Severity};
use crate::store::RemoteStore;
use request::Lifecycle;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct PageOptions {
    pub request_timeout: Duration,
    /// Whether the display starts above the responsive breakpoint.
    pub is_wide: bool,
    pub initial_date: DateTime<Utc>,
}

impl Default for PageOptions {
    fn default() -> Self {
        PageOptions {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            is_wide: true,
            initial_date: Utc::now(),
        }
    }
}

pub struct CalendarPage<E> {
    store: Arc<dyn RemoteStore>,
    notifier: Arc<dyn Notifier>,
    slice: Arc<Mutex<CalendarSlice>>,
    navigation: NavigationController<E>,
    filter: FilterCriteria,
    filter_open: bool,
    lifecycle: Lifecycle,
    request_timeout: Duration,
}

impl<E> std::fmt::Debug for CalendarPage<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarPage")
            .field("filter", &self.filter)
            .field("filter_open", &self.filter_open)
            .finish_non_exhaustive()
    }
}

impl<E: RenderingEngine> CalendarPage<E> {
    pub fn new(
        store: Arc<dyn RemoteStore>,
        notifier: Arc<dyn Notifier>,
        options: PageOptions,
    ) -> Self {
        CalendarPage {
            store,
            notifier,
            slice: Arc::new(Mutex::new(CalendarSlice::default())),
            navigation: NavigationController::new(options.initial_date, options.is_wide),
            filter: FilterCriteria::default(),
            filter_open: false,
            lifecycle: Lifecycle::new(),
            request_timeout: options.request_timeout,
        }
    }

    // LIFECYCLE:

    pub fn mount(&mut self, engine: E) {
        self.navigation.mount(engine);
    }

    /// Cancel every outstanding request and release the engine.
    pub fn unmount(&mut self) -> Option<E> {
        debug!("Unmounting calendar page");
        self.lifecycle.cancel();
        self.navigation.unmount()
    }

    pub fn navigation(&self) -> &NavigationController<E> {
        &self.navigation
    }

    pub fn navigation_mut(&mut self) -> &mut NavigationController<E> {
        &mut self.navigation
    }

    // READS:

    /// A copy of the current page state.
    pub fn slice(&self) -> CalendarSlice {
        self.slice.lock().clone()
    }

    pub fn events(&self) -> Vec<CalendarEvent> {
        self.slice.lock().events().to_vec()
    }

    /// The events to draw, narrowed by the filter drawer.
    pub fn filtered_events(&self) -> Vec<CalendarEvent> {
        apply_filter(self.slice.lock().events(), &self.filter)
    }

    pub fn selected_event(&self) -> Option<CalendarEvent> {
        self.slice.lock().selected_event().cloned()
    }

    // FILTER DRAWER:

    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    pub fn is_filter_open(&self) -> bool {
        self.filter_open
    }

    pub fn open_filter(&mut self) {
        self.filter_open = true;
    }

    pub fn close_filter(&mut self) {
        self.filter_open = false;
    }

    pub fn toggle_filter_color(&mut self, color: EventColor) {
        self.filter.toggle_color(color);
    }

    pub fn set_filter_range(&mut self, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) {
        self.filter.set_range(start, end);
    }

    pub fn reset_filter(&mut self) {
        self.filter.reset();
    }

    /// Open the edit dialog for an event picked from the drawer's list.
    pub fn select_from_filter(&mut self, id: &str) {
        self.on_event_clicked(id);
    }

    // MODAL:

    pub fn open_new_event(&mut self) {
        self.slice.lock().open_modal();
    }

    pub fn close_modal(&mut self) {
        self.slice.lock().close_modal();
    }

    // ENGINE CALLBACKS:

    pub fn on_range_selected(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) {
        if let Some(engine) = self.navigation.engine_mut() {
            engine.unselect();
        }
        self.slice.lock().select_range(start, end);
    }

    pub fn on_event_clicked(&mut self, id: &str) {
        let mut slice = self.slice.lock();
        if slice.find(id).is_none() {
            drop(slice);
            warn!(id, "Clicked event is not loaded");
            self.notifier.notify("Event not found", Severity::Error);
            return;
        }
        slice.select_event(id);
    }

    pub fn on_event_dropped(
        &self,
        id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        all_day: bool,
    ) -> JoinHandle<()> {
        debug!(id, "Event dropped");
        self.on_drag_or_resize(id, start, end, all_day)
    }

    pub fn on_event_resized(
        &self,
        id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        all_day: bool,
    ) -> JoinHandle<()> {
        debug!(id, "Event resized");
        self.on_drag_or_resize(id, start, end, all_day)
    }

    /// Forward the geometry the engine settled on to the store.
    ///
    /// The engine owns the geometry; it is not re-validated here.
    pub fn on_drag_or_resize(
        &self,
        id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        all_day: bool,
    ) -> JoinHandle<()> {
        if end < start {
            warn!(id, %start, %end, "Engine reported an event ending before it starts");
        }

        let id = id.to_string();
        let patch = EventPatch::geometry(start, end, all_day);
        let store = Arc::clone(&self.store);
        let slice = Arc::clone(&self.slice);
        let guard = self.lifecycle.guard(self.request_timeout);

        tokio::spawn(async move {
            match guard.run(store.update_event(&id, &patch)).await {
                Ok(()) => {
                    slice.lock().apply_patch(&id, &patch);
                }
                Err(e) => error!(id = %id, error = %e, "Failed to move event"),
            }
        })
    }

    // REMOTE OPERATIONS:

    /// Fetch every event into the slice.
    pub fn load(&self) -> JoinHandle<()> {
        self.slice.lock().start_loading();

        let store = Arc::clone(&self.store);
        let slice = Arc::clone(&self.slice);
        let guard = self.lifecycle.guard(self.request_timeout);

        tokio::spawn(async move {
            match guard.run(store.fetch_events()).await {
                Ok(events) => {
                    info!(count = events.len(), "Loaded events");
                    slice.lock().set_events(events);
                }
                Err(e) => {
                    error!(error = %e, "Failed to load events");
                    slice.lock().has_error(e.to_string());
                }
            }
        })
    }

    /// Save the event dialog: update the selected event, or create a new one.
    ///
    /// Validation errors are handed back to the form and nothing is sent.
    pub fn submit_event(&mut self, draft: EventDraft) -> Result<JoinHandle<()>, ValidationErrors> {
        draft.validate()?;

        let selected = self.slice.lock().selected_event_id().map(str::to_owned);
        self.close_modal();

        let store = Arc::clone(&self.store);
        let slice = Arc::clone(&self.slice);
        let notifier = Arc::clone(&self.notifier);
        let guard = self.lifecycle.guard(self.request_timeout);

        let handle = match selected {
            Some(id) => {
                let patch = EventPatch::from(&draft);
                tokio::spawn(async move {
                    match guard.run(store.update_event(&id, &patch)).await {
                        Ok(()) => {
                            slice.lock().apply_patch(&id, &patch);
                            notifier.notify("Update success!", Severity::Success);
                        }
                        Err(e) => error!(id = %id, error = %e, "Failed to update event"),
                    }
                })
            }
            None => tokio::spawn(async move {
                match guard.run(store.create_event(&draft)).await {
                    Ok(event) => {
                        info!(id = %event.id, "Created event");
                        slice.lock().add_event(event);
                        notifier.notify("Create success!", Severity::Success);
                    }
                    Err(e) => error!(title = %draft.title, error = %e, "Failed to create event"),
                }
            }),
        };

        Ok(handle)
    }

    /// Delete the event open in the dialog. `None` when nothing is selected.
    ///
    /// The event stays in the slice until the store confirms the delete.
    pub fn delete_selected(&mut self) -> Option<JoinHandle<()>> {
        let id = self.slice.lock().selected_event_id().map(str::to_owned)?;
        self.close_modal();

        let store = Arc::clone(&self.store);
        let slice = Arc::clone(&self.slice);
        let notifier = Arc::clone(&self.notifier);
        let guard = self.lifecycle.guard(self.request_timeout);

        Some(tokio::spawn(async move {
            match guard.run(store.delete_event(&id)).await {
                Ok(()) => {
                    slice.lock().remove_event(&id);
                    notifier.notify("Delete success!", Severity::Success);
                }
                Err(e) => error!(id = %id, error = %e, "Failed to delete event"),
            }
        }))
    }
}
