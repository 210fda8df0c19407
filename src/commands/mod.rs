pub mod abstracts;
pub mod config;
pub mod delete;
pub mod events;
pub mod move_event;
pub mod new;
pub mod update;
pub mod view;

use std::sync::Arc;

use anyhow::Result;
use calboard_core::config::CalboardConfig;
use calboard_core::engine::AgendaEngine;
use calboard_core::notify::Notifier;
use calboard_core::page::{CalendarPage, PageOptions};
use calboard_core::store::FileEventStore;
use calboard_core::view::ViewMode;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::render::TerminalNotifier;
use crate::utils::tui::create_spinner;

/// Open the calendar page on the configured event file and load its events.
pub async fn open_page(config: &CalboardConfig) -> Result<CalendarPage<AgendaEngine>> {
    open_page_at(config, Utc::now(), true, Arc::new(TerminalNotifier)).await
}

pub async fn open_page_at(
    config: &CalboardConfig,
    date: DateTime<Utc>,
    is_wide: bool,
    notifier: Arc<dyn Notifier>,
) -> Result<CalendarPage<AgendaEngine>> {
    let store = Arc::new(FileEventStore::new(config.events_path()));
    debug!(path = %store.path().display(), %date, is_wide, "Opening calendar page");
    let options = PageOptions {
        request_timeout: config.request_timeout(),
        is_wide,
        initial_date: date,
    };

    let mut page = CalendarPage::new(store, notifier, options);
    page.mount(AgendaEngine::new(date, ViewMode::for_width(is_wide)));

    let spinner = create_spinner("Loading events...");
    page.load().await?;
    spinner.finish_and_clear();

    if let Some(error) = page.slice().error() {
        anyhow::bail!("Could not load events: {error}");
    }

    Ok(page)
}

/// Select an event the way clicking it does; unknown ids are reported.
pub fn select_event(page: &mut CalendarPage<AgendaEngine>, id: &str) -> Result<()> {
    page.on_event_clicked(id);
    if page.selected_event().is_none() {
        anyhow::bail!("Event '{id}' not found");
    }
    Ok(())
}
