use std::sync::Arc;

use anyhow::Result;
use calboard_core::ViewMode;
use calboard_core::config::CalboardConfig;
use calboard_core::engine::RenderingEngine;
use calboard_core::notify::LogNotifier;
use chrono::{Duration, Utc};
use owo_colors::OwoColorize;

use crate::render::print_agenda;
use crate::utils::dates::parse_date_start;

/// Toolbar actions, applied in field order.
#[derive(Debug, Default)]
pub struct Navigation {
    pub view: Option<ViewMode>,
    pub date: Option<String>,
    pub today: bool,
    pub next: u32,
    pub prev: u32,
    pub narrow: bool,
}

pub async fn run(config: &CalboardConfig, nav: Navigation) -> Result<()> {
    let date = match nav.date.as_deref() {
        Some(date) => parse_date_start(date)?,
        None => Utc::now(),
    };

    // Read-only: nothing here notifies the user.
    let mut page = super::open_page_at(config, date, true, Arc::new(LogNotifier)).await?;

    let navigation = page.navigation_mut();
    navigation.on_breakpoint_change(!nav.narrow);
    if let Some(view) = nav.view {
        navigation.change_view(view);
    }
    if nav.today {
        navigation.go_to_today();
    }
    for _ in 0..nav.prev {
        navigation.go_to_previous();
    }
    for _ in 0..nav.next {
        navigation.go_to_next();
    }

    let state = *navigation.state();
    let Some((start, end)) = navigation.engine().map(|e| e.visible_range()) else {
        anyhow::bail!("Calendar is not mounted");
    };

    println!("{}  {}", state.title().bold(), format!("({})", state.view.label()).dimmed());
    println!();

    // Range ends are exclusive; the filter's are inclusive.
    page.set_filter_range(Some(start), Some(end - Duration::seconds(1)));
    print_agenda(&page.filtered_events());

    page.unmount();
    Ok(())
}
