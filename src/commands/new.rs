use anyhow::Result;
use calboard_core::config::CalboardConfig;
use calboard_core::{EventColor, EventDraft};

use crate::render::print_validation_errors;
use crate::utils::dates::{apply_duration, default_end, parse_when};

pub async fn run(
    config: &CalboardConfig,
    title: String,
    start: String,
    end: Option<String>,
    duration: Option<String>,
    description: Option<String>,
    color: Option<EventColor>,
) -> Result<()> {
    let start = parse_when(&start)?;
    let end_at = match (end, duration) {
        (Some(end), _) => parse_when(&end)?.at,
        (None, Some(duration)) => apply_duration(start.at, &duration)?,
        (None, None) => default_end(start),
    };

    let mut draft = EventDraft::new(title, start.at, end_at);
    if let Some(description) = description {
        draft = draft.with_description(description);
    }
    if let Some(color) = color {
        draft = draft.with_color(color);
    }
    if start.all_day {
        draft = draft.as_all_day();
    }

    let mut page = super::open_page(config).await?;
    page.open_new_event();

    match page.submit_event(draft) {
        Ok(handle) => handle.await?,
        Err(errors) => {
            print_validation_errors(&errors);
            anyhow::bail!("Event not created");
        }
    }

    Ok(())
}
