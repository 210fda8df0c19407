use anyhow::Result;
use calboard_core::config::CalboardConfig;
use owo_colors::OwoColorize;

use crate::utils::dates::parse_when;

pub async fn run(config: &CalboardConfig, id: &str, start: &str, end: Option<&str>) -> Result<()> {
    let page = super::open_page(config).await?;

    let Some(event) = page.events().into_iter().find(|e| e.id == id) else {
        anyhow::bail!("Event '{id}' not found");
    };

    let start = parse_when(start)?;
    let end = match end {
        Some(end) => parse_when(end)?.at,
        None => start.at + (event.end - event.start),
    };

    page.on_event_dropped(id, start.at, end, start.all_day).await?;

    // Moves are not confirmed by a notification; read the result back instead.
    let moved = page.events().into_iter().find(|e| e.id == id);
    match moved {
        Some(moved) if moved.start == start.at => {
            println!("{}", format!("Moved: {}", moved.title).green());
            Ok(())
        }
        _ => anyhow::bail!("Could not move '{}'", event.title),
    }
}
