use anyhow::Result;
use calboard_core::EventColor;
use calboard_core::config::CalboardConfig;
use owo_colors::OwoColorize;

use crate::render::print_agenda;
use crate::utils::dates::{parse_date_end, parse_date_start};

pub async fn run(
    config: &CalboardConfig,
    colors: Vec<EventColor>,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    let mut page = super::open_page(config).await?;

    page.open_filter();
    for color in colors {
        page.toggle_filter_color(color);
    }

    let start = from.as_deref().map(parse_date_start).transpose()?;
    let end = to.as_deref().map(parse_date_end).transpose()?;
    page.set_filter_range(start, end);

    if start.is_some() != end.is_some() {
        eprintln!("{}", "Date filtering needs both --from and --to".dimmed());
    } else if page.filter().is_error {
        eprintln!(
            "{}",
            "End date must be later than start date; ignoring the date range".yellow()
        );
    }

    let events = page.filtered_events();
    print_agenda(&events);

    if page.filter().is_active() {
        println!();
        println!(
            "{}",
            format!("{} of {} events", events.len(), page.events().len()).dimmed()
        );
    }

    page.close_filter();
    Ok(())
}
