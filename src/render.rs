//! Terminal rendering for calboard types.
//!
//! Extension traits that add colored output to calboard-core types using
//! owo_colors.

use calboard_core::event::{CalendarEvent, EventColor};
use calboard_core::notify::{Notifier, Severity};
use calboard_core::submission::AbstractRecord;
use chrono::{DateTime, Local, NaiveDate, Utc};
use owo_colors::OwoColorize;
use validator::ValidationErrors;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventColor {
    fn render(&self) -> String {
        let (r, g, b) = self.rgb();
        "●".truecolor(r, g, b).to_string()
    }
}

impl Render for CalendarEvent {
    fn render(&self) -> String {
        let time = if self.all_day {
            format!("{:>13}", "all-day")
        } else {
            format!("{} - {}", format_time(self.start), format_time(self.end))
        };
        format!(
            "  {} {} {} {}",
            self.color.render(),
            time,
            self.title,
            format!("[{}]", self.id).dimmed()
        )
    }
}

impl Render for AbstractRecord {
    fn render(&self) -> String {
        let s = &self.submission;
        format!(
            "{}  {}\n  {} ({})\n  {}",
            s.journal_name.bold(),
            format!("[{}]", self.id).dimmed(),
            s.title,
            s.author_name,
            s.link_doi.dimmed()
        )
    }
}

fn format_time(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%H:%M").to_string()
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

/// Print events grouped by local day, sorted by start.
pub fn print_agenda(events: &[CalendarEvent]) {
    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return;
    }

    let mut sorted: Vec<&CalendarEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.start);

    let today = Local::now().date_naive();
    let mut current_date: Option<NaiveDate> = None;

    for event in sorted {
        let date = event.start.with_timezone(&Local).date_naive();

        if current_date != Some(date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", format_date_label(date, today).bold());
            current_date = Some(date);
        }

        println!("{}", event.render());
    }
}

/// Print form errors, one line per failed rule.
pub fn print_validation_errors(errors: &ValidationErrors) {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    for (field, errs) in fields {
        let label = if field == "__all__" { "form" } else { &*field };
        for err in errs {
            let message = err.message.as_deref().unwrap_or(&*err.code);
            eprintln!("  {} {}", format!("{label}:").red(), message);
        }
    }
}

/// Prints notifications as colored lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Success => println!("{}", message.green()),
            Severity::Info => println!("{}", message.cyan()),
            Severity::Warning => eprintln!("{}", message.yellow()),
            Severity::Error => eprintln!("{}", message.red()),
            Severity::Default => println!("{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_labels() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        assert_eq!(format_date_label(today, today), "Today");
        assert_eq!(format_date_label(today.succ_opt().unwrap(), today), "Tomorrow");
        assert_eq!(
            format_date_label(NaiveDate::from_ymd_opt(2025, 3, 25).unwrap(), today),
            "Tue Mar 25"
        );
    }
}
