//! Rendering engine seam.
//!
//! The calendar widget that draws the grid is external. Calboard only talks
//! to it through `RenderingEngine`: imperative commands plus read-back of the
//! focused date and active view. `AgendaEngine` is a headless implementation
//! used by the terminal front end.

use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveDate, NaiveTime, Utc};

use crate::view::ViewMode;

/// Commands and read-back the navigation controller needs from a calendar widget.
pub trait RenderingEngine {
    fn focus_today(&mut self);
    fn step_previous(&mut self);
    fn step_next(&mut self);
    fn set_view(&mut self, mode: ViewMode);
    fn focused_date(&self) -> DateTime<Utc>;
    fn view(&self) -> ViewMode;
    /// Clear the highlighted range selection.
    fn unselect(&mut self);
    /// Half-open `[start, end)` window currently on screen.
    fn visible_range(&self) -> (DateTime<Utc>, DateTime<Utc>);
}

/// A calendar engine without a screen.
///
/// Months step by calendar month, week views by seven days and the day view
/// by one day. Weeks start on Sunday.
#[derive(Debug, Clone)]
pub struct AgendaEngine {
    date: DateTime<Utc>,
    view: ViewMode,
    selection: Option<(DateTime<Utc>, DateTime<Utc>)>,
    clock: fn() -> DateTime<Utc>,
}

impl AgendaEngine {
    pub fn new(date: DateTime<Utc>, view: ViewMode) -> Self {
        AgendaEngine {
            date,
            view,
            selection: None,
            clock: Utc::now,
        }
    }

    /// Replace the source of "today".
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Highlight a range, as a click-and-drag on empty slots would.
    pub fn select(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) {
        self.selection = Some((start, end));
    }

    pub fn selection(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.selection
    }

    fn step(&mut self, forward: bool) {
        let next = match self.view {
            ViewMode::DayGridMonth if forward => self.date.checked_add_months(Months::new(1)),
            ViewMode::DayGridMonth => self.date.checked_sub_months(Months::new(1)),
            ViewMode::TimeGridDay if forward => self.date.checked_add_days(Days::new(1)),
            ViewMode::TimeGridDay => self.date.checked_sub_days(Days::new(1)),
            _ if forward => self.date.checked_add_days(Days::new(7)),
            _ => self.date.checked_sub_days(Days::new(7)),
        };
        if let Some(date) = next {
            self.date = date;
        }
    }
}

impl RenderingEngine for AgendaEngine {
    fn focus_today(&mut self) {
        self.date = midnight((self.clock)().date_naive());
    }

    fn step_previous(&mut self) {
        self.step(false);
    }

    fn step_next(&mut self) {
        self.step(true);
    }

    fn set_view(&mut self, mode: ViewMode) {
        self.view = mode;
    }

    fn focused_date(&self) -> DateTime<Utc> {
        self.date
    }

    fn view(&self) -> ViewMode {
        self.view
    }

    fn unselect(&mut self) {
        self.selection = None;
    }

    fn visible_range(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let day = self.date.date_naive();
        match self.view {
            ViewMode::DayGridMonth => {
                let first = day.with_day(1).unwrap_or(day);
                let next = first.checked_add_months(Months::new(1)).unwrap_or(first);
                (midnight(first), midnight(next))
            }
            ViewMode::TimeGridDay => {
                let start = midnight(day);
                (start, start + Duration::days(1))
            }
            _ => {
                let offset = i64::from(day.weekday().num_days_from_sunday());
                let start = midnight(day) - Duration::days(offset);
                (start, start + Duration::days(7))
            }
        }
    }
}

fn midnight(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}
