//! Calendar view modes and the toolbar's view state.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CalboardError;

/// Display granularity of the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    DayGridMonth,
    TimeGridWeek,
    TimeGridDay,
    ListWeek,
    TimelineWeek,
}

impl ViewMode {
    pub const ALL: [ViewMode; 5] = [
        ViewMode::DayGridMonth,
        ViewMode::TimeGridWeek,
        ViewMode::TimeGridDay,
        ViewMode::ListWeek,
        ViewMode::TimelineWeek,
    ];

    /// Default view for the current display width: month grid when wide,
    /// compact list when narrow.
    pub fn for_width(is_wide: bool) -> Self {
        if is_wide {
            ViewMode::DayGridMonth
        } else {
            ViewMode::ListWeek
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::DayGridMonth => "dayGridMonth",
            ViewMode::TimeGridWeek => "timeGridWeek",
            ViewMode::TimeGridDay => "timeGridDay",
            ViewMode::ListWeek => "listWeek",
            ViewMode::TimelineWeek => "timelineWeek",
        }
    }

    /// Toolbar label.
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::DayGridMonth => "Month",
            ViewMode::TimeGridWeek => "Week",
            ViewMode::TimeGridDay => "Day",
            ViewMode::ListWeek => "Agenda",
            ViewMode::TimelineWeek => "Timeline",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = CalboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewMode::ALL
            .into_iter()
            .find(|v| v.as_str() == s || v.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| CalboardError::InvalidView(s.to_string()))
    }
}

/// What the toolbar shows: the focused date and the active view.
///
/// Mirrors the rendering engine; only the navigation controller writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub date: DateTime<Utc>,
    pub view: ViewMode,
}

impl ViewState {
    pub fn new(date: DateTime<Utc>, is_wide: bool) -> Self {
        ViewState {
            date,
            view: ViewMode::for_width(is_wide),
        }
    }

    /// Toolbar heading, e.g. "March 2025" or "20 Mar 2025".
    pub fn title(&self) -> String {
        match self.view {
            ViewMode::DayGridMonth => self.date.format("%B %Y").to_string(),
            _ => self.date.format("%d %b %Y").to_string(),
        }
    }
}
