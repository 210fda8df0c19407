//! Calendar event types.
//!
//! `CalendarEvent` is what the remote store hands back and what the page
//! keeps in memory. `EventDraft` is the form payload for create/update and
//! `EventPatch` is a partial update (edits, drags and resizes).

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CalboardError;

/// The fixed palette events can be tagged with.
///
/// The tag doubles as the display color and as the filter key.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum EventColor {
    #[default]
    Primary,
    Info,
    Success,
    Warning,
    Error,
    InfoDarker,
    ErrorDarker,
}

impl EventColor {
    /// All palette entries, in the order the form offers them.
    pub const ALL: [EventColor; 7] = [
        EventColor::Primary,
        EventColor::Info,
        EventColor::Success,
        EventColor::Warning,
        EventColor::Error,
        EventColor::InfoDarker,
        EventColor::ErrorDarker,
    ];

    pub fn hex(&self) -> &'static str {
        match self {
            EventColor::Primary => "#00AB55",
            EventColor::Info => "#1890FF",
            EventColor::Success => "#54D62C",
            EventColor::Warning => "#FFC107",
            EventColor::Error => "#FF4842",
            EventColor::InfoDarker => "#04297A",
            EventColor::ErrorDarker => "#7A0C2E",
        }
    }

    /// Palette name, accepted on the command line alongside the hex value.
    pub fn name(&self) -> &'static str {
        match self {
            EventColor::Primary => "primary",
            EventColor::Info => "info",
            EventColor::Success => "success",
            EventColor::Warning => "warning",
            EventColor::Error => "error",
            EventColor::InfoDarker => "info-darker",
            EventColor::ErrorDarker => "error-darker",
        }
    }

    /// RGB components, for terminals that can render true color.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = &self.hex()[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }
}

impl fmt::Display for EventColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

impl FromStr for EventColor {
    type Err = CalboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EventColor::ALL
            .into_iter()
            .find(|c| {
                c.hex().eq_ignore_ascii_case(wanted) || c.name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| CalboardError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for EventColor {
    type Error = CalboardError;

    fn try_from(value: String) -> Result<Self, CalboardError> {
        value.parse()
    }
}

impl From<EventColor> for String {
    fn from(color: EventColor) -> Self {
        color.hex().to_string()
    }
}

/// A schedulable item on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub color: EventColor,
}

impl CalendarEvent {
    /// Build the stored event for a draft once the store has assigned an id.
    pub fn from_draft(id: impl Into<String>, draft: &EventDraft) -> Self {
        let mut event = CalendarEvent {
            id: id.into(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            start: draft.start,
            end: draft.end,
            all_day: draft.all_day,
            color: draft.color,
        };
        event.normalize();
        event
    }

    /// All-day events only carry date granularity.
    pub fn normalize(&mut self) {
        if self.all_day {
            self.start = start_of_day(self.start);
            self.end = start_of_day(self.end);
        }
    }

    /// Turn this event back into form values (the edit dialog).
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            start: self.start,
            end: self.end,
            all_day: self.all_day,
            color: self.color,
        }
    }
}

fn start_of_day(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Form values for creating or editing an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_event_times"))]
pub struct EventDraft {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters"))]
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub all_day: bool,
    pub color: EventColor,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        EventDraft {
            title: title.into(),
            description: None,
            start,
            end,
            all_day: false,
            color: EventColor::default(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: EventColor) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn as_all_day(mut self) -> Self {
        self.all_day = true;
        self
    }
}

fn validate_event_times(draft: &EventDraft) -> Result<(), ValidationError> {
    if draft.end < draft.start {
        return Err(ValidationError::new("end_before_start")
            .with_message(Cow::Borrowed("End date must be later than start date")));
    }
    Ok(())
}

/// A partial update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `Some(None)` clears the description.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_or_null"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<EventColor>,
}

impl EventPatch {
    /// Patch produced by a drag or resize gesture.
    pub fn geometry(start: DateTime<Utc>, end: DateTime<Utc>, all_day: bool) -> Self {
        EventPatch {
            start: Some(start),
            end: Some(end),
            all_day: Some(all_day),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == EventPatch::default()
    }

    pub fn apply(&self, event: &mut CalendarEvent) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(description) = &self.description {
            event.description = description.clone();
        }
        if let Some(start) = self.start {
            event.start = start;
        }
        if let Some(end) = self.end {
            event.end = end;
        }
        if let Some(all_day) = self.all_day {
            event.all_day = all_day;
        }
        if let Some(color) = self.color {
            event.color = color;
        }
        event.normalize();
    }
}

/// A present key (even `null`) is a change; only a missing key means untouched.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<&EventDraft> for EventPatch {
    fn from(draft: &EventDraft) -> Self {
        EventPatch {
            title: Some(draft.title.clone()),
            description: Some(draft.description.clone()),
            start: Some(draft.start),
            end: Some(draft.end),
            all_day: Some(draft.all_day),
            color: Some(draft.color),
        }
    }
}
