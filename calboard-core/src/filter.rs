//! Event filtering for the filter drawer.
//!
//! Filtering narrows by color tag first, then by date range. Both steps keep
//! the input order and never touch the input collection.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::event::{CalendarEvent, EventColor};

/// Narrowing parameters chosen in the filter drawer. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Selected color tags. Empty means no color restriction.
    pub colors: BTreeSet<EventColor>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// The date range itself is invalid (end before start).
    pub is_error: bool,
}

impl FilterCriteria {
    /// Select the color if it is not selected yet, otherwise deselect it.
    pub fn toggle_color(&mut self, color: EventColor) {
        if !self.colors.remove(&color) {
            self.colors.insert(color);
        }
    }

    /// Set the date bounds and recompute whether the range is invalid.
    pub fn set_range(&mut self, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) {
        self.start_date = start;
        self.end_date = end;
        self.is_error = matches!((start, end), (Some(s), Some(e)) if e < s);
    }

    pub fn reset(&mut self) {
        *self = FilterCriteria::default();
    }

    pub fn is_active(&self) -> bool {
        !self.colors.is_empty() || self.date_bounds().is_some()
    }

    fn matches_color(&self, event: &CalendarEvent) -> bool {
        self.colors.is_empty() || self.colors.contains(&event.color)
    }

    /// Bounds to filter on. `None` when a bound is missing or the range is invalid.
    pub fn date_bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if !self.is_error => Some((start, end)),
            _ => None,
        }
    }
}

/// Produce the events to display for the given criteria.
pub fn apply_filter(events: &[CalendarEvent], criteria: &FilterCriteria) -> Vec<CalendarEvent> {
    let mut filtered: Vec<CalendarEvent> = events.to_vec();

    if !criteria.colors.is_empty() {
        filtered.retain(|event| criteria.matches_color(event));
    }

    if let Some((start, end)) = criteria.date_bounds() {
        let (start_ms, end_ms) = (start.timestamp_millis(), end.timestamp_millis());
        filtered.retain(|event| {
            event.start.timestamp_millis() >= start_ms && event.end.timestamp_millis() <= end_ms
        });
    }

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 20, 9, 0, 0).unwrap()
    }

    fn event(id: &str, color: EventColor, start: DateTime<Utc>, end: DateTime<Utc>) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            title: format!("Event {id}"),
            description: None,
            start,
            end,
            all_day: false,
            color,
        }
    }

    /// Event 1 is green from T0 to T0+1h, event 2 is blue from T0+2h to T0+3h.
    fn sample() -> Vec<CalendarEvent> {
        vec![
            event("1", EventColor::Primary, t0(), t0() + Duration::hours(1)),
            event("2", EventColor::Info, t0() + Duration::hours(2), t0() + Duration::hours(3)),
        ]
    }

    fn ids(events: &[CalendarEvent]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_empty_criteria_returns_input_unchanged() {
        let events = sample();
        assert_eq!(apply_filter(&events, &FilterCriteria::default()), events);
    }

    #[test]
    fn test_color_filter_keeps_selected_colors_only() {
        let mut criteria = FilterCriteria::default();
        criteria.toggle_color(EventColor::Primary);
        assert_eq!(ids(&apply_filter(&sample(), &criteria)), vec!["1"]);
    }

    #[test]
    fn test_color_filter_preserves_order_and_multiplicity() {
        let events = vec![
            event("a", EventColor::Warning, t0(), t0()),
            event("b", EventColor::Info, t0(), t0()),
            event("c", EventColor::Warning, t0(), t0()),
            event("d", EventColor::Error, t0(), t0()),
        ];
        let mut criteria = FilterCriteria::default();
        criteria.toggle_color(EventColor::Error);
        criteria.toggle_color(EventColor::Warning);
        assert_eq!(ids(&apply_filter(&events, &criteria)), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_date_range_filter_is_inclusive() {
        let mut criteria = FilterCriteria::default();
        criteria.set_range(Some(t0()), Some(t0() + Duration::minutes(90)));
        assert_eq!(ids(&apply_filter(&sample(), &criteria)), vec!["1"]);

        criteria.set_range(Some(t0()), Some(t0() + Duration::hours(3)));
        assert_eq!(ids(&apply_filter(&sample(), &criteria)), vec!["1", "2"]);
    }

    #[test]
    fn test_single_bound_does_not_filter() {
        let mut criteria = FilterCriteria::default();
        criteria.set_range(Some(t0() + Duration::hours(5)), None);
        assert_eq!(apply_filter(&sample(), &criteria).len(), 2);
    }

    #[test]
    fn test_invalid_range_skips_date_filter() {
        let mut criteria = FilterCriteria::default();
        criteria.toggle_color(EventColor::Info);
        criteria.set_range(Some(t0() + Duration::hours(10)), Some(t0()));
        assert!(criteria.is_error);
        assert_eq!(ids(&apply_filter(&sample(), &criteria)), vec!["2"]);
    }

    #[test]
    fn test_explicit_error_flag_skips_valid_bounds() {
        let criteria = FilterCriteria {
            start_date: Some(t0()),
            end_date: Some(t0() + Duration::minutes(30)),
            is_error: true,
            ..Default::default()
        };
        assert_eq!(apply_filter(&sample(), &criteria).len(), 2);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let mut criteria = FilterCriteria::default();
        criteria.toggle_color(EventColor::Primary);
        criteria.toggle_color(EventColor::Info);
        criteria.set_range(Some(t0()), Some(t0() + Duration::hours(2)));

        let once = apply_filter(&sample(), &criteria);
        let twice = apply_filter(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_toggle_and_reset() {
        let mut criteria = FilterCriteria::default();
        criteria.toggle_color(EventColor::Success);
        assert!(criteria.is_active());
        criteria.toggle_color(EventColor::Success);
        assert!(!criteria.is_active());

        criteria.set_range(Some(t0()), Some(t0()));
        criteria.reset();
        assert_eq!(criteria, FilterCriteria::default());
    }
}
