//! Core types for calboard.
//!
//! This crate provides the pieces shared by every calboard front end:
//! - `event`, `filter` for calendar events and the filter drawer
//! - `view`, `engine`, `navigation` for toolbar navigation against a rendering engine
//! - `store`, `notify`, `page` for the calendar page wiring
//! - `submission` for the abstract submission form

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod filter;
pub mod navigation;
pub mod notify;
pub mod page;
pub mod store;
pub mod submission;
pub mod view;

pub use error::{CalboardError, CalboardResult};
pub use event::{CalendarEvent, EventColor, EventDraft, EventPatch};
pub use filter::{FilterCriteria, apply_filter};
pub use view::{ViewMode, ViewState};
