//! Calendar view engine.
//!
//! This crate turns a flat list of events into year, month, week and day
//! views:
//! - `recurrence` projects yearly/monthly events into the viewed period
//! - `period` decides which events overlap a window
//! - `grid` lays out day cells, week rows and pixel geometry
//! - `views` ties them together behind [`CalendarViews`]

pub mod config;
pub mod date_range;
pub mod error;
pub mod event;
pub mod format;
pub mod grid;
pub mod ics;
pub mod period;
pub mod recurrence;
pub mod views;

pub use config::{CalendarConfig, DateFormats, DayViewOptions};
pub use error::{CalGridError, CalGridResult};
pub use event::{Event, EventPeriod, ProjectedEvent, RecursOn};
pub use period::{filter_in_period, is_in_period};
pub use recurrence::DayOverflow;
pub use views::{CalendarViews, compute_day_view_height};
