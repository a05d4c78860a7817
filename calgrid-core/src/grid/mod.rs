//! Grid geometry: which day cell, week row or pixel box an event occupies.
//!
//! The view builders only decide *which* events belong to a view and *where*
//! in time they fall. Turning that into cells, rows and offsets is the job
//! of a [`GridLayout`]. [`CalendarGrid`] is the stock implementation.

mod day;
mod month;
mod week;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::event::{EventPeriod, ProjectedEvent};

pub use week::{week_offset, week_span};

/// Layout engine used by the view builders.
pub trait GridLayout {
    /// Day cells from the start of the week containing the 1st of the month
    /// to the end of the week containing its last day.
    fn month_grid<'a>(&self, params: &MonthGridParams<'_, 'a>) -> MonthGrid<'a>;

    /// The visible days of the week containing the view date.
    fn week_header(&self, params: &WeekHeaderParams<'_>) -> Vec<WeekHeaderDay>;

    /// Week events packed into rows that do not collide.
    fn week_grid<'a>(&self, params: &WeekGridParams<'_, 'a>) -> Vec<WeekGridRow<'a>>;

    /// Events of one day positioned in pixels.
    fn day_grid<'a>(&self, params: &DayGridParams<'_, 'a>) -> DayGrid<'a>;

    /// Number of visible days between the start of the week and the event's first day.
    fn week_offset(
        &self,
        period: &EventPeriod,
        start_of_week: NaiveDateTime,
        excluded: &[Weekday],
    ) -> usize;
}

#[derive(Debug, Clone)]
pub struct MonthGridParams<'p, 'a> {
    pub events: &'p [ProjectedEvent<'a>],
    pub view_date: NaiveDateTime,
    pub excluded: &'p [Weekday],
    pub week_starts_on: Weekday,
    pub today: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct GridDay<'a> {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_past: bool,
    pub is_today: bool,
    pub is_future: bool,
    pub is_weekend: bool,
    pub events: Vec<ProjectedEvent<'a>>,
}

#[derive(Debug, Clone)]
pub struct MonthGrid<'a> {
    pub days: Vec<GridDay<'a>>,
    /// Index into `days` of the first cell of every row
    pub row_offsets: Vec<usize>,
    pub total_days_visible_in_week: usize,
}

#[derive(Debug, Clone)]
pub struct WeekHeaderParams<'p> {
    pub view_date: NaiveDateTime,
    pub excluded: &'p [Weekday],
    pub week_starts_on: Weekday,
    pub today: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekHeaderDay {
    pub date: NaiveDate,
    pub is_past: bool,
    pub is_today: bool,
    pub is_future: bool,
    pub is_weekend: bool,
}

#[derive(Debug, Clone)]
pub struct WeekGridParams<'p, 'a> {
    pub events: &'p [ProjectedEvent<'a>],
    pub view_date: NaiveDateTime,
    pub excluded: &'p [Weekday],
    pub week_starts_on: Weekday,
}

/// An event placed in a week row.
///
/// The first event of a row has its offset from the start of the week;
/// each following one is offset from the end of the event before it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeekGridEvent<'a> {
    pub event: ProjectedEvent<'a>,
    pub offset: usize,
    pub span: usize,
    pub starts_before_week: bool,
    pub ends_after_week: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekGridRow<'a> {
    pub row: Vec<WeekGridEvent<'a>>,
}

#[derive(Debug, Clone)]
pub struct DayGridParams<'p, 'a> {
    pub events: &'p [ProjectedEvent<'a>],
    pub view_date: NaiveDateTime,
    pub hour_segments: f64,
    pub day_start: NaiveTime,
    pub day_end: NaiveTime,
    pub event_width: f64,
    pub segment_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayGridEvent<'a> {
    pub event: ProjectedEvent<'a>,
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub starts_before_day: bool,
    pub ends_after_day: bool,
}

#[derive(Debug, Clone)]
pub struct DayGrid<'a> {
    pub events: Vec<DayGridEvent<'a>>,
    /// Total width needed to show every column
    pub width: f64,
}

/// The stock grid layout.
#[derive(Debug, Default, Clone, Copy)]
pub struct CalendarGrid;

impl GridLayout for CalendarGrid {
    fn month_grid<'a>(&self, params: &MonthGridParams<'_, 'a>) -> MonthGrid<'a> {
        month::month_grid(params)
    }

    fn week_header(&self, params: &WeekHeaderParams<'_>) -> Vec<WeekHeaderDay> {
        week::week_header(params)
    }

    fn week_grid<'a>(&self, params: &WeekGridParams<'_, 'a>) -> Vec<WeekGridRow<'a>> {
        week::week_grid(params)
    }

    fn day_grid<'a>(&self, params: &DayGridParams<'_, 'a>) -> DayGrid<'a> {
        day::day_grid(params)
    }

    fn week_offset(
        &self,
        period: &EventPeriod,
        start_of_week: NaiveDateTime,
        excluded: &[Weekday],
    ) -> usize {
        week_offset(period.start, start_of_week, excluded)
    }
}

/// Grid-side membership test. Unlike the recurrence-aware filter the
/// events are already projected, and touching either boundary with either
/// end counts.
pub(crate) fn event_in_period(
    event: &ProjectedEvent<'_>,
    period_start: NaiveDateTime,
    period_end: NaiveDateTime,
) -> bool {
    let start = event.start();
    let end = event.period.end_or_start();

    (start > period_start && start < period_end)
        || (end > period_start && end < period_end)
        || (start < period_start && end > period_end)
        || start == period_start
        || start == period_end
        || end == period_start
        || end == period_end
}

pub(crate) fn visible_days_in_week(week_starts_on: Weekday, excluded: &[Weekday]) -> usize {
    crate::date_range::week_days_from(week_starts_on)
        .filter(|day| !excluded.contains(day))
        .count()
}

/// Past/today/future flags of a date relative to `today`.
pub(crate) fn day_flags(date: NaiveDate, today: NaiveDate) -> (bool, bool, bool) {
    (date < today, date == today, date > today)
}
