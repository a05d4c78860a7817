//! Year, month, week and day view builders.
//!
//! Every builder borrows the caller's events, projects recurring ones into
//! the requested period, keeps those that fall inside it and hands them to
//! the [`GridLayout`] for geometry. Nothing is cached between calls.

mod day;
mod month;
mod week;
mod week_times;
mod year;

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, Weekday};

use crate::config::CalendarConfig;
use crate::date_range::start_of_week;
use crate::error::CalGridResult;
use crate::event::{Event, EventPeriod, ProjectedEvent};
use crate::format::{DateFormatter, DatePatterns, formatter_for};
use crate::grid::{CalendarGrid, GridLayout};
use crate::recurrence::project;

pub use day::{DayView, compute_day_view_height};
pub use month::{MonthView, MonthViewDay};
pub use week::{WeekView, WeekViewDay, WeekViewEvent, WeekViewRow};
pub use week_times::{TimedEventRow, TimedWeekEvent, WeekViewWithTimes};
pub use year::YearCell;

/// Builds calendar views from a configuration, a formatter and a grid layout.
pub struct CalendarViews<G = CalendarGrid> {
    config: CalendarConfig,
    formatter: Box<dyn DateFormatter>,
    /// Configured patterns over the formatter's defaults
    patterns: DatePatterns,
    grid: G,
    today: Option<NaiveDate>,
}

impl CalendarViews<CalendarGrid> {
    /// Fails with `UnknownDateFormatter` if the configured formatter does not exist.
    pub fn new(config: CalendarConfig) -> CalGridResult<Self> {
        Self::with_grid(config, CalendarGrid)
    }
}

impl<G: GridLayout> CalendarViews<G> {
    pub fn with_grid(config: CalendarConfig, grid: G) -> CalGridResult<Self> {
        let formatter = formatter_for(&config.date_formatter)?;
        let patterns = config.date_formats.resolve(formatter.default_patterns());
        Ok(CalendarViews {
            config,
            formatter,
            patterns,
            grid,
            today: None,
        })
    }

    /// Replace the formatter picked from the configuration. Patterns the
    /// configuration leaves unset switch to the new formatter's defaults.
    pub fn with_formatter(mut self, formatter: Box<dyn DateFormatter>) -> Self {
        self.patterns = self
            .config
            .date_formats
            .resolve(formatter.default_patterns());
        self.formatter = formatter;
        self
    }

    /// Pin "today" instead of reading the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub fn patterns(&self) -> &DatePatterns {
        &self.patterns
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn format(&self, instant: NaiveDateTime, pattern: &str) -> CalGridResult<String> {
        self.formatter.format(instant, pattern)
    }

    /// Start and end times of a period with the `time` pattern. Periods
    /// spanning several days put the `day` pattern in front of each time.
    pub fn format_period(&self, period: &EventPeriod) -> CalGridResult<String> {
        let time = &self.patterns.time;
        match period.end {
            Some(end) if end.date() == period.start.date() => Ok(format!(
                "{}-{}",
                self.format(period.start, time)?,
                self.format(end, time)?
            )),
            Some(end) => {
                let day = &self.patterns.day;
                Ok(format!(
                    "{} {} - {} {}",
                    self.format(period.start, day)?,
                    self.format(period.start, time)?,
                    self.format(end, day)?,
                    self.format(end, time)?
                ))
            }
            None => self.format(period.start, time),
        }
    }

    /// Formatted names of the visible weekdays, starting on the configured week start.
    pub fn week_day_names(&self, excluded: &[Weekday]) -> CalGridResult<Vec<String>> {
        let first = start_of_week(self.today(), self.config.week_starts_on);
        (0..7)
            .map(|offset| first + Duration::days(offset))
            .filter(|date| !excluded.contains(&date.weekday()))
            .map(|date| {
                self.format(crate::date_range::start_of_day(date), &self.patterns.week_day)
            })
            .collect()
    }

    fn project_all<'a, I>(&self, events: I, anchor: NaiveDateTime) -> Vec<ProjectedEvent<'a>>
    where
        I: IntoIterator<Item = &'a Event>,
    {
        events
            .into_iter()
            .map(|event| ProjectedEvent {
                event,
                period: project(
                    event.nominal_period(),
                    event.recurs_on,
                    anchor,
                    self.config.day_overflow,
                ),
            })
            .collect()
    }
}
