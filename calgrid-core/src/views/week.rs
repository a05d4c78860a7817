use chrono::{NaiveDate, NaiveDateTime, Weekday};

use super::CalendarViews;
use crate::date_range::{DateRange, start_of_day};
use crate::error::CalGridResult;
use crate::event::{Event, EventPeriod};
use crate::grid::{GridLayout, WeekGridParams, WeekHeaderParams};
use crate::period::filter_in_period;

/// A day header of a week view.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekViewDay {
    pub date: NaiveDate,
    pub is_past: bool,
    pub is_today: bool,
    pub is_future: bool,
    pub is_weekend: bool,
    pub week_day_label: String,
    pub day_label: String,
}

/// An event placed in a week row, with its period projected into the week.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeekViewEvent<'a> {
    pub event: &'a Event,
    pub period: EventPeriod,
    pub offset: usize,
    pub span: usize,
    pub starts_before_week: bool,
    pub ends_after_week: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekViewRow<'a> {
    pub row: Vec<WeekViewEvent<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekView<'a> {
    pub days: Vec<WeekViewDay>,
    pub event_rows: Vec<WeekViewRow<'a>>,
}

impl<G: GridLayout> CalendarViews<G> {
    /// Day headers and row-packed events for the week containing `view_date`.
    pub fn build_week_view<'a>(
        &self,
        events: &'a [Event],
        view_date: NaiveDateTime,
        excluded: &[Weekday],
    ) -> CalGridResult<WeekView<'a>> {
        let week_starts_on = self.config.week_starts_on;

        let days = self
            .grid
            .week_header(&WeekHeaderParams {
                view_date,
                excluded,
                week_starts_on,
                today: self.today(),
            })
            .into_iter()
            .map(|day| {
                let instant = start_of_day(day.date);
                Ok(WeekViewDay {
                    week_day_label: self.format(instant, &self.patterns.week_day)?,
                    day_label: self.format(instant, &self.patterns.day)?,
                    date: day.date,
                    is_past: day.is_past,
                    is_today: day.is_today,
                    is_future: day.is_future,
                    is_weekend: day.is_weekend,
                })
            })
            .collect::<CalGridResult<Vec<_>>>()?;

        let week = DateRange::week_of(view_date.date(), week_starts_on);
        let in_week = filter_in_period(events, week.start, week.end, self.config.day_overflow);
        let projected = self.project_all(in_week, week.start);

        let event_rows: Vec<WeekViewRow<'a>> = self
            .grid
            .week_grid(&WeekGridParams {
                events: &projected,
                view_date,
                excluded,
                week_starts_on,
            })
            .into_iter()
            .map(|grid_row| WeekViewRow {
                row: grid_row
                    .row
                    .into_iter()
                    .map(|placed| WeekViewEvent {
                        event: placed.event.event,
                        period: placed.event.period,
                        offset: placed.offset,
                        span: placed.span,
                        starts_before_week: placed.starts_before_week,
                        ends_after_week: placed.ends_after_week,
                    })
                    .collect(),
            })
            .collect();

        tracing::debug!(
            week_start = %week.start.date(),
            events = projected.len(),
            rows = event_rows.len(),
            "built week view"
        );

        Ok(WeekView { days, event_rows })
    }
}
