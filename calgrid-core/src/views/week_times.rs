use std::collections::BTreeMap;

use chrono::{NaiveDateTime, Weekday};

use super::{CalendarViews, WeekViewDay};
use crate::config::DayViewOptions;
use crate::date_range::{start_of_day, start_of_week};
use crate::error::CalGridResult;
use crate::event::{Event, EventPeriod, ProjectedEvent};
use crate::grid::GridLayout;

/// A week event positioned at its real time of day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedWeekEvent<'a> {
    pub event: &'a Event,
    /// Period projected into the viewed week
    pub period: EventPeriod,
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    /// Number of positioned events sharing this start instant
    pub count: usize,
    /// Day column within the week, from the event's own start
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimedEventRow<'a> {
    pub row: Vec<TimedWeekEvent<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekViewWithTimes<'a> {
    pub days: Vec<WeekViewDay>,
    /// Always a single row holding every positioned event
    pub event_rows: Vec<TimedEventRow<'a>>,
}

impl<G: GridLayout> CalendarViews<G> {
    /// Week view whose events carry day-view geometry.
    ///
    /// Events of a day that start at the same instant share one column slot:
    /// each gets an equal share of `event_width`. Events that merely overlap
    /// without starting together are laid out independently.
    pub fn build_week_view_with_times<'a>(
        &self,
        events: &'a [Event],
        view_date: NaiveDateTime,
        options: &DayViewOptions,
    ) -> CalGridResult<WeekViewWithTimes<'a>> {
        let excluded: &[Weekday] = &[];
        let week = self.build_week_view(events, view_date, excluded)?;
        let week_start = start_of_day(start_of_week(view_date.date(), self.config.week_starts_on));

        let flattened: Vec<ProjectedEvent<'a>> = week
            .event_rows
            .iter()
            .flat_map(|row| row.row.iter())
            .map(|placed| ProjectedEvent {
                event: placed.event,
                period: placed.period,
            })
            .collect();

        let mut row = Vec::with_capacity(flattened.len());
        for day in &week.days {
            let mut by_start: BTreeMap<NaiveDateTime, Vec<ProjectedEvent<'a>>> = BTreeMap::new();
            for event in flattened.iter().filter(|event| event.start().date() == day.date) {
                by_start.entry(event.start()).or_default().push(*event);
            }

            for group in by_start.into_values() {
                let width = options.event_width / group.len() as f64;
                let layout = self.layout_day(&group, start_of_day(day.date), options, width)?;
                // Zero-length members are dropped by the layout and do not count.
                let count = layout.events.len();

                row.extend(layout.events.into_iter().map(|placed| TimedWeekEvent {
                    event: placed.event.event,
                    period: placed.event.period,
                    top: placed.top,
                    left: placed.left,
                    width: placed.width,
                    height: placed.height,
                    count,
                    offset: self.grid.week_offset(
                        &placed.event.event.nominal_period(),
                        week_start,
                        excluded,
                    ),
                }));
            }
        }

        tracing::debug!(
            week_start = %week_start.date(),
            events = flattened.len(),
            placed = row.len(),
            "built week view with times"
        );

        Ok(WeekViewWithTimes {
            days: week.days,
            event_rows: vec![TimedEventRow { row }],
        })
    }
}
