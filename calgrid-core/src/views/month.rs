use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

use super::CalendarViews;
use crate::date_range::{start_of_day, start_of_month};
use crate::event::{Event, ProjectedEvent, badge_total};
use crate::grid::{GridLayout, MonthGridParams};

/// One day cell of a month view.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthViewDay<'a> {
    pub date: NaiveDate,
    /// Day of month
    pub label: u32,
    pub in_month: bool,
    pub is_past: bool,
    pub is_today: bool,
    pub is_future: bool,
    pub is_weekend: bool,
    pub events: Vec<ProjectedEvent<'a>>,
    pub badge_total: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthView<'a> {
    pub days: Vec<MonthViewDay<'a>>,
    pub row_offsets: Vec<usize>,
    pub total_days_visible_in_week: usize,
}

impl<G: GridLayout> CalendarViews<G> {
    /// Day cells covering the month of `view_date`, padded to whole weeks.
    ///
    /// Recurring events are projected into the viewed month. Cells outside
    /// the month keep their badge total but lose their events unless
    /// `display_all_month_events` is set.
    pub fn build_month_view<'a, F>(
        &self,
        events: &'a [Event],
        view_date: NaiveDateTime,
        mut cell_callback: F,
        excluded: &[Weekday],
    ) -> MonthView<'a>
    where
        F: FnMut(&mut MonthViewDay<'a>),
    {
        let anchor = start_of_day(start_of_month(view_date.date()));
        let projected = self.project_all(events, anchor);

        let grid = self.grid.month_grid(&MonthGridParams {
            events: &projected,
            view_date,
            excluded,
            week_starts_on: self.config.week_starts_on,
            today: self.today(),
        });

        let days = grid
            .days
            .into_iter()
            .map(|day| {
                let badge_total = badge_total(day.events.iter().map(|event| event.event));
                let events = if !self.config.display_all_month_events && !day.in_month {
                    Vec::new()
                } else {
                    day.events
                };

                let mut cell = MonthViewDay {
                    date: day.date,
                    label: day.date.day(),
                    in_month: day.in_month,
                    is_past: day.is_past,
                    is_today: day.is_today,
                    is_future: day.is_future,
                    is_weekend: day.is_weekend,
                    events,
                    badge_total,
                };
                cell_callback(&mut cell);
                cell
            })
            .collect();

        tracing::debug!(
            month = %view_date.format("%Y-%m"),
            events = projected.len(),
            "built month view"
        );

        MonthView {
            days,
            row_offsets: grid.row_offsets,
            total_days_visible_in_week: grid.total_days_visible_in_week,
        }
    }
}
