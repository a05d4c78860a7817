use chrono::{Months, NaiveDate};

use super::CalendarViews;
use crate::date_range::{DateRange, start_of_month};
use crate::error::CalGridResult;
use crate::event::{Event, badge_total};
use crate::grid::GridLayout;
use crate::period::filter_in_period;

/// One month of a year view.
#[derive(Debug, Clone, PartialEq)]
pub struct YearCell<'a> {
    pub label: String,
    /// The cell is the current month
    pub is_today: bool,
    pub events: Vec<&'a Event>,
    /// First day of the month
    pub date: NaiveDate,
    pub badge_total: usize,
}

impl<G: GridLayout> CalendarViews<G> {
    /// Twelve month cells for the year of `view_date`, January first.
    ///
    /// `cell_callback` sees every cell before it is added to the view.
    pub fn build_year_view<'a, F>(
        &self,
        events: &'a [Event],
        view_date: chrono::NaiveDateTime,
        mut cell_callback: F,
    ) -> CalGridResult<Vec<YearCell<'a>>>
    where
        F: FnMut(&mut YearCell<'a>),
    {
        let overflow = self.config.day_overflow;
        let year = DateRange::year_of(view_date.date());
        let in_year = filter_in_period(events, year.start, year.end, overflow);
        let current_month = start_of_month(self.today());

        let mut view = Vec::with_capacity(12);
        for month_index in 0..12 {
            let first_day = year.start.date() + Months::new(month_index);
            let month = DateRange::month_of(first_day);
            let period_events =
                filter_in_period(in_year.iter().copied(), month.start, month.end, overflow);

            let mut cell = YearCell {
                label: self.format(month.start, &self.patterns.month)?,
                is_today: first_day == current_month,
                badge_total: badge_total(period_events.iter().copied()),
                events: period_events,
                date: first_day,
            };

            cell_callback(&mut cell);
            view.push(cell);
        }

        tracing::debug!(
            year = %view_date.format("%Y"),
            events = in_year.len(),
            "built year view"
        );

        Ok(view)
    }
}
