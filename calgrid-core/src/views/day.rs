use chrono::NaiveDateTime;

use super::CalendarViews;
use crate::config::DayViewOptions;
use crate::date_range::{parse_hour_minute, start_of_day};
use crate::error::CalGridResult;
use crate::event::{Event, ProjectedEvent};
use crate::grid::{DayGridEvent, DayGridParams, GridLayout};

const DEFAULT_DAY_START: &str = "00:00";
const DEFAULT_DAY_END: &str = "23:59";

/// Border allowance added below the last segment.
const DAY_VIEW_BORDER: f64 = 3.0;

/// Positioned segments of a single day.
#[derive(Debug, Clone)]
pub struct DayView<'a> {
    pub events: Vec<DayGridEvent<'a>>,
    /// Width needed to show every column side by side
    pub width: f64,
}

impl<G: GridLayout> CalendarViews<G> {
    /// Lay out the events of `view_date` between the configured day bounds.
    ///
    /// Recurring events are projected onto the viewed day before layout.
    pub fn build_day_view<'a>(
        &self,
        events: &'a [Event],
        view_date: NaiveDateTime,
        options: &DayViewOptions,
    ) -> CalGridResult<DayView<'a>> {
        let projected = self.project_all(events, start_of_day(view_date.date()));
        let view = self.layout_day(&projected, view_date, options, options.event_width)?;

        tracing::debug!(
            day = %view_date.date(),
            events = projected.len(),
            placed = view.events.len(),
            "built day view"
        );

        Ok(view)
    }

    /// Day geometry for events that are already projected.
    pub(crate) fn layout_day<'a>(
        &self,
        projected: &[ProjectedEvent<'a>],
        view_date: NaiveDateTime,
        options: &DayViewOptions,
        event_width: f64,
    ) -> CalGridResult<DayView<'a>> {
        let grid = self.grid.day_grid(&DayGridParams {
            events: projected,
            view_date,
            hour_segments: options.hour_segments(),
            day_start: parse_hour_minute(or_default(&options.day_start, DEFAULT_DAY_START))?,
            day_end: parse_hour_minute(or_default(&options.day_end, DEFAULT_DAY_END))?,
            event_width,
            segment_height: options.segment_height,
        });

        Ok(DayView {
            events: grid.events,
            width: grid.width,
        })
    }
}

fn or_default<'s>(value: &'s str, default: &'s str) -> &'s str {
    if value.is_empty() { default } else { value }
}

/// Pixel height of a day view showing `day_start` to `day_end`.
pub fn compute_day_view_height(
    day_start: &str,
    day_end: &str,
    minutes_per_segment: u32,
    segment_height: f64,
) -> CalGridResult<f64> {
    let start = parse_hour_minute(or_default(day_start, DEFAULT_DAY_START))?;
    let end = parse_hour_minute(or_default(day_end, DEFAULT_DAY_END))?;
    let hour_height = (60.0 / f64::from(minutes_per_segment)) * segment_height;
    let minutes = (end - start).num_minutes() as f64;

    Ok(minutes / 60.0 * hour_height + DAY_VIEW_BORDER)
}

impl DayViewOptions {
    pub fn view_height(&self) -> CalGridResult<f64> {
        compute_day_view_height(
            &self.day_start,
            &self.day_end,
            self.minutes_per_segment,
            self.segment_height,
        )
    }
}
