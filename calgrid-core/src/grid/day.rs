use super::{DayGrid, DayGridEvent, DayGridParams, event_in_period};
use crate::event::ProjectedEvent;

const MINUTES_IN_HOUR: f64 = 60.0;

pub(super) fn day_grid<'a>(params: &DayGridParams<'_, 'a>) -> DayGrid<'a> {
    let date = params.view_date.date();
    let start_of_view = date.and_time(params.day_start);
    let end_of_view = date.and_time(params.day_end);
    let hour_height_modifier = params.hour_segments * params.segment_height / MINUTES_IN_HOUR;

    let mut in_view: Vec<ProjectedEvent<'a>> = params
        .events
        .iter()
        .filter(|event| event_in_period(event, start_of_view, end_of_view))
        .copied()
        .collect();
    in_view.sort_by_key(|event| event.start());

    let mut placed: Vec<DayGridEvent<'a>> = Vec::with_capacity(in_view.len());

    for event in in_view {
        let event_start = event.start();
        let event_end = event.period.end_or_start();
        let starts_before_day = event_start < start_of_view;
        let ends_after_day = event_end > end_of_view;

        let mut top = 0.0;
        if event_start > start_of_view {
            top += (event_start - start_of_view).num_minutes() as f64;
        }
        top *= hour_height_modifier;

        let clipped_start = if starts_before_day { start_of_view } else { event_start };
        let clipped_end = if ends_after_day { end_of_view } else { event_end };
        let height = if event.end().is_some() {
            (clipped_end - clipped_start).num_minutes() as f64 * hour_height_modifier
        } else {
            params.segment_height
        };
        let bottom = top + height;

        let overlapping: Vec<&DayGridEvent<'a>> = placed
            .iter()
            .filter(|previous| {
                let previous_bottom = previous.top + previous.height;
                (previous.top < bottom && bottom < previous_bottom)
                    || (previous.top <= top && top < previous_bottom)
            })
            .collect();

        let mut left = 0.0;
        while overlapping.iter().any(|previous| previous.left == left) {
            left += params.event_width;
        }

        // Zero-height events take no room and are not shown.
        if height > 0.0 {
            placed.push(DayGridEvent {
                event,
                top,
                left,
                width: params.event_width,
                height,
                starts_before_day,
                ends_after_day,
            });
        }
    }

    let width = placed
        .iter()
        .map(|event| event.left + event.width)
        .fold(0.0, f64::max);

    DayGrid {
        events: placed,
        width,
    }
}
