use chrono::{Datelike, Duration};

use super::{GridDay, MonthGrid, MonthGridParams, day_flags, event_in_period, visible_days_in_week};
use crate::date_range::{DateRange, is_weekend, start_of_week};
use crate::event::ProjectedEvent;

pub(super) fn month_grid<'a>(params: &MonthGridParams<'_, 'a>) -> MonthGrid<'a> {
    let month = DateRange::month_of(params.view_date.date());
    let first = start_of_week(month.start.date(), params.week_starts_on);
    let last = start_of_week(month.end.date(), params.week_starts_on) + Duration::days(6);
    let view = DateRange::from_dates(first, last);

    let in_view: Vec<ProjectedEvent<'a>> = params
        .events
        .iter()
        .filter(|event| event_in_period(event, view.start, view.end))
        .copied()
        .collect();

    let days: Vec<GridDay<'a>> = view
        .days()
        .filter(|date| !params.excluded.contains(&date.weekday()))
        .map(|date| {
            let day = DateRange::day_of(date);
            let (is_past, is_today, is_future) = day_flags(date, params.today);
            GridDay {
                date,
                in_month: date.year() == params.view_date.year()
                    && date.month() == params.view_date.month(),
                is_past,
                is_today,
                is_future,
                is_weekend: is_weekend(date),
                events: in_view
                    .iter()
                    .filter(|event| event_in_period(event, day.start, day.end))
                    .copied()
                    .collect(),
            }
        })
        .collect();

    let total_days_visible_in_week = visible_days_in_week(params.week_starts_on, params.excluded);
    let row_offsets = if total_days_visible_in_week == 0 {
        Vec::new()
    } else {
        (0..days.len() / total_days_visible_in_week)
            .map(|row| row * total_days_visible_in_week)
            .collect()
    };

    MonthGrid {
        days,
        row_offsets,
        total_days_visible_in_week,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Event, EventPeriod};
    use chrono::{NaiveDate, NaiveDateTime, Weekday};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn projected(event: &Event) -> ProjectedEvent<'_> {
        ProjectedEvent {
            event,
            period: EventPeriod {
                start: event.starts_at,
                end: event.ends_at,
            },
        }
    }

    fn params<'p, 'a>(
        events: &'p [ProjectedEvent<'a>],
        excluded: &'p [Weekday],
    ) -> MonthGridParams<'p, 'a> {
        MonthGridParams {
            events,
            view_date: at(2024, 3, 15, 0, 0),
            excluded,
            week_starts_on: Weekday::Sun,
            today: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        }
    }

    #[test]
    fn test_month_grid_spans_whole_weeks() {
        let grid = month_grid(&params(&[], &[]));

        // March 2024: Fri 1st .. Sun 31st, Sunday-start weeks from Feb 25 to Apr 6
        assert_eq!(grid.days.len(), 42);
        assert_eq!(grid.days[0].date, NaiveDate::from_ymd_opt(2024, 2, 25).unwrap());
        assert_eq!(grid.days[41].date, NaiveDate::from_ymd_opt(2024, 4, 6).unwrap());
        assert!(!grid.days[0].in_month);
        assert!(grid.days[5].in_month);
        assert_eq!(grid.row_offsets, vec![0, 7, 14, 21, 28, 35]);
        assert_eq!(grid.total_days_visible_in_week, 7);
    }

    #[test]
    fn test_month_grid_today_flags() {
        let grid = month_grid(&params(&[], &[]));
        let today = grid
            .days
            .iter()
            .find(|day| day.is_today)
            .expect("today should be in the grid");
        assert_eq!(today.date, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert!(grid.days[0].is_past);
        assert!(grid.days[41].is_future);
        assert!(grid.days[0].is_weekend);
    }

    #[test]
    fn test_month_grid_skips_excluded_weekdays() {
        let grid = month_grid(&params(&[], &[Weekday::Sat, Weekday::Sun]));
        assert_eq!(grid.total_days_visible_in_week, 5);
        assert_eq!(grid.days.len(), 30);
        assert!(grid.days.iter().all(|day| !day.is_weekend));
        assert_eq!(grid.row_offsets, vec![0, 5, 10, 15, 20, 25]);
    }

    #[test]
    fn test_month_grid_places_multi_day_events_on_each_day() {
        let trip = Event::new("trip", at(2024, 3, 4, 12, 0)).ending_at(at(2024, 3, 6, 9, 0));
        let call = Event::new("call", at(2024, 3, 5, 16, 0));
        let events = [projected(&trip), projected(&call)];
        let grid = month_grid(&params(&events, &[]));

        let titles_on = |d: u32| {
            let date = NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
            grid.days
                .iter()
                .find(|day| day.date == date)
                .unwrap()
                .events
                .iter()
                .map(|event| event.event.title.as_str())
                .collect::<Vec<_>>()
        };

        assert_eq!(titles_on(3), Vec::<&str>::new());
        assert_eq!(titles_on(4), vec!["trip"]);
        assert_eq!(titles_on(5), vec!["trip", "call"]);
        assert_eq!(titles_on(6), vec!["trip"]);
        assert_eq!(titles_on(7), Vec::<&str>::new());
    }
}
