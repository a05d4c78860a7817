//! Period membership: does an event appear in a time window?

use chrono::NaiveDateTime;

use crate::event::Event;
use crate::recurrence::{DayOverflow, project};

/// Whether `event`, projected against `period_start`, overlaps
/// `[period_start, period_end]`.
///
/// The "between" checks are strict, but an event starting exactly at the
/// window start or ending exactly at the window end always belongs to it.
pub fn is_in_period(
    event: &Event,
    period_start: NaiveDateTime,
    period_end: NaiveDateTime,
    overflow: DayOverflow,
) -> bool {
    let period = project(event.nominal_period(), event.recurs_on, period_start, overflow);
    let start = period.start;
    let end = period.end_or_start();

    (start > period_start && start < period_end)
        || (end > period_start && end < period_end)
        || (start < period_start && end > period_end)
        || start == period_start
        || end == period_end
}

/// The events in `[period_start, period_end]`, in input order.
pub fn filter_in_period<'a, I>(
    events: I,
    period_start: NaiveDateTime,
    period_end: NaiveDateTime,
    overflow: DayOverflow,
) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|event| is_in_period(event, period_start, period_end, overflow))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_range::DateRange;
    use crate::event::RecursOn;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn march_2024() -> DateRange {
        DateRange::month_of(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap())
    }

    #[test]
    fn test_event_inside_window() {
        let range = march_2024();
        let event = Event::new("inside", at(2024, 3, 10, 9, 0)).ending_at(at(2024, 3, 10, 10, 0));
        assert!(is_in_period(&event, range.start, range.end, DayOverflow::Roll));
    }

    #[test]
    fn test_event_outside_window() {
        let range = march_2024();
        let before = Event::new("before", at(2024, 2, 10, 9, 0)).ending_at(at(2024, 2, 11, 9, 0));
        let after = Event::new("after", at(2024, 4, 1, 0, 0));
        assert!(!is_in_period(&before, range.start, range.end, DayOverflow::Roll));
        assert!(!is_in_period(&after, range.start, range.end, DayOverflow::Roll));
    }

    #[test]
    fn test_event_overlapping_one_edge() {
        let range = march_2024();
        let event = Event::new("edge", at(2024, 2, 28, 9, 0)).ending_at(at(2024, 3, 2, 9, 0));
        assert!(is_in_period(&event, range.start, range.end, DayOverflow::Roll));
    }

    #[test]
    fn test_event_spanning_whole_window() {
        let range = march_2024();
        let event = Event::new("span", at(2024, 2, 1, 0, 0)).ending_at(at(2024, 4, 30, 0, 0));
        assert!(is_in_period(&event, range.start, range.end, DayOverflow::Roll));
        assert_eq!(
            filter_in_period([&event], range.start, range.end, DayOverflow::Roll).len(),
            1
        );
    }

    #[test]
    fn test_boundary_equality_counts_as_membership() {
        let start = at(2024, 3, 1, 0, 0);
        let end = at(2024, 3, 1, 12, 0);

        let starts_at_start = Event::new("a", start);
        assert!(is_in_period(&starts_at_start, start, end, DayOverflow::Roll));

        let ends_at_end = Event::new("b", at(2024, 2, 1, 0, 0)).ending_at(end);
        assert!(is_in_period(&ends_at_end, start, end, DayOverflow::Roll));

        // A marker sitting exactly on the window end is also its own end.
        let marker_at_end = Event::new("c", end);
        assert!(is_in_period(&marker_at_end, start, end, DayOverflow::Roll));
    }

    #[test]
    fn test_event_ending_at_window_start_is_excluded() {
        let start = at(2024, 3, 1, 0, 0);
        let end = at(2024, 3, 1, 12, 0);
        let event = Event::new("ends-before", at(2024, 2, 29, 20, 0)).ending_at(start);
        assert!(!is_in_period(&event, start, end, DayOverflow::Roll));
    }

    #[test]
    fn test_recurring_event_is_projected_against_period_start() {
        let range = march_2024();
        let birthday = Event::new("birthday", at(1990, 3, 15, 0, 0)).recurring(RecursOn::Year);
        let rent = Event::new("rent", at(2020, 7, 3, 9, 0)).recurring(RecursOn::Month);
        let old = Event::new("old", at(1990, 3, 15, 0, 0));

        assert!(is_in_period(&birthday, range.start, range.end, DayOverflow::Roll));
        assert!(is_in_period(&rent, range.start, range.end, DayOverflow::Roll));
        assert!(!is_in_period(&old, range.start, range.end, DayOverflow::Roll));
    }

    #[test]
    fn test_filter_preserves_input_order() {
        let range = march_2024();
        let events = vec![
            Event::new("third", at(2024, 3, 30, 9, 0)),
            Event::new("skipped", at(2024, 5, 1, 9, 0)),
            Event::new("first", at(2024, 3, 2, 9, 0)),
            Event::new("second", at(2024, 3, 15, 9, 0)),
        ];

        let titles: Vec<_> = filter_in_period(&events, range.start, range.end, DayOverflow::Roll)
            .into_iter()
            .map(|event| event.title.as_str())
            .collect();
        assert_eq!(titles, ["third", "first", "second"]);
    }
}
