//! Import events from ICS files using the icalendar crate's parser.

use chrono::NaiveDateTime;
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

use crate::date_range::start_of_day;
use crate::error::{CalGridError, CalGridResult};
use crate::event::{Event, RecursOn};

/// Property turning off the badge count of an event (`X-CALGRID-BADGE:FALSE`).
const BADGE_PROPERTY: &str = "X-CALGRID-BADGE";

/// Parse every VEVENT of an ICS document.
///
/// Dates without a time start at midnight, and UTC or zoned times keep
/// their wall-clock value.
pub fn parse_events(content: &str) -> CalGridResult<Vec<Event>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| CalGridError::IcsParse(e.to_string()))?;

    calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .map(parse_vevent)
        .collect()
}

fn parse_vevent(vevent: &Component<'_>) -> CalGridResult<Event> {
    let title = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_else(|| "(No title)".to_string());

    let start = vevent
        .find_prop("DTSTART")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
        .map(to_naive)
        .ok_or_else(|| CalGridError::IcsParse(format!("event '{title}' has no valid DTSTART")))?;

    let end = match vevent.find_prop("DTEND") {
        Some(prop) => Some(
            DatePerhapsTime::try_from(prop)
                .map(to_naive)
                .map_err(|_| CalGridError::IcsParse(format!("event '{title}' has an invalid DTEND")))?,
        ),
        None => vevent
            .find_prop("DURATION")
            .and_then(|p| parse_duration(p.val.as_ref()))
            .map(|duration| start + duration),
    };

    let mut event = Event::new(title, start);
    event.ends_at = end;

    if let Some(rrule) = vevent.find_prop("RRULE") {
        event.recurs_on = Some(recurs_on_from_rrule(rrule.val.as_ref())?);
    }

    if vevent
        .find_prop(BADGE_PROPERTY)
        .is_some_and(|p| p.val.as_ref().eq_ignore_ascii_case("FALSE"))
    {
        event = event.without_badge();
    }

    Ok(event)
}

fn to_naive(dpt: DatePerhapsTime) -> NaiveDateTime {
    match dpt {
        DatePerhapsTime::Date(date) => start_of_day(date),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            CalendarDateTime::Utc(dt) => dt.naive_utc(),
            CalendarDateTime::Floating(naive) => naive,
            CalendarDateTime::WithTimezone { date_time, .. } => date_time,
        },
    }
}

/// Only yearly and monthly rules can be expressed as a recurrence anchor.
fn recurs_on_from_rrule(rrule: &str) -> CalGridResult<RecursOn> {
    let freq = rrule
        .split(';')
        .find_map(|part| part.strip_prefix("FREQ="))
        .unwrap_or_default();

    match freq {
        "YEARLY" => Ok(RecursOn::Year),
        "MONTHLY" => Ok(RecursOn::Month),
        other => Err(CalGridError::InvalidRecurrenceMode(other.to_lowercase())),
    }
}

/// Parse an ISO 8601 DURATION value such as `PT1H30M`.
fn parse_duration(value: &str) -> Option<chrono::Duration> {
    let duration = iso8601::duration(value).ok()?;
    let std_duration: std::time::Duration = duration.into();
    chrono::Duration::from_std(std_duration).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn calendar(events: &str) -> String {
        format!(
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//calgrid//EN\r\n{events}END:VCALENDAR\r\n"
        )
    }

    #[test]
    fn test_parse_timed_and_all_day_events() {
        let ics = calendar(
            "BEGIN:VEVENT\r\n\
             UID:standup@calgrid\r\n\
             SUMMARY:Standup\r\n\
             DTSTART:20240304T090000\r\n\
             DTEND:20240304T091500\r\n\
             END:VEVENT\r\n\
             BEGIN:VEVENT\r\n\
             UID:holiday@calgrid\r\n\
             SUMMARY:Holiday\r\n\
             DTSTART;VALUE=DATE:20240329\r\n\
             DTEND;VALUE=DATE:20240330\r\n\
             END:VEVENT\r\n",
        );
        let events = parse_events(&ics).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].title, "Standup");
        assert_eq!(events[0].starts_at, at(2024, 3, 4, 9, 0));
        assert_eq!(events[0].ends_at, Some(at(2024, 3, 4, 9, 15)));
        assert_eq!(events[1].starts_at, at(2024, 3, 29, 0, 0));
        assert_eq!(events[1].ends_at, Some(at(2024, 3, 30, 0, 0)));
        assert!(events[0].increments_badge_total);
    }

    #[test]
    fn test_parse_utc_and_zoned_times_keep_wall_clock() {
        let ics = calendar(
            "BEGIN:VEVENT\r\n\
             SUMMARY:Call\r\n\
             DTSTART:20240304T140000Z\r\n\
             END:VEVENT\r\n\
             BEGIN:VEVENT\r\n\
             SUMMARY:Flight\r\n\
             DTSTART;TZID=Europe/Berlin:20240305T071000\r\n\
             DURATION:PT1H30M\r\n\
             END:VEVENT\r\n",
        );
        let events = parse_events(&ics).unwrap();

        assert_eq!(events[0].starts_at, at(2024, 3, 4, 14, 0));
        assert_eq!(events[0].ends_at, None);
        assert_eq!(events[1].starts_at, at(2024, 3, 5, 7, 10));
        assert_eq!(events[1].ends_at, Some(at(2024, 3, 5, 8, 40)));
    }

    #[test]
    fn test_parse_recurrence_and_badge() {
        let ics = calendar(
            "BEGIN:VEVENT\r\n\
             SUMMARY:Birthday\r\n\
             DTSTART;VALUE=DATE:19900820\r\n\
             RRULE:FREQ=YEARLY\r\n\
             END:VEVENT\r\n\
             BEGIN:VEVENT\r\n\
             SUMMARY:Rent\r\n\
             DTSTART:20230105T090000\r\n\
             RRULE:FREQ=MONTHLY;BYMONTHDAY=5\r\n\
             X-CALGRID-BADGE:FALSE\r\n\
             END:VEVENT\r\n",
        );
        let events = parse_events(&ics).unwrap();

        assert_eq!(events[0].recurs_on, Some(RecursOn::Year));
        assert_eq!(events[1].recurs_on, Some(RecursOn::Month));
        assert!(!events[1].increments_badge_total);
    }

    #[test]
    fn test_unsupported_frequency_is_rejected() {
        let ics = calendar(
            "BEGIN:VEVENT\r\n\
             SUMMARY:Gym\r\n\
             DTSTART:20240304T070000\r\n\
             RRULE:FREQ=WEEKLY;BYDAY=MO\r\n\
             END:VEVENT\r\n",
        );
        let err = parse_events(&ics).unwrap_err();
        assert!(matches!(err, CalGridError::InvalidRecurrenceMode(ref mode) if mode == "weekly"));
    }

    #[test]
    fn test_missing_start_is_an_error() {
        let ics = calendar("BEGIN:VEVENT\r\nSUMMARY:Nowhen\r\nEND:VEVENT\r\n");
        let err = parse_events(&ics).unwrap_err();
        assert!(matches!(err, CalGridError::IcsParse(_)));
    }

    #[test]
    fn test_calendar_without_events() {
        assert!(parse_events(&calendar("")).unwrap().is_empty());
    }
}
