//! Recurrence projection.
//!
//! A recurring event stores one nominal occurrence. To show it in a given
//! period the nominal start is moved into the period's year (or year and
//! month) and the end follows by the same amount, so the event keeps its
//! duration.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::date_range::days_in_month;
use crate::event::{EventPeriod, RecursOn};

/// What happens when the nominal day of month does not exist in the target
/// month, e.g. the 31st projected into February.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOverflow {
    /// Carry the surplus days into the following month (Feb 31 2024 is Mar 2).
    #[default]
    Roll,
    /// Use the last day of the target month (Feb 31 2024 is Feb 29).
    Clamp,
}

/// Compute the effective period of an event for the period anchored at `anchor`.
pub fn project(
    nominal: EventPeriod,
    recurs_on: Option<RecursOn>,
    anchor: NaiveDateTime,
    overflow: DayOverflow,
) -> EventPeriod {
    let Some(recurs_on) = recurs_on else {
        return nominal;
    };

    let month = match recurs_on {
        RecursOn::Year => nominal.start.month(),
        RecursOn::Month => anchor.month(),
    };
    let date = substitute_year_month(nominal.start.date(), anchor.year(), month, overflow);
    let start = date.and_time(nominal.start.time());

    EventPeriod {
        start,
        end: adjust_end_from_start_diff(nominal.start, start, nominal.end),
    }
}

/// Shift `old_end` by the distance the start moved from `old_start` to `new_start`.
pub fn adjust_end_from_start_diff(
    old_start: NaiveDateTime,
    new_start: NaiveDateTime,
    old_end: Option<NaiveDateTime>,
) -> Option<NaiveDateTime> {
    let diff: Duration = new_start - old_start;
    old_end.map(|end| end + diff)
}

fn substitute_year_month(date: NaiveDate, year: i32, month: u32, overflow: DayOverflow) -> NaiveDate {
    let day = date.day();
    match overflow {
        DayOverflow::Roll => NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| first + Duration::days(i64::from(day) - 1))
            .unwrap_or(date),
        DayOverflow::Clamp => {
            NaiveDate::from_ymd_opt(year, month, day.min(days_in_month(year, month)))
                .unwrap_or(date)
        }
    }
}
