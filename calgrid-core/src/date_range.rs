//! Calendar period arithmetic (start/end of day, week, month and year).

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::error::CalGridResult;

/// An inclusive `[start, end]` window. `end` is the last millisecond of the
/// period, matching "end of period" in the usual date libraries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    /// From the first to the last day, both inclusive.
    pub fn from_dates(first: NaiveDate, last: NaiveDate) -> Self {
        DateRange {
            start: start_of_day(first),
            end: end_of_day(last),
        }
    }

    pub fn year_of(date: NaiveDate) -> Self {
        let first = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date);
        let last = NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date);
        Self::from_dates(first, last)
    }

    pub fn month_of(date: NaiveDate) -> Self {
        Self::from_dates(start_of_month(date), end_of_month(date))
    }

    pub fn week_of(date: NaiveDate, week_starts_on: Weekday) -> Self {
        let first = start_of_week(date, week_starts_on);
        Self::from_dates(first, first + Duration::days(6))
    }

    pub fn day_of(date: NaiveDate) -> Self {
        Self::from_dates(date, date)
    }

    /// Every calendar day touched by the range.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.end.date();
        self.start
            .date()
            .iter_days()
            .take_while(move |day| *day <= last)
    }
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1) - Duration::milliseconds(1)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    start_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| end_of_month(first).day())
        .unwrap_or(31)
}

pub fn start_of_week(date: NaiveDate, week_starts_on: Weekday) -> NaiveDate {
    let day_idx = date.weekday().num_days_from_monday() as i64;
    let start_idx = week_starts_on.num_days_from_monday() as i64;
    let diff = (7 + day_idx - start_idx) % 7;
    date - Duration::days(diff)
}

/// The seven weekdays in display order for the given week start.
pub fn week_days_from(week_starts_on: Weekday) -> impl Iterator<Item = Weekday> {
    std::iter::successors(Some(week_starts_on), |day| Some(day.succ())).take(7)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Parse a view date given as `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM`.
pub fn parse_view_date(s: &str) -> CalGridResult<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Ok(dt);
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")?;
    Ok(start_of_day(date))
}

/// Parse an `HH:mm` day boundary such as `"08:30"`.
pub fn parse_hour_minute(s: &str) -> CalGridResult<NaiveTime> {
    Ok(NaiveTime::parse_from_str(s, "%H:%M")?)
}
