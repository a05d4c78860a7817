use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use super::{
    WeekGridEvent, WeekGridParams, WeekGridRow, WeekHeaderDay, WeekHeaderParams, day_flags,
    event_in_period, visible_days_in_week,
};
use crate::date_range::{DateRange, is_weekend, start_of_week, week_days_from};
use crate::event::EventPeriod;

pub(super) fn week_header(params: &WeekHeaderParams<'_>) -> Vec<WeekHeaderDay> {
    DateRange::week_of(params.view_date.date(), params.week_starts_on)
        .days()
        .filter(|date| !params.excluded.contains(&date.weekday()))
        .map(|date| {
            let (is_past, is_today, is_future) = day_flags(date, params.today);
            WeekHeaderDay {
                date,
                is_past,
                is_today,
                is_future,
                is_weekend: is_weekend(date),
            }
        })
        .collect()
}

/// Visible days between the start of the week and the day the event starts.
/// Events starting before the week sit at offset 0.
pub fn week_offset(
    start: NaiveDateTime,
    start_of_week: NaiveDateTime,
    excluded: &[Weekday],
) -> usize {
    if start < start_of_week {
        return 0;
    }
    let days = (start.date() - start_of_week.date()).num_days();
    let full_weeks = (days / 7) as usize;
    let remainder = week_days_from(start_of_week.weekday())
        .take((days % 7) as usize)
        .filter(|day| !excluded.contains(day))
        .count();

    full_weeks * visible_days_in_week(start_of_week.weekday(), excluded) + remainder
}

/// Visible days of the week covered by the event, capped so that
/// `offset + span` never exceeds the visible days of the week.
pub fn week_span(
    period: &EventPeriod,
    offset: usize,
    start_of_week: NaiveDate,
    excluded: &[Weekday],
    total_days: usize,
) -> usize {
    let end_of_week = start_of_week + Duration::days(6);
    let first = period.start.date().max(start_of_week);
    let last = last_occupied_day(period).min(end_of_week);

    let span = first
        .iter_days()
        .take_while(|day| *day <= last)
        .filter(|day| !excluded.contains(&day.weekday()))
        .count();

    span.min(total_days.saturating_sub(offset))
}

/// An event ending exactly at midnight does not occupy the following day.
fn last_occupied_day(period: &EventPeriod) -> NaiveDate {
    match period.end {
        Some(end) if end > period.start && end.time() == NaiveTime::MIN => {
            end.date().pred_opt().unwrap_or(end.date())
        }
        Some(end) => end.date(),
        None => period.start.date(),
    }
}

pub(super) fn week_grid<'a>(params: &WeekGridParams<'_, 'a>) -> Vec<WeekGridRow<'a>> {
    let week = DateRange::week_of(params.view_date.date(), params.week_starts_on);
    let total_days = visible_days_in_week(params.week_starts_on, params.excluded);

    let mut placed: Vec<WeekGridEvent<'a>> = params
        .events
        .iter()
        .filter(|event| event_in_period(event, week.start, week.end))
        .filter_map(|event| {
            let offset = week_offset(event.start(), week.start, params.excluded);
            let span = week_span(
                &event.period,
                offset,
                week.start.date(),
                params.excluded,
                total_days,
            );
            (offset < total_days && span > 0).then_some(WeekGridEvent {
                event: *event,
                offset,
                span,
                starts_before_week: event.start() < week.start,
                ends_after_week: event.period.end_or_start() > week.end,
            })
        })
        .collect();

    placed.sort_by_key(|placed| placed.event.start().date());

    pack_rows(placed, total_days)
}

/// Greedily fill each row with the next events that fit after it.
fn pack_rows(placed: Vec<WeekGridEvent<'_>>, total_days: usize) -> Vec<WeekGridRow<'_>> {
    let mut allocated = vec![false; placed.len()];
    let mut rows = Vec::new();

    for (index, first) in placed.iter().enumerate() {
        if allocated[index] {
            continue;
        }
        allocated[index] = true;

        let mut row_span = first.offset + first.span;
        let mut row = vec![*first];

        for (next_index, next) in placed.iter().enumerate().skip(index + 1) {
            if allocated[next_index] {
                continue;
            }
            if next.offset >= row_span && next.offset + next.span <= total_days {
                allocated[next_index] = true;
                let relative_offset = next.offset - row_span;
                row_span += relative_offset + next.span;
                row.push(WeekGridEvent {
                    offset: relative_offset,
                    ..*next
                });
            }
        }

        rows.push(WeekGridRow { row });
    }

    rows
}
