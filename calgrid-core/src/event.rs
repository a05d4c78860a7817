//! Event types consumed by the view builders.
//!
//! Events are owned by the caller and only ever borrowed by calgrid. Every
//! view build projects them into [`ProjectedEvent`] records instead of
//! writing derived fields back onto the events.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::CalGridError;

fn default_true() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// A calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub starts_at: NaiveDateTime,
    /// Absent means a zero-duration marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurs_on: Option<RecursOn>,
    /// Whether the event counts towards a cell's badge total
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub increments_badge_total: bool,
}

impl Event {
    pub fn new(title: impl Into<String>, starts_at: NaiveDateTime) -> Self {
        Event {
            title: title.into(),
            starts_at,
            ends_at: None,
            recurs_on: None,
            increments_badge_total: true,
        }
    }

    pub fn ending_at(mut self, ends_at: NaiveDateTime) -> Self {
        self.ends_at = Some(ends_at);
        self
    }

    pub fn recurring(mut self, recurs_on: RecursOn) -> Self {
        self.recurs_on = Some(recurs_on);
        self
    }

    pub fn without_badge(mut self) -> Self {
        self.increments_badge_total = false;
        self
    }

    /// The event's nominal period, before any recurrence projection.
    pub fn nominal_period(&self) -> EventPeriod {
        EventPeriod {
            start: self.starts_at,
            end: self.ends_at,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// How a recurring event repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum RecursOn {
    Year,
    Month,
}

impl RecursOn {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecursOn::Year => "year",
            RecursOn::Month => "month",
        }
    }
}

impl fmt::Display for RecursOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecursOn {
    type Err = CalGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" => Ok(RecursOn::Year),
            "month" => Ok(RecursOn::Month),
            other => Err(CalGridError::InvalidRecurrenceMode(other.to_string())),
        }
    }
}

impl TryFrom<String> for RecursOn {
    type Error = CalGridError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A concrete `{start, end}` pair for one occurrence of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventPeriod {
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
}

impl EventPeriod {
    /// Effective end: the end if present, otherwise the start.
    pub fn end_or_start(&self) -> NaiveDateTime {
        self.end.unwrap_or(self.start)
    }
}

/// An event paired with the period it occupies in one particular view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedEvent<'a> {
    pub event: &'a Event,
    pub period: EventPeriod,
}

impl ProjectedEvent<'_> {
    pub fn start(&self) -> NaiveDateTime {
        self.period.start
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.period.end
    }
}

/// Number of events that count towards a badge total.
pub fn badge_total<'a>(events: impl IntoIterator<Item = &'a Event>) -> usize {
    events
        .into_iter()
        .filter(|event| event.increments_badge_total)
        .count()
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

    #[test]
    fn test_recurs_on_rejects_unknown_mode() {
        let err = "week".parse::<RecursOn>().unwrap_err();
        assert!(matches!(err, CalGridError::InvalidRecurrenceMode(ref v) if v == "week"));
        assert_eq!("month".parse::<RecursOn>().unwrap(), RecursOn::Month);
    }

    #[test]
    fn test_deserialize_event_defaults() {
        let event: Event = serde_json::from_str(
            r#"{"title": "Standup", "starts_at": "2024-03-04T09:00:00"}"#,
        )
        .unwrap();

        assert_eq!(event.title, "Standup");
        assert_eq!(event.starts_at, at(2024, 3, 4, 9, 0));
        assert_eq!(event.ends_at, None);
        assert_eq!(event.recurs_on, None);
        assert!(event.increments_badge_total);
    }

    #[test]
    fn test_deserialize_invalid_recurrence_fails() {
        let result: Result<Event, _> = serde_json::from_str(
            r#"{"title": "x", "starts_at": "2024-03-04T09:00:00", "recurs_on": "fortnight"}"#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("fortnight"), "unexpected error: {err}");
    }

    #[test]
    fn test_badge_total_skips_opted_out_events() {
        let events = [
            Event::new("a", at(2024, 1, 1, 0, 0)),
            Event::new("b", at(2024, 1, 1, 0, 0)).without_badge(),
            Event::new("c", at(2024, 1, 1, 0, 0)),
        ];
        assert_eq!(badge_total(&events), 2);
    }
}
