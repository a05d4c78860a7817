//! Date formatting backends.
//!
//! View builders never format dates themselves: they receive a
//! [`DateFormatter`] when constructed and hand it the patterns from the
//! configuration. The backend is picked once by name via [`formatter_for`].

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::error::{CalGridError, CalGridResult};

/// Render an instant with a pattern.
pub trait DateFormatter: Send + Sync {
    fn format(&self, instant: NaiveDateTime, pattern: &str) -> CalGridResult<String>;

    /// Patterns used for labels the configuration does not override.
    fn default_patterns(&self) -> DatePatterns;
}

/// The label patterns handed to a [`DateFormatter`], in its own syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePatterns {
    pub month: String,
    pub week_day: String,
    pub day: String,
    pub time: String,
}

impl DatePatterns {
    fn new(month: &str, week_day: &str, day: &str, time: &str) -> Self {
        DatePatterns {
            month: month.to_string(),
            week_day: week_day.to_string(),
            day: day.to_string(),
            time: time.to_string(),
        }
    }
}

/// Formatter using chrono's strftime syntax (`%A %-d %B`).
#[derive(Debug, Default, Clone, Copy)]
pub struct StrftimeFormatter;

impl DateFormatter for StrftimeFormatter {
    fn format(&self, instant: NaiveDateTime, pattern: &str) -> CalGridResult<String> {
        let mut out = String::new();
        write!(out, "{}", instant.format(pattern))
            .map_err(|_| CalGridError::Format(pattern.to_string()))?;
        Ok(out)
    }

    fn default_patterns(&self) -> DatePatterns {
        DatePatterns::new("%B", "%A", "%-d %b", "%H:%M")
    }
}

/// Formatter accepting moment.js style tokens (`dddd D MMMM, YYYY`).
///
/// Text inside square brackets is copied verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct MomentFormatter;

impl DateFormatter for MomentFormatter {
    fn format(&self, instant: NaiveDateTime, pattern: &str) -> CalGridResult<String> {
        let translated = moment_to_strftime(pattern)?;
        StrftimeFormatter
            .format(instant, &translated)
            .map_err(|_| CalGridError::Format(pattern.to_string()))
    }

    fn default_patterns(&self) -> DatePatterns {
        DatePatterns::new("MMMM", "dddd", "D MMM", "HH:mm")
    }
}

/// Longest tokens first so `MMMM` wins over `MM`.
const MOMENT_TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("M", "%-m"),
    ("DD", "%d"),
    ("D", "%-d"),
    ("dddd", "%A"),
    ("ddd", "%a"),
    ("HH", "%H"),
    ("H", "%-H"),
    ("hh", "%I"),
    ("h", "%-I"),
    ("mm", "%M"),
    ("m", "%-M"),
    ("ss", "%S"),
    ("s", "%-S"),
    ("A", "%p"),
    ("a", "%P"),
];

fn moment_to_strftime(pattern: &str) -> CalGridResult<String> {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    while let Some(c) = rest.chars().next() {
        if c == '[' {
            let close = rest
                .find(']')
                .ok_or_else(|| CalGridError::Format(pattern.to_string()))?;
            out.push_str(&rest[1..close].replace('%', "%%"));
            rest = &rest[close + 1..];
            continue;
        }

        if let Some((token, replacement)) = MOMENT_TOKENS
            .iter()
            .find(|(token, _)| rest.starts_with(token))
        {
            out.push_str(replacement);
            rest = &rest[token.len()..];
            continue;
        }

        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }

    Ok(out)
}

/// Resolve a formatter backend by its configured name.
pub fn formatter_for(name: &str) -> CalGridResult<Box<dyn DateFormatter>> {
    match name {
        "strftime" | "chrono" => Ok(Box::new(StrftimeFormatter)),
        "moment" => Ok(Box::new(MomentFormatter)),
        other => Err(CalGridError::UnknownDateFormatter(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn wednesday() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 6)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap()
    }

    #[test]
    fn test_strftime_formatter() {
        let text = StrftimeFormatter.format(wednesday(), "%A %-d %B").unwrap();
        assert_eq!(text, "Wednesday 6 March");
    }

    #[test]
    fn test_strftime_formatter_rejects_invalid_pattern() {
        let err = StrftimeFormatter.format(wednesday(), "%Q").unwrap_err();
        assert!(matches!(err, CalGridError::Format(_)));
    }

    #[test]
    fn test_moment_formatter_tokens() {
        let formatter = MomentFormatter;
        assert_eq!(
            formatter.format(wednesday(), "dddd D MMMM, YYYY").unwrap(),
            "Wednesday 6 March, 2024"
        );
        assert_eq!(formatter.format(wednesday(), "HH:mm").unwrap(), "09:05");
        assert_eq!(formatter.format(wednesday(), "ha").unwrap(), "9am");
        assert_eq!(formatter.format(wednesday(), "D MMM").unwrap(), "6 Mar");
    }

    #[test]
    fn test_moment_formatter_brackets_and_percent() {
        let formatter = MomentFormatter;
        assert_eq!(
            formatter.format(wednesday(), "[Week of] MMM D").unwrap(),
            "Week of Mar 6"
        );
        assert_eq!(formatter.format(wednesday(), "D%").unwrap(), "6%");
        assert!(formatter.format(wednesday(), "[unclosed").is_err());
    }

    #[test]
    fn test_default_patterns_match_each_backend() {
        for name in ["strftime", "moment"] {
            let formatter = formatter_for(name).unwrap();
            let patterns = formatter.default_patterns();
            assert_eq!(formatter.format(wednesday(), &patterns.month).unwrap(), "March");
            assert_eq!(formatter.format(wednesday(), &patterns.week_day).unwrap(), "Wednesday");
            assert_eq!(formatter.format(wednesday(), &patterns.day).unwrap(), "6 Mar");
            assert_eq!(formatter.format(wednesday(), &patterns.time).unwrap(), "09:05");
        }
    }

    #[test]
    fn test_formatter_for_unknown_name() {
        assert!(formatter_for("moment").is_ok());
        assert!(formatter_for("strftime").is_ok());
        let err = formatter_for("angular").err().unwrap();
        assert!(matches!(err, CalGridError::UnknownDateFormatter(ref name) if name == "angular"));
    }
}
