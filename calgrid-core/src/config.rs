//! calgrid configuration.

use std::path::{Path, PathBuf};

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{CalGridError, CalGridResult};
use crate::format::DatePatterns;
use crate::recurrence::DayOverflow;

static DEFAULT_DATE_FORMATTER: &str = "strftime";

fn default_date_formatter() -> String {
    DEFAULT_DATE_FORMATTER.to_string()
}

fn default_week_starts_on() -> Weekday {
    Weekday::Sun
}

/// Configuration at ~/.config/calgrid/config.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Name of the formatting backend ("strftime" or "moment")
    #[serde(default = "default_date_formatter")]
    pub date_formatter: String,

    /// Keep the events of days that belong to the previous/next month in month views
    #[serde(default)]
    pub display_all_month_events: bool,

    #[serde(default = "default_week_starts_on")]
    pub week_starts_on: Weekday,

    #[serde(default)]
    pub day_overflow: DayOverflow,

    #[serde(default)]
    pub date_formats: DateFormats,

    #[serde(default)]
    pub day_view: DayViewOptions,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        CalendarConfig {
            date_formatter: default_date_formatter(),
            display_all_month_events: false,
            week_starts_on: default_week_starts_on(),
            day_overflow: DayOverflow::default(),
            date_formats: DateFormats::default(),
            day_view: DayViewOptions::default(),
        }
    }
}

/// Label patterns overriding the formatter's defaults, in the formatter's
/// own syntax. Unset patterns fall back to
/// [`DateFormatter::default_patterns`](crate::format::DateFormatter::default_patterns).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateFormats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl DateFormats {
    /// Fill the unset patterns from `defaults`.
    pub fn resolve(&self, defaults: DatePatterns) -> DatePatterns {
        DatePatterns {
            month: self.month.clone().unwrap_or(defaults.month),
            week_day: self.week_day.clone().unwrap_or(defaults.week_day),
            day: self.day.clone().unwrap_or(defaults.day),
            time: self.time.clone().unwrap_or(defaults.time),
        }
    }
}

/// Geometry of the time-bearing day and week views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayViewOptions {
    /// First visible time, "HH:mm"
    pub day_start: String,
    /// Last visible time, "HH:mm"
    pub day_end: String,
    pub minutes_per_segment: u32,
    /// Width in pixels of one event column
    pub event_width: f64,
    /// Height in pixels of one segment
    pub segment_height: f64,
}

impl Default for DayViewOptions {
    fn default() -> Self {
        DayViewOptions {
            day_start: "00:00".to_string(),
            day_end: "23:59".to_string(),
            minutes_per_segment: 30,
            event_width: 150.0,
            segment_height: 30.0,
        }
    }
}

impl DayViewOptions {
    pub fn hour_segments(&self) -> f64 {
        60.0 / f64::from(self.minutes_per_segment)
    }
}

impl CalendarConfig {
    pub fn config_path() -> CalGridResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalGridError::Config("Could not determine config directory".into()))?
            .join("calgrid");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config from its default location, falling back to defaults.
    pub fn load() -> CalGridResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> CalGridResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: CalendarConfig =
            toml::from_str(&content).map_err(|e| CalGridError::Config(e.to_string()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> CalGridResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CalGridError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| CalGridError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalGridResult<()> {
        let contents = format!(
            "\
# calgrid configuration

# Date formatting backend (\"strftime\" or \"moment\"):
# date_formatter = \"{}\"

# First day of the week:
# week_starts_on = \"Sun\"

# Show events on days of the previous/next month in month views:
# display_all_month_events = false

# Recurring events on a day the target month lacks (e.g. the 31st):
# \"roll\" moves them into the next month, \"clamp\" to the last day.
# day_overflow = \"roll\"

# Label patterns, in the syntax of the date formatter. Unset patterns use
# the formatter's defaults (strftime: \"%B\", \"%A\", \"%-d %b\", \"%H:%M\";
# moment: \"MMMM\", \"dddd\", \"D MMM\", \"HH:mm\").
# [date_formats]
# month = \"%B\"
# week_day = \"%A\"
# day = \"%-d %b\"
# time = \"%H:%M\"

# [day_view]
# day_start = \"00:00\"
# day_end = \"23:59\"
# minutes_per_segment = 30
# event_width = 150.0
# segment_height = 30.0
",
            DEFAULT_DATE_FORMATTER
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalGridError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalGridError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
