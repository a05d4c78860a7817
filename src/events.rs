//! Loading event files.

use std::path::Path;

use anyhow::{Context, Result, bail};
use calgrid_core::Event;
use serde::Deserialize;

/// Layout of a TOML event file: a list of `[[events]]` tables.
#[derive(Deserialize)]
struct EventFile {
    #[serde(default)]
    events: Vec<Event>,
}

/// Read events from a `.json`, `.toml` or `.ics` file.
pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read event file {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let events = match extension.as_str() {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?,
        "toml" => {
            let file: EventFile = toml::from_str(&content)
                .with_context(|| format!("Invalid TOML in {}", path.display()))?;
            file.events
        }
        "ics" => calgrid_core::ics::parse_events(&content)?,
        other => bail!(
            "Unsupported event file extension '{}' (expected json, toml or ics)",
            other
        ),
    };

    tracing::debug!(path = %path.display(), count = events.len(), "loaded events");
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calgrid_core::RecursOn;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_json_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "events.json",
            r#"[
                {"title": "standup", "starts_at": "2024-03-04T09:00:00", "ends_at": "2024-03-04T09:15:00"},
                {"title": "rent", "starts_at": "2023-01-05T09:00:00", "recurs_on": "month", "increments_badge_total": false}
            ]"#,
        );

        let events = load_events(&path).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].recurs_on, Some(RecursOn::Month));
        assert!(!events[1].increments_badge_total);
    }

    #[test]
    fn test_load_toml_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "events.toml",
            r#"
[[events]]
title = "birthday"
starts_at = "1990-08-20T00:00:00"
recurs_on = "year"
"#,
        );

        let events = load_events(&path).unwrap();
        assert_eq!(events[0].title, "birthday");
        assert_eq!(events[0].recurs_on, Some(RecursOn::Year));
    }

    #[test]
    fn test_invalid_recurrence_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "events.json",
            r#"[{"title": "gym", "starts_at": "2024-03-04T07:00:00", "recurs_on": "week"}]"#,
        );

        let err = load_events(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Can only be year or month"));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "events.csv", "title,starts_at");
        assert!(load_events(&path).is_err());
    }
}
