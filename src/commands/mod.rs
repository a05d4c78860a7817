pub mod config;
pub mod day;
pub mod month;
pub mod week;
pub mod year;

use std::path::Path;

use anyhow::Result;
use calgrid_core::date_range::{parse_view_date, start_of_day};
use calgrid_core::{CalendarConfig, CalendarViews, Event};
use chrono::{Local, NaiveDateTime, Weekday};

use crate::ViewArgs;
use crate::events::load_events;

/// Everything a view command needs, loaded once from the command line.
pub struct ViewInput {
    pub views: CalendarViews,
    pub events: Vec<Event>,
    pub view_date: NaiveDateTime,
    pub excluded: Vec<Weekday>,
}

impl ViewInput {
    pub fn load(config_path: &Path, args: &ViewArgs) -> Result<Self> {
        let config = CalendarConfig::load_from(config_path)?;
        let views = CalendarViews::new(config)?;

        let events = match &args.events {
            Some(path) => load_events(path)?,
            None => Vec::new(),
        };

        let view_date = match &args.date {
            Some(date) => parse_view_date(date)?,
            None => start_of_day(Local::now().date_naive()),
        };

        Ok(ViewInput {
            views,
            events,
            view_date,
            excluded: args.exclude.clone(),
        })
    }
}
