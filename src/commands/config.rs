use std::path::Path;

use anyhow::Result;
use calgrid_core::CalendarConfig;
use owo_colors::OwoColorize;

pub fn run(config_path: &Path) -> Result<()> {
    if !config_path.exists() {
        CalendarConfig::create_default_config(config_path)?;
        println!("{} {}", "Created".green(), config_path.display());
    }

    let config = CalendarConfig::load_from(config_path)?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!();
    println!("{}", "Settings".bold());
    println!("  Formatter:      {}", config.date_formatter);
    println!("  Week starts on: {}", config.week_starts_on);
    println!("  Day overflow:   {:?}", config.day_overflow);
    println!(
        "  Day view:       {} - {}, {} min segments",
        config.day_view.day_start, config.day_view.day_end, config.day_view.minutes_per_segment
    );

    Ok(())
}
