use anyhow::Result;
use owo_colors::OwoColorize;

use super::ViewInput;
use crate::render::Render;

pub fn run(input: &ViewInput) -> Result<()> {
    let views = &input.views;
    let options = &views.config().day_view;
    let view = views.build_day_view(&input.events, input.view_date, options)?;

    let title = views.format(input.view_date, &views.patterns().week_day)?;
    println!(
        "{} {}",
        title.bold(),
        input.view_date.date().to_string().dimmed()
    );
    println!(
        "{}",
        format!(
            "   {} - {}, {}px tall, {}px wide",
            options.day_start,
            options.day_end,
            options.view_height()?,
            view.width
        )
        .dimmed()
    );
    println!("{}", view.render(views)?);

    Ok(())
}
