use anyhow::Result;
use owo_colors::OwoColorize;

use super::ViewInput;
use crate::render::Render;

pub fn run(input: &ViewInput) -> Result<()> {
    let views = &input.views;
    let view = views.build_month_view(&input.events, input.view_date, |_| {}, &input.excluded);

    let header: String = views
        .week_day_names(&input.excluded)?
        .iter()
        .map(|name| format!("{:>3} ", name.chars().take(2).collect::<String>()))
        .collect();

    println!(
        "{}",
        views
            .format(input.view_date, &views.patterns().month)?
            .bold()
    );
    println!("{}", header.dimmed());
    println!("{}", view.render(views)?);

    Ok(())
}
