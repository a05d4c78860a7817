use anyhow::Result;
use owo_colors::OwoColorize;

use super::ViewInput;
use crate::render::Render;

pub fn run(input: &ViewInput) -> Result<()> {
    let cells = input
        .views
        .build_year_view(&input.events, input.view_date, |_| {})?;

    println!("{}", input.view_date.format("%Y").to_string().bold());
    for cell in &cells {
        println!("  {}", cell.render(&input.views)?);
    }

    Ok(())
}
