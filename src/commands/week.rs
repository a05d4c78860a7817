use anyhow::Result;
use owo_colors::OwoColorize;

use super::ViewInput;
use crate::render::Render;

pub fn run(input: &ViewInput, times: bool) -> Result<()> {
    let views = &input.views;

    if times {
        let options = &views.config().day_view;
        let view = views.build_week_view_with_times(&input.events, input.view_date, options)?;
        println!("{}", view.render(views)?);
    } else {
        let view = views.build_week_view(&input.events, input.view_date, &input.excluded)?;
        println!("{}", view.render(views)?);
    }

    if times && !input.excluded.is_empty() {
        println!("{}", "   (--exclude is ignored with --times)".dimmed());
    }

    Ok(())
}
