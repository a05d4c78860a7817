//! Terminal rendering for calgrid views.
//!
//! Extension traits that turn the core view types into colored text with
//! owo_colors. Dates and times go through the formatter of the
//! [`CalendarViews`] that built the view.

use calgrid_core::date_range::start_of_day;
use calgrid_core::views::{DayView, MonthView, WeekView, WeekViewWithTimes, YearCell};
use calgrid_core::{CalGridResult, CalendarViews};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self, views: &CalendarViews) -> CalGridResult<String>;
}

/// Width of one day column in the month grid
const CELL_WIDTH: usize = 4;

fn render_badge(total: usize) -> String {
    if total == 0 {
        "-".dimmed().to_string()
    } else {
        format!("({})", total).yellow().to_string()
    }
}

impl Render for YearCell<'_> {
    fn render(&self, _views: &CalendarViews) -> CalGridResult<String> {
        let label = format!("{:<10}", self.label);
        let label = if self.is_today {
            label.bold().to_string()
        } else {
            label
        };
        Ok(format!("{} {}", label, render_badge(self.badge_total)))
    }
}

impl Render for MonthView<'_> {
    fn render(&self, views: &CalendarViews) -> CalGridResult<String> {
        let mut lines = Vec::new();

        for (index, &start) in self.row_offsets.iter().enumerate() {
            let end = self
                .row_offsets
                .get(index + 1)
                .copied()
                .unwrap_or(self.days.len());

            let row: String = self.days[start..end]
                .iter()
                .map(|day| {
                    let marker = if day.badge_total > 0 { "*" } else { " " };
                    let cell = format!("{:>w$}{}", day.label, marker, w = CELL_WIDTH - 1);
                    if day.is_today {
                        cell.reversed().to_string()
                    } else if !day.in_month {
                        cell.dimmed().to_string()
                    } else if day.badge_total > 0 {
                        cell.yellow().to_string()
                    } else {
                        cell
                    }
                })
                .collect();
            lines.push(row);
        }

        let mut listed = Vec::new();
        for day in &self.days {
            for event in &day.events {
                listed.push(format!(
                    "  {} {} {}",
                    views
                        .format(start_of_day(day.date), &views.patterns().day)?
                        .bold(),
                    event.event.title,
                    views.format_period(&event.period)?.dimmed()
                ));
            }
        }

        if !listed.is_empty() {
            lines.push(String::new());
            lines.extend(listed);
        }

        Ok(lines.join("\n"))
    }
}

impl Render for WeekView<'_> {
    fn render(&self, _views: &CalendarViews) -> CalGridResult<String> {
        let mut lines = vec![
            self.days
                .iter()
                .map(|day| {
                    let label = format!("{} {}", day.week_day_label, day.day_label);
                    if day.is_today {
                        label.bold().to_string()
                    } else {
                        label
                    }
                })
                .collect::<Vec<_>>()
                .join(" | "),
        ];

        if self.event_rows.is_empty() {
            lines.push("   No events".dimmed().to_string());
        }

        for (index, row) in self.event_rows.iter().enumerate() {
            lines.push(format!("Row {}", index + 1).dimmed().to_string());

            // Offsets after the first event of a row count from the end of the previous one.
            let mut column = 0;
            for placed in &row.row {
                let first = column + placed.offset;
                let last = first + placed.span.saturating_sub(1);
                column = first + placed.span;

                let first_label = self.days.get(first).map(|d| d.day_label.as_str()).unwrap_or("?");
                let last_label = self.days.get(last).map(|d| d.day_label.as_str()).unwrap_or("?");
                let days = if first == last {
                    first_label.to_string()
                } else {
                    format!("{} - {}", first_label, last_label)
                };

                let continues = match (placed.starts_before_week, placed.ends_after_week) {
                    (true, true) => " <>",
                    (true, false) => " <",
                    (false, true) => " >",
                    (false, false) => "",
                };

                lines.push(format!(
                    "   {} {}{}",
                    days.cyan(),
                    placed.event.title,
                    continues.dimmed()
                ));
            }
        }

        Ok(lines.join("\n"))
    }
}

impl Render for WeekViewWithTimes<'_> {
    fn render(&self, views: &CalendarViews) -> CalGridResult<String> {
        let mut lines = Vec::new();

        for day in &self.days {
            let placed: Vec<_> = self
                .event_rows
                .iter()
                .flat_map(|row| row.row.iter())
                .filter(|event| event.period.start.date() == day.date)
                .collect();

            let header = format!("{} {}", day.week_day_label, day.day_label);
            lines.push(if day.is_today {
                header.bold().to_string()
            } else {
                header
            });

            if placed.is_empty() {
                lines.push("   No events".dimmed().to_string());
            }

            for event in placed {
                let slot = if event.count > 1 {
                    let column = (event.left / event.width).round() as usize + 1;
                    format!(" [{}/{}]", column, event.count)
                } else {
                    String::new()
                };
                lines.push(format!(
                    "   {} {}{}",
                    views.format_period(&event.period)?.cyan(),
                    event.event.title,
                    slot.dimmed()
                ));
            }
        }

        Ok(lines.join("\n"))
    }
}

impl Render for DayView<'_> {
    fn render(&self, views: &CalendarViews) -> CalGridResult<String> {
        if self.events.is_empty() {
            return Ok("   No events".dimmed().to_string());
        }

        let lines = self
            .events
            .iter()
            .map(|placed| -> CalGridResult<String> {
                let column = (placed.left / placed.width).round() as usize + 1;
                let mut line = format!(
                    "   {} {} {}",
                    views.format_period(&placed.event.period)?.cyan(),
                    placed.event.event.title,
                    format!("col {} top {}px height {}px", column, placed.top, placed.height)
                        .dimmed()
                );
                if placed.starts_before_day || placed.ends_after_day {
                    line.push_str(&" (clipped)".dimmed().to_string());
                }
                Ok(line)
            })
            .collect::<CalGridResult<Vec<_>>>()?;

        Ok(lines.join("\n"))
    }
}
