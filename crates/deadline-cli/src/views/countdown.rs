use chrono::NaiveDateTime;
use deadline_core::models::{DeadlineSpec, Layout, RemainingTime};
use deadline_core::remaining::pad2;
use owo_colors::OwoColorize;

const SEPARATOR: &str = " : ";

/// Two lines: the zero-padded fields separated by colons, and their labels
/// centered underneath.
pub fn render_countdown(remaining: &RemainingTime, layout: Layout, color: bool) -> String {
    let mut units = Vec::with_capacity(4);
    if layout == Layout::Days {
        units.push((pad2(remaining.days), "Days"));
    }
    units.push((pad2(remaining.hours), "Hours"));
    units.push((pad2(remaining.minutes), "Minutes"));
    units.push((pad2(remaining.seconds), "Seconds"));

    let mut values = Vec::with_capacity(units.len());
    let mut labels = Vec::with_capacity(units.len());
    for (value, label) in &units {
        let width = value.len().max(label.len());
        let value = format!("{:^width$}", value, width = width);
        let label = format!("{:^width$}", label, width = width);
        if color {
            values.push(value.bold().cyan().to_string());
            labels.push(label.dimmed().to_string());
        } else {
            values.push(value);
            labels.push(label);
        }
    }

    let separator = if color {
        SEPARATOR.dimmed().to_string()
    } else {
        SEPARATOR.to_string()
    };
    let gap = " ".repeat(SEPARATOR.len());

    format!("{}\n{}", values.join(&separator), labels.join(&gap))
}

pub fn render_header(target: NaiveDateTime, spec: &DeadlineSpec, color: bool) -> String {
    let when = target.format("%A, %b %-d %Y at %H:%M:%S").to_string();
    let title = format!("Next deploy deadline ({})", spec);
    if color {
        format!("{}\n{}", title.bold(), when.yellow())
    } else {
        format!("{}\n{}", title, when)
    }
}
