use anyhow::Result;
use chrono::NaiveDateTime;
use chrono_humanize::HumanTime;
use deadline_core::models::RemainingTime;
use deadline_core::remaining::decompose_with;
use serde::Serialize;

use crate::cli::NextCommand;
use crate::context::AppContext;
use crate::views::countdown::{render_countdown, render_header};

#[derive(Debug, Serialize)]
struct UpcomingDeadline {
    deadline: NaiveDateTime,
    remaining: RemainingTime,
    human: String,
}

pub fn show_next(ctx: &AppContext, command: NextCommand) -> Result<()> {
    let now = ctx.clock().now();
    let upcoming: Vec<UpcomingDeadline> = ctx
        .resolver
        .upcoming(now, usize::from(command.count))
        .into_iter()
        .map(|deadline| UpcomingDeadline {
            deadline,
            remaining: decompose_with(ctx.layout, deadline, now),
            human: HumanTime::from(deadline - now).to_string(),
        })
        .collect();

    if command.json {
        println!("{}", serde_json::to_string_pretty(&upcoming)?);
        return Ok(());
    }

    let Some((first, rest)) = upcoming.split_first() else {
        println!("No upcoming deadlines.");
        return Ok(());
    };

    println!("{}", render_header(first.deadline, &ctx.resolver.spec, ctx.color));
    println!();
    println!("{}", render_countdown(&first.remaining, ctx.layout, ctx.color));

    if !rest.is_empty() {
        println!();
        println!("Following deadlines:");
        for next in rest {
            println!(
                "  {}  {}  ({})",
                next.deadline.format("%a %Y-%m-%d %H:%M:%S"),
                next.remaining.format_with(ctx.layout),
                next.human
            );
        }
    }

    Ok(())
}
