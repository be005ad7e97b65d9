use anyhow::Result;
use deadline_core::remaining::decompose_with;

use crate::cli::RemainingCommand;
use crate::context::AppContext;
use crate::parser::parse_instant;
use crate::views::countdown::render_countdown;

pub fn show_remaining(ctx: &AppContext, command: RemainingCommand) -> Result<()> {
    let target = parse_instant(&command.target)?;
    let remaining = decompose_with(ctx.layout, target, ctx.clock().now());

    if command.json {
        println!("{}", serde_json::to_string_pretty(&remaining)?);
    } else {
        println!("{}", render_countdown(&remaining, ctx.layout, ctx.color));
    }

    Ok(())
}
