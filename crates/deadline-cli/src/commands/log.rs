use anyhow::{anyhow, Result};
use deadline_core::deploy_log::VoteBoard;
use deadline_core::error::CoreError;

use crate::cli::LogCommand;
use crate::context::AppContext;
use crate::views::table::display_log;

pub fn show_log(ctx: &AppContext, command: LogCommand) -> Result<()> {
    let now = ctx.clock().now();
    let mut board = VoteBoard::new(&ctx.log, ctx.pulse);

    for row in command.upvote {
        let index = row
            .checked_sub(1)
            .ok_or_else(|| anyhow!(CoreError::InvalidInput("Rows are numbered from 1".to_string())))?;
        board.upvote(index, now)?;
    }

    display_log(&ctx.log, &board, now, ctx.color);
    Ok(())
}
