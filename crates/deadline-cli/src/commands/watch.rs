use anyhow::Result;
use chrono::NaiveDateTime;
use deadline_core::deploy_log::VoteBoard;
use deadline_core::ticker::{Countdown, Tick, Ticker};
use owo_colors::OwoColorize;
use std::io::{BufRead, IsTerminal, Write};
use tokio::sync::mpsc;

use crate::cli::WatchCommand;
use crate::context::AppContext;
use crate::views::countdown::{render_countdown, render_header};
use crate::views::table::{build_log_table, display_log};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Quit,
    Upvote(usize),
    Unknown(String),
    Empty,
}

fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Empty;
    }
    if matches!(trimmed.to_lowercase().as_str(), "q" | "quit" | "exit") {
        return Input::Quit;
    }
    match trimmed.trim_start_matches('+').parse::<usize>() {
        Ok(row) => Input::Upvote(row),
        Err(_) => Input::Unknown(trimmed.to_string()),
    }
}

struct Screen<'a> {
    ctx: &'a AppContext,
    full_screen: bool,
    show_log: bool,
    status: Option<String>,
    /// Votes changed since the log table was last printed
    log_changed: bool,
}

impl Screen<'_> {
    fn draw(&mut self, tick: &Tick, board: &VoteBoard, now: NaiveDateTime) {
        if !self.full_screen {
            self.draw_plain(tick, board, now);
            return;
        }

        let mut frame = String::from(CLEAR_SCREEN);
        frame.push_str(&render_header(tick.target, &self.ctx.resolver.spec, self.ctx.color));
        frame.push_str("\n\n");
        frame.push_str(&render_countdown(&tick.remaining, self.ctx.layout, self.ctx.color));
        frame.push_str("\n\n");
        if self.show_log && !self.ctx.log.is_empty() {
            frame.push_str(&build_log_table(&self.ctx.log, board, now, self.ctx.color).to_string());
            frame.push_str("\n\n");
            frame.push_str(&self.hint("Type a row number and press Enter to upvote, q to quit."));
        } else {
            frame.push_str(&self.hint("Press q and Enter, or Ctrl-C, to quit."));
        }
        frame.push('\n');
        if let Some(status) = &self.status {
            frame.push_str(status);
            frame.push('\n');
        }
        self.log_changed = false;

        print!("{}", frame);
        if let Err(e) = std::io::stdout().flush() {
            log::warn!("Failed to flush output: {}", e);
        }
    }

    /// One line per tick. The log table is reprinted only after votes change,
    /// and a status message is printed once.
    fn draw_plain(&mut self, tick: &Tick, board: &VoteBoard, now: NaiveDateTime) {
        if self.log_changed && self.show_log {
            display_log(&self.ctx.log, board, now, self.ctx.color);
        }
        self.log_changed = false;

        println!("{}", tick.remaining.format_with(self.ctx.layout));
        if let Some(status) = self.status.take() {
            println!("{}", status);
        }
    }

    fn hint(&self, text: &str) -> String {
        if self.ctx.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

fn rollover_notice(tick: &Tick) -> Option<String> {
    tick.rolled_over
        .then(|| format!("Deadline passed. Next one: {}", tick.target))
}

/// Reads stdin on a plain thread so a pending read never holds up shutdown.
fn spawn_input_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    log::warn!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

pub async fn watch(ctx: &AppContext, command: WatchCommand) -> Result<()> {
    let clock = ctx.live_clock();
    let countdown = Countdown::new(ctx.resolver, ctx.layout, clock.now());
    let mut ticker = Ticker::spawn(countdown, clock.clone(), ctx.ticker)?;
    let mut board = VoteBoard::new(&ctx.log, ctx.pulse);

    let mut screen = Screen {
        ctx,
        full_screen: std::io::stdout().is_terminal(),
        show_log: !command.no_log,
        status: None,
        log_changed: false,
    };
    if !screen.full_screen && screen.show_log {
        display_log(&ctx.log, &board, clock.now(), ctx.color);
    }

    let mut latest = ticker.latest();
    screen.status = rollover_notice(&latest);
    screen.draw(&latest, &board, clock.now());

    let mut input = spawn_input_reader();
    let mut stdin_open = true;
    let mut ticks = 0u64;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        if command.ticks.is_some_and(|max| ticks >= max) {
            break;
        }

        tokio::select! {
            tick = ticker.changed() => {
                latest = tick?;
                ticks += 1;
                if let Some(notice) = rollover_notice(&latest) {
                    screen.status = Some(notice);
                }
                screen.draw(&latest, &board, clock.now());
            }
            line = input.recv(), if stdin_open => {
                match line {
                    Some(line) => match parse_input(&line) {
                        Input::Quit => break,
                        Input::Empty => {}
                        Input::Upvote(row) => {
                            let result = row
                                .checked_sub(1)
                                .map(|index| board.upvote(index, clock.now()));
                            screen.status = match result {
                                Some(Ok(votes)) => {
                                    screen.log_changed = true;
                                    Some(format!("Row {} now has {} votes", row, votes))
                                }
                                Some(Err(e)) => Some(e.to_string()),
                                None => Some("Rows are numbered from 1".to_string()),
                            };
                            screen.draw(&latest, &board, clock.now());
                        }
                        Input::Unknown(text) => {
                            screen.status = Some(format!("Unknown input '{}'", text));
                            screen.draw(&latest, &board, clock.now());
                        }
                    },
                    None => stdin_open = false,
                }
            }
            _ = &mut ctrl_c => break,
        }
    }

    ticker.stop().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("q", Input::Quit)]
    #[case(" QUIT ", Input::Quit)]
    #[case("3", Input::Upvote(3))]
    #[case("+2", Input::Upvote(2))]
    #[case("", Input::Empty)]
    #[case("vote", Input::Unknown("vote".to_string()))]
    fn test_parse_input(#[case] line: &str, #[case] expected: Input) {
        assert_eq!(parse_input(line), expected);
    }

    #[test]
    fn test_rollover_notice_names_next_target() {
        use chrono::NaiveDate;
        use deadline_core::deadline::DeadlineResolver;
        use deadline_core::models::Layout;

        let at = |h, m, s| {
            NaiveDate::from_ymd_opt(2025, 8, 7)
                .unwrap()
                .and_hms_opt(h, m, s)
                .unwrap()
        };
        let mut countdown = Countdown::new(DeadlineResolver::default(), Layout::Days, at(23, 58, 0));

        assert_eq!(rollover_notice(&countdown.tick(at(23, 58, 30))), None);
        assert_eq!(
            rollover_notice(&countdown.tick(at(23, 59, 0))).as_deref(),
            Some("Deadline passed. Next one: 2025-08-14 23:59:00")
        );
    }
}
