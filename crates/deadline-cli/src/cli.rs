use clap::{Parser, Subcommand, ValueEnum};
use deadline_core::models::{Layout, RolloverPolicy};
use std::path::PathBuf;

/// Countdown to the weekly deploy deadline, with the deployment log
#[derive(Parser, Debug)]
#[command(name = "deadline", author, version, about, long_about = None)]
pub struct Cli {
    /// Use this instant instead of the system clock (e.g. '2025-08-07 10:00:00', 'next friday')
    #[arg(long, global = true)]
    pub now: Option<String>,

    /// Configuration file
    #[arg(long, global = true, default_value = "deadline.toml")]
    pub config: PathBuf,

    /// Same-day rollover policy
    #[arg(long, global = true, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Field layout of the remaining time
    #[arg(long, global = true, value_enum)]
    pub layout: Option<LayoutArg>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show the next deadline and the time remaining
    Next(NextCommand),
    /// Show the time remaining until an arbitrary instant
    Remaining(RemainingCommand),
    /// Show the deployment log
    Log(LogCommand),
    /// Live countdown with the deployment log
    Watch(WatchCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct NextCommand {
    /// How many upcoming deadlines to show
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=520))]
    pub count: u16,
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct RemainingCommand {
    /// The instant to count down to
    #[arg(long)]
    pub target: String,
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct LogCommand {
    /// Upvote a row (numbered from 1); may be repeated
    #[arg(short, long)]
    pub upvote: Vec<usize>,
}

#[derive(Parser, Debug, Clone)]
pub struct WatchCommand {
    /// Stop after this many ticks
    #[arg(long)]
    pub ticks: Option<u64>,
    /// Hide the deployment log
    #[arg(long)]
    pub no_log: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyArg {
    /// Count down to today's deadline while it is still ahead
    SameDay,
    /// Always skip to next week on the deadline weekday
    AlwaysRollForward,
}

impl From<PolicyArg> for RolloverPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::SameDay => RolloverPolicy::SameDay,
            PolicyArg::AlwaysRollForward => RolloverPolicy::AlwaysRollForward,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutArg {
    /// Days, hours, minutes, seconds
    Days,
    /// Hours, minutes, seconds
    Hours,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Days => Layout::Days,
            LayoutArg::Hours => Layout::Hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "deadline",
            "next",
            "--policy",
            "always-roll-forward",
            "--now",
            "2025-08-07 10:00:00",
        ])
        .unwrap();
        assert_eq!(cli.policy, Some(PolicyArg::AlwaysRollForward));
        assert_eq!(cli.now.as_deref(), Some("2025-08-07 10:00:00"));
        assert!(matches!(cli.command, Commands::Next(NextCommand { count: 1, json: false })));
    }

    #[test]
    fn test_count_must_be_positive() {
        assert!(Cli::try_parse_from(["deadline", "next", "--count", "0"]).is_err());
    }

    #[test]
    fn test_repeated_upvotes() {
        let cli = Cli::try_parse_from(["deadline", "log", "-u", "2", "--upvote", "2"]).unwrap();
        match cli.command {
            Commands::Log(command) => assert_eq!(command.upvote, vec![2, 2]),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
