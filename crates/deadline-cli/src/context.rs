use anyhow::{Context as _, Result};
use chrono::NaiveDateTime;
use deadline_core::clock::{Clock, FixedClock, OffsetClock, SystemClock};
use deadline_core::deadline::DeadlineResolver;
use deadline_core::deploy_log::DeploymentLog;
use deadline_core::models::Layout;
use deadline_core::ticker::TickerConfig;
use std::io::IsTerminal;
use std::sync::Arc;

use crate::cli::Cli;
use crate::config::Config;
use crate::parser::parse_instant;

/// Everything a command needs, resolved from the configuration and the
/// global command line flags.
pub struct AppContext {
    pub resolver: DeadlineResolver,
    pub layout: Layout,
    pub ticker: TickerConfig,
    pub pulse: chrono::Duration,
    pub log: DeploymentLog,
    pub color: bool,
    now_override: Option<NaiveDateTime>,
}

impl AppContext {
    pub fn new(cli: &Cli, config: &Config) -> Result<Self> {
        let spec = config.deadline_spec().context("Invalid deadline in configuration")?;
        let policy = cli.policy.map(Into::into).unwrap_or(config.policy);
        let layout = cli.layout.map(Into::into).unwrap_or(config.layout);
        let now_override = cli.now.as_deref().map(parse_instant).transpose()?;

        Ok(Self {
            resolver: DeadlineResolver::new(spec, policy),
            layout,
            ticker: config.ticker_config()?,
            pulse: config.pulse(),
            log: config.deployment_log(),
            color: !cli.no_color && std::io::stdout().is_terminal(),
            now_override,
        })
    }

    /// Clock for one-shot commands: frozen at `--now` when given.
    pub fn clock(&self) -> Arc<dyn Clock> {
        match self.now_override {
            Some(now) => Arc::new(FixedClock::new(now)),
            None => Arc::new(SystemClock),
        }
    }

    /// Clock for live commands: starts at `--now` when given and keeps running.
    pub fn live_clock(&self) -> Arc<dyn Clock> {
        match self.now_override {
            Some(now) => Arc::new(OffsetClock::new(now)),
            None => Arc::new(SystemClock),
        }
    }
}
