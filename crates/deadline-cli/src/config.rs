use deadline_core::deploy_log::{DeploymentLog, VoteBoard};
use deadline_core::error::CoreError;
use deadline_core::models::{DeadlineSpec, DeploymentLogEntry, Layout, RolloverPolicy};
use deadline_core::ticker::TickerConfig;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Deadline weekday ("thursday", "thu" or 0-6 from Sunday)
    pub weekday: String,
    /// Deadline time of day (HH:MM or HH:MM:SS)
    pub time: String,
    pub policy: RolloverPolicy,
    pub layout: Layout,
    /// Tick period in milliseconds
    pub tick_millis: u64,
    /// Align ticks to whole seconds of the clock
    pub align_to_second: bool,
    /// How long an upvoted row stays highlighted
    pub pulse_millis: i64,
    /// Deployment log rows; the built-in sample log is used when empty
    pub log: Vec<DeploymentLogEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weekday: "thursday".to_string(),
            time: "23:59:00".to_string(),
            policy: RolloverPolicy::default(),
            layout: Layout::default(),
            tick_millis: 1_000,
            align_to_second: true,
            pulse_millis: VoteBoard::DEFAULT_PULSE_MILLIS,
            log: Vec::new(),
        }
    }
}

impl Config {
    /// Defaults, then the TOML file at `path` if it exists, then
    /// `DEADLINE_`-prefixed environment variables.
    pub fn new(path: &Path) -> Result<Self, figment::Error> {
        Self::from_figment(
            Figment::from(Serialized::defaults(Config::default()))
                .merge(Toml::file(path))
                .merge(Env::prefixed("DEADLINE_")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        figment.extract()
    }

    pub fn deadline_spec(&self) -> Result<DeadlineSpec, CoreError> {
        Ok(DeadlineSpec::new(
            self.weekday.parse()?,
            DeadlineSpec::parse_time(&self.time)?,
        ))
    }

    pub fn ticker_config(&self) -> Result<TickerConfig, CoreError> {
        if self.tick_millis == 0 {
            return Err(CoreError::InvalidInput(
                "tick_millis must be greater than zero".to_string(),
            ));
        }
        Ok(TickerConfig {
            period: Duration::from_millis(self.tick_millis),
            align_to_second: self.align_to_second,
        })
    }

    pub fn pulse(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.pulse_millis.max(0))
    }

    pub fn deployment_log(&self) -> DeploymentLog {
        if self.log.is_empty() {
            log::debug!("No deployment log configured, using the sample log");
            DeploymentLog::fixtures()
        } else {
            DeploymentLog::new(self.log.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadline_core::models::Weekday;

    fn from_toml(toml: &str) -> Result<Config, figment::Error> {
        Config::from_figment(
            Figment::from(Serialized::defaults(Config::default())).merge(Toml::string(toml)),
        )
    }

    #[test]
    fn test_defaults() {
        let config = from_toml("").unwrap();
        assert_eq!(config, Config::default());

        let spec = config.deadline_spec().unwrap();
        assert_eq!(spec, DeadlineSpec::default());
        assert_eq!(config.ticker_config().unwrap(), TickerConfig::default());
        assert_eq!(config.deployment_log(), DeploymentLog::fixtures());
    }

    #[test]
    fn test_overrides() {
        let config = from_toml(
            r#"
            weekday = "fri"
            time = "17:30"
            policy = "always-roll-forward"
            layout = "hours"
            tick_millis = 250
            align_to_second = false

            [[log]]
            date = "Aug 7, 2025"
            product = "Billing"
            description = "Invoices as PDF"
            link = "https://example.com/billing"
            votes = 3

            [[log]]
            date = "Aug 1, 2025"
            product = "Auth"
            description = "Passkeys"
            link = "https://example.com/auth"
            "#,
        )
        .unwrap();

        let spec = config.deadline_spec().unwrap();
        assert_eq!(spec.weekday, Weekday::Friday);
        assert_eq!(spec.time.to_string(), "17:30:00");
        assert_eq!(config.policy, RolloverPolicy::AlwaysRollForward);
        assert_eq!(config.layout, Layout::Hours);
        assert_eq!(
            config.ticker_config().unwrap(),
            TickerConfig {
                period: Duration::from_millis(250),
                align_to_second: false,
            }
        );

        let log = config.deployment_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log.get(0).unwrap().votes, Some(3));
        assert_eq!(log.get(1).unwrap().votes, None);
    }

    #[test]
    fn test_invalid_values() {
        let config = from_toml("weekday = \"someday\"").unwrap();
        assert!(matches!(config.deadline_spec(), Err(CoreError::InvalidWeekday(_))));

        let config = from_toml("time = \"24:61\"").unwrap();
        assert!(matches!(config.deadline_spec(), Err(CoreError::InvalidTime(_))));

        let config = from_toml("tick_millis = 0").unwrap();
        assert!(config.ticker_config().is_err());

        assert!(from_toml("policy = \"whenever\"").is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_figment(
            Figment::from(Serialized::defaults(Config::default()))
                .merge(Toml::file(dir.path().join("missing.toml"))),
        )
        .unwrap();
        assert_eq!(config, Config::default());
    }
}
