use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Runs the CLI from an empty temporary directory so no stray
/// `deadline.toml` or `DEADLINE_*` variables leak into a test.
pub struct CliTestHarness {
    temp_dir: TempDir,
}

impl CliTestHarness {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        Self { temp_dir }
    }

    /// Writes `deadline.toml` into the harness directory.
    pub fn with_config(self, toml: &str) -> Self {
        std::fs::write(self.config_path(), toml).expect("Failed to write config");
        self
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("deadline.toml")
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("deadline").expect("Failed to find deadline binary");
        cmd.current_dir(self.temp_dir.path());
        for (key, _) in std::env::vars() {
            if key.starts_with("DEADLINE_") {
                cmd.env_remove(key);
            }
        }
        cmd.env_remove("RUST_LOG");
        cmd
    }

    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }
}

pub mod assertions {
    use predicates::prelude::*;

    pub fn has_log_table_headers() -> impl Predicate<str> {
        predicate::str::contains("Date")
            .and(predicate::str::contains("Product"))
            .and(predicate::str::contains("Votes"))
    }

    pub fn has_countdown_labels() -> impl Predicate<str> {
        predicate::str::contains("Hours")
            .and(predicate::str::contains("Minutes"))
            .and(predicate::str::contains("Seconds"))
    }

    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error").or(predicate::str::contains("error"))
    }
}
