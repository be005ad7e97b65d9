use chrono::{Duration, NaiveDateTime};

use crate::error::CoreError;
use crate::models::DeploymentLogEntry;

/// An ordered, immutable list of deployment log entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeploymentLog {
    entries: Vec<DeploymentLogEntry>,
}

impl DeploymentLog {
    pub fn new(entries: Vec<DeploymentLogEntry>) -> Self {
        Self { entries }
    }

    /// The sample log shown when no entries are configured.
    pub fn fixtures() -> Self {
        let entry = |date: &str, product: &str, description: &str, link: &str, votes: Option<u32>| {
            DeploymentLogEntry {
                date: date.to_string(),
                product: product.to_string(),
                description: description.to_string(),
                link: link.to_string(),
                votes,
            }
        };

        Self::new(vec![
            entry(
                "Jul 31, 2025",
                "Checkout",
                "One-click reorder from order history",
                "https://example.com/deploys/checkout-reorder",
                Some(12),
            ),
            entry(
                "Jul 24, 2025",
                "Search",
                "Typo-tolerant product search",
                "https://example.com/deploys/search-typos",
                Some(8),
            ),
            entry(
                "Jul 17, 2025",
                "Notifications",
                "Weekly digest emails",
                "https://example.com/deploys/weekly-digest",
                Some(5),
            ),
            entry(
                "Jul 10, 2025",
                "Dashboard",
                "Dark mode",
                "https://example.com/deploys/dark-mode",
                None,
            ),
        ])
    }

    pub fn entries(&self) -> &[DeploymentLogEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&DeploymentLogEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-row upvote counters for a single display.
///
/// Counters only ever go up and live as long as the board does. Each upvote
/// starts a short pulse that the renderer can use to highlight the row.
#[derive(Debug, Clone)]
pub struct VoteBoard {
    votes: Vec<u32>,
    last_upvote: Vec<Option<NaiveDateTime>>,
    pulse: Duration,
}

impl VoteBoard {
    pub const DEFAULT_PULSE_MILLIS: i64 = 600;

    pub fn new(log: &DeploymentLog, pulse: Duration) -> Self {
        Self {
            votes: log.entries().iter().map(|e| e.votes.unwrap_or(0)).collect(),
            last_upvote: vec![None; log.len()],
            pulse,
        }
    }

    /// Adds one vote to row `index` and returns the new count.
    pub fn upvote(&mut self, index: usize, now: NaiveDateTime) -> Result<u32, CoreError> {
        let count = self
            .votes
            .get_mut(index)
            .ok_or_else(|| CoreError::NotFound(format!("No deployment log row {}", index + 1)))?;
        *count = count.saturating_add(1);
        self.last_upvote[index] = Some(now);
        Ok(*count)
    }

    pub fn votes(&self, index: usize) -> Option<u32> {
        self.votes.get(index).copied()
    }

    /// Whether row `index` was upvoted less than one pulse before `now`.
    pub fn is_pulsing(&self, index: usize, now: NaiveDateTime) -> bool {
        match self.last_upvote.get(index).copied().flatten() {
            Some(at) => now >= at && now - at < self.pulse,
            None => false,
        }
    }
}
