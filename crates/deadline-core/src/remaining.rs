use chrono::NaiveDateTime;
use std::fmt;

use crate::models::{Layout, RemainingTime};

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Remaining time from `reference` until `target`, in the `Days` layout.
///
/// Returns [`RemainingTime::ZERO`] when `target <= reference`.
pub fn decompose(target: NaiveDateTime, reference: NaiveDateTime) -> RemainingTime {
    decompose_with(Layout::Days, target, reference)
}

/// Remaining time from `reference` until `target` in the given layout.
///
/// With [`Layout::Hours`] the day count is folded into `hours`, which is then
/// unbounded, and `days` is always 0.
pub fn decompose_with(layout: Layout, target: NaiveDateTime, reference: NaiveDateTime) -> RemainingTime {
    let diff_ms = (target - reference).num_milliseconds();
    if diff_ms <= 0 {
        return RemainingTime::ZERO;
    }

    let minutes = (diff_ms / MILLIS_PER_MINUTE) % 60;
    let seconds = (diff_ms / MILLIS_PER_SECOND) % 60;
    let (days, hours) = match layout {
        Layout::Days => (diff_ms / MILLIS_PER_DAY, (diff_ms / MILLIS_PER_HOUR) % 24),
        Layout::Hours => (0, diff_ms / MILLIS_PER_HOUR),
    };

    RemainingTime {
        days: days as u64,
        hours: hours as u64,
        minutes: minutes as u64,
        seconds: seconds as u64,
    }
}

/// Zero-pads to a minimum width of two. Wider values are never truncated.
pub fn pad2(value: u64) -> String {
    format!("{:02}", value)
}

impl RemainingTime {
    /// Colon-separated, zero-padded fields. `Hours` drops the day field.
    pub fn format_with(&self, layout: Layout) -> String {
        match layout {
            Layout::Days => format!(
                "{}:{}:{}:{}",
                pad2(self.days),
                pad2(self.hours),
                pad2(self.minutes),
                pad2(self.seconds)
            ),
            Layout::Hours => format!(
                "{}:{}:{}",
                pad2(self.hours),
                pad2(self.minutes),
                pad2(self.seconds)
            ),
        }
    }
}

impl fmt::Display for RemainingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(Layout::Days))
    }
}
