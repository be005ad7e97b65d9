use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Day of the week, 0-indexed from Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Position in a Sunday-first week (Sunday = 0, Saturday = 6).
    #[inline]
    pub fn number_from_sunday(self) -> i64 {
        self as i64
    }

    /// Inverse of [`Weekday::number_from_sunday`].
    pub fn from_number_from_sunday(n: u32) -> Option<Weekday> {
        Self::ALL.get(n as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        Self::ALL[day.num_days_from_sunday() as usize]
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Sunday => chrono::Weekday::Sun,
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<u32>() {
            return Weekday::from_number_from_sunday(n)
                .ok_or_else(|| CoreError::InvalidWeekday(s.to_string()));
        }

        match trimmed.to_lowercase().as_str() {
            "sunday" | "sun" => Ok(Weekday::Sunday),
            "monday" | "mon" => Ok(Weekday::Monday),
            "tuesday" | "tue" | "tues" => Ok(Weekday::Tuesday),
            "wednesday" | "wed" => Ok(Weekday::Wednesday),
            "thursday" | "thu" | "thurs" => Ok(Weekday::Thursday),
            "friday" | "fri" => Ok(Weekday::Friday),
            "saturday" | "sat" => Ok(Weekday::Saturday),
            _ => Err(CoreError::InvalidWeekday(s.to_string())),
        }
    }
}

/// The recurring target: a weekday and a wall-clock time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeadlineSpec {
    pub weekday: Weekday,
    pub time: NaiveTime,
}

impl DeadlineSpec {
    pub fn new(weekday: Weekday, time: NaiveTime) -> Self {
        Self { weekday, time }
    }

    /// Parses `HH:MM` or `HH:MM:SS`. Sub-second precision is dropped.
    pub fn parse_time(s: &str) -> Result<NaiveTime, CoreError> {
        let trimmed = s.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .ok()
            .and_then(|t| t.with_nanosecond(0))
            .ok_or_else(|| CoreError::InvalidTime(s.to_string()))
    }
}

impl Default for DeadlineSpec {
    /// Thursday, 23:59:00.000
    fn default() -> Self {
        Self {
            weekday: Weekday::Thursday,
            time: NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl fmt::Display for DeadlineSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.weekday, self.time.format("%H:%M:%S"))
    }
}

/// How to treat a reference instant that falls on the target weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RolloverPolicy {
    /// Same-day deadlines count while the deadline time is still ahead.
    #[default]
    SameDay,
    /// Always skip to next week when the reference is on the target weekday.
    AlwaysRollForward,
}

impl FromStr for RolloverPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "same-day" | "same_day" | "sameday" => Ok(RolloverPolicy::SameDay),
            "always-roll-forward" | "always_roll_forward" | "roll-forward" => {
                Ok(RolloverPolicy::AlwaysRollForward)
            }
            _ => Err(CoreError::InvalidInput(format!("Unknown rollover policy '{}'", s))),
        }
    }
}

/// Field layout of a [`RemainingTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// days, hours (0-23), minutes, seconds
    #[default]
    Days,
    /// hours (unbounded), minutes, seconds
    Hours,
}

impl FromStr for Layout {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "days" => Ok(Layout::Days),
            "hours" => Ok(Layout::Hours),
            _ => Err(CoreError::InvalidInput(format!("Unknown layout '{}'", s))),
        }
    }
}

/// A non-negative duration split into calendar-like units.
///
/// Values are recomputed from absolute instants on every tick and never
/// mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct RemainingTime {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl RemainingTime {
    pub const ZERO: RemainingTime = RemainingTime {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Milliseconds represented by the fields. Sub-second precision is
    /// never stored, so this is always a whole number of seconds.
    pub fn total_millis(&self) -> u64 {
        self.days * 86_400_000 + self.hours * 3_600_000 + self.minutes * 60_000 + self.seconds * 1_000
    }
}

/// A row of the deployment log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentLogEntry {
    pub date: String,
    pub product: String,
    pub description: String,
    pub link: String,
    #[serde(default)]
    pub votes: Option<u32>,
}
