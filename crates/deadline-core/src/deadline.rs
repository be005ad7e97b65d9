//! Resolution of the next weekly deadline.
//!
//! A deadline is the next instant that falls on the configured weekday at the
//! configured time of day. The reference instant's own time of day never
//! leaks into the result: the resolved instant always carries exactly the
//! deadline time.

use chrono::{Datelike, Days, NaiveDateTime};
use serde::Serialize;

use crate::models::{DeadlineSpec, RolloverPolicy, Weekday};

const DAYS_PER_WEEK: i64 = 7;

/// Resolves upcoming deadlines for a [`DeadlineSpec`] under a [`RolloverPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DeadlineResolver {
    pub spec: DeadlineSpec,
    pub policy: RolloverPolicy,
}

impl DeadlineResolver {
    pub fn new(spec: DeadlineSpec, policy: RolloverPolicy) -> Self {
        Self { spec, policy }
    }

    /// Returns the next deadline relative to `reference`.
    ///
    /// # Behavior
    /// - `SameDay`: on the target weekday the deadline is today while the
    ///   reference time of day is before the deadline time, otherwise next week.
    ///   The result is always strictly after `reference`.
    /// - `AlwaysRollForward`: on the target weekday the deadline is always
    ///   next week.
    /// - In both cases the result is 0..=7 calendar days after `reference`.
    ///
    /// Saturates to `NaiveDateTime::MAX` when the date is not representable.
    pub fn resolve(&self, reference: NaiveDateTime) -> NaiveDateTime {
        let days_ahead = self.days_until_target(reference);

        reference
            .date()
            .checked_add_days(Days::new(days_ahead))
            .map(|date| date.and_time(self.spec.time))
            .unwrap_or(NaiveDateTime::MAX)
    }

    /// Returns the next `count` deadlines, one week apart, starting with
    /// [`DeadlineResolver::resolve`].
    ///
    /// Each deadline is resolved from the previous one. The list ends early
    /// once resolution saturates, so it never contains `NaiveDateTime::MAX`.
    pub fn upcoming(&self, reference: NaiveDateTime, count: usize) -> Vec<NaiveDateTime> {
        std::iter::successors(Some(self.resolve(reference)), |previous| {
            Some(self.resolve(*previous))
        })
        .take(count)
        .take_while(|deadline| *deadline != NaiveDateTime::MAX)
        .collect()
    }

    fn days_until_target(&self, reference: NaiveDateTime) -> u64 {
        let current = Weekday::from(reference.weekday()).number_from_sunday();
        let mut delta = self.spec.weekday.number_from_sunday() - current;

        let roll_forward = match self.policy {
            RolloverPolicy::SameDay => {
                delta < 0 || (delta == 0 && reference.time() >= self.spec.time)
            }
            RolloverPolicy::AlwaysRollForward => delta <= 0,
        };
        if roll_forward {
            delta += DAYS_PER_WEEK;
        }

        delta as u64
    }
}

/// Next default deadline (Thursday 23:59:00, same-day policy).
pub fn next_deadline(reference: NaiveDateTime) -> NaiveDateTime {
    DeadlineResolver::default().resolve(reference)
}
