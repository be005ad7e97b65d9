//! The tick driver.
//!
//! [`Countdown`] is the synchronous state machine: every call to
//! [`Countdown::tick`] recomputes the remaining time from absolute instants,
//! so a late or skipped tick never accumulates drift. [`Ticker`] runs a
//! countdown on a tokio interval and publishes each [`Tick`] through a watch
//! channel until its [`TickerHandle`] is stopped or dropped.

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::clock::Clock;
use crate::deadline::DeadlineResolver;
use crate::error::CoreError;
use crate::models::{Layout, RemainingTime};
use crate::remaining::decompose_with;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    Counting,
    Expired,
}

/// One re-evaluation of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tick {
    /// Reference instant the tick was computed against
    pub at: NaiveDateTime,
    /// Deadline being counted down to after this tick
    pub target: NaiveDateTime,
    pub remaining: RemainingTime,
    pub state: CountdownState,
    /// Whether this tick resolved a new target
    pub rolled_over: bool,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    resolver: DeadlineResolver,
    layout: Layout,
    target: NaiveDateTime,
    state: CountdownState,
}

impl Countdown {
    pub fn new(resolver: DeadlineResolver, layout: Layout, now: NaiveDateTime) -> Self {
        Self {
            resolver,
            layout,
            target: resolver.resolve(now),
            state: CountdownState::Counting,
        }
    }

    #[inline]
    pub fn target(&self) -> NaiveDateTime {
        self.target
    }

    #[inline]
    pub fn state(&self) -> CountdownState {
        self.state
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    #[inline]
    pub fn resolver(&self) -> &DeadlineResolver {
        &self.resolver
    }

    /// Advances the state machine to `now`.
    ///
    /// # Behavior
    /// - Remaining time non-zero: `Counting`.
    /// - Remaining time zero: `Expired`, and the next target is resolved from
    ///   whichever is later of `now` and the expired target. Resolving from the
    ///   expired target keeps a sub-second remainder from resolving the same
    ///   deadline again.
    pub fn tick(&mut self, now: NaiveDateTime) -> Tick {
        let remaining = decompose_with(self.layout, self.target, now);

        if !remaining.is_zero() {
            self.state = CountdownState::Counting;
            return Tick {
                at: now,
                target: self.target,
                remaining,
                state: self.state,
                rolled_over: false,
            };
        }

        let expired = self.target;
        self.target = self.resolver.resolve(now.max(expired));
        self.state = CountdownState::Expired;
        log::info!("Deadline {} reached, next deadline is {}", expired, self.target);

        Tick {
            at: now,
            target: self.target,
            remaining: RemainingTime::ZERO,
            state: self.state,
            rolled_over: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerConfig {
    pub period: Duration,
    /// Delay the first tick to the next whole second of the clock
    pub align_to_second: bool,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
            align_to_second: true,
        }
    }
}

/// Time from `now` until the next whole second.
pub fn delay_to_next_second(now: NaiveDateTime) -> Duration {
    // Leap seconds are represented with nanos >= 1e9.
    let nanos = now.nanosecond() % 1_000_000_000;
    if nanos == 0 {
        Duration::ZERO
    } else {
        Duration::from_nanos(u64::from(1_000_000_000 - nanos))
    }
}

pub struct Ticker;

impl Ticker {
    /// Spawns the countdown onto the current tokio runtime.
    ///
    /// The first tick is computed synchronously and is available from the
    /// handle immediately.
    pub fn spawn(
        mut countdown: Countdown,
        clock: Arc<dyn Clock>,
        config: TickerConfig,
    ) -> Result<TickerHandle, CoreError> {
        if config.period.is_zero() {
            return Err(CoreError::Ticker("tick period must be greater than zero".to_string()));
        }

        let first = countdown.tick(clock.now());
        let (updates_tx, updates_rx) = watch::channel(first);
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let start = if config.align_to_second {
            Instant::now() + delay_to_next_second(clock.now())
        } else {
            Instant::now() + config.period
        };

        let task = tokio::spawn(async move {
            log::debug!("Ticker started with period {:?}", config.period);
            let mut interval = tokio::time::interval_at(start, config.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = interval.tick() => {
                        let tick = countdown.tick(clock.now());
                        if updates_tx.send(tick).is_err() {
                            // Nobody is listening anymore.
                            break;
                        }
                    }
                }
            }

            log::debug!("Ticker stopped");
            countdown
        });

        Ok(TickerHandle {
            updates: updates_rx,
            stop: Some(stop_tx),
            task: Some(task),
        })
    }
}

/// Owns the running ticker task. Dropping the handle aborts the task.
pub struct TickerHandle {
    updates: watch::Receiver<Tick>,
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Countdown>>,
}

impl TickerHandle {
    /// Most recently published tick.
    pub fn latest(&self) -> Tick {
        *self.updates.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Tick> {
        self.updates.clone()
    }

    /// Waits for the next tick.
    pub async fn changed(&mut self) -> Result<Tick, CoreError> {
        self.updates
            .changed()
            .await
            .map_err(|_| CoreError::Ticker("ticker is no longer running".to_string()))?;
        Ok(*self.updates.borrow_and_update())
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |task| task.is_finished())
    }

    /// Stops the ticker, waits for the task to wind down and returns the
    /// countdown in its final state.
    pub async fn stop(mut self) -> Result<Countdown, CoreError> {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        match self.task.take() {
            Some(task) => task
                .await
                .map_err(|e| CoreError::Ticker(format!("ticker task failed: {}", e))),
            None => Err(CoreError::Ticker("ticker already stopped".to_string())),
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
