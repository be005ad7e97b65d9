//! # Deadline Core Library
//!
//! Countdown logic for a recurring weekly deadline (by default Thursday
//! 23:59:00 local time), plus the in-memory deployment log shown next to it.
//!
//! ## Features
//!
//! - **Deadline Resolution**: next occurrence of a weekday at a fixed time of
//!   day, with an explicit same-day rollover policy
//! - **Remaining Time**: saturating decomposition into days, hours, minutes
//!   and seconds
//! - **Tick Driver**: drift-tolerant countdown state machine on a cancelable
//!   tokio interval
//! - **Deployment Log**: immutable log rows with ephemeral upvote counters
//!
//! ## Core Modules
//!
//! - [`models`]: Core data structures
//! - [`deadline`]: Next-deadline resolution
//! - [`remaining`]: Remaining-time decomposition and padding
//! - [`ticker`]: Countdown state machine and async ticker
//! - [`clock`]: Clock abstraction for deterministic tests
//! - [`deploy_log`]: Deployment log and vote board
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use deadline_core::{
//!     clock::{Clock, SystemClock},
//!     deadline::DeadlineResolver,
//!     models::Layout,
//!     ticker::{Countdown, Ticker, TickerConfig},
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let clock: Arc<dyn Clock> = Arc::new(SystemClock);
//!     let countdown = Countdown::new(DeadlineResolver::default(), Layout::Days, clock.now());
//!     let mut ticker = Ticker::spawn(countdown, clock, TickerConfig::default())?;
//!
//!     let tick = ticker.changed().await?;
//!     println!("{} until {}", tick.remaining, tick.target);
//!
//!     ticker.stop().await?;
//!     Ok(())
//! }
//! ```

pub mod clock;
pub mod deadline;
pub mod deploy_log;
pub mod error;
pub mod models;
pub mod remaining;
pub mod ticker;
