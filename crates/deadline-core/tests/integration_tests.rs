use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use deadline_core::clock::{Clock, FixedClock};
use deadline_core::deadline::{next_deadline, DeadlineResolver};
use deadline_core::deploy_log::{DeploymentLog, VoteBoard};
use deadline_core::error::CoreError;
use deadline_core::models::*;
use deadline_core::remaining::{decompose, pad2};
use deadline_core::ticker::{Countdown, CountdownState, Ticker, TickerConfig};
use std::sync::Arc;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

/// Walks a full week minute by minute and checks the countdown never
/// reports more than seven days and rolls over exactly once.
#[test]
fn test_countdown_over_a_full_week() {
    let start = at(2025, 8, 8, 0, 0, 0);
    let mut countdown = Countdown::new(DeadlineResolver::default(), Layout::Days, start);
    let mut rollovers = Vec::new();

    let mut now = start;
    while now < start + Duration::days(7) {
        let tick = countdown.tick(now);
        assert!(tick.remaining.days <= 7);
        assert_eq!(tick.target.weekday(), chrono::Weekday::Thu);
        if tick.rolled_over {
            assert_eq!(tick.state, CountdownState::Expired);
            rollovers.push(now);
        }
        now += Duration::minutes(1);
    }

    assert_eq!(rollovers, vec![at(2025, 8, 14, 23, 59, 0)]);
    assert_eq!(countdown.target(), at(2025, 8, 21, 23, 59, 0));
}

/// Resolving then decomposing reproduces the documented scenarios.
#[test]
fn test_resolve_then_decompose_scenarios() {
    let thursday_morning = at(2025, 8, 7, 10, 0, 0);
    let remaining = decompose(next_deadline(thursday_morning), thursday_morning);
    assert_eq!(remaining, RemainingTime { days: 0, hours: 13, minutes: 59, seconds: 0 });

    let legacy = DeadlineResolver::new(DeadlineSpec::default(), RolloverPolicy::AlwaysRollForward);
    let remaining = decompose(legacy.resolve(thursday_morning), thursday_morning);
    assert_eq!(remaining, RemainingTime { days: 7, hours: 13, minutes: 59, seconds: 0 });

    let friday = at(2025, 8, 8, 0, 0, 0);
    let remaining = decompose(next_deadline(friday), friday);
    assert_eq!(remaining, RemainingTime { days: 6, hours: 23, minutes: 59, seconds: 0 });
    assert_eq!(remaining.to_string(), "06:23:59:00");
}

#[test]
fn test_configured_deadline() {
    let spec = DeadlineSpec::new(
        "fri".parse().unwrap(),
        DeadlineSpec::parse_time("17:00").unwrap(),
    );
    let resolver = DeadlineResolver::new(spec, RolloverPolicy::SameDay);
    let deadline = resolver.resolve(at(2025, 8, 8, 16, 0, 0));
    assert_eq!(deadline, at(2025, 8, 8, 17, 0, 0));
    assert_eq!(deadline.time(), NaiveTime::from_hms_opt(17, 0, 0).unwrap());
}

#[test]
fn test_votes_are_per_board() {
    let log = DeploymentLog::fixtures();
    let pulse = Duration::milliseconds(VoteBoard::DEFAULT_PULSE_MILLIS);
    let mut first = VoteBoard::new(&log, pulse);
    let second = VoteBoard::new(&log, pulse);

    first.upvote(0, at(2025, 8, 7, 12, 0, 0)).unwrap();
    assert_eq!(first.votes(0), Some(13));
    assert_eq!(second.votes(0), Some(12));
    assert_eq!(log.get(0).unwrap().votes, Some(12));
}

#[test]
fn test_error_messages() {
    let err = "funday".parse::<Weekday>().unwrap_err();
    assert!(err.to_string().contains("funday"));
    assert_eq!(pad2(3), "03");
    assert!(matches!(DeadlineSpec::parse_time("noon"), Err(CoreError::InvalidTime(_))));
}

#[tokio::test]
async fn test_ticker_stop_returns_countdown() {
    let clock = Arc::new(FixedClock::new(at(2025, 8, 8, 0, 0, 0)));
    let shared: Arc<dyn Clock> = clock.clone();
    let countdown = Countdown::new(DeadlineResolver::default(), Layout::Hours, shared.now());
    let config = TickerConfig {
        period: std::time::Duration::from_millis(5),
        align_to_second: false,
    };

    let mut handle = Ticker::spawn(countdown, shared, config).unwrap();
    assert_eq!(handle.latest().remaining.hours, 167);

    clock.advance(Duration::hours(1));
    let tick = tokio::time::timeout(std::time::Duration::from_secs(2), handle.changed())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(tick.remaining.hours, 166);
    assert_eq!(tick.remaining.days, 0);

    let countdown = handle.stop().await.unwrap();
    assert_eq!(countdown.state(), CountdownState::Counting);
}
