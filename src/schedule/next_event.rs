//! Next-boundary derivation.
//!
//! All functions take `now` explicitly so day rollover is deterministic.
//! Times are naive local wall-clock values; no timezone conversion happens.

use std::time::Duration;

use chrono::{NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::types::{BoundaryKind, NextEvent};

/// A boundary string that is not an `HH:MM` clock time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid clock time '{0}', expected HH:MM")]
pub struct ClockTimeError(pub String);

/// Parses the leading `HH:MM` of a service time string.
///
/// Trailing annotations such as `"05:12 (+03)"` are ignored.
pub fn parse_clock_time(value: &str) -> Result<NaiveTime, ClockTimeError> {
    let token = value
        .split_whitespace()
        .next()
        .ok_or_else(|| ClockTimeError(value.to_string()))?;
    NaiveTime::parse_from_str(token, "%H:%M").map_err(|_| ClockTimeError(value.to_string()))
}

/// Places a clock time on `now`'s calendar date.
#[must_use]
pub fn at_today(time: NaiveTime, now: NaiveDateTime) -> NaiveDateTime {
    now.date().and_time(time)
}

/// Returns the next boundary strictly after `now`.
///
/// Fajr always precedes maghrib within a day; once both have passed the
/// cycle restarts at tomorrow's fajr.
#[must_use]
pub fn next_event(fajr: NaiveTime, maghrib: NaiveTime, now: NaiveDateTime) -> NextEvent {
    let today_fajr = at_today(fajr, now);
    let today_maghrib = at_today(maghrib, now);

    if now < today_fajr {
        NextEvent {
            kind: BoundaryKind::Suhoor,
            at: today_fajr,
        }
    } else if now < today_maghrib {
        NextEvent {
            kind: BoundaryKind::Iftar,
            at: today_maghrib,
        }
    } else {
        NextEvent {
            kind: BoundaryKind::Suhoor,
            at: today_fajr + chrono::Duration::days(1),
        }
    }
}

/// Returns `max(0, target - now)`.
#[must_use]
pub fn time_remaining(target: NaiveDateTime, now: NaiveDateTime) -> Duration {
    (target - now).to_std().unwrap_or(Duration::ZERO)
}

/// Formats a duration as `HH:MM:SS`, flooring to whole seconds.
///
/// ```
/// use std::time::Duration;
/// use iftar::schedule::format_time_remaining;
///
/// assert_eq!(format_time_remaining(Duration::from_millis(3_661_000)), "01:01:01");
/// assert_eq!(format_time_remaining(Duration::ZERO), "00:00:00");
/// ```
#[must_use]
pub fn format_time_remaining(remaining: Duration) -> String {
    let total_seconds = remaining.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    // ------------------------------------------------------------------------
    // parse_clock_time Tests
    // ------------------------------------------------------------------------

    mod parse_tests {
        use super::*;

        #[test]
        fn test_parse_plain() {
            assert_eq!(parse_clock_time("04:30"), Ok(time(4, 30)));
            assert_eq!(parse_clock_time("19:15"), Ok(time(19, 15)));
        }

        #[test]
        fn test_parse_with_zone_suffix() {
            assert_eq!(parse_clock_time("05:12 (+03)"), Ok(time(5, 12)));
            assert_eq!(parse_clock_time("  18:01 (EEST)"), Ok(time(18, 1)));
        }

        #[test]
        fn test_parse_rejects_garbage() {
            assert!(parse_clock_time("").is_err());
            assert!(parse_clock_time("sunset").is_err());
            assert!(parse_clock_time("24:00").is_err());
            assert!(parse_clock_time("12:60").is_err());
        }
    }

    // ------------------------------------------------------------------------
    // next_event Tests
    // ------------------------------------------------------------------------

    mod next_event_tests {
        use super::*;

        #[test]
        fn test_before_fajr_is_suhoor_today() {
            let now = at(2025, 3, 1, 3, 0, 0);
            let next = next_event(time(4, 30), time(19, 15), now);
            assert_eq!(next.kind, BoundaryKind::Suhoor);
            assert_eq!(next.at, at(2025, 3, 1, 4, 30, 0));
        }

        #[test]
        fn test_at_fajr_is_iftar_today() {
            let now = at(2025, 3, 1, 4, 30, 0);
            let next = next_event(time(4, 30), time(19, 15), now);
            assert_eq!(next.kind, BoundaryKind::Iftar);
            assert_eq!(next.at, at(2025, 3, 1, 19, 15, 0));
        }

        #[test]
        fn test_midday_is_iftar_today() {
            let now = at(2025, 3, 1, 12, 0, 0);
            let next = next_event(time(4, 30), time(19, 15), now);
            assert_eq!(next.kind, BoundaryKind::Iftar);
            assert_eq!(next.at, at(2025, 3, 1, 19, 15, 0));
        }

        #[test]
        fn test_at_maghrib_is_suhoor_tomorrow() {
            let now = at(2025, 3, 1, 19, 15, 0);
            let next = next_event(time(4, 30), time(19, 15), now);
            assert_eq!(next.kind, BoundaryKind::Suhoor);
            assert_eq!(next.at, at(2025, 3, 2, 4, 30, 0));
        }

        #[test]
        fn test_rollover_across_month_and_year() {
            let next = next_event(time(5, 0), time(18, 0), at(2025, 2, 28, 23, 59, 59));
            assert_eq!(next.at, at(2025, 3, 1, 5, 0, 0));

            let next = next_event(time(5, 0), time(18, 0), at(2025, 12, 31, 20, 0, 0));
            assert_eq!(next.at, at(2026, 1, 1, 5, 0, 0));
        }

        #[test]
        fn test_next_event_is_strictly_future() {
            let fajr = time(4, 30);
            let maghrib = time(19, 15);
            for hour in 0..24 {
                for minute in [0, 15, 30, 45] {
                    let now = at(2025, 3, 1, hour, minute, 0);
                    let next = next_event(fajr, maghrib, now);
                    assert!(next.at > now, "{now} -> {:?}", next);
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Remaining / Format Tests
    // ------------------------------------------------------------------------

    mod remaining_tests {
        use super::*;

        #[test]
        fn test_time_remaining_clamps_to_zero() {
            let target = at(2025, 3, 1, 19, 15, 0);
            assert_eq!(time_remaining(target, at(2025, 3, 1, 19, 15, 1)), Duration::ZERO);
            assert_eq!(time_remaining(target, target), Duration::ZERO);
            assert_eq!(
                time_remaining(target, at(2025, 3, 1, 19, 14, 0)),
                Duration::from_secs(60)
            );
        }

        #[test]
        fn test_format_examples() {
            assert_eq!(format_time_remaining(Duration::from_millis(3_661_000)), "01:01:01");
            assert_eq!(format_time_remaining(Duration::from_millis(0)), "00:00:00");
            assert_eq!(format_time_remaining(Duration::from_millis(59_000)), "00:00:59");
        }

        #[test]
        fn test_format_floors_partial_seconds() {
            assert_eq!(format_time_remaining(Duration::from_millis(1_999)), "00:00:01");
            assert_eq!(format_time_remaining(Duration::from_millis(999)), "00:00:00");
        }

        #[test]
        fn test_format_long_durations() {
            assert_eq!(
                format_time_remaining(Duration::from_secs(23 * 3600 + 59 * 60)),
                "23:59:00"
            );
            assert_eq!(format_time_remaining(Duration::from_secs(100 * 3600)), "100:00:00");
        }

        #[test]
        fn test_countdown_is_monotonic_and_hits_zero() {
            let target = at(2025, 3, 1, 19, 15, 0);
            let mut now = at(2025, 3, 1, 19, 14, 0);
            let mut previous = time_remaining(target, now);
            while now <= target {
                now += chrono::Duration::milliseconds(250);
                let remaining = time_remaining(target, now);
                assert!(remaining <= previous);
                previous = remaining;
            }
            assert_eq!(format_time_remaining(previous), "00:00:00");
        }

        #[test]
        fn test_end_to_end_midday() {
            let now = at(2025, 3, 1, 12, 0, 0);
            let fajr = parse_clock_time("04:30").unwrap();
            let maghrib = parse_clock_time("19:15").unwrap();
            let next = next_event(fajr, maghrib, now);
            assert_eq!(next.kind, BoundaryKind::Iftar);
            assert_eq!(next.at, at(2025, 3, 1, 19, 15, 0));
            assert_eq!(format_time_remaining(time_remaining(next.at, now)), "07:15:00");
        }
    }
}
