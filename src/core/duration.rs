//! Sleep duration: circular time-of-day arithmetic.

use crate::utils::time::{format_hhmm, minutes_since_midnight};
use chrono::NaiveTime;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Minutes from `sleep_time` to `wake_time`, wrapping past midnight.
///
/// Seconds are ignored. A gap of exactly 24h cannot be told apart from 0.
pub fn sleep_minutes(wake_time: NaiveTime, sleep_time: NaiveTime) -> i64 {
    let delta = minutes_since_midnight(wake_time) - minutes_since_midnight(sleep_time);
    if delta < 0 {
        delta + MINUTES_PER_DAY
    } else {
        delta
    }
}

/// `HH:MM` slept between falling asleep and waking up.
pub fn compute_sleep_duration(wake_time: NaiveTime, sleep_time: NaiveTime) -> String {
    format_hhmm(sleep_minutes(wake_time, sleep_time))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn worked_examples() {
        assert_eq!(compute_sleep_duration(t(7, 30), t(23, 0)), "08:30");
        assert_eq!(compute_sleep_duration(t(6, 0), t(6, 0)), "00:00");
        assert_eq!(compute_sleep_duration(t(1, 0), t(22, 15)), "02:45");
    }

    #[test]
    fn same_day_nap() {
        assert_eq!(compute_sleep_duration(t(15, 10), t(13, 40)), "01:30");
    }

    #[test]
    fn seconds_do_not_leak_into_the_result() {
        let wake = NaiveTime::from_hms_opt(7, 0, 59).unwrap();
        let sleep = NaiveTime::from_hms_opt(23, 0, 1).unwrap();
        assert_eq!(compute_sleep_duration(wake, sleep), "08:00");
    }

    #[test]
    fn duration_always_lands_on_wake_time() {
        // every 7 minutes over the whole day, both sides
        for s in (0..MINUTES_PER_DAY).step_by(7) {
            for w in (0..MINUTES_PER_DAY).step_by(13) {
                let sleep = t((s / 60) as u32, (s % 60) as u32);
                let wake = t((w / 60) as u32, (w % 60) as u32);

                let d = sleep_minutes(wake, sleep);
                assert!((0..MINUTES_PER_DAY).contains(&d));
                assert_eq!((s + d) % MINUTES_PER_DAY, w);

                let text = compute_sleep_duration(wake, sleep);
                assert!(text.as_str() >= "00:00" && text.as_str() <= "23:59");
            }
        }
    }
}
