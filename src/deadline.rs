use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// Calendar-agnostic breakdown of the gap between now and the due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub overdue: bool,
}

impl Countdown {
    pub fn between(now: DateTime<Utc>, due: DateTime<Utc>) -> Self {
        Self::from_signed(due - now)
    }

    pub fn from_signed(difference: Duration) -> Self {
        let overdue = difference < Duration::zero();
        let total = difference.num_seconds().abs();

        Self {
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
            overdue,
        }
    }

    /// Absolute gap in whole seconds, recomposed from the units.
    pub fn total_seconds(&self) -> i64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }

    /// Rendering without the leading overdue marker, for interpolation into
    /// "overdue by {time}" style messages.
    pub fn unsigned_string(&self) -> String {
        let mut out = String::new();
        if self.days > 0 {
            out.push_str(&format!("{}j ", self.days));
        }
        if self.hours > 0 {
            out.push_str(&format!("{}h ", self.hours));
        }
        if self.minutes > 0 {
            out.push_str(&format!("{}m ", self.minutes));
        }
        out.push_str(&format!("{}s", self.seconds));
        out
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.overdue {
            write!(f, "-{}", self.unsigned_string())
        } else {
            write!(f, "{}", self.unsigned_string())
        }
    }
}

/// Recomputes the countdown against a configured due date, once per tick.
#[derive(Debug, Clone)]
pub struct DeadlineTracker {
    due: DateTime<Utc>,
    countdown: Countdown,
}

impl DeadlineTracker {
    pub fn new(due: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            due,
            countdown: Countdown::between(now, due),
        }
    }

    pub fn tick(&mut self, now: DateTime<Utc>) {
        self.countdown = Countdown::between(now, self.due);
    }

    /// Swap the tracked deadline; the countdown reflects it on the next tick.
    pub fn set_due(&mut self, due: DateTime<Utc>) {
        self.due = due;
    }

    pub fn due(&self) -> DateTime<Utc> {
        self.due
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn is_late(&self) -> bool {
        self.countdown.overdue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_future_due_is_not_overdue() {
        let now = fixed_now();
        let countdown = Countdown::between(now, now + Duration::seconds(1));
        assert!(!countdown.overdue);
        let countdown = Countdown::between(now, now + Duration::days(30));
        assert!(!countdown.overdue);
    }

    #[test]
    fn test_past_due_is_overdue() {
        let now = fixed_now();
        let countdown = Countdown::between(now, now - Duration::seconds(1));
        assert!(countdown.overdue);
    }

    #[test]
    fn test_zero_difference_is_all_zero_and_on_time() {
        let now = fixed_now();
        let countdown = Countdown::between(now, now);
        assert!(!countdown.overdue);
        assert_eq!(countdown.to_string(), "0s");
        assert_eq!(countdown.total_seconds(), 0);
    }

    #[test]
    fn test_zero_units_are_suppressed_except_seconds() {
        let countdown = Countdown::from_signed(Duration::seconds(45));
        assert_eq!(countdown.to_string(), "45s");

        let countdown = Countdown::from_signed(Duration::days(1));
        assert_eq!(countdown.days, 1);
        assert_eq!(countdown.to_string(), "1j 0s");
    }

    #[test]
    fn test_full_breakdown_rendering() {
        let diff = Duration::days(2) + Duration::hours(3) + Duration::minutes(4) + Duration::seconds(5);
        let countdown = Countdown::from_signed(diff);
        assert_eq!(countdown.to_string(), "2j 3h 4m 5s");
    }

    #[test]
    fn test_negative_difference_carries_marker() {
        let countdown = Countdown::from_signed(Duration::seconds(-10));
        assert!(countdown.overdue);
        assert_eq!(countdown.to_string(), "-10s");
        assert_eq!(countdown.unsigned_string(), "10s");
    }

    #[test]
    fn test_decomposition_round_trips() {
        for secs in [0i64, 1, 59, 60, 61, 3_599, 3_600, 86_399, 86_400, 93_784, 1_000_000] {
            let countdown = Countdown::from_signed(Duration::seconds(secs));
            assert_eq!(countdown.total_seconds(), secs);
            let countdown = Countdown::from_signed(Duration::seconds(-secs));
            assert_eq!(countdown.total_seconds(), secs);
        }
    }

    #[test]
    fn test_tracker_flips_on_next_tick_after_deadline_passes() {
        let now = fixed_now();
        let mut tracker = DeadlineTracker::new(now + Duration::seconds(1), now);
        assert!(!tracker.is_late());

        tracker.tick(now + Duration::seconds(2));
        assert!(tracker.is_late());
        assert_eq!(tracker.countdown().to_string(), "-1s");
    }

    #[test]
    fn test_tracker_reconfiguration_applies_on_next_tick() {
        let now = fixed_now();
        let mut tracker = DeadlineTracker::new(now - Duration::minutes(1), now);
        tracker.tick(now);
        assert!(tracker.is_late());

        tracker.set_due(now + Duration::hours(1));
        tracker.tick(now);
        assert!(!tracker.is_late());
        assert_eq!(tracker.countdown().to_string(), "1h 0s");
    }
}
