//! Time-of-day sleep policy for display clients.

use chrono::{NaiveDateTime, NaiveTime, Timelike};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// How long a client should sleep before polling again.
///
/// Inside the quiet window the client sleeps until the window ends;
/// otherwise it wakes on the next multiple of `interval_minutes` past
/// midnight. The result, plus `wake_margin_minutes`, is clamped to
/// `[min_sleep_minutes, max_sleep_minutes]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepSchedule {
    pub quiet_start_hour: u32,
    pub quiet_end_hour: u32,
    pub interval_minutes: u32,
    pub min_sleep_minutes: u8,
    pub max_sleep_minutes: u8,
    pub wake_margin_minutes: u32,
}

impl Default for SleepSchedule {
    fn default() -> Self {
        Self {
            quiet_start_hour: 2,
            quiet_end_hour: 6,
            interval_minutes: 60,
            min_sleep_minutes: 15,
            max_sleep_minutes: 240,
            wake_margin_minutes: 0,
        }
    }
}

impl SleepSchedule {
    /// Returns true if `hour` falls in the quiet window. The window may wrap
    /// past midnight; equal start and end hours mean no quiet window.
    pub fn is_quiet(&self, hour: u32) -> bool {
        let (start, end) = (self.quiet_start_hour, self.quiet_end_hour);
        if start <= end {
            hour >= start && hour < end
        } else {
            hour >= start || hour < end
        }
    }

    pub fn sleep_minutes(&self, now: NaiveTime) -> u8 {
        let minute_of_day = now.hour() * 60 + now.minute();
        let raw = if self.is_quiet(now.hour()) {
            let end = self.quiet_end_hour * 60;
            (end + MINUTES_PER_DAY - minute_of_day) % MINUTES_PER_DAY
        } else {
            let interval = self.interval_minutes.max(1);
            (interval - minute_of_day % interval) % interval
        };
        let low = self.min_sleep_minutes.min(self.max_sleep_minutes) as u32;
        let high = self.max_sleep_minutes.max(self.min_sleep_minutes) as u32;
        raw.saturating_add(self.wake_margin_minutes).clamp(low, high) as u8
    }
}

/// Index of the coarse time bucket `now` falls into.
pub fn refresh_slot(now: NaiveDateTime, slot_minutes: u32) -> i64 {
    let minutes = now.and_utc().timestamp().div_euclid(60);
    minutes.div_euclid(slot_minutes.max(1) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn quiet_hours_sleep_until_window_ends() {
        let schedule = SleepSchedule::default();
        assert_eq!(schedule.sleep_minutes(at(2, 0)), 240);
        assert_eq!(schedule.sleep_minutes(at(4, 30)), 90);
        assert_eq!(schedule.sleep_minutes(at(5, 50)), 15);
    }

    #[test]
    fn active_hours_wake_on_the_interval() {
        let schedule = SleepSchedule::default();
        assert_eq!(schedule.sleep_minutes(at(14, 20)), 40);
        assert_eq!(schedule.sleep_minutes(at(14, 50)), 15);
        // on the mark the raw value is zero and the floor applies
        assert_eq!(schedule.sleep_minutes(at(14, 0)), 15);
    }

    #[test]
    fn margin_and_short_interval() {
        let schedule = SleepSchedule {
            interval_minutes: 20,
            min_sleep_minutes: 1,
            wake_margin_minutes: 1,
            ..Default::default()
        };
        assert_eq!(schedule.sleep_minutes(at(9, 5)), 16);
    }

    #[test]
    fn huge_margin_saturates_to_max_sleep() {
        let schedule = SleepSchedule {
            wake_margin_minutes: u32::MAX,
            ..Default::default()
        };
        assert_eq!(schedule.sleep_minutes(at(14, 20)), 240);
    }

    #[test]
    fn quiet_window_can_wrap_midnight() {
        let schedule = SleepSchedule {
            quiet_start_hour: 22,
            quiet_end_hour: 6,
            max_sleep_minutes: 255,
            ..Default::default()
        };
        assert!(schedule.is_quiet(23));
        assert!(schedule.is_quiet(3));
        assert!(!schedule.is_quiet(12));
        assert_eq!(schedule.sleep_minutes(at(23, 0)), 255);
        assert_eq!(schedule.sleep_minutes(at(5, 0)), 60);
    }

    #[test]
    fn refresh_slots_are_coarse_buckets() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let a = day.and_hms_opt(10, 0, 0).unwrap();
        let b = day.and_hms_opt(10, 59, 59).unwrap();
        let c = day.and_hms_opt(11, 0, 0).unwrap();
        assert_eq!(refresh_slot(a, 60), refresh_slot(b, 60));
        assert_ne!(refresh_slot(b, 60), refresh_slot(c, 60));
    }
}
