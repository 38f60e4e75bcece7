//! Wall-clock helpers pinned to the reference timezone.
//!
//! Submission timestamps and the daily view-counter boundary are both
//! computed in Europe/Warsaw regardless of server or client locale.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::{Europe::Warsaw, Tz};

pub const REFERENCE_TZ: Tz = Warsaw;

/// Convert a UTC instant into reference-timezone local time.
pub fn to_local(instant: DateTime<Utc>) -> DateTime<Tz> {
    instant.with_timezone(&REFERENCE_TZ)
}

/// Current reference-timezone wall-clock time, without offset (as stored).
pub fn now_local() -> NaiveDateTime {
    to_local(Utc::now()).naive_local()
}

/// Current calendar date in the reference timezone.
pub fn today() -> NaiveDate {
    to_local(Utc::now()).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn late_utc_evening_is_next_day_in_warsaw() {
        // 23:30 UTC in January is 00:30 CET
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 23, 30, 0).unwrap();
        let local = to_local(instant);
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());
    }

    #[test]
    fn summer_time_offset_is_two_hours() {
        let instant = Utc.with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap();
        let local = to_local(instant).naive_local();
        assert_eq!(local.format("%H:%M").to_string(), "12:00");
    }

    #[test]
    fn early_utc_morning_stays_same_day() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 6, 0, 0).unwrap();
        assert_eq!(to_local(instant).date_naive(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }
}
