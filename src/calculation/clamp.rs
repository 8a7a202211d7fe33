//! Instant clamping into the reporting month.
//!
//! The timeline source may report a boundary at or past the end of the
//! queried month. Clamping keeps every instant strictly inside
//! `[.., month_start + 1 month)`.

use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use chrono_tz::Tz;

use super::local_time::start_of_day;

/// The smallest representable step, used to land just inside the bound.
pub const CLAMP_TICK_NANOS: i64 = 1;

/// The exclusive upper bound of the month starting at `month_start`:
/// local midnight one calendar month later.
///
/// When the next month is shorter, the day-of-month is capped at its last
/// day (January 31 gives February 29 in a leap year).
pub fn month_end_bound(tz: &Tz, month_start: NaiveDate) -> DateTime<Tz> {
    let next = month_start
        .checked_add_months(Months::new(1))
        .unwrap_or(NaiveDate::MAX);
    start_of_day(tz, next)
}

/// Converts epoch milliseconds to an instant in `tz`, clamping anything at
/// or after [`month_end_bound`] to one tick before it.
///
/// # Example
///
/// ```
/// use chrono::{Duration, NaiveDate, TimeZone};
/// use chrono_tz::Tz;
/// use oncall_report::calculation::to_instant;
///
/// let tz = Tz::UTC;
/// let march = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let bound = tz.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
///
/// let clamped = to_instant(bound.timestamp_millis(), &tz, march);
/// assert_eq!(bound - clamped, Duration::nanoseconds(1));
///
/// let inside = tz.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
/// assert_eq!(to_instant(inside.timestamp_millis(), &tz, march), inside);
/// ```
pub fn to_instant(epoch_millis: i64, tz: &Tz, month_start: NaiveDate) -> DateTime<Tz> {
    let bound = month_end_bound(tz, month_start);
    let just_inside = bound - Duration::nanoseconds(CLAMP_TICK_NANOS);

    let instant = match DateTime::<Utc>::from_timestamp_millis(epoch_millis) {
        Some(utc) => utc.with_timezone(tz),
        None if epoch_millis > 0 => return just_inside,
        None => DateTime::<Utc>::MIN_UTC.with_timezone(tz),
    };

    if instant >= bound { just_inside } else { instant }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn march() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_bound_is_next_month_midnight() {
        let tz = chrono_tz::Europe::Berlin;
        let bound = month_end_bound(&tz, march());
        assert_eq!(bound, tz.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_bound_caps_day_of_month() {
        let tz = Tz::UTC;
        let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let bound = month_end_bound(&tz, start);
        assert_eq!(bound, tz.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_instant_exactly_at_bound_is_clamped() {
        let tz = chrono_tz::Europe::Berlin;
        let bound = month_end_bound(&tz, march());
        let clamped = to_instant(bound.timestamp_millis(), &tz, march());
        assert!(clamped < bound);
        assert_eq!(bound - clamped, Duration::nanoseconds(1));
    }

    #[test]
    fn test_instant_past_bound_is_clamped() {
        let tz = Tz::UTC;
        let later = tz.with_ymd_and_hms(2024, 4, 20, 8, 0, 0).unwrap();
        let clamped = to_instant(later.timestamp_millis(), &tz, march());
        assert_eq!(clamped, month_end_bound(&tz, march()) - Duration::nanoseconds(1));
    }

    #[test]
    fn test_instant_before_month_is_unchanged() {
        let tz = Tz::UTC;
        let earlier = tz.with_ymd_and_hms(2024, 2, 26, 8, 0, 0).unwrap();
        assert_eq!(to_instant(earlier.timestamp_millis(), &tz, march()), earlier);
    }

    #[test]
    fn test_millisecond_precision_is_kept() {
        let tz = Tz::UTC;
        let instant = to_instant(1_709_546_400_123, &tz, march());
        assert_eq!(instant.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn test_instant_is_in_requested_zone() {
        let tz = chrono_tz::America::New_York;
        // 2024-03-04T14:00:00Z is 09:00 in New York
        let instant = to_instant(1_709_560_800_000, &tz, march());
        assert_eq!(instant.naive_local().to_string(), "2024-03-04 09:00:00");
    }

    #[test]
    fn test_unrepresentable_future_is_clamped() {
        let tz = Tz::UTC;
        let clamped = to_instant(i64::MAX, &tz, march());
        assert_eq!(clamped, month_end_bound(&tz, march()) - Duration::nanoseconds(1));
    }

    proptest! {
        #[test]
        fn prop_result_always_below_bound(millis in -4_000_000_000_000i64..8_000_000_000_000i64) {
            let tz = chrono_tz::Europe::Berlin;
            let bound = month_end_bound(&tz, march());
            prop_assert!(to_instant(millis, &tz, march()) < bound);
        }
    }
}
