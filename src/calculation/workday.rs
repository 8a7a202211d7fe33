//! Workday calendar.
//!
//! A date is a workday unless it falls on a weekend or its day-of-month is in
//! the [`HolidaySet`].

use chrono::{Datelike, NaiveDate, Weekday};

use crate::config::HolidaySet;

/// Returns whether `date` is a workday.
///
/// Holidays match on day-of-month alone, so a holiday `15` makes the 15th of
/// every month a non-workday.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use oncall_report::calculation::is_workday;
/// use oncall_report::config::HolidaySet;
///
/// let holidays = HolidaySet::from_days([8]);
///
/// // 2024-03-04 is a Monday
/// assert!(is_workday(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(), &holidays));
/// // 2024-03-08 is a Friday, but a holiday
/// assert!(!is_workday(NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(), &holidays));
/// // 2024-03-09 is a Saturday
/// assert!(!is_workday(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(), &holidays));
/// ```
pub fn is_workday(date: NaiveDate, holidays: &HolidaySet) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !holidays.contains_day(date.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    // ==========================================================================
    // Weekdays and weekends
    // ==========================================================================
    #[test]
    fn test_monday_to_friday_are_workdays() {
        let holidays = HolidaySet::new();
        // 2024-03-04 is a Monday
        for day in ["2024-03-04", "2024-03-05", "2024-03-06", "2024-03-07", "2024-03-08"] {
            assert!(is_workday(make_date(day), &holidays), "{} should be a workday", day);
        }
    }

    #[test]
    fn test_saturday_is_not_workday() {
        assert!(!is_workday(make_date("2024-03-09"), &HolidaySet::new()));
    }

    #[test]
    fn test_sunday_is_not_workday() {
        assert!(!is_workday(make_date("2024-03-10"), &HolidaySet::new()));
    }

    // ==========================================================================
    // Holidays
    // ==========================================================================
    #[test]
    fn test_holiday_weekday_is_not_workday() {
        let holidays = HolidaySet::from_days([6]);
        assert!(!is_workday(make_date("2024-03-06"), &holidays));
        assert!(is_workday(make_date("2024-03-07"), &holidays));
    }

    #[test]
    fn test_holiday_on_weekend_stays_non_workday() {
        let holidays = HolidaySet::from_days([9]);
        assert!(!is_workday(make_date("2024-03-09"), &holidays));
    }

    #[test]
    fn test_holiday_matches_day_of_month_in_every_month() {
        // Day-of-month matching: "15" hits the 15th of March and of April.
        let holidays = HolidaySet::from_days([15]);
        // 2024-03-15 is a Friday, 2024-04-15 is a Monday
        assert!(!is_workday(make_date("2024-03-15"), &holidays));
        assert!(!is_workday(make_date("2024-04-15"), &holidays));
    }
}
