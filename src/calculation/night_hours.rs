//! Night-hours overlap calculation.
//!
//! This module computes how much of an on-call interval falls inside the
//! recurring night window (19:00 to 07:00 local time). On non-workdays the
//! whole day counts, regardless of the clock.
//!
//! An interval is split into a first partial day, zero or more full interior
//! days, and a last partial day. Intervals inside a single calendar day are
//! handled by clipping both ends out of the day window first.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;

use crate::config::HolidaySet;

use super::local_time::{at_time, end_of_day, start_of_day};
use super::workday::is_workday;

/// Hour at which the night window opens.
pub const NIGHT_START_HOUR: u32 = 19;

/// Hour at which the night window closes.
pub const NIGHT_END_HOUR: u32 = 7;

/// Valid hours contributed by a full interior workday without a clock change.
pub const WORKDAY_NIGHT_HOURS: i64 = 12;

/// Valid hours contributed by a full interior non-workday without a clock change.
pub const NON_WORKDAY_HOURS: i64 = 24;

const NIGHT_START: NaiveTime = match NaiveTime::from_hms_opt(NIGHT_START_HOUR, 0, 0) {
    Some(time) => time,
    None => panic!("night start hour out of range"),
};

const NIGHT_END: NaiveTime = match NaiveTime::from_hms_opt(NIGHT_END_HOUR, 0, 0) {
    Some(time) => time,
    None => panic!("night end hour out of range"),
};

/// True for clock times in the day window `[07:00, 19:00)`.
fn in_day_window(time: NaiveTime) -> bool {
    time >= NIGHT_END && time < NIGHT_START
}

/// `to - from`, or zero when the bounds are inverted.
fn span(from: DateTime<Tz>, to: DateTime<Tz>) -> Duration {
    let length = to.signed_duration_since(from);
    if length > Duration::zero() {
        length
    } else {
        Duration::zero()
    }
}

/// Calculates the valid (night-window) part of `[start, end]`.
///
/// Both instants must be in the same timezone. The result is never negative
/// and never exceeds `end - start`; an inverted interval yields zero.
///
/// # Example
///
/// ```
/// use chrono::{Duration, TimeZone};
/// use chrono_tz::Tz;
/// use oncall_report::calculation::valid_hours;
/// use oncall_report::config::HolidaySet;
///
/// let tz = Tz::UTC;
/// let holidays = HolidaySet::new();
///
/// // Monday 09:00 to 21:00: only 19:00-21:00 counts
/// let start = tz.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
/// let end = tz.with_ymd_and_hms(2024, 3, 4, 21, 0, 0).unwrap();
/// assert_eq!(valid_hours(start, end, &holidays), Duration::hours(2));
///
/// // Saturday: everything counts
/// let start = tz.with_ymd_and_hms(2024, 3, 9, 9, 0, 0).unwrap();
/// let end = tz.with_ymd_and_hms(2024, 3, 9, 17, 0, 0).unwrap();
/// assert_eq!(valid_hours(start, end, &holidays), Duration::hours(8));
/// ```
pub fn valid_hours(start: DateTime<Tz>, end: DateTime<Tz>, holidays: &HolidaySet) -> Duration {
    if end <= start {
        return Duration::zero();
    }

    let start_date = start.date_naive();
    let end_date = end.date_naive();

    if start_date == end_date {
        return single_day_hours(start, end, holidays);
    }

    let interior = start_date
        .iter_days()
        .skip(1)
        .take_while(|date| *date < end_date)
        .fold(Duration::zero(), |total, date| {
            total + interior_day_hours(&start.timezone(), date, holidays)
        });

    first_day_hours(start, holidays) + interior + last_day_hours(end, holidays)
}

/// Valid time of an interval that starts and ends on the same calendar day.
///
/// On a workday, a start inside the day window moves forward to 19:00 and an
/// end inside the day window moves back to 07:00. What remains is either one
/// night fragment, the two fragments on either side of the day window, or
/// nothing when the clipped bounds crossed.
fn single_day_hours(start: DateTime<Tz>, end: DateTime<Tz>, holidays: &HolidaySet) -> Duration {
    let date = start.date_naive();
    if !is_workday(date, holidays) {
        return span(start, end);
    }

    let tz = start.timezone();
    let morning = at_time(&tz, date, NIGHT_END);
    let evening = at_time(&tz, date, NIGHT_START);

    let from = if in_day_window(start.time()) { evening } else { start };
    let to = if in_day_window(end.time()) { morning } else { end };

    if from >= to {
        return Duration::zero();
    }

    if (from <= morning && to <= morning) || (from >= evening && to >= evening) {
        return span(from, to);
    }

    span(from, morning) + span(evening, to)
}

/// Valid time from `start` to the following midnight.
fn first_day_hours(start: DateTime<Tz>, holidays: &HolidaySet) -> Duration {
    let date = start.date_naive();
    let tz = start.timezone();
    let midnight = end_of_day(&tz, date);

    if !is_workday(date, holidays) || start.time() >= NIGHT_START {
        return span(start, midnight);
    }

    let morning = at_time(&tz, date, NIGHT_END);
    let evening = at_time(&tz, date, NIGHT_START);
    span(start, morning) + span(evening, midnight)
}

/// Valid time of a full calendar day strictly inside the interval.
fn interior_day_hours(tz: &Tz, date: NaiveDate, holidays: &HolidaySet) -> Duration {
    let midnight = start_of_day(tz, date);
    let next_midnight = end_of_day(tz, date);

    if !is_workday(date, holidays) {
        return span(midnight, next_midnight);
    }

    let morning = at_time(tz, date, NIGHT_END);
    let evening = at_time(tz, date, NIGHT_START);
    span(midnight, morning) + span(evening, next_midnight)
}

fn last_day_hours(end: DateTime<Tz>, holidays: &HolidaySet) -> Duration {
    let date = end.date_naive();
    let tz = end.timezone();
    let midnight = start_of_day(&tz, date);

    if !is_workday(date, holidays) || end.time() <= NIGHT_END {
        return span(midnight, end);
    }

    let morning = at_time(&tz, date, NIGHT_END);
    let evening = at_time(&tz, date, NIGHT_START);
    span(midnight, morning) + span(evening, end)
}
