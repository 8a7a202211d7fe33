//! Local wall-clock helpers shared by the calculators.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone};
use chrono_tz::Tz;

use crate::error::{ReportError, ReportResult};

/// Resolves an IANA timezone identifier.
///
/// # Example
///
/// ```
/// use oncall_report::calculation::resolve_timezone;
///
/// assert!(resolve_timezone("Europe/Berlin").is_ok());
/// assert!(resolve_timezone("Mars/Olympus").is_err());
/// ```
pub fn resolve_timezone(name: &str) -> ReportResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ReportError::InvalidTimezone {
            timezone: name.to_string(),
        })
}

/// Maps a local wall-clock time to an instant in `tz`.
///
/// Ambiguous times (clocks going back) resolve to the earlier instant. Times
/// inside a gap (clocks going forward) use the offset in force before the gap.
pub fn local_datetime(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    tz.from_local_datetime(&naive).earliest().unwrap_or_else(|| {
        let before = tz
            .offset_from_utc_datetime(&(naive - Duration::days(1)))
            .fix();
        let utc = naive - Duration::seconds(i64::from(before.local_minus_utc()));
        tz.from_utc_datetime(&utc)
    })
}

/// The instant at `time` on `date` in `tz`.
pub fn at_time(tz: &Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Tz> {
    local_datetime(tz, date.and_time(time))
}

/// The local midnight that starts `date`.
pub fn start_of_day(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    at_time(tz, date, NaiveTime::MIN)
}

/// The local midnight that ends `date`.
pub fn end_of_day(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    start_of_day(tz, date + Duration::days(1))
}
