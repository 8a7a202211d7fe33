//! Configuration types for report runs.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files or built from CLI arguments.

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::error::{ReportError, ReportResult};

/// Default base URL of the timeline service.
pub const DEFAULT_API_URL: &str = "https://api.opsgenie.com";

/// Default request timeout for the timeline service, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The set of holidays, identified by day-of-month only.
///
/// A holiday `15` marks the 15th of *every* month a report touches, not one
/// particular date. Reports spanning a month boundary therefore treat the
/// 15th of both months as holidays.
///
/// # Example
///
/// ```
/// use oncall_report::config::HolidaySet;
///
/// let holidays: HolidaySet = "1, 15,abc".parse().unwrap();
/// assert!(holidays.contains_day(1));
/// assert!(holidays.contains_day(15));
/// assert_eq!(holidays.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HolidaySet {
    days: BTreeSet<u32>,
}

impl HolidaySet {
    /// Creates an empty holiday set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a holiday set from day-of-month numbers.
    pub fn from_days<I: IntoIterator<Item = u32>>(days: I) -> Self {
        Self {
            days: days.into_iter().collect(),
        }
    }

    /// Parses a comma-separated list such as `"1,15,25"`.
    ///
    /// Entries that are not a number are skipped with a warning; they could
    /// never match a day-of-month.
    pub fn parse_list(s: &str) -> Self {
        let mut days = BTreeSet::new();
        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match entry.parse::<u32>() {
                Ok(day) => {
                    days.insert(day);
                }
                Err(_) => warn!(entry, "Ignoring holiday entry that is not a day number"),
            }
        }
        Self { days }
    }

    /// Returns whether the given day-of-month is a holiday.
    pub fn contains_day(&self, day: u32) -> bool {
        self.days.contains(&day)
    }

    /// Returns the holiday days in ascending order.
    pub fn days(&self) -> impl Iterator<Item = u32> + '_ {
        self.days.iter().copied()
    }

    /// Returns the number of holiday days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns true if there are no holidays.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl FromStr for HolidaySet {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_list(s))
    }
}

impl<'de> Deserialize<'de> for HolidaySet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawHolidays {
            List(Vec<u32>),
            Text(String),
        }

        Ok(match RawHolidays::deserialize(deserializer)? {
            RawHolidays::List(days) => HolidaySet::from_days(days),
            RawHolidays::Text(text) => HolidaySet::parse_list(&text),
        })
    }
}

/// Parses a `YYYY-MM-DD` reference date.
///
/// # Example
///
/// ```
/// use oncall_report::config::parse_month_start;
///
/// let date = parse_month_start("2024-03-01").unwrap();
/// assert_eq!(date.to_string(), "2024-03-01");
/// assert!(parse_month_start("03/01/2024").is_err());
/// ```
pub fn parse_month_start(value: &str) -> ReportResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| ReportError::InvalidDate {
        value: value.to_string(),
    })
}

/// Everything needed to produce one report.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Credential for the timeline service.
    pub api_key: String,
    /// Name of the on-call schedule to report on.
    pub schedule_name: String,
    /// Reference date; the report covers the month starting here.
    pub month_start: NaiveDate,
    /// Holiday days-of-month.
    #[serde(default)]
    pub holidays: HolidaySet,
    /// Base URL of the timeline service.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ReportConfig {
    /// Builds a configuration from positional arguments
    /// `<api-key> <schedule-name> <YYYY-MM-DD> [holidays]`.
    pub fn from_args(
        api_key: &str,
        schedule_name: &str,
        month_start: &str,
        holidays: Option<&str>,
    ) -> ReportResult<Self> {
        let holidays = match holidays {
            Some(list) => HolidaySet::parse_list(list),
            None => HolidaySet::new(),
        };

        Ok(Self {
            api_key: api_key.to_string(),
            schedule_name: schedule_name.to_string(),
            month_start: parse_month_start(month_start)?,
            holidays,
            api_url: default_api_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }
}
