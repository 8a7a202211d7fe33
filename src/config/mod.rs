//! Configuration loading and management for report runs.
//!
//! A run needs a timeline credential, a schedule name, a reference month and
//! a holiday set. These come from a YAML file or from CLI arguments.
//!
//! # Example
//!
//! ```no_run
//! use oncall_report::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/report.yaml").unwrap();
//! println!("Reporting on: {}", loader.config().schedule_name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, HolidaySet, ReportConfig, parse_month_start,
};
