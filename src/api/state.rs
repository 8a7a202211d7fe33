//! Application state for the on-call report API.

use std::sync::Arc;

use crate::config::HolidaySet;

/// Shared application state.
///
/// Holds the holiday set applied to requests that do not bring their own.
#[derive(Clone)]
pub struct AppState {
    holidays: Arc<HolidaySet>,
}

impl AppState {
    /// Creates a new application state with the given default holidays.
    pub fn new(holidays: HolidaySet) -> Self {
        Self {
            holidays: Arc::new(holidays),
        }
    }

    /// Returns the default holiday set.
    pub fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }
}
