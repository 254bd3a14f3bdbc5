//! Calendar date source for operations that default to "today"

use chrono::{Local, NaiveDate};
use std::sync::{Arc, RwLock};

/// Source of the current local calendar date
///
/// Flip and rotate triggers that carry no explicit date resolve "today"
/// through this trait, so tests can pin the date.
pub trait Clock: Send + Sync {
    /// Today's date in the host's local time zone
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system's local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a controllable date, for tests
#[derive(Debug, Clone)]
pub struct FixedClock {
    current: Arc<RwLock<NaiveDate>>,
}

impl FixedClock {
    /// Create a clock pinned to a specific date
    pub fn at(date: NaiveDate) -> Self {
        Self {
            current: Arc::new(RwLock::new(date)),
        }
    }

    /// Move the clock to a new date
    pub fn set(&self, date: NaiveDate) {
        *self.current.write().expect("clock lock poisoned") = date;
    }

    /// Advance the clock by whole days
    pub fn advance_days(&self, days: i64) {
        let mut current = self.current.write().expect("clock lock poisoned");
        *current += chrono::Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.current.read().expect("clock lock poisoned")
    }
}
