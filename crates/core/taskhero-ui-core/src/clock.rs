//! Calendar source for due-date checks

use chrono::NaiveDate;

/// Supplies the user's current local date
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Clock pinned to a single date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
