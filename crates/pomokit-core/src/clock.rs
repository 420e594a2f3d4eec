//! Source of "today" for the day-bucketed bookkeeping.
//!
//! Log dates and streak continuity are local calendar days, so everything
//! that needs the current day asks a [`Clock`] instead of calling chrono
//! directly. Tests swap in a [`FixedClock`].

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Days, Local, NaiveDate, Utc};

pub trait Clock {
    /// Today's local calendar date.
    fn today(&self) -> NaiveDate;

    /// Current instant, used for event and task timestamps.
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Wall clock in the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A settable date. Clones share the same date, so a test can keep one
/// handle and move another into the app.
#[derive(Debug, Clone)]
pub struct FixedClock {
    date: Rc<Cell<NaiveDate>>,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Rc::new(Cell::new(date)),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        self.date.set(date);
    }

    pub fn advance_days(&self, days: u64) {
        let next = self
            .date
            .get()
            .checked_add_days(Days::new(days))
            .unwrap_or(NaiveDate::MAX);
        self.date.set(next);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_clones_share_date() {
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
        let handle = clock.clone();
        handle.advance_days(2);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }
}
