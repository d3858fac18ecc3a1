//! Sources of "now" for time-dependent rules.
//!
//! Check-in windows, expiry and code generation all read the current time
//! through a [`Clock`] owned by the record store, so tests can pin it.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use chrono::{Duration, Local, NaiveDateTime, Timelike};

/// A source of the current local wall-clock time.
pub trait Clock: fmt::Debug {
    /// Returns the current local time.
    fn now(&self) -> NaiveDateTime;
}

/// The system clock, truncated to whole seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// A manually driven clock.
///
/// Clones share the same instant, so a test can keep one handle and hand
/// another to the store.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, NaiveDate};
/// use innkeep::clock::{Clock, ManualClock};
///
/// let start = NaiveDate::from_ymd_opt(2099, 1, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let clock = ManualClock::new(start);
/// let handle = clock.clone();
///
/// handle.advance(Duration::hours(5));
/// assert_eq!(clock.now(), start + Duration::hours(5));
/// ```
#[derive(Clone)]
pub struct ManualClock {
    now: Rc<Cell<NaiveDateTime>>,
}

impl ManualClock {
    /// Creates a clock stopped at `now`.
    #[must_use]
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualClock")
            .field("now", &self.now.get())
            .finish()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}
