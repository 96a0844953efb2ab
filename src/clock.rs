//! Clock abstraction
//!
//! The build has two wall-clock inputs: the feed build timestamp and the
//! default date for records without one. Both go through this trait so
//! tests can supply a fixed instant.

use chrono::{DateTime, Local};

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// The real wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock pinned to a single instant, for deterministic tests.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Local>);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

#[cfg(test)]
pub fn fixed(datetime: &str) -> FixedClock {
    use chrono::NaiveDateTime;
    let naive = NaiveDateTime::parse_from_str(datetime, "%Y-%m-%d %H:%M:%S").unwrap();
    FixedClock(
        naive
            .and_local_timezone(Local)
            .single()
            .expect("unambiguous local time"),
    )
}
