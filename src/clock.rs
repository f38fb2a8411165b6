use chrono::{DateTime, Local, NaiveDate};
use std::time::Instant;

/// Trait for abstracting time operations, enabling testability
pub trait Clock: Send + Sync {
    /// Get the current local datetime
    fn now_datetime(&self) -> DateTime<Local>;

    /// Get a monotonic instant for the periodic ticker
    fn instant(&self) -> Instant;

    /// Get the current Unix timestamp in seconds
    fn now_timestamp(&self) -> i64 {
        self.now_datetime().timestamp()
    }

    /// Today's local calendar date
    fn today(&self) -> NaiveDate {
        self.now_datetime().date_naive()
    }
}

/// System clock implementation using real time
#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_datetime(&self) -> DateTime<Local> {
        Local::now()
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }
}

/// A clock frozen at a chosen local time; `advance` moves it forward.
#[cfg(test)]
pub struct FixedClock {
    now: std::sync::Mutex<DateTime<Local>>,
    origin: Instant,
}

#[cfg(test)]
impl FixedClock {
    pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> Self {
        use chrono::TimeZone;
        let now = Local
            .with_ymd_and_hms(year, month, day, hour, min, 0)
            .single()
            .expect("unambiguous local time");
        Self {
            now: std::sync::Mutex::new(now),
            origin: Instant::now(),
        }
    }

    pub fn advance_secs(&self, secs: i64) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::seconds(secs);
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now_datetime(&self) -> DateTime<Local> {
        *self.now.lock().unwrap()
    }

    fn instant(&self) -> Instant {
        self.origin
    }
}
