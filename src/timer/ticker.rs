use std::time::{Duration, Instant};

const PERIOD: Duration = Duration::from_secs(1);

/// A cancellable one-second repeating deadline.
///
/// The event loop calls [`Ticker::due`] on every frame; it reports how many
/// whole periods have elapsed since the last call and moves the deadline
/// forward by that many periods, so slow frames never lose seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ticker {
    next: Option<Instant>,
}

impl Ticker {
    /// Schedule the first tick one period after `now`
    pub fn arm(&mut self, now: Instant) {
        self.next = Some(now + PERIOD);
    }

    /// Drop the pending deadline; no ticks are reported until re-armed
    pub fn cancel(&mut self) {
        self.next = None;
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    /// Number of periods that fell due at or before `now`
    pub fn due(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next else {
            return 0;
        };

        let mut count = 0;
        while next <= now {
            count += 1;
            next += PERIOD;
        }
        self.next = Some(next);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unarmed_ticker_never_fires() {
        let mut ticker = Ticker::default();
        assert_eq!(ticker.due(Instant::now() + Duration::from_secs(10)), 0);
    }

    #[test]
    fn test_due_counts_whole_periods() {
        let start = Instant::now();
        let mut ticker = Ticker::default();
        ticker.arm(start);

        assert_eq!(ticker.due(start + Duration::from_millis(900)), 0);
        assert_eq!(ticker.due(start + Duration::from_millis(1000)), 1);
        assert_eq!(ticker.due(start + Duration::from_millis(3500)), 2);
        assert_eq!(ticker.due(start + Duration::from_millis(3900)), 0);
        assert_eq!(ticker.due(start + Duration::from_millis(4000)), 1);
    }

    #[test]
    fn test_cancel_stops_ticks() {
        let start = Instant::now();
        let mut ticker = Ticker::default();
        ticker.arm(start);
        ticker.cancel();
        assert!(!ticker.is_armed());
        assert_eq!(ticker.due(start + Duration::from_secs(5)), 0);
    }
}
