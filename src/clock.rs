// Time sources for entry timestamps

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(start),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.write() = at;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write();
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_manual_clock_advances() {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::minutes(90));
        assert_eq!(clock.now(), start + Duration::minutes(90));

        clock.set(start);
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
