// Duration-based fare: every started hour is billed in full

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    config::DEFAULT_HOURLY_RATE,
    error::{ParkingError, Result},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fare {
    pub billed_hours: i64,
    pub hourly_rate: f64,
    pub amount: f64,
    pub parked_millis: i64,
}

impl Fare {
    pub fn parked_for(&self) -> Duration {
        Duration::milliseconds(self.parked_millis)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FareCalculator {
    hourly_rate: f64,
}

impl Default for FareCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_HOURLY_RATE)
    }
}

impl FareCalculator {
    pub fn new(hourly_rate: f64) -> Self {
        Self { hourly_rate }
    }

    pub fn hourly_rate(&self) -> f64 {
        self.hourly_rate
    }

    pub fn compute(&self, entry_time: DateTime<Utc>, exit_time: DateTime<Utc>) -> Result<Fare> {
        compute_fare(entry_time, exit_time, self.hourly_rate)
    }
}

pub fn billed_hours(parked: Duration) -> Result<i64> {
    let millis = parked.num_milliseconds();
    if millis < 0 {
        return Err(ParkingError::NegativeDuration { millis: -millis });
    }

    // Whole minutes, rounded up to started hours
    let minutes = parked.num_minutes();
    let hours = minutes / 60 + i64::from(minutes % 60 != 0);

    // A stay shorter than a minute still started an hour
    if hours == 0 && millis > 0 {
        return Ok(1);
    }
    Ok(hours)
}

pub fn compute_fare(
    entry_time: DateTime<Utc>,
    exit_time: DateTime<Utc>,
    hourly_rate: f64,
) -> Result<Fare> {
    let parked = exit_time - entry_time;
    let billed_hours = billed_hours(parked)?;

    Ok(Fare {
        billed_hours,
        hourly_rate,
        amount: billed_hours as f64 * hourly_rate,
        parked_millis: parked.num_milliseconds(),
    })
}
