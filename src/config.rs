use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, vehicle::VehicleClass};

pub const DEFAULT_HOURLY_RATE: f64 = 15.0;

// Facility configuration options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacilityConfig {
    pub floor_count: u32,
    pub two_wheeler_spots: usize,
    pub three_wheeler_spots: usize,
    pub four_wheeler_spots: usize,
    pub hourly_rate: f64,
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            floor_count: 2,
            two_wheeler_spots: 5,
            three_wheeler_spots: 3,
            four_wheeler_spots: 4,
            hourly_rate: DEFAULT_HOURLY_RATE,
        }
    }
}

impl FacilityConfig {
    pub fn new(
        floor_count: u32,
        two_wheeler_spots: usize,
        three_wheeler_spots: usize,
        four_wheeler_spots: usize,
    ) -> Self {
        Self {
            floor_count,
            two_wheeler_spots,
            three_wheeler_spots,
            four_wheeler_spots,
            hourly_rate: DEFAULT_HOURLY_RATE,
        }
    }

    pub fn with_hourly_rate(mut self, hourly_rate: f64) -> Self {
        self.hourly_rate = hourly_rate;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: FacilityConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    // Per-floor spot count for a class
    pub fn spots_per_floor(&self, class: VehicleClass) -> usize {
        match class {
            VehicleClass::TwoWheeler => self.two_wheeler_spots,
            VehicleClass::ThreeWheeler => self.three_wheeler_spots,
            VehicleClass::FourWheeler => self.four_wheeler_spots,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.floor_count == 0 {
            return Err(ConfigError::NoFloors);
        }

        if !self.hourly_rate.is_finite() || self.hourly_rate < 0.0 {
            return Err(ConfigError::InvalidHourlyRate(self.hourly_rate));
        }

        // Spot numbers are u32 and 1-based
        let per_floor = self
            .two_wheeler_spots
            .saturating_add(self.three_wheeler_spots)
            .saturating_add(self.four_wheeler_spots);
        if per_floor > u32::MAX as usize {
            return Err(ConfigError::TooManySpots(per_floor));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = FacilityConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.hourly_rate, 15.0);
        assert_eq!(config.spots_per_floor(VehicleClass::ThreeWheeler), 3);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            FacilityConfig::new(0, 1, 1, 1).validate(),
            Err(ConfigError::NoFloors)
        ));
        assert!(matches!(
            FacilityConfig::new(1, 1, 1, 1)
                .with_hourly_rate(-1.0)
                .validate(),
            Err(ConfigError::InvalidHourlyRate(_))
        ));
        assert!(matches!(
            FacilityConfig::new(1, 1, 1, 1)
                .with_hourly_rate(f64::NAN)
                .validate(),
            Err(ConfigError::InvalidHourlyRate(_))
        ));
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config =
            FacilityConfig::from_json_str(r#"{"floor_count": 3, "hourly_rate": 20.0}"#).unwrap();
        assert_eq!(config.floor_count, 3);
        assert_eq!(config.hourly_rate, 20.0);
        assert_eq!(config.two_wheeler_spots, 5);

        assert!(matches!(
            FacilityConfig::from_json_str("{not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            FacilityConfig::from_json_str(r#"{"floor_count": 0}"#),
            Err(ConfigError::NoFloors)
        ));
    }
}
