use thiserror::Error;

use crate::vehicle::VehicleClass;

pub type Result<T> = std::result::Result<T, ParkingError>;

// Spot state transitions on a single floor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("spot {spot_number} does not exist on floor {floor_id}")]
    NotFound { floor_id: u32, spot_number: u32 },

    #[error("spot {spot_number} on floor {floor_id} is already occupied")]
    AlreadyOccupied { floor_id: u32, spot_number: u32 },

    #[error("spot {spot_number} on floor {floor_id} is not occupied")]
    NotOccupied { floor_id: u32, spot_number: u32 },

    #[error("spot {spot_number} on floor {floor_id} takes {spot_class}, not {vehicle_class}")]
    ClassMismatch {
        floor_id: u32,
        spot_number: u32,
        spot_class: VehicleClass,
        vehicle_class: VehicleClass,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParkingError {
    #[error("no {0} spot available")]
    NoSpotAvailable(VehicleClass),

    #[error("unknown ticket: {0}")]
    UnknownTicket(String),

    #[error("invalid location F{floor_id}-S{spot_number}: {reason}")]
    InvalidLocation {
        floor_id: u32,
        spot_number: u32,
        reason: String,
    },

    #[error("exit time precedes entry time by {millis}ms")]
    NegativeDuration { millis: i64 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VehicleError {
    #[error("license plate must not be empty")]
    EmptyLicensePlate,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("facility needs at least one floor")]
    NoFloors,

    #[error("hourly rate must be a finite, non-negative amount, got {0}")]
    InvalidHourlyRate(f64),

    #[error("too many spots per floor: {0}")]
    TooManySpots(usize),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<RegistryError> for ParkingError {
    fn from(value: RegistryError) -> Self {
        match value {
            RegistryError::NotFound {
                floor_id,
                spot_number,
            } => ParkingError::InvalidLocation {
                floor_id,
                spot_number,
                reason: "no such spot".to_string(),
            },
            RegistryError::AlreadyOccupied {
                floor_id,
                spot_number,
            } => ParkingError::InvalidLocation {
                floor_id,
                spot_number,
                reason: "spot already occupied".to_string(),
            },
            RegistryError::NotOccupied {
                floor_id,
                spot_number,
            } => ParkingError::InvalidLocation {
                floor_id,
                spot_number,
                reason: "spot not occupied".to_string(),
            },
            RegistryError::ClassMismatch {
                floor_id,
                spot_number,
                spot_class,
                vehicle_class,
            } => ParkingError::InvalidLocation {
                floor_id,
                spot_number,
                reason: format!("{spot_class} spot cannot hold a {vehicle_class}"),
            },
        }
    }
}
