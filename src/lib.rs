// Multi-floor parking facility: spot allocation, ticketing and fares

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod fare;
pub mod floor_set;
pub mod spot_registry;
pub mod ticket_ledger;
pub mod vehicle;

// Re-export key types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{FacilityConfig, DEFAULT_HOURLY_RATE};
pub use engine::{create_facility, ExitReceipt, FacilityStats, ParkingFacility};
pub use error::{ConfigError, ParkingError, RegistryError, Result, VehicleError};
pub use fare::{compute_fare, Fare, FareCalculator};
pub use floor_set::{FloorSet, SpotLocation};
pub use spot_registry::{Occupancy, Spot, SpotRegistry};
pub use ticket_ledger::{Ticket, TicketId, TicketLedger};
pub use vehicle::{Vehicle, VehicleClass};
