use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::{
    config::FacilityConfig,
    error::{ParkingError, RegistryError, Result},
    spot_registry::SpotRegistry,
    vehicle::{Vehicle, VehicleClass},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpotLocation {
    pub floor_id: u32,
    pub spot_number: u32,
}

impl SpotLocation {
    pub fn new(floor_id: u32, spot_number: u32) -> Self {
        Self {
            floor_id,
            spot_number,
        }
    }
}

impl fmt::Display for SpotLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}-S{}", self.floor_id, self.spot_number)
    }
}

// Floors in allocation-preference order (ascending floor id, starting at 1).
#[derive(Debug)]
pub struct FloorSet {
    floors: Vec<SpotRegistry>,
    capacity: [usize; 3],
}

impl FloorSet {
    pub fn new(config: &FacilityConfig) -> Self {
        let floors: Vec<SpotRegistry> = (1..=config.floor_count)
            .map(|floor_id| {
                SpotRegistry::new(
                    floor_id,
                    config.two_wheeler_spots,
                    config.three_wheeler_spots,
                    config.four_wheeler_spots,
                )
            })
            .collect();

        let mut capacity = [0; 3];
        for class in VehicleClass::ALL {
            capacity[class.index()] = floors.iter().map(|floor| floor.capacity(class)).sum();
        }

        Self { floors, capacity }
    }

    // Claims the first free spot of the vehicle's class, scanning floors in order.
    // Losing a race for a spot (another caller occupied it between the probe and the
    // claim) re-probes the same floor instead of failing, so a request only gets
    // `NoSpotAvailable` once every floor has been observed full for its class.
    pub fn allocate(&self, vehicle: &Vehicle) -> Result<SpotLocation> {
        let class = vehicle.class();
        if self.capacity(class) == 0 {
            return Err(ParkingError::NoSpotAvailable(class));
        }

        for floor in &self.floors {
            while let Some(spot_number) = floor.find_free(class) {
                match floor.occupy(spot_number, vehicle.clone()) {
                    Ok(()) => return Ok(SpotLocation::new(floor.floor_id(), spot_number)),
                    Err(RegistryError::AlreadyOccupied { .. }) => {
                        debug!(
                            floor_id = floor.floor_id(),
                            spot_number, "lost race for spot, rescanning"
                        );
                    }
                    Err(err) => {
                        error!(error = %err, "spot registry returned an inconsistent probe");
                        debug_assert!(false, "inconsistent spot registry: {err}");
                        return Err(err.into());
                    }
                }
            }
        }

        Err(ParkingError::NoSpotAvailable(class))
    }

    pub fn free(&self, location: SpotLocation) -> Result<()> {
        let floor = self
            .floor(location.floor_id)
            .ok_or_else(|| ParkingError::InvalidLocation {
                floor_id: location.floor_id,
                spot_number: location.spot_number,
                reason: "no such floor".to_string(),
            })?;

        floor.release(location.spot_number)?;
        Ok(())
    }

    pub fn floor(&self, floor_id: u32) -> Option<&SpotRegistry> {
        let index = (floor_id as usize).checked_sub(1)?;
        self.floors.get(index)
    }

    pub fn floors(&self) -> impl Iterator<Item = &SpotRegistry> {
        self.floors.iter()
    }

    pub fn capacity(&self, class: VehicleClass) -> usize {
        self.capacity[class.index()]
    }

    // Free spots of a class across all floors; a snapshot, not a reservation
    pub fn available(&self, class: VehicleClass) -> usize {
        self.floors.iter().map(|floor| floor.free_count(class)).sum()
    }
}
