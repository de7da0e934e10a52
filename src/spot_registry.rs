// Spot registry for a single floor
// Spots are numbered from 1 in class-grouped blocks: two-wheelers, then three-wheelers,
// then four-wheelers. Membership never changes after construction; only occupancy does.

use parking_lot::RwLock;

use crate::{
    error::RegistryError,
    vehicle::{Vehicle, VehicleClass},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Occupancy {
    Free,
    Occupied(Vehicle),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spot {
    floor_id: u32,
    spot_number: u32,
    class: VehicleClass,
    occupancy: Occupancy,
}

impl Spot {
    pub fn floor_id(&self) -> u32 {
        self.floor_id
    }

    pub fn spot_number(&self) -> u32 {
        self.spot_number
    }

    pub fn class(&self) -> VehicleClass {
        self.class
    }

    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    pub fn is_free(&self) -> bool {
        matches!(self.occupancy, Occupancy::Free)
    }
}

#[derive(Debug)]
pub struct SpotRegistry {
    floor_id: u32,
    capacity: [usize; 3],
    spots: RwLock<Vec<Spot>>,
}

impl SpotRegistry {
    pub fn new(
        floor_id: u32,
        two_wheeler_spots: usize,
        three_wheeler_spots: usize,
        four_wheeler_spots: usize,
    ) -> Self {
        let capacity = [two_wheeler_spots, three_wheeler_spots, four_wheeler_spots];
        let mut spots = Vec::with_capacity(capacity.iter().sum());

        let mut spot_number = 1;
        for class in VehicleClass::ALL {
            for _ in 0..capacity[class.index()] {
                spots.push(Spot {
                    floor_id,
                    spot_number,
                    class,
                    occupancy: Occupancy::Free,
                });
                spot_number += 1;
            }
        }

        Self {
            floor_id,
            capacity,
            spots: RwLock::new(spots),
        }
    }

    pub fn floor_id(&self) -> u32 {
        self.floor_id
    }

    pub fn capacity(&self, class: VehicleClass) -> usize {
        self.capacity[class.index()]
    }

    pub fn len(&self) -> usize {
        self.capacity.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Read-only probe: first free spot of the class in spot-number order
    pub fn find_free(&self, class: VehicleClass) -> Option<u32> {
        if self.capacity(class) == 0 {
            return None;
        }

        self.spots
            .read()
            .iter()
            .find(|spot| spot.class == class && spot.is_free())
            .map(|spot| spot.spot_number)
    }

    // Conditional Free -> Occupied transition
    pub fn occupy(&self, spot_number: u32, vehicle: Vehicle) -> Result<(), RegistryError> {
        let mut spots = self.spots.write();
        let spot = Self::slot_mut(&mut spots, self.floor_id, spot_number)?;

        if spot.class != vehicle.class() {
            return Err(RegistryError::ClassMismatch {
                floor_id: self.floor_id,
                spot_number,
                spot_class: spot.class,
                vehicle_class: vehicle.class(),
            });
        }

        match spot.occupancy {
            Occupancy::Free => {
                spot.occupancy = Occupancy::Occupied(vehicle);
                Ok(())
            }
            Occupancy::Occupied(_) => Err(RegistryError::AlreadyOccupied {
                floor_id: self.floor_id,
                spot_number,
            }),
        }
    }

    // Conditional Occupied -> Free transition
    pub fn release(&self, spot_number: u32) -> Result<(), RegistryError> {
        let mut spots = self.spots.write();
        let spot = Self::slot_mut(&mut spots, self.floor_id, spot_number)?;

        match spot.occupancy {
            Occupancy::Occupied(_) => {
                spot.occupancy = Occupancy::Free;
                Ok(())
            }
            Occupancy::Free => Err(RegistryError::NotOccupied {
                floor_id: self.floor_id,
                spot_number,
            }),
        }
    }

    pub fn free_count(&self, class: VehicleClass) -> usize {
        if self.capacity(class) == 0 {
            return 0;
        }

        self.spots
            .read()
            .iter()
            .filter(|spot| spot.class == class && spot.is_free())
            .count()
    }

    pub fn spot(&self, spot_number: u32) -> Option<Spot> {
        let index = (spot_number as usize).checked_sub(1)?;
        self.spots.read().get(index).cloned()
    }

    pub fn occupant(&self, spot_number: u32) -> Option<Vehicle> {
        match self.spot(spot_number)?.occupancy {
            Occupancy::Occupied(vehicle) => Some(vehicle),
            Occupancy::Free => None,
        }
    }

    fn slot_mut<'a>(
        spots: &'a mut [Spot],
        floor_id: u32,
        spot_number: u32,
    ) -> Result<&'a mut Spot, RegistryError> {
        (spot_number as usize)
            .checked_sub(1)
            .and_then(|index| spots.get_mut(index))
            .ok_or(RegistryError::NotFound {
                floor_id,
                spot_number,
            })
    }
}
