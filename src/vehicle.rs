use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::VehicleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleClass {
    TwoWheeler,
    ThreeWheeler,
    FourWheeler,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 3] = [
        VehicleClass::TwoWheeler,
        VehicleClass::ThreeWheeler,
        VehicleClass::FourWheeler,
    ];

    // Position in per-class arrays; also the order spot blocks are laid out on a floor
    pub fn index(self) -> usize {
        match self {
            VehicleClass::TwoWheeler => 0,
            VehicleClass::ThreeWheeler => 1,
            VehicleClass::FourWheeler => 2,
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleClass::TwoWheeler => write!(f, "2-wheeler"),
            VehicleClass::ThreeWheeler => write!(f, "3-wheeler"),
            VehicleClass::FourWheeler => write!(f, "4-wheeler"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    license_plate: String,
    class: VehicleClass,
}

impl Vehicle {
    pub fn new(license_plate: impl Into<String>, class: VehicleClass) -> Result<Self, VehicleError> {
        let license_plate = license_plate.into();
        if license_plate.trim().is_empty() {
            return Err(VehicleError::EmptyLicensePlate);
        }

        Ok(Self {
            license_plate,
            class,
        })
    }

    pub fn car(license_plate: impl Into<String>) -> Result<Self, VehicleError> {
        Self::new(license_plate, VehicleClass::FourWheeler)
    }

    pub fn scooter(license_plate: impl Into<String>) -> Result<Self, VehicleError> {
        Self::new(license_plate, VehicleClass::TwoWheeler)
    }

    pub fn auto(license_plate: impl Into<String>) -> Result<Self, VehicleError> {
        Self::new(license_plate, VehicleClass::ThreeWheeler)
    }

    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    pub fn class(&self) -> VehicleClass {
        self.class
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factories_tag_class() {
        assert_eq!(Vehicle::car("KA01B5678").unwrap().class(), VehicleClass::FourWheeler);
        assert_eq!(Vehicle::scooter("MH12A1234").unwrap().class(), VehicleClass::TwoWheeler);
        assert_eq!(Vehicle::auto("DL02C9012").unwrap().class(), VehicleClass::ThreeWheeler);
    }

    #[test]
    fn test_empty_plate_rejected() {
        assert_eq!(Vehicle::car(""), Err(VehicleError::EmptyLicensePlate));
        assert_eq!(Vehicle::car("   "), Err(VehicleError::EmptyLicensePlate));
    }

    #[test]
    fn test_class_serde_names() {
        let json = serde_json::to_string(&VehicleClass::ThreeWheeler).unwrap();
        assert_eq!(json, "\"three_wheeler\"");
        let back: VehicleClass = serde_json::from_str(&json).unwrap();
        assert_eq!(back, VehicleClass::ThreeWheeler);
    }

    #[test]
    fn test_class_index_is_dense() {
        for (i, class) in VehicleClass::ALL.iter().enumerate() {
            assert_eq!(class.index(), i);
        }
    }
}
