use std::fmt;

use chrono::{DateTime, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ParkingError, Result},
    floor_set::SpotLocation,
    vehicle::{Vehicle, VehicleClass},
};

// Opaque 128-bit random token rendered as 32 lowercase hex digits
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    fn generate() -> Self {
        Self(format!("{:032x}", rand::random::<u128>()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TicketId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TicketId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    ticket_id: TicketId,
    license_plate: String,
    vehicle_class: VehicleClass,
    entry_time: DateTime<Utc>,
    location: SpotLocation,
}

impl Ticket {
    pub fn ticket_id(&self) -> &TicketId {
        &self.ticket_id
    }

    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    pub fn vehicle_class(&self) -> VehicleClass {
        self.vehicle_class
    }

    pub fn entry_time(&self) -> DateTime<Utc> {
        self.entry_time
    }

    pub fn location(&self) -> SpotLocation {
        self.location
    }

    pub fn floor_id(&self) -> u32 {
        self.location.floor_id
    }

    pub fn spot_number(&self) -> u32 {
        self.location.spot_number
    }
}

// Live tickets keyed by id. A ticket is present from `issue` until `retire`.
#[derive(Debug, Default)]
pub struct TicketLedger {
    records: DashMap<TicketId, Ticket>,
}

impl TicketLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(
        &self,
        vehicle: &Vehicle,
        entry_time: DateTime<Utc>,
        location: SpotLocation,
    ) -> Ticket {
        loop {
            let ticket_id = TicketId::generate();

            // A collision is astronomically unlikely, but a live id must never be reissued
            if let Entry::Vacant(slot) = self.records.entry(ticket_id.clone()) {
                let ticket = Ticket {
                    ticket_id,
                    license_plate: vehicle.license_plate().to_string(),
                    vehicle_class: vehicle.class(),
                    entry_time,
                    location,
                };
                slot.insert(ticket.clone());
                return ticket;
            }
        }
    }

    pub fn resolve(&self, ticket_id: &TicketId) -> Result<Ticket> {
        self.records
            .get(ticket_id)
            .map(|record| record.value().clone())
            .ok_or_else(|| ParkingError::UnknownTicket(ticket_id.to_string()))
    }

    // Lookup and removal happen under one shard lock, so each id retires at most once
    pub fn retire(&self, ticket_id: &TicketId) -> Result<Ticket> {
        self.records
            .remove(ticket_id)
            .map(|(_, ticket)| ticket)
            .ok_or_else(|| ParkingError::UnknownTicket(ticket_id.to_string()))
    }

    pub fn tickets_for_plate(&self, license_plate: &str) -> Vec<Ticket> {
        let mut tickets: Vec<Ticket> = self
            .records
            .iter()
            .filter(|record| record.license_plate == license_plate)
            .map(|record| record.value().clone())
            .collect();
        tickets.sort_by_key(|ticket| ticket.entry_time);
        tickets
    }

    pub fn active(&self) -> Vec<Ticket> {
        self.records
            .iter()
            .map(|record| record.value().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
