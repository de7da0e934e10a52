// Allocation engine: the facility-level park/exit protocol
//
// Ordering on exit: the ticket is retired before its spot is released, so a spot
// never becomes free while a live ticket still points at it.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::{
    clock::{Clock, SystemClock},
    config::FacilityConfig,
    error::{ConfigError, ParkingError, Result},
    fare::{Fare, FareCalculator},
    floor_set::{FloorSet, SpotLocation},
    ticket_ledger::{Ticket, TicketId, TicketLedger},
    vehicle::{Vehicle, VehicleClass},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExitReceipt {
    pub ticket: Ticket,
    pub exit_time: DateTime<Utc>,
    pub fare: Fare,
}

impl ExitReceipt {
    pub fn location(&self) -> SpotLocation {
        self.ticket.location()
    }
}

// Snapshot of facility counters
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct FacilityStats {
    pub parked: usize,
    pub exited: usize,
    pub rejected: usize,
    pub unknown_ticket: usize,
    pub active: usize,
    pub revenue: f64,
}

#[derive(Debug, Default)]
struct Counters {
    parked: AtomicUsize,
    exited: AtomicUsize,
    rejected: AtomicUsize,
    unknown_ticket: AtomicUsize,
    revenue: Mutex<f64>,
}

pub struct ParkingFacility {
    config: FacilityConfig,
    floors: FloorSet,
    ledger: TicketLedger,
    fares: FareCalculator,
    clock: Arc<dyn Clock>,
    counters: Counters,
}

impl ParkingFacility {
    pub fn new(config: FacilityConfig) -> std::result::Result<Self, ConfigError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: FacilityConfig,
        clock: Arc<dyn Clock>,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;

        let floors = FloorSet::new(&config);
        debug!(
            floors = config.floor_count,
            two_wheeler = floors.capacity(VehicleClass::TwoWheeler),
            three_wheeler = floors.capacity(VehicleClass::ThreeWheeler),
            four_wheeler = floors.capacity(VehicleClass::FourWheeler),
            hourly_rate = config.hourly_rate,
            "facility created"
        );

        Ok(Self {
            fares: FareCalculator::new(config.hourly_rate),
            config,
            floors,
            ledger: TicketLedger::new(),
            clock,
            counters: Counters::default(),
        })
    }

    // Parks `vehicle` in the first free spot of its class, stamping entry with the
    // facility clock.
    pub fn park(&self, vehicle: Vehicle) -> Result<Ticket> {
        let entry_time = self.clock.now();
        self.park_at(vehicle, entry_time)
    }

    // Same as `park` with an explicit entry timestamp.
    pub fn park_at(&self, vehicle: Vehicle, entry_time: DateTime<Utc>) -> Result<Ticket> {
        let location = match self.floors.allocate(&vehicle) {
            Ok(location) => location,
            Err(err) => {
                // Only capacity misses are rejections; anything else is a registry defect
                if let ParkingError::NoSpotAvailable(_) = err {
                    self.counters.rejected.fetch_add(1, Ordering::SeqCst);
                }
                warn!(
                    plate = vehicle.license_plate(),
                    class = %vehicle.class(),
                    error = %err,
                    "park rejected"
                );
                return Err(err);
            }
        };

        let ticket = self.ledger.issue(&vehicle, entry_time, location);
        self.counters.parked.fetch_add(1, Ordering::SeqCst);

        info!(
            ticket_id = %ticket.ticket_id(),
            plate = ticket.license_plate(),
            class = %ticket.vehicle_class(),
            floor_id = location.floor_id,
            spot_number = location.spot_number,
            "vehicle parked"
        );

        Ok(ticket)
    }

    // Retires the ticket, bills the stay up to `exit_time` and frees the spot.
    // A ticket that was never issued or has already exited yields `UnknownTicket`
    // and touches no spot. An `exit_time` before the entry time is rejected with
    // `NegativeDuration` while the ticket stays live.
    pub fn exit(&self, ticket_id: &TicketId, exit_time: DateTime<Utc>) -> Result<ExitReceipt> {
        let pending = self
            .ledger
            .resolve(ticket_id)
            .map_err(|err| self.unknown_ticket(ticket_id, err))?;

        if let Err(err) = self.fares.compute(pending.entry_time(), exit_time) {
            warn!(ticket_id = %ticket_id, error = %err, "exit rejected");
            return Err(err);
        }

        // A concurrent exit may have retired it since the resolve above
        let ticket = self
            .ledger
            .retire(ticket_id)
            .map_err(|err| self.unknown_ticket(ticket_id, err))?;
        let fare = self.fares.compute(ticket.entry_time(), exit_time)?;

        if let Err(err) = self.floors.free(ticket.location()) {
            error!(
                ticket_id = %ticket_id,
                location = %ticket.location(),
                error = %err,
                "retired ticket addressed a spot that could not be released"
            );
            debug_assert!(false, "spot release failed for retired ticket: {err}");
            return Err(err);
        }

        self.counters.exited.fetch_add(1, Ordering::SeqCst);
        *self.counters.revenue.lock() += fare.amount;

        info!(
            ticket_id = %ticket_id,
            location = %ticket.location(),
            billed_hours = fare.billed_hours,
            amount = fare.amount,
            "vehicle exited"
        );

        Ok(ExitReceipt {
            ticket,
            exit_time,
            fare,
        })
    }

    pub fn exit_now(&self, ticket_id: &TicketId) -> Result<ExitReceipt> {
        let exit_time = self.clock.now();
        self.exit(ticket_id, exit_time)
    }

    pub fn resolve(&self, ticket_id: &TicketId) -> Result<Ticket> {
        self.ledger.resolve(ticket_id)
    }

    pub fn tickets_for_plate(&self, license_plate: &str) -> Vec<Ticket> {
        self.ledger.tickets_for_plate(license_plate)
    }

    pub fn active_tickets(&self) -> Vec<Ticket> {
        self.ledger.active()
    }

    pub fn available(&self, class: VehicleClass) -> usize {
        self.floors.available(class)
    }

    pub fn capacity(&self, class: VehicleClass) -> usize {
        self.floors.capacity(class)
    }

    pub fn floors(&self) -> &FloorSet {
        &self.floors
    }

    pub fn config(&self) -> &FacilityConfig {
        &self.config
    }

    pub fn stats(&self) -> FacilityStats {
        FacilityStats {
            parked: self.counters.parked.load(Ordering::SeqCst),
            exited: self.counters.exited.load(Ordering::SeqCst),
            rejected: self.counters.rejected.load(Ordering::SeqCst),
            unknown_ticket: self.counters.unknown_ticket.load(Ordering::SeqCst),
            active: self.ledger.len(),
            revenue: *self.counters.revenue.lock(),
        }
    }

    fn unknown_ticket(&self, ticket_id: &TicketId, err: ParkingError) -> ParkingError {
        self.counters.unknown_ticket.fetch_add(1, Ordering::SeqCst);
        warn!(ticket_id = %ticket_id, "exit with unknown ticket");
        err
    }
}

// Builds a facility with `floor_count` identical floors at the default hourly rate
pub fn create_facility(
    floor_count: u32,
    two_wheeler_spots: usize,
    three_wheeler_spots: usize,
    four_wheeler_spots: usize,
) -> std::result::Result<ParkingFacility, ConfigError> {
    ParkingFacility::new(FacilityConfig::new(
        floor_count,
        two_wheeler_spots,
        three_wheeler_spots,
        four_wheeler_spots,
    ))
}
