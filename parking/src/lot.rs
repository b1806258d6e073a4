use crate::error::LotError;
use crate::models::{elapsed_units, Ticket, Vehicle};
use crate::types::{
    Money, SlotNumber, Timestamp, Units, DEFAULT_INITIAL_DURATION, DEFAULT_INITIAL_RATE, DEFAULT_SUBSEQUENT_DURATION,
    DEFAULT_SUBSEQUENT_RATE, EMPTY_SLOT, STATUS_HEADER_REGISTRATION, STATUS_HEADER_SLOT, STATUS_SLOT_COLUMN_WIDTH,
};
use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use tracing::debug;
use uuid::Uuid;

/// The unit parked time is measured and charged in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeUnit {
    #[default]
    Hour,
    Minute,
}
impl TimeUnit {
    pub fn seconds(&self) -> u64 {
        match self {
            Self::Hour => 3600,
            Self::Minute => 60,
        }
    }

    pub fn millis(&self) -> u64 {
        self.seconds() * 1000
    }
}
impl Display for TimeUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Hour => "hour",
                Self::Minute => "minute",
            }
        )
    }
}
impl FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hour" | "hours" => Ok(Self::Hour),
            "minute" | "minutes" => Ok(Self::Minute),
            _ => Err(format!("'{s}' is not a time unit, expected 'hour' or 'minute'")),
        }
    }
}

/// Source of "now" for parking sessions.
pub trait Clock: Debug {
    fn now(&self) -> Timestamp;
}

#[derive(Debug, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Everything about a parking lot that does not change once it has been built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LotConfig {
    pub size: usize,
    pub name: Option<String>,
    pub time_unit: TimeUnit,
    pub initial_duration: Units,
    pub subsequent_duration: Units,
    pub initial_rate: Money,
    pub subsequent_rate: Money,
}
impl Default for LotConfig {
    fn default() -> Self {
        Self::new(0)
    }
}
impl LotConfig {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            name: None,
            time_unit: TimeUnit::Hour,
            initial_duration: DEFAULT_INITIAL_DURATION,
            subsequent_duration: DEFAULT_SUBSEQUENT_DURATION,
            initial_rate: DEFAULT_INITIAL_RATE,
            subsequent_rate: DEFAULT_SUBSEQUENT_RATE,
        }
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_time_unit(mut self, time_unit: TimeUnit) -> Self {
        self.time_unit = time_unit;
        self
    }

    pub fn with_initial_duration(mut self, initial_duration: Units) -> Self {
        self.initial_duration = initial_duration;
        self
    }

    pub fn with_subsequent_duration(mut self, subsequent_duration: Units) -> Self {
        self.subsequent_duration = subsequent_duration;
        self
    }

    pub fn with_initial_rate(mut self, initial_rate: Money) -> Self {
        self.initial_rate = initial_rate;
        self
    }

    pub fn with_subsequent_rate(mut self, subsequent_rate: Money) -> Self {
        self.subsequent_rate = subsequent_rate;
        self
    }

    pub fn build(self) -> ParkingLot {
        self.build_with_clock(Box::new(SystemClock))
    }

    pub fn build_with_clock(self, clock: Box<dyn Clock>) -> ParkingLot {
        ParkingLot::new(self, clock)
    }
}

/// A single parking lot: a row of numbered slots, the open ticket of every parked vehicle, and the fee schedule.
///
/// Slot `n` is stored at index `n - 1`; the lower the number, the nearer the slot is to the entry. Every new vehicle
/// gets the nearest free slot. Slots are only stored once a vehicle has reached them, so `slots` never holds more
/// than the furthest slot used so far.
#[derive(Debug)]
pub struct ParkingLot {
    name: String,
    config: LotConfig,
    slots: Vec<Option<Vehicle>>,
    tickets: HashMap<Vehicle, Ticket>,
    occupied: usize,
    clock: Box<dyn Clock>,
}
impl ParkingLot {
    /// A lot of `size` empty slots with the default fee schedule.
    pub fn create(size: usize) -> Self {
        LotConfig::new(size).build()
    }

    fn new(config: LotConfig, clock: Box<dyn Clock>) -> Self {
        let name = config
            .name
            .clone()
            .unwrap_or_else(|| format!("parking-lot-{}", Uuid::new_v4()));
        Self {
            name,
            slots: Vec::new(),
            tickets: HashMap::new(),
            occupied: 0,
            clock,
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &LotConfig {
        &self.config
    }

    pub fn size(&self) -> usize {
        self.config.size
    }

    pub fn occupied(&self) -> usize {
        self.occupied
    }

    pub fn available(&self) -> usize {
        self.size() - self.occupied
    }

    pub fn is_full(&self) -> bool {
        self.occupied == self.size()
    }

    /// The open ticket of a parked vehicle.
    pub fn ticket_for(&self, vehicle: &Vehicle) -> Option<&Ticket> {
        self.tickets.get(vehicle)
    }

    /// The slot the next vehicle would be given, `None` when the lot is full.
    pub fn nearest_available_slot(&self) -> Option<SlotNumber> {
        match self.slots.iter().position(Option::is_none) {
            Some(index) => Some(index + 1),
            None if self.slots.len() < self.size() => Some(self.slots.len() + 1),
            None => None,
        }
    }

    pub fn park(&mut self, vehicle: Vehicle) -> Result<Ticket, LotError> {
        if self.is_full() {
            return Err(LotError::Full);
        }
        if let Some(ticket) = self.tickets.get(&vehicle) {
            return Err(LotError::AlreadyParked {
                registration: vehicle.registration,
                slot: ticket.slot,
            });
        }
        let Some(slot) = self.nearest_available_slot() else {
            return Err(LotError::Full);
        };

        let ticket = Ticket::new(slot, vehicle.clone(), self.clock.now());
        debug!("{}: ticket {} allocates slot {slot} to {vehicle}", self.name, ticket.id);
        if slot > self.slots.len() {
            self.slots.resize(slot, None);
        }
        self.slots[slot - 1] = Some(vehicle.clone());
        self.tickets.insert(vehicle, ticket.clone());
        self.occupied += 1;
        Ok(ticket)
    }

    /// Closes the vehicle's ticket and frees its slot.
    ///
    /// When `duration` (in the lot's time unit) is not given, the time since parking is used instead, rounded up
    /// to the next whole unit.
    pub fn leave(&mut self, vehicle: &Vehicle, duration: Option<Units>) -> Result<Ticket, LotError> {
        let Some(mut ticket) = self.tickets.remove(vehicle) else {
            return Err(LotError::NotFound {
                registration: vehicle.registration.clone(),
            });
        };

        let unit = self.config.time_unit;
        let (left_at, duration) = match duration {
            Some(duration) => {
                let parked_for = duration.saturating_mul(unit.millis()).min(i64::MAX as u64) as i64;
                (ticket.parked_at.saturating_add(parked_for), duration)
            },
            None => {
                let now = self.clock.now();
                (now, elapsed_units(ticket.parked_at, now, unit))
            },
        };
        let charges = self.fee(duration);
        ticket.close(left_at, charges);

        self.slots[ticket.slot - 1] = None;
        self.occupied -= 1;
        debug!(
            "{}: ticket {} frees slot {} after {duration} {unit}(s), charged {charges}",
            self.name, ticket.id, ticket.slot
        );
        Ok(ticket)
    }

    /// Flat rate up to the initial duration, then the subsequent rate for every unit after it.
    pub fn fee(&self, duration: Units) -> Money {
        let additional = duration.saturating_sub(self.config.initial_duration);
        self.config
            .initial_rate
            .saturating_add(additional.saturating_mul(self.config.subsequent_rate))
    }

    pub fn status(&self, include_empty_slots: bool) -> String {
        let row = |slot: &dyn Display, registration: &str| {
            format!("{slot:<width$}{registration}", width = STATUS_SLOT_COLUMN_WIDTH)
        };
        let mut rows = vec![row(&STATUS_HEADER_SLOT, STATUS_HEADER_REGISTRATION)];
        let last = if include_empty_slots { self.size() } else { self.slots.len() };
        for slot in 1..=last {
            match self.slots.get(slot - 1) {
                Some(Some(vehicle)) => rows.push(row(&slot, &vehicle.registration)),
                _ if include_empty_slots => rows.push(row(&slot, EMPTY_SLOT)),
                _ => (),
            }
        }
        rows.join("\n")
    }
}
