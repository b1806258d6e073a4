use crate::lot::TimeUnit;
use crate::types::{Money, SlotNumber, Timestamp, Units, DEFAULT_COLOR};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// A car is identified by its registration number and color together.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Vehicle {
    pub registration: String,
    pub color: String,
}
impl Vehicle {
    pub fn new(registration: impl Into<String>) -> Self {
        Self::with_color(registration, DEFAULT_COLOR)
    }

    pub fn with_color(registration: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            registration: registration.into(),
            color: color.into(),
        }
    }
}
impl Display for Vehicle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.registration, self.color)
    }
}

/// Whole `unit`s between two timestamps, rounded up.
pub(crate) fn elapsed_units(from: Timestamp, to: Timestamp, unit: TimeUnit) -> Units {
    let elapsed = to.saturating_sub(from).max(0) as u64;
    elapsed.div_ceil(unit.millis())
}

/// One parking session. A vehicle that comes back after leaving gets a new ticket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub id: Uuid,
    pub slot: SlotNumber,
    pub vehicle: Vehicle,
    pub parked_at: Timestamp,
    pub left_at: Option<Timestamp>,
    pub charges: Money,
}
impl Ticket {
    pub(crate) fn new(slot: SlotNumber, vehicle: Vehicle, parked_at: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            slot,
            vehicle,
            parked_at,
            left_at: None,
            charges: 0,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.left_at.is_some()
    }

    /// Whole units parked, rounded up. Zero while the session is still open.
    pub fn duration_in(&self, unit: TimeUnit) -> Units {
        self.left_at
            .map_or(0, |left_at| elapsed_units(self.parked_at, left_at, unit))
    }

    /// An already recorded exit time is kept.
    pub(crate) fn close(&mut self, left_at: Timestamp, charges: Money) {
        self.left_at.get_or_insert(left_at);
        self.charges = charges;
    }
}
