use crate::error::{CommandError, LotError};
use crate::lot::{LotConfig, ParkingLot};
use crate::models::{Ticket, Vehicle};
use crate::types::Units;
use common::ASCII_NEWLINE;
use std::fmt::{Display, Formatter};
use std::io::Write;
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    Create,
    Park,
    Leave,
    Status,
}
impl Verb {
    pub const ALL: [Verb; 4] = [Self::Create, Self::Park, Self::Leave, Self::Status];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Create => "create_parking_lot",
            Self::Park => "park",
            Self::Leave => "leave",
            Self::Status => "status",
        }
    }

    /// One verb per line.
    pub(crate) fn supported() -> String {
        Self::ALL.map(|verb| verb.name()).join("\n")
    }
}
impl Display for Verb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The typed arguments of each verb.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Arguments {
    Create { size: usize },
    Park { vehicle: Vehicle },
    Leave { vehicle: Vehicle, duration: Option<Units> },
    Status { include_empty_slots: bool },
}
impl Arguments {
    pub fn verb(&self) -> Verb {
        match self {
            Self::Create { .. } => Verb::Create,
            Self::Park { .. } => Verb::Park,
            Self::Leave { .. } => Verb::Leave,
            Self::Status { .. } => Verb::Status,
        }
    }
}

/// The raw result of executing a command.
#[derive(Debug)]
pub enum Outcome {
    Created(ParkingLot),
    Parked(Ticket),
    Left(Ticket),
    Status(String),
    Failed(LotError),
}
impl Outcome {
    pub fn render(&self) -> String {
        match self {
            Self::Created(lot) => format!("Created parking lot with {} slots", lot.size()),
            Self::Parked(ticket) => format!("Allocated slot number: {}", ticket.slot),
            Self::Left(ticket) => format!(
                "Registration number {} with Slot Number {} is free with Charge {}",
                ticket.vehicle.registration, ticket.slot, ticket.charges
            ),
            Self::Status(status) => status.clone(),
            Self::Failed(error) => error.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct Execution {
    pub rendered: String,
    pub outcome: Outcome,
}

/// A parsed directive, ready to be bound to a parking lot and executed once.
///
/// `create_parking_lot` needs no lot: it builds one from its [`LotConfig`] instead.
#[derive(Debug)]
pub struct Command<'lot> {
    arguments: Arguments,
    config: LotConfig,
    target: Option<&'lot mut ParkingLot>,
}
impl<'lot> Command<'lot> {
    pub fn new(arguments: Arguments) -> Self {
        Self {
            arguments,
            config: LotConfig::default(),
            target: None,
        }
    }

    pub fn verb(&self) -> Verb {
        self.arguments.verb()
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    /// Fee schedule and name of the lot `create_parking_lot` builds. The size always comes from the command.
    pub fn configure(mut self, config: LotConfig) -> Self {
        self.config = config;
        self
    }

    pub fn bind(mut self, target: &'lot mut ParkingLot) -> Self {
        self.target = Some(target);
        self
    }

    /// Failures of the lot itself (full, already parked, not found) are not errors here: their message becomes the
    /// rendered output.
    pub fn execute(self) -> Result<Execution, CommandError> {
        let verb = self.verb();
        let outcome = self.invoke()?;
        let rendered = outcome.render();
        info!("{verb}: {rendered}");
        Ok(Execution { rendered, outcome })
    }

    /// Executes, then writes the rendered output and a newline to `sink`.
    pub fn execute_and_print<W: Write + ?Sized>(self, sink: &mut W) -> Result<Execution, CommandError> {
        let execution = self.execute()?;
        sink.write_all(execution.rendered.as_bytes())?;
        sink.write_all(&[ASCII_NEWLINE])?;
        Ok(execution)
    }

    fn invoke(self) -> Result<Outcome, CommandError> {
        let verb = self.verb();
        let Self {
            arguments,
            config,
            target,
        } = self;
        let result = match arguments {
            Arguments::Create { size } => Ok(Outcome::Created(config.with_size(size).build())),
            Arguments::Park { vehicle } => bound(target, verb)?.park(vehicle).map(Outcome::Parked),
            Arguments::Leave { vehicle, duration } => {
                bound(target, verb)?.leave(&vehicle, duration).map(Outcome::Left)
            },
            Arguments::Status { include_empty_slots } => {
                Ok(Outcome::Status(bound(target, verb)?.status(include_empty_slots)))
            },
        };
        Ok(result.unwrap_or_else(Outcome::Failed))
    }
}

fn bound(target: Option<&mut ParkingLot>, verb: Verb) -> Result<&mut ParkingLot, CommandError> {
    target.ok_or_else(|| CommandError::OutputFormatting {
        verb,
        reason: "no parking lot is bound to the command".to_string(),
    })
}
