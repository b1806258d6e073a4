//! A parking lot simulator driven by a script of text commands:
//!
//! ```text
//! create_parking_lot 6
//! park KA-01-HH-1234
//! leave KA-01-HH-1234 4
//! status
//! ```
//!
//! [`parser::parse`] turns a line into a [`Command`], which is bound to a [`ParkingLot`] and executed into the text
//! shown to the user. [`Processor`] runs a whole script.

pub mod command;
pub mod error;
pub mod lot;
pub mod models;
pub mod parser;
pub mod processor;
pub mod types;

pub use crate::command::{Arguments, Command, Execution, Outcome, Verb};
pub use crate::error::{CommandError, LotError, ParseError, ProcessError};
pub use crate::lot::{Clock, LotConfig, ParkingLot, SystemClock, TimeUnit};
pub use crate::models::{Ticket, Vehicle};
pub use crate::processor::Processor;
