use crate::command::Verb;
use crate::types::SlotNumber;
use std::io;
use thiserror::Error;

/// Raised when a line cannot be turned into a [`crate::command::Command`].
#[derive(Debug, Error)]
#[cfg_attr(test, derive(PartialEq))]
pub enum ParseError {
    #[error("No command supplied")]
    Empty,
    #[error("'{verb}' is not a supported command!\nPlease try to use the one from the set of supported commands below:\n{}", Verb::supported())]
    Unsupported { verb: String },
    #[error("'{argument}' - not a valid argument for the command: {verb}\nCorrect usage:\n{usage}")]
    BadArgument {
        argument: String,
        verb: Verb,
        usage: String,
    },
}

/// Domain failures of the parking lot itself. Their messages are shown to the user as the command output.
#[derive(Clone, Debug, Error)]
#[cfg_attr(test, derive(PartialEq))]
pub enum LotError {
    #[error("Sorry, parking lot is full")]
    Full,
    #[error("Registration number {registration} is already parked at slot {slot}")]
    AlreadyParked {
        registration: String,
        slot: SlotNumber,
    },
    #[error("Registration number {registration} not found")]
    NotFound { registration: String },
}

#[derive(Debug, Error)]
pub enum CommandError {
    // Never produced by commands built by the parser.
    #[error("Could not format output of command {verb}: {reason}")]
    OutputFormatting { verb: Verb, reason: String },
    #[error("Could not write command output: {0}")]
    Sink(#[from] io::Error),
}

/// Errors that end the whole run rather than a single line.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Illegal state: Parking lot doesn't exist! Please create one by executing command: {} before issuing any other commands.", Verb::Create)]
    MissingLot,
    #[error("Could not read commands: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Command(#[from] CommandError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_lot_message() {
        assert_eq!(
            "Illegal state: Parking lot doesn't exist! Please create one by executing command: create_parking_lot before issuing any other commands.",
            ProcessError::MissingLot.to_string()
        );
    }

    #[test]
    fn unsupported_lists_every_verb() {
        let message = ParseError::Unsupported {
            verb: "current_status".to_string(),
        }
        .to_string();
        let mut lines = message.lines();
        assert_eq!(Some("'current_status' is not a supported command!"), lines.next());
        assert_eq!(
            vec!["create_parking_lot", "park", "leave", "status"],
            lines.skip(1).collect::<Vec<_>>()
        );
    }

    #[test]
    fn lot_error_messages() {
        assert_eq!("Sorry, parking lot is full", LotError::Full.to_string());
        assert_eq!(
            "Registration number KA-01-HH-1234 is already parked at slot 3",
            LotError::AlreadyParked {
                registration: "KA-01-HH-1234".to_string(),
                slot: 3
            }
            .to_string()
        );
        assert_eq!(
            "Registration number DL-12-AA-9999 not found",
            LotError::NotFound {
                registration: "DL-12-AA-9999".to_string()
            }
            .to_string()
        );
    }
}
