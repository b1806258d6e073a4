use crate::command::{Outcome, Verb};
use crate::error::{ParseError, ProcessError};
use crate::lot::{LotConfig, ParkingLot};
use crate::parser;
use std::io::{self, Write};
use tracing::{debug, info, warn};

/// Runs a script of commands against a single parking lot, writing each command's output to the sink.
///
/// The first command has to create the lot. Lines that do not parse are logged and skipped; reading failures and a
/// missing lot stop the run.
pub struct Processor<W: Write> {
    config: LotConfig,
    lot: Option<ParkingLot>,
    sink: W,
}
impl<W: Write> Processor<W> {
    pub fn new(sink: W) -> Self {
        Self::with_config(LotConfig::default(), sink)
    }

    /// `config` is used for the lot the script creates.
    pub fn with_config(config: LotConfig, sink: W) -> Self {
        Self {
            config,
            lot: None,
            sink,
        }
    }

    pub fn lot(&self) -> Option<&ParkingLot> {
        self.lot.as_ref()
    }

    pub fn into_sink(self) -> W {
        self.sink
    }

    pub fn process<I>(&mut self, lines: I) -> Result<(), ProcessError>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        for (number, line) in lines.into_iter().enumerate() {
            let line = line?;
            debug!("Line {}: {line:?}", number + 1);
            self.process_line(&line)?;
        }
        self.sink.flush()?;
        Ok(())
    }

    /// Executes a single line. Bad commands are only logged; a line that is not `create_parking_lot` before any
    /// lot exists is fatal.
    pub fn process_line(&mut self, line: &str) -> Result<(), ProcessError> {
        let command = match parser::parse(line) {
            Ok(command) => command,
            Err(ParseError::Empty) => return Ok(()),
            Err(err) => {
                warn!("Skipping command {:?}: {err}", line.trim());
                return Ok(());
            },
        };
        let command = command.configure(self.config.clone());

        match self.lot.as_mut() {
            None if command.verb() == Verb::Create => {
                let execution = command.execute_and_print(&mut self.sink)?;
                if let Outcome::Created(lot) = execution.outcome {
                    info!("Using parking lot {} with {} slots", lot.name(), lot.size());
                    self.lot = Some(lot);
                }
            },
            None => return Err(ProcessError::MissingLot),
            Some(lot) => {
                if command.verb() == Verb::Create {
                    warn!("A parking lot already exists, commands keep running against {}", lot.name());
                }
                command.bind(lot).execute_and_print(&mut self.sink)?;
            },
        }
        Ok(())
    }
}
