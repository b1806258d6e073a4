extern crate parking;

use anyhow::Context;
use clap::Parser;
use common::{init_tracing, line_source, sink, DEFAULT_LOG_LEVEL};
use parking::{LotConfig, Processor, TimeUnit};
use std::path::PathBuf;
use tracing::info;

/// Runs parking lot commands from FILE, or from standard input when no file is given.
#[derive(Debug, Parser)]
#[command(name = "parking", version)]
struct Cli {
    /// Script with one command per line.
    file: Option<PathBuf>,

    /// Write command output here instead of standard output.
    #[arg(short, long, env = "PARKING_OUTPUT")]
    output: Option<PathBuf>,

    /// Name of the parking lot.
    #[arg(long, env = "PARKING_NAME")]
    name: Option<String>,

    /// Unit parked time is measured in: hour or minute.
    #[arg(long, env = "PARKING_TIME_UNIT", default_value_t = TimeUnit::Hour)]
    time_unit: TimeUnit,

    /// Time units covered by the initial rate.
    #[arg(long, env = "PARKING_INITIAL_DURATION", default_value_t = parking::types::DEFAULT_INITIAL_DURATION)]
    initial_duration: u64,

    #[arg(long, env = "PARKING_SUBSEQUENT_DURATION", default_value_t = parking::types::DEFAULT_SUBSEQUENT_DURATION)]
    subsequent_duration: u64,

    /// Charged once for anything up to the initial duration.
    #[arg(long, env = "PARKING_INITIAL_RATE", default_value_t = parking::types::DEFAULT_INITIAL_RATE)]
    initial_rate: u64,

    /// Charged for every time unit after the initial duration.
    #[arg(long, env = "PARKING_SUBSEQUENT_RATE", default_value_t = parking::types::DEFAULT_SUBSEQUENT_RATE)]
    subsequent_rate: u64,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, env = "PARKING_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}
impl Cli {
    fn lot_config(&self) -> LotConfig {
        let config = LotConfig::default()
            .with_time_unit(self.time_unit)
            .with_initial_duration(self.initial_duration)
            .with_subsequent_duration(self.subsequent_duration)
            .with_initial_rate(self.initial_rate)
            .with_subsequent_rate(self.subsequent_rate);
        match &self.name {
            Some(name) => config.with_name(name),
            None => config,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match &cli.file {
        Some(file) => info!("Reading commands from {}", file.display()),
        None => info!("Reading commands from standard input"),
    }
    let lines = line_source(cli.file.as_deref()).context("Could not open command file")?;
    let output = sink(cli.output.as_deref()).context("Could not open output")?;

    let mut processor = Processor::with_config(cli.lot_config(), output);
    processor.process(lines)?;
    Ok(())
}
