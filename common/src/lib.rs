use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub const ASCII_NEWLINE: u8 = 10;
pub const BUFFER_SIZE: usize = 4096;
pub const DEFAULT_LOG_LEVEL: &str = "warn";

pub type LineSource = Box<dyn Iterator<Item = io::Result<String>>>;
pub type Sink = Box<dyn Write>;

/// Lazily reads lines from the file at `path`, or from standard input when no path is given.
pub fn line_source(path: Option<&Path>) -> io::Result<LineSource> {
    match path {
        Some(path) => {
            let file = File::open(path)?;
            Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, file).lines()))
        },
        None => Ok(Box::new(io::stdin().lines())),
    }
}

/// Rendered output goes to the file at `path` (truncated), or to standard output.
pub fn sink(path: Option<&Path>) -> io::Result<Sink> {
    match path {
        Some(path) => Ok(Box::new(BufWriter::with_capacity(BUFFER_SIZE, File::create(path)?))),
        None => Ok(Box::new(io::stdout())),
    }
}

/// Logs go to stderr so that stdout only ever carries command output.
/// `RUST_LOG` takes precedence over `default_level`.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
