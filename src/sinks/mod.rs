// Sink capability and the stock sink implementations

mod console;
mod database;
mod host;
mod memory;
mod wildfire;

pub use console::{begin_request, finish_request, ConsoleHeaderSink, ALLOWED_IP_PARAMETER};
pub use database::{DatabaseLogSink, LogRow, LogStore};
pub use host::HostLogSink;
pub use memory::{MemorySink, MEMORY_SINK_CAPACITY};
pub use wildfire::Wildfire;

use crate::record::LogRecord;
use thiserror::Error;

/// A pluggable consumer of log records.
///
/// Implementations are free to fail; the dispatcher discards every error a
/// write raises and moves on to the next sink, so a sink never has to
/// defend the caller. Sinks run on the calling thread and should be fast.
pub trait Sink: Send {
    /// Write a single log record to the sink's medium
    fn write_log_entry(&mut self, record: &LogRecord) -> Result<(), SinkError>;
}

/// Failure raised by sink construction or a sink write
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("sink backing store failure: {0}")]
    Store(String),

    #[error("sink unavailable: {0}")]
    Unavailable(String),
}
