// Host log sink - forwards records into the process tracing output

use super::{Sink, SinkError};
use crate::record::LogRecord;
use crate::severity::Kind;

/// Writes log records to the host application's `tracing` subscriber, so
/// dispatched entries show up alongside the rest of the process log.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostLogSink;

impl HostLogSink {
    /// Registry identifier for this sink
    pub const IDENTIFIER: &'static str = "host";

    pub fn new() -> Self {
        Self
    }

    fn format_message(record: &LogRecord) -> String {
        if record.caller.is_empty() {
            record.message.clone()
        } else {
            format!("{}: {}", record.caller, record.message)
        }
    }
}

impl Sink for HostLogSink {
    fn write_log_entry(&mut self, record: &LogRecord) -> Result<(), SinkError> {
        let message = Self::format_message(record);
        match record.kind {
            Kind::Debug => tracing::debug!(target: "logfan", "{}", message),
            Kind::Info => tracing::info!(target: "logfan", "{}", message),
            Kind::Audit => tracing::info!(target: "logfan::audit", "{}", message),
            Kind::Warn => match &record.error {
                Some(error) => tracing::warn!(target: "logfan", error = %error, "{}", message),
                None => tracing::warn!(target: "logfan", "{}", message),
            },
            Kind::Error => match &record.error {
                Some(error) => tracing::error!(target: "logfan", error = %error, "{}", message),
                None => tracing::error!(target: "logfan", "{}", message),
            },
            Kind::Fatal => match &record.error {
                Some(error) => {
                    tracing::error!(target: "logfan", fatal = true, error = %error, "{}", message)
                }
                None => tracing::error!(target: "logfan", fatal = true, "{}", message),
            },
        }
        Ok(())
    }
}
