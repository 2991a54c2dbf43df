// SPDX-License-Identifier: Apache-2.0 OR MIT
// Database sink - builds log rows for an injected store

use super::{Sink, SinkError};
use crate::record::LogRecord;
use chrono::{DateTime, Utc};

/// One row of the log table, ready for whatever store backs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    pub timestamp: DateTime<Utc>,
    pub kind: String,
    /// Machine the record was produced on (may be empty)
    pub host: String,
    pub caller: String,
    pub line: u32,
    pub message: String,
    /// Top-level error message, empty without an error
    pub error_message: String,
    /// Message of the first underlying cause, empty without one
    pub error_cause: String,
    /// Full error chain, outermost first
    pub error_chain: String,
}

/// Storage backend for [`DatabaseLogSink`].
///
/// Transport details (SQL dialect, schema management, connection pooling)
/// live behind this boundary; the sink only hands over finished rows.
pub trait LogStore: Send {
    fn append(&mut self, row: &LogRow) -> Result<(), SinkError>;
}

/// Writes one database row per log record through an injected [`LogStore`].
pub struct DatabaseLogSink {
    store: Option<Box<dyn LogStore>>,
    host: String,
}

impl DatabaseLogSink {
    /// Registry identifier for this sink
    pub const IDENTIFIER: &'static str = "database";

    pub fn new(store: Box<dyn LogStore>) -> Self {
        Self {
            store: Some(store),
            host: host_name(),
        }
    }

    /// A sink without a store accepts records and writes nothing, matching
    /// a deployment where the log database is not configured.
    pub fn unconfigured() -> Self {
        Self {
            store: None,
            host: host_name(),
        }
    }

    /// Build the row a record maps to
    pub fn build_row(&self, record: &LogRecord) -> LogRow {
        let (error_message, error_cause, error_chain) = match &record.error {
            Some(error) => (
                error.to_string(),
                error
                    .chain()
                    .nth(1)
                    .map(|cause| cause.to_string())
                    .unwrap_or_default(),
                format!("{error:#}"),
            ),
            None => Default::default(),
        };

        LogRow {
            timestamp: record.timestamp,
            kind: record.kind.as_str().to_string(),
            host: self.host.clone(),
            caller: record.caller.clone(),
            line: record.line,
            message: record.message.clone(),
            error_message,
            error_cause,
            error_chain,
        }
    }
}

impl Sink for DatabaseLogSink {
    fn write_log_entry(&mut self, record: &LogRecord) -> Result<(), SinkError> {
        let row = self.build_row(record);
        match self.store.as_mut() {
            Some(store) => store.append(&row),
            None => Ok(()),
        }
    }
}

fn host_name() -> String {
    #[cfg(unix)]
    {
        nix::unistd::gethostname()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
    #[cfg(not(unix))]
    {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CallerInfo;
    use crate::severity::Kind;
    use anyhow::anyhow;
    use std::sync::{Arc, Mutex};

    struct VecStore {
        rows: Arc<Mutex<Vec<LogRow>>>,
    }

    impl LogStore for VecStore {
        fn append(&mut self, row: &LogRow) -> Result<(), SinkError> {
            self.rows.lock().unwrap().push(row.clone());
            Ok(())
        }
    }

    #[test]
    fn test_row_from_plain_record() {
        let sink = DatabaseLogSink::unconfigured();
        let record = LogRecord::new(
            Kind::Warn,
            "disk filling up",
            CallerInfo::new("app::monitor", 31),
            None,
        );

        let row = sink.build_row(&record);
        assert_eq!(row.kind, "WARN");
        assert_eq!(row.caller, "app::monitor");
        assert_eq!(row.line, 31);
        assert_eq!(row.message, "disk filling up");
        assert_eq!(row.error_message, "");
        assert_eq!(row.error_cause, "");
        assert_eq!(row.error_chain, "");
    }

    #[test]
    fn test_row_extracts_error_chain() {
        let sink = DatabaseLogSink::unconfigured();
        let error = anyhow!("connection refused")
            .context("flush failed")
            .context("checkpoint aborted");
        let record = LogRecord::new(Kind::Error, "db down", CallerInfo::unknown(), Some(error));

        let row = sink.build_row(&record);
        assert_eq!(row.error_message, "checkpoint aborted");
        assert_eq!(row.error_cause, "flush failed");
        assert_eq!(
            row.error_chain,
            "checkpoint aborted: flush failed: connection refused"
        );
    }

    #[test]
    fn test_rows_reach_the_store() {
        let rows = Arc::new(Mutex::new(Vec::new()));
        let mut sink = DatabaseLogSink::new(Box::new(VecStore {
            rows: Arc::clone(&rows),
        }));

        let record = LogRecord::new(Kind::Info, "saved", CallerInfo::unknown(), None);
        sink.write_log_entry(&record).unwrap();

        let rows = rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].message, "saved");
    }

    #[test]
    fn test_unconfigured_sink_is_a_no_op() {
        let mut sink = DatabaseLogSink::unconfigured();
        let record = LogRecord::new(Kind::Info, "nowhere", CallerInfo::unknown(), None);
        assert!(sink.write_log_entry(&record).is_ok());
    }

    #[test]
    fn test_failing_store_surfaces_the_error() {
        struct FailingStore;
        impl LogStore for FailingStore {
            fn append(&mut self, _row: &LogRow) -> Result<(), SinkError> {
                Err(SinkError::Store("table locked".to_string()))
            }
        }

        let mut sink = DatabaseLogSink::new(Box::new(FailingStore));
        let record = LogRecord::new(Kind::Error, "x", CallerInfo::unknown(), None);
        assert!(sink.write_log_entry(&record).is_err());
    }
}
