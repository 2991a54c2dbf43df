// SPDX-License-Identifier: Apache-2.0 OR MIT
// Log record value delivered to every accepted sink

use crate::severity::Kind;
use anyhow::Error;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Best-effort identity of the call site that produced a record.
///
/// Supplied explicitly by the caller or filled in by the `log_*!` macros
/// from `module_path!()` and `line!()`; the dispatcher never inspects the
/// runtime call stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerInfo {
    caller: &'static str,
    line: u32,
}

impl CallerInfo {
    /// Create caller info from a module path and source line
    pub const fn new(caller: &'static str, line: u32) -> Self {
        Self { caller, line }
    }

    /// Caller info for call sites that don't identify themselves
    pub const fn unknown() -> Self {
        Self { caller: "", line: 0 }
    }

    /// Get the caller name (may be empty)
    pub const fn caller(&self) -> &'static str {
        self.caller
    }

    /// Get the source line (0 if unknown)
    pub const fn line(&self) -> u32 {
        self.line
    }
}

/// One accepted log call.
///
/// Built once by the dispatcher after the threshold check passes, then
/// handed to each sink by shared reference. Sinks that retain records
/// (the memory sink) clone them; the dispatcher itself keeps nothing.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub kind: Kind,
    pub message: String,
    /// Name of the method/module that created the entry (may be empty)
    pub caller: String,
    /// Source line that created the entry (may be 0)
    pub line: u32,
    /// The error value carried by `warn_err`/`error_err`/`fatal_err` calls.
    /// Shared so records stay cheap to clone.
    pub error: Option<Arc<Error>>,
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    /// Create a new log record stamped with the current time
    pub fn new(kind: Kind, message: &str, caller: CallerInfo, error: Option<Error>) -> Self {
        Self {
            kind,
            message: message.to_string(),
            caller: caller.caller().to_string(),
            line: caller.line(),
            error: error.map(Arc::new),
            timestamp: Utc::now(),
        }
    }
}
