//! Pluggable logging dispatcher.
//!
//! A severity façade (`audit`/`debug`/`info`/`warn`/`error`/`fatal`) that
//! filters each call against a configured threshold and fans accepted calls
//! out to a dynamically configured list of sinks: an in-memory capture
//! buffer, the host `tracing` output, browser-console response headers, a
//! database table behind a store trait, or anything registered under a
//! custom identifier.
//!
//! The façade never fails. Unknown sink identifiers, malformed level
//! settings and failing sink writes all degrade to fewer log entries, never
//! to an error or panic in the calling application.
//!
//! ```
//! use logfan::{Dispatcher, MemorySink, Severity, StaticConfig};
//!
//! let config = StaticConfig::new(Severity::Info).with_sink("memory");
//! let dispatcher = Dispatcher::new(config);
//!
//! dispatcher.info("service started");
//! dispatcher.debug("below the configured level, not captured");
//!
//! let records = MemorySink::flush_and_clear();
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].message, "service started");
//! ```

pub mod config;
mod dispatcher;
#[macro_use]
mod macros;
mod record;
mod registry;
mod severity;
pub mod sinks;

// Public exports
pub use config::{ConfigProvider, FileConfig, SinkBinding, StaticConfig};
pub use dispatcher::{
    audit, debug, error, error_err, fatal, fatal_err, global, info, install, warn, warn_err,
    Dispatcher,
};
pub use record::{CallerInfo, LogRecord};
pub use registry::SinkRegistry;
pub use severity::{Kind, Severity};
pub use sinks::{MemorySink, Sink, SinkError};
