// SPDX-License-Identifier: Apache-2.0 OR MIT
// Dispatch engine: threshold resolution and sink fan-out

use crate::config::ConfigProvider;
use crate::record::{CallerInfo, LogRecord};
use crate::registry::SinkRegistry;
use crate::severity::{Kind, Severity};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Dispatch engine behind the severity façade.
///
/// Filters each call against the effective severity threshold, builds one
/// [`LogRecord`] per accepted call and fans it out to the configured sinks
/// in order. A failing sink never affects the other sinks or the caller:
/// this is a best-effort, fire-and-forget subsystem and nothing that
/// happens inside it may surface to application code.
///
/// Cheap to clone; clones share the same config, registry and overrides.
#[derive(Clone)]
pub struct Dispatcher {
    config: Arc<dyn ConfigProvider>,
    registry: Arc<SinkRegistry>,
    /// Programmatic global level; `Severity::Unset` means "not set".
    level_override: Arc<AtomicU8>,
    /// Programmatic sink list; `None` means "use configured bindings".
    sink_override: Arc<RwLock<Option<Vec<String>>>>,
}

impl Dispatcher {
    /// Create a dispatcher over the given configuration, with the built-in
    /// sinks registered.
    pub fn new(config: impl ConfigProvider + 'static) -> Self {
        let config: Arc<dyn ConfigProvider> = Arc::new(config);
        let registry = Arc::new(SinkRegistry::with_builtins(Arc::clone(&config)));
        Self::with_registry(config, registry)
    }

    /// Create a dispatcher with an explicit registry
    pub fn with_registry(config: Arc<dyn ConfigProvider>, registry: Arc<SinkRegistry>) -> Self {
        Self {
            config,
            registry,
            level_override: Arc::new(AtomicU8::new(Severity::Unset.as_u8())),
            sink_override: Arc::new(RwLock::new(None)),
        }
    }

    /// Get the sink registry, e.g. to register application-specific sinks
    pub fn registry(&self) -> &SinkRegistry {
        &self.registry
    }

    /// Set the process-wide level override. Takes effect for subsequent
    /// calls; pass [`Severity::Unset`] to fall back to configuration.
    pub fn set_level(&self, level: Severity) {
        self.level_override.store(level.as_u8(), Ordering::Relaxed);
    }

    /// Clear the level override (fall back to configuration)
    pub fn clear_level(&self) {
        self.set_level(Severity::Unset);
    }

    /// Replace the configured sink list for subsequent calls
    pub fn set_sinks<I, S>(&self, identifiers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identifiers: Vec<String> = identifiers.into_iter().map(Into::into).collect();
        *self
            .sink_override
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(identifiers);
    }

    /// Clear the sink-list override (fall back to configured bindings)
    pub fn clear_sinks(&self) {
        *self
            .sink_override
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// The severity threshold currently in force: the programmatic override
    /// when set, otherwise the configured global level.
    pub fn effective_level(&self) -> Severity {
        let level = Severity::from_u8(self.level_override.load(Ordering::Relaxed))
            .unwrap_or(Severity::Unset);
        if level != Severity::Unset {
            return level;
        }
        self.config.global_level()
    }

    /// The threshold applied to one sink: its configured override when the
    /// binding carries one, otherwise [`Dispatcher::effective_level`].
    ///
    /// A binding whose override failed to parse carries `Severity::Unset`
    /// and thereby disables just that sink.
    pub fn effective_level_for(&self, identifier: &str) -> Severity {
        for binding in self.config.sink_bindings() {
            if binding.identifier != identifier {
                continue;
            }
            if let Some(level) = binding.level_override {
                return level;
            }
        }
        self.effective_level()
    }

    /// Log an audit message
    pub fn audit(&self, message: &str) {
        self.emit(Kind::Audit, CallerInfo::unknown(), message, None);
    }

    /// Log a debug message
    pub fn debug(&self, message: &str) {
        self.emit(Kind::Debug, CallerInfo::unknown(), message, None);
    }

    /// Log an info message
    pub fn info(&self, message: &str) {
        self.emit(Kind::Info, CallerInfo::unknown(), message, None);
    }

    /// Log a warning
    pub fn warn(&self, message: &str) {
        self.emit(Kind::Warn, CallerInfo::unknown(), message, None);
    }

    /// Log a warning carrying an error value
    pub fn warn_err(&self, message: &str, error: anyhow::Error) {
        self.emit(Kind::Warn, CallerInfo::unknown(), message, Some(error));
    }

    /// Log an error
    pub fn error(&self, message: &str) {
        self.emit(Kind::Error, CallerInfo::unknown(), message, None);
    }

    /// Log an error carrying an error value
    pub fn error_err(&self, message: &str, error: anyhow::Error) {
        self.emit(Kind::Error, CallerInfo::unknown(), message, Some(error));
    }

    /// Log a fatal message
    pub fn fatal(&self, message: &str) {
        self.emit(Kind::Fatal, CallerInfo::unknown(), message, None);
    }

    /// Log a fatal message carrying an error value
    pub fn fatal_err(&self, message: &str, error: anyhow::Error) {
        self.emit(Kind::Fatal, CallerInfo::unknown(), message, Some(error));
    }

    /// Dispatch one call: threshold check, record construction, fan-out.
    ///
    /// The `log_*!` macros route here with the call site's [`CallerInfo`];
    /// the plain severity methods pass [`CallerInfo::unknown`].
    pub fn emit(&self, kind: Kind, caller: CallerInfo, message: &str, error: Option<anyhow::Error>) {
        if !self.effective_level().admits(kind) {
            return;
        }

        let record = LogRecord::new(kind, message, caller, error);

        for identifier in self.current_sinks() {
            // An identifier that doesn't resolve is skipped; the rest of
            // the list still runs.
            let Some(mut sink) = self.registry.resolve(&identifier) else {
                continue;
            };
            if !self.effective_level_for(&identifier).admits(kind) {
                continue;
            }
            // Write failures end here. Logging them could recurse straight
            // back into this path.
            let _ = sink.write_log_entry(&record);
        }
    }

    /// The sink identifiers for this call: the programmatic override when
    /// set, otherwise a fresh read of the configured bindings.
    fn current_sinks(&self) -> Vec<String> {
        {
            let overridden = self
                .sink_override
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(identifiers) = overridden.as_ref() {
                return identifiers.clone();
            }
        }
        self.config
            .sink_bindings()
            .into_iter()
            .map(|binding| binding.identifier)
            .collect()
    }
}

static GLOBAL: OnceLock<Dispatcher> = OnceLock::new();

/// Install the process-wide dispatcher used by the free-function façade.
/// Returns `false` if one is already installed (the first install wins).
pub fn install(dispatcher: Dispatcher) -> bool {
    GLOBAL.set(dispatcher).is_ok()
}

/// The installed process-wide dispatcher, if any
pub fn global() -> Option<&'static Dispatcher> {
    GLOBAL.get()
}

/// Log an audit message via the installed dispatcher.
/// Before [`install`], this is a silent no-op, like every façade function.
pub fn audit(message: &str) {
    if let Some(dispatcher) = global() {
        dispatcher.audit(message);
    }
}

/// Log a debug message via the installed dispatcher
pub fn debug(message: &str) {
    if let Some(dispatcher) = global() {
        dispatcher.debug(message);
    }
}

/// Log an info message via the installed dispatcher
pub fn info(message: &str) {
    if let Some(dispatcher) = global() {
        dispatcher.info(message);
    }
}

/// Log a warning via the installed dispatcher
pub fn warn(message: &str) {
    if let Some(dispatcher) = global() {
        dispatcher.warn(message);
    }
}

/// Log a warning with an error value via the installed dispatcher
pub fn warn_err(message: &str, error: anyhow::Error) {
    if let Some(dispatcher) = global() {
        dispatcher.warn_err(message, error);
    }
}

/// Log an error via the installed dispatcher
pub fn error(message: &str) {
    if let Some(dispatcher) = global() {
        dispatcher.error(message);
    }
}

/// Log an error with an error value via the installed dispatcher
pub fn error_err(message: &str, error: anyhow::Error) {
    if let Some(dispatcher) = global() {
        dispatcher.error_err(message, error);
    }
}

/// Log a fatal message via the installed dispatcher
pub fn fatal(message: &str) {
    if let Some(dispatcher) = global() {
        dispatcher.fatal(message);
    }
}

/// Log a fatal message with an error value via the installed dispatcher
pub fn fatal_err(message: &str, error: anyhow::Error) {
    if let Some(dispatcher) = global() {
        dispatcher.fatal_err(message, error);
    }
}
