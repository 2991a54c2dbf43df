// Sink plugin registry - turns configured identifiers into live sinks

use crate::config::ConfigProvider;
use crate::sinks::{
    ConsoleHeaderSink, DatabaseLogSink, HostLogSink, MemorySink, Sink, SinkError,
};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Factory producing a fresh sink instance per resolution
type SinkFactory = Box<dyn Fn() -> Result<Box<dyn Sink>, SinkError> + Send + Sync>;

/// Maps sink identifiers to factories.
///
/// Registration happens at startup (the built-in set, plus any explicit
/// [`SinkRegistry::register`] calls); resolution happens on every dispatch.
/// Sinks are constructed fresh for each resolution - sinks that need
/// process-wide state (the memory sink) keep it in the sink module, not in
/// the instance.
pub struct SinkRegistry {
    factories: RwLock<HashMap<String, SinkFactory>>,
}

impl SinkRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            factories: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry with the stock sinks registered: `memory`, `host`,
    /// `console` and an unconfigured `database`. Re-register `database`
    /// with a real store to activate it.
    pub fn with_builtins(config: Arc<dyn ConfigProvider>) -> Self {
        let registry = Self::new();
        registry.register(MemorySink::IDENTIFIER, || {
            Ok(Box::new(MemorySink::new()) as Box<dyn Sink>)
        });
        registry.register(HostLogSink::IDENTIFIER, || {
            Ok(Box::new(HostLogSink::new()) as Box<dyn Sink>)
        });
        registry.register(DatabaseLogSink::IDENTIFIER, || {
            Ok(Box::new(DatabaseLogSink::unconfigured()) as Box<dyn Sink>)
        });
        registry.register(ConsoleHeaderSink::IDENTIFIER, move || {
            Ok(Box::new(ConsoleHeaderSink::new(Arc::clone(&config))) as Box<dyn Sink>)
        });
        registry
    }

    /// Register a factory under an identifier, replacing any previous one
    pub fn register<F>(&self, identifier: &str, factory: F)
    where
        F: Fn() -> Result<Box<dyn Sink>, SinkError> + Send + Sync + 'static,
    {
        self.factories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(identifier.to_string(), Box::new(factory));
    }

    /// Resolve an identifier into a live sink.
    ///
    /// Returns `None` both for unknown identifiers and for factories that
    /// fail to construct; callers skip the sink either way.
    pub fn resolve(&self, identifier: &str) -> Option<Box<dyn Sink>> {
        let factories = self.factories.read().unwrap_or_else(PoisonError::into_inner);
        let factory = factories.get(identifier)?;
        factory().ok()
    }

    /// Registered identifiers, sorted
    pub fn identifiers(&self) -> Vec<String> {
        let factories = self.factories.read().unwrap_or_else(PoisonError::into_inner);
        let mut identifiers: Vec<String> = factories.keys().cloned().collect();
        identifiers.sort();
        identifiers
    }
}

impl Default for SinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}
