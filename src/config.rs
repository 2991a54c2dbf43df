// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Configuration surface for the dispatcher.
//!
//! JSON5 settings file format supporting:
//! - A global severity threshold
//! - Sink entries with optional per-sink level overrides (`"memory:ERROR"`)
//! - Free-form sink parameters (e.g. the console allowed-IP list)
//! - Comments and trailing commas

use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One configured sink: an identifier the registry can resolve, plus an
/// optional severity override that takes precedence over the global level
/// for this sink only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkBinding {
    pub identifier: String,
    /// `None` means "no override, use the global level". A present override
    /// of [`Severity::Unset`] (the result of a malformed level string)
    /// disables the sink.
    pub level_override: Option<Severity>,
}

impl SinkBinding {
    /// Parse a binding from `"identifier"` or `"identifier:LEVEL"` form.
    ///
    /// Returns `None` for entries with no identifier at all; a malformed
    /// level never fails, it degrades to `Some(Severity::Unset)`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        match raw.split_once(':') {
            Some((identifier, level)) => {
                let identifier = identifier.trim();
                if identifier.is_empty() {
                    return None;
                }
                let level = level.trim();
                let level_override = if level.is_empty() {
                    None
                } else {
                    Some(Severity::parse(level))
                };
                Some(Self {
                    identifier: identifier.to_string(),
                    level_override,
                })
            }
            None => {
                if raw.is_empty() {
                    return None;
                }
                Some(Self {
                    identifier: raw.to_string(),
                    level_override: None,
                })
            }
        }
    }
}

/// Split a pipe-separated setting into trimmed, non-empty segments.
/// Embedded newlines are stripped first; settings files may wrap long lists.
pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.replace('\n', "")
        .split('|')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Source of dispatcher configuration.
///
/// The dispatcher re-reads this on every call, so implementations backed by
/// mutable stores (a settings item, a watched file) take effect immediately.
pub trait ConfigProvider: Send + Sync {
    /// The global severity threshold. [`Severity::Unset`] disables logging.
    fn global_level(&self) -> Severity;

    /// Configured sinks, in invocation order.
    fn sink_bindings(&self) -> Vec<SinkBinding>;

    /// A raw sink-specific setting, if present.
    fn parameter(&self, key: &str) -> Option<String>;

    /// Pipe-separated variant of [`ConfigProvider::parameter`]: segments are
    /// trimmed and empty segments are ignored.
    fn parameter_list(&self, key: &str) -> Vec<String> {
        self.parameter(key)
            .map(|raw| split_list(&raw))
            .unwrap_or_default()
    }
}

/// Fixed in-memory configuration for programmatic setup and tests.
#[derive(Debug, Clone)]
pub struct StaticConfig {
    level: Severity,
    bindings: Vec<SinkBinding>,
    parameters: HashMap<String, String>,
}

impl StaticConfig {
    pub fn new(level: Severity) -> Self {
        Self {
            level,
            bindings: Vec::new(),
            parameters: HashMap::new(),
        }
    }

    /// Add a sink entry in `"identifier"` or `"identifier:LEVEL"` form.
    /// Entries without an identifier are dropped.
    pub fn with_sink(mut self, entry: &str) -> Self {
        if let Some(binding) = SinkBinding::parse(entry) {
            self.bindings.push(binding);
        }
        self
    }

    pub fn with_parameter(mut self, key: &str, value: &str) -> Self {
        self.parameters.insert(key.to_string(), value.to_string());
        self
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self::new(Severity::Unset)
    }
}

impl ConfigProvider for StaticConfig {
    fn global_level(&self) -> Severity {
        self.level
    }

    fn sink_bindings(&self) -> Vec<SinkBinding> {
        self.bindings.clone()
    }

    fn parameter(&self, key: &str) -> Option<String> {
        self.parameters.get(key).cloned()
    }
}

/// Settings-file configuration (JSON5 format)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FileConfig {
    /// Global severity threshold, e.g. "INFO". Missing or malformed values
    /// disable logging rather than erroring.
    #[serde(default)]
    pub level: String,

    /// Sink entries in invocation order, each `"identifier"` or
    /// `"identifier:LEVEL"`.
    #[serde(default)]
    pub sinks: Vec<String>,

    /// Sink-specific settings keyed by parameter name.
    #[serde(default)]
    pub parameters: HashMap<String, String>,
}

impl FileConfig {
    /// Load configuration from a JSON5 file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.to_path_buf(), e.to_string()))?;
        Self::parse(&content)
    }

    /// Parse configuration from a JSON5 string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validate the configuration.
    ///
    /// This is a diagnostic aid for deploy-time checks; the dispatch path
    /// itself tolerates everything `validate` rejects by degrading.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen: HashMap<String, usize> = HashMap::new();
        for (idx, raw) in self.sinks.iter().enumerate() {
            let Some(binding) = SinkBinding::parse(raw) else {
                return Err(ConfigError::EmptySinkEntry { index: idx });
            };
            if let Some(prev_idx) = seen.get(&binding.identifier) {
                return Err(ConfigError::DuplicateSink {
                    identifier: binding.identifier,
                    entries: (*prev_idx, idx),
                });
            }
            seen.insert(binding.identifier, idx);
        }
        Ok(())
    }
}

impl ConfigProvider for FileConfig {
    fn global_level(&self) -> Severity {
        Severity::parse(&self.level)
    }

    fn sink_bindings(&self) -> Vec<SinkBinding> {
        self.sinks
            .iter()
            .filter_map(|entry| SinkBinding::parse(entry))
            .collect()
    }

    fn parameter(&self, key: &str) -> Option<String> {
        self.parameters.get(key).cloned()
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    IoError(std::path::PathBuf, String),
    ParseError(String),
    EmptySinkEntry {
        index: usize,
    },
    DuplicateSink {
        identifier: String,
        entries: (usize, usize),
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(path, msg) => {
                write!(f, "failed to read config file '{}': {}", path.display(), msg)
            }
            ConfigError::ParseError(msg) => write!(f, "failed to parse config: {}", msg),
            ConfigError::EmptySinkEntry { index } => {
                write!(f, "sink entry {} has no identifier", index)
            }
            ConfigError::DuplicateSink {
                identifier,
                entries,
            } => write!(
                f,
                "duplicate sink '{}' (entries {} and {})",
                identifier, entries.0, entries.1
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_without_override() {
        let binding = SinkBinding::parse("memory").unwrap();
        assert_eq!(binding.identifier, "memory");
        assert_eq!(binding.level_override, None);
    }

    #[test]
    fn test_binding_with_override() {
        let binding = SinkBinding::parse(" memory:ERROR ").unwrap();
        assert_eq!(binding.identifier, "memory");
        assert_eq!(binding.level_override, Some(Severity::Error));
    }

    #[test]
    fn test_binding_with_malformed_override_disables() {
        let binding = SinkBinding::parse("memory:bogus").unwrap();
        assert_eq!(binding.level_override, Some(Severity::Unset));
    }

    #[test]
    fn test_binding_with_empty_override_falls_back() {
        let binding = SinkBinding::parse("memory:").unwrap();
        assert_eq!(binding.level_override, None);
    }

    #[test]
    fn test_binding_without_identifier_is_dropped() {
        assert_eq!(SinkBinding::parse(""), None);
        assert_eq!(SinkBinding::parse("   "), None);
        assert_eq!(SinkBinding::parse(":DEBUG"), None);
    }

    #[test]
    fn test_split_list_trims_and_skips_empty() {
        assert_eq!(
            split_list(" 127.0.0.1 | 10.0. ||ALL "),
            vec!["127.0.0.1", "10.0.", "ALL"]
        );
    }

    #[test]
    fn test_split_list_strips_newlines() {
        assert_eq!(
            split_list("127.0.0.1|\n10.0.0.1"),
            vec!["127.0.0.1", "10.0.0.1"]
        );
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = FileConfig::parse("{}").unwrap();
        assert_eq!(config.global_level(), Severity::Unset);
        assert!(config.sink_bindings().is_empty());
    }

    #[test]
    fn test_parse_config_with_comments() {
        let json5 = r#"{
            // Global threshold
            level: "INFO",
            sinks: [
                "memory:ERROR",
                "host",
            ],
            parameters: {
                "console.allowed_ip": "127.0.0.1|ALL",
            },
        }"#;

        let config = FileConfig::parse(json5).unwrap();
        assert_eq!(config.global_level(), Severity::Info);

        let bindings = config.sink_bindings();
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].identifier, "memory");
        assert_eq!(bindings[0].level_override, Some(Severity::Error));
        assert_eq!(bindings[1].identifier, "host");
        assert_eq!(bindings[1].level_override, None);

        assert_eq!(
            config.parameter_list("console.allowed_ip"),
            vec!["127.0.0.1", "ALL"]
        );
    }

    #[test]
    fn test_malformed_level_disables() {
        let config = FileConfig::parse(r#"{ level: "chatty" }"#).unwrap();
        assert_eq!(config.global_level(), Severity::Unset);
    }

    #[test]
    fn test_missing_parameter() {
        let config = FileConfig::parse("{}").unwrap();
        assert_eq!(config.parameter("console.allowed_ip"), None);
        assert!(config.parameter_list("console.allowed_ip").is_empty());
    }

    #[test]
    fn test_validate_duplicate_sinks() {
        let config = FileConfig::parse(r#"{ sinks: ["memory", "host", "memory:ERROR"] }"#).unwrap();
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::DuplicateSink { .. })));
    }

    #[test]
    fn test_validate_empty_sink_entry() {
        let config = FileConfig::parse(r#"{ sinks: [":DEBUG"] }"#).unwrap();
        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::EmptySinkEntry { index: 0 })
        ));
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ level: "WARN", sinks: ["memory"] }}"#).unwrap();

        let config = FileConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.global_level(), Severity::Warn);
        assert_eq!(config.sink_bindings().len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let result = FileConfig::load_from_file(Path::new("/nonexistent/logfan.json5"));
        assert!(matches!(result, Err(ConfigError::IoError(..))));
    }

    #[test]
    fn test_static_config() {
        let config = StaticConfig::new(Severity::Debug)
            .with_sink("memory:WARN")
            .with_sink("host")
            .with_parameter("console.allowed_ip", "ALL");

        assert_eq!(config.global_level(), Severity::Debug);
        assert_eq!(config.sink_bindings().len(), 2);
        assert_eq!(config.parameter_list("console.allowed_ip"), vec!["ALL"]);
    }
}
