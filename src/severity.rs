// Severity levels and the emission kinds derived from them

use serde::{Deserialize, Serialize};

/// Log severity threshold (0-7, higher admits more).
///
/// `Unset` and `None` are threshold-only states: no emission kind ranks at
/// or below them, so a threshold of either disables logging entirely.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Not configured. Nothing will be written.
    Unset = 0,
    /// Explicitly disabled. Nothing will be written.
    None = 1,
    /// Only AUDIT messages will be written.
    Audit = 2,
    /// AUDIT and FATAL messages will be written.
    Fatal = 3,
    /// Everything up to ERROR will be written.
    Error = 4,
    /// Everything up to WARN will be written.
    Warn = 5,
    /// Everything up to INFO will be written.
    Info = 6,
    /// Everything will be written.
    Debug = 7,
}

impl Severity {
    /// Get severity level as u8 (0-7)
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Get severity name as static string
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Unset => "UNSET",
            Severity::None => "NONE",
            Severity::Audit => "AUDIT",
            Severity::Fatal => "FATAL",
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
        }
    }

    /// Create from u8 value (returns None if invalid)
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Severity::Unset),
            1 => Some(Severity::None),
            2 => Some(Severity::Audit),
            3 => Some(Severity::Fatal),
            4 => Some(Severity::Error),
            5 => Some(Severity::Warn),
            6 => Some(Severity::Info),
            7 => Some(Severity::Debug),
            _ => None,
        }
    }

    /// Parse a configured level string, case-insensitively.
    ///
    /// Anything unrecognized yields [`Severity::Unset`] (logging disabled)
    /// rather than an error; a bad setting must never break the caller.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "UNSET" => Severity::Unset,
            "NONE" => Severity::None,
            "AUDIT" => Severity::Audit,
            "FATAL" => Severity::Fatal,
            "ERROR" => Severity::Error,
            "WARN" => Severity::Warn,
            "INFO" => Severity::Info,
            "DEBUG" => Severity::Debug,
            _ => Severity::Unset,
        }
    }

    /// Check whether this threshold admits records of the given kind.
    #[inline]
    pub const fn admits(self, kind: Kind) -> bool {
        self.as_u8() >= kind.severity().as_u8()
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of an emitted record: the subset of [`Severity`] that actual
/// log calls can carry. Discriminants line up with the severity ordinals.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Audit = 2,
    Fatal = 3,
    Error = 4,
    Warn = 5,
    Info = 6,
    Debug = 7,
}

impl Kind {
    /// Get the severity this kind is filtered against
    #[inline]
    pub const fn severity(self) -> Severity {
        match self {
            Kind::Audit => Severity::Audit,
            Kind::Fatal => Severity::Fatal,
            Kind::Error => Severity::Error,
            Kind::Warn => Severity::Warn,
            Kind::Info => Severity::Info,
            Kind::Debug => Severity::Debug,
        }
    }

    /// Get kind name as static string
    pub const fn as_str(self) -> &'static str {
        self.severity().as_str()
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
