//! Core types for the areaDetector boilerplate collector
//!
//! This module defines the values passed between the scanner, the parser and
//! the emitter. Everything here is built during a single scan pass and then
//! discarded once the boilerplate has been written.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Result type for collector operations
pub type Result<T> = std::result::Result<T, BoilerplateError>;

/// Suffix marking a readback PV
pub const RBV_SUFFIX: &str = "_RBV";

/// Errors that can occur while collecting boilerplate
#[derive(Debug, thiserror::Error)]
pub enum BoilerplateError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not a directory: {0:?}")]
    NotADirectory(PathBuf),

    #[error("Malformed record in {file:?} line {line}: {message}")]
    ParseError {
        file: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// The ophyd signal variant chosen for a PV
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SignalKind {
    /// Readback-only PV (`EpicsSignalRO`)
    ReadOnly,
    /// Settable PV without a readback partner (`EpicsSignal`)
    ReadWrite,
    /// Settable PV with a matching `_RBV` partner (`SignalWithRBV`)
    ReadWriteWithReadback,
}

impl SignalKind {
    /// Name of the ophyd signal class emitted for this kind
    pub fn ophyd_class(&self) -> &'static str {
        match self {
            SignalKind::ReadOnly => "EpicsSignalRO",
            SignalKind::ReadWrite => "EpicsSignal",
            SignalKind::ReadWriteWithReadback => "SignalWithRBV",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ophyd_class())
    }
}

/// A single `record(<type>, "<name>")` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PvRecord {
    /// EPICS record type (`ai`, `bo`, `mbbi`, ...)
    pub record_type: String,
    /// PV name with leading `$(MACRO)` references removed
    pub name: String,
}

impl PvRecord {
    /// Create a new record
    pub fn new(record_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            name: name.into(),
        }
    }

    /// True if this record is the readback half of a PV pair
    pub fn is_readback(&self) -> bool {
        self.name.ends_with(RBV_SUFFIX)
    }

    /// Name with the trailing `_RBV` stripped, if present
    pub fn base_name(&self) -> &str {
        strip_readback(&self.name)
    }
}

/// Strip a trailing `_RBV` from a PV name
pub fn strip_readback(name: &str) -> &str {
    name.strip_suffix(RBV_SUFFIX).unwrap_or(name)
}

/// Counters collected while scanning templates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Number of template files read
    pub templates_scanned: usize,
    /// Number of well-formed record declarations
    pub records_found: usize,
    /// Number of `record` lines skipped as malformed
    pub records_skipped: usize,
}
