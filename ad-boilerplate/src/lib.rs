//! areaDetector Boilerplate Library
//!
//! Scans an areaDetector driver's EPICS database templates and generates the
//! ophyd Detector and Cam class boilerplate for it.
//!
//! # Architecture
//!
//! - Finds the driver's `*App/Db` template directory
//! - Extracts PV names from `record(<type>, "<name>")` declarations
//! - Picks `EpicsSignal`, `EpicsSignalRO` or `SignalWithRBV` per PV from the
//!   `_RBV` naming convention
//! - Emits both classes as a Python fragment
//!
//! The library never configures logging and never touches the working
//! directory; the CLI (ad-boilerplate-cli) owns both.
//!
//! # Example Usage
//!
//! ```no_run
//! use ad_boilerplate::{DriverDirectory, Generator, GeneratorConfig};
//! use std::path::Path;
//!
//! let driver = DriverDirectory::open(Path::new("ADPilatus")).unwrap();
//! let generator = Generator::new(GeneratorConfig::new().with_strict(true));
//!
//! let collection = generator.collect(&driver).unwrap();
//! let mut out = Vec::new();
//! generator.write(&mut out, &collection).unwrap();
//! ```

// Public modules
pub mod config;
pub mod driver;
pub mod emitter;
pub mod generator;
pub mod mapping;
pub mod naming;
pub mod parser;
pub mod scanner;
pub mod types;

// Re-export main types for convenience
pub use config::GeneratorConfig;
pub use driver::{DriverDirectory, DriverNames};
pub use generator::{Collection, Generator};
pub use mapping::{CollectedSignals, SignalEntry, SignalMapping};
pub use naming::{attribute_name_for, infer_attribute_name};
pub use types::{BoilerplateError, PvRecord, Result, ScanStats, SignalKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
