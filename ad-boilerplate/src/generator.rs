//! Main generator API
//!
//! The Generator ties the scanner, parser and emitter together: it walks a
//! validated driver directory, collects the PV mapping, and renders the two
//! boilerplate classes.

use crate::config::GeneratorConfig;
use crate::driver::{DriverDirectory, DriverNames};
use crate::emitter;
use crate::mapping::CollectedSignals;
use crate::parser;
use crate::scanner;
use crate::types::{Result, ScanStats};
use std::io::Write;
use std::path::PathBuf;

/// Result of scanning one driver
#[derive(Debug, Clone)]
pub struct Collection {
    /// Class names derived from the driver folder
    pub names: DriverNames,
    /// Template files that were parsed, in order
    pub templates: Vec<PathBuf>,
    /// PV mapping and file-handling flag
    pub signals: CollectedSignals,
    /// Scan counters
    pub stats: ScanStats,
}

/// Entry point for collecting and emitting boilerplate
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Create a generator with the given configuration
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Scan a driver's templates and build the signal mapping
    ///
    /// # Example
    /// ```no_run
    /// use ad_boilerplate::{DriverDirectory, Generator, GeneratorConfig};
    /// use std::path::Path;
    ///
    /// let driver = DriverDirectory::open(Path::new("ADPilatus")).unwrap();
    /// let generator = Generator::new(GeneratorConfig::new());
    /// let collection = generator.collect(&driver).unwrap();
    /// println!("{} PVs", collection.signals.mapping.len());
    /// ```
    pub fn collect(&self, driver: &DriverDirectory) -> Result<Collection> {
        log::info!("Scanning driver directory: {:?}", driver.root);

        let templates = scanner::scan_driver(&driver.root)?;
        if templates.is_empty() {
            log::warn!("No .template files found for {}", driver.names.device);
        }

        let (signals, stats) = parser::collect_signals(&templates, &self.config)?;

        log::info!(
            "Collected {} PVs from {} templates ({} records, {} skipped)",
            signals.mapping.len(),
            stats.templates_scanned,
            stats.records_found,
            stats.records_skipped
        );

        Ok(Collection {
            names: driver.names.clone(),
            templates,
            signals,
            stats,
        })
    }

    /// Write the boilerplate for a collection to a sink
    pub fn write<W: Write>(&self, out: &mut W, collection: &Collection) -> Result<()> {
        emitter::write_boilerplate(out, &collection.names, &collection.signals, &self.config)
    }

    /// Render the boilerplate for a collection to a string
    pub fn render(&self, collection: &Collection) -> Result<String> {
        emitter::render_boilerplate(&collection.names, &collection.signals, &self.config)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}
