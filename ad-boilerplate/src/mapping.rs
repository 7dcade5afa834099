//! Ordered PV to signal-kind mapping
//!
//! Entries keep the order in which their PV was first seen, which is also the
//! order attributes are emitted in. A readback PV whose base appears later
//! takes over the slot of its earlier read-only entry.

use crate::types::{PvRecord, SignalKind, RBV_SUFFIX};
use serde::Serialize;
use std::collections::HashMap;

/// One mapping entry: PV key and the signal kind chosen for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalEntry {
    /// PV name used as the component suffix
    pub pv: String,
    /// Signal variant
    pub kind: SignalKind,
}

/// Insertion-ordered mapping from PV key to [`SignalKind`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct SignalMapping {
    entries: Vec<SignalEntry>,

    /// Key lookup into `entries`
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl SignalMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a record and fold it into the mapping
    pub fn insert_record(&mut self, record: &PvRecord) {
        if record.is_readback() {
            self.insert_readback(record);
        } else {
            self.insert_base(&record.name);
        }
    }

    fn insert_readback(&mut self, record: &PvRecord) {
        let name = record.name.as_str();
        let base = record.base_name();

        if let Some(&idx) = self.index.get(base) {
            log::debug!("Identified {} as a record w/ RBV", base);
            self.entries[idx].kind = SignalKind::ReadWriteWithReadback;
        } else if self.index.contains_key(name) {
            log::trace!("Duplicate read-only record {}", name);
        } else {
            log::debug!("Identified read-only record {}", name);
            self.push(name, SignalKind::ReadOnly);
        }
    }

    fn insert_base(&mut self, name: &str) {
        if self.index.contains_key(name) {
            // A repeated declaration never downgrades a promoted entry
            log::trace!("Duplicate record {}", name);
            return;
        }

        let readback = format!("{}{}", name, RBV_SUFFIX);
        if let Some(idx) = self.index.remove(&readback) {
            log::debug!("Identified {} as a record w/ RBV", name);
            self.entries[idx] = SignalEntry {
                pv: name.to_string(),
                kind: SignalKind::ReadWriteWithReadback,
            };
            self.index.insert(name.to_string(), idx);
        } else {
            log::debug!("Found record {}", name);
            self.push(name, SignalKind::ReadWrite);
        }
    }

    fn push(&mut self, pv: &str, kind: SignalKind) {
        self.index.insert(pv.to_string(), self.entries.len());
        self.entries.push(SignalEntry {
            pv: pv.to_string(),
            kind,
        });
    }

    /// Look up the kind recorded for a PV key
    pub fn get(&self, pv: &str) -> Option<SignalKind> {
        self.index.get(pv).map(|&idx| self.entries[idx].kind)
    }

    /// Iterate entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &SignalEntry> {
        self.entries.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no PV has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything collected from one driver's templates
#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectedSignals {
    /// PV to signal-kind mapping
    pub mapping: SignalMapping,
    /// True if any template includes the file-writing template
    pub includes_file_handling: bool,
}
