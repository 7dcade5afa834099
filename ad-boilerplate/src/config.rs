//! Generator configuration types
//!
//! Every field has a default matching the stock ophyd areaDetector layout, so
//! an empty configuration file is valid.

use crate::types::{BoilerplateError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for template scanning and class emission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Base class of the generated Detector class
    pub detector_base: String,

    /// Base class of the generated Cam class
    pub cam_base: String,

    /// Mixin added to the Cam class when file handling is included
    pub file_base: String,

    /// Component helper used for every attribute line
    pub component: String,

    /// PV prefix of the cam component inside the Detector class
    pub cam_prefix: String,

    /// Template whose inclusion marks a driver as file-writing
    pub file_template: String,

    /// Whether to emit `_html_docs` lines
    pub html_docs: bool,

    /// Treat malformed `record` lines as fatal instead of skipping them
    pub strict: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            detector_base: "DetectorBase".to_string(),
            cam_base: "CamBase".to_string(),
            file_base: "FileBase".to_string(),
            component: "ADCpt".to_string(),
            cam_prefix: "cam1:".to_string(),
            file_template: "NDFile.template".to_string(),
            html_docs: true,
            strict: false,
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: enable or disable strict record parsing
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Builder method: set the cam component prefix
    pub fn with_cam_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.cam_prefix = prefix.into();
        self
    }

    /// Builder method: set the file-writing template name
    pub fn with_file_template(mut self, template: impl Into<String>) -> Self {
        self.file_template = template.into();
        self
    }

    /// Builder method: enable or disable `_html_docs` lines
    pub fn with_html_docs(mut self, enabled: bool) -> Self {
        self.html_docs = enabled;
        self
    }

    /// The exact line prefix that marks file handling
    pub fn include_directive(&self) -> String {
        format!("include \"{}\"", self.file_template)
    }

    /// Reject settings that would produce unusable output
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("detector_base", &self.detector_base),
            ("cam_base", &self.cam_base),
            ("file_base", &self.file_base),
            ("component", &self.component),
            ("file_template", &self.file_template),
        ];

        for (key, value) in names {
            if value.trim().is_empty() {
                return Err(BoilerplateError::ConfigError(format!(
                    "`{}` must not be empty",
                    key
                )));
            }
        }

        Ok(())
    }
}
