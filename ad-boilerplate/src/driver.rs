//! Driver directory validation and class naming
//!
//! An areaDetector driver lives in a folder named `AD<Device>`. The device
//! name drives every generated identifier.

use crate::types::{BoilerplateError, Result};
use std::path::{Component, Path, PathBuf};

/// Folder-name prefix of every areaDetector driver
pub const DRIVER_PREFIX: &str = "AD";

/// Names derived from a driver folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverNames {
    /// Device name (`Foo` for `ADFoo`)
    pub device: String,
    /// Detector class name (`FooDetector`)
    pub detector: String,
    /// Cam class name (`FooDetectorCam`)
    pub cam: String,
}

impl DriverNames {
    /// Derive class names from a device name
    pub fn from_device(device: impl Into<String>) -> Self {
        let device = device.into();
        let detector = format!("{}Detector", device);
        let cam = format!("{}Cam", detector);
        Self {
            device,
            detector,
            cam,
        }
    }

    /// Derive class names from a driver folder name such as `ADFoo`
    pub fn from_folder_name(folder: &str) -> Result<Self> {
        let device = folder.strip_prefix(DRIVER_PREFIX).ok_or_else(|| {
            BoilerplateError::InvalidInput(format!(
                "Specified driver directory {} could not be identified as an areaDetector driver!",
                folder
            ))
        })?;

        if device.is_empty() {
            return Err(BoilerplateError::InvalidInput(format!(
                "Driver directory {} has no device name after the {} prefix",
                folder, DRIVER_PREFIX
            )));
        }

        Ok(Self::from_device(device))
    }

    /// File name the boilerplate is written to
    pub fn output_file_name(&self) -> String {
        format!("{}_boilerplate", self.detector)
    }
}

/// A validated driver root directory
#[derive(Debug, Clone)]
pub struct DriverDirectory {
    /// Absolute path to the driver root
    pub root: PathBuf,
    /// Names derived from the root's folder name
    pub names: DriverNames,
}

impl DriverDirectory {
    /// Validate a target path as an areaDetector driver root
    pub fn open(target: &Path) -> Result<Self> {
        if !target.exists() || !target.is_dir() {
            return Err(BoilerplateError::InvalidInput(format!(
                "Input {:?} does not exist or is not a directory!",
                target
            )));
        }

        let root = target.canonicalize()?;
        let folder = folder_name(target, &root)?;

        let names = DriverNames::from_folder_name(&folder)?;
        log::debug!(
            "Creating boilerplate for {}, with classes {} and {}",
            names.device,
            names.detector,
            names.cam
        );

        Ok(Self { root, names })
    }
}

/// Folder name of the target as the user named it
///
/// Symlinks are not followed; only `.`, `..` and similar trailing components
/// fall back to the resolved path.
fn folder_name(target: &Path, resolved: &Path) -> Result<String> {
    let name = match target.components().next_back() {
        Some(Component::Normal(name)) => Some(name),
        _ => resolved.file_name(),
    };

    name.and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            BoilerplateError::InvalidInput(format!("Cannot determine folder name of {:?}", target))
        })
}
