//! Boilerplate class emitter
//!
//! Writes the ophyd Detector and Cam classes as a Python fragment meant for
//! copy-paste into `ophyd/areadetector/detectors.py` and `cam.py`.

use crate::config::GeneratorConfig;
use crate::driver::DriverNames;
use crate::mapping::CollectedSignals;
use crate::naming::attribute_name_for;
use crate::types::Result;
use std::io::Write;

/// Write the Detector class
pub fn write_detector_class<W: Write>(
    out: &mut W,
    names: &DriverNames,
    config: &GeneratorConfig,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "class {}({}):", names.detector, config.detector_base)?;
    if config.html_docs {
        writeln!(out, "    _html_docs = ['{}Doc.html']", names.device)?;
    }
    writeln!(out, "    cam = C(cam.{}, '{}')", names.cam, config.cam_prefix)?;
    Ok(())
}

/// Write the Cam class with one attribute per collected PV
pub fn write_cam_class<W: Write>(
    out: &mut W,
    names: &DriverNames,
    signals: &CollectedSignals,
    config: &GeneratorConfig,
) -> Result<()> {
    let bases = if signals.includes_file_handling {
        format!("{}, {}", config.cam_base, config.file_base)
    } else {
        config.cam_base.clone()
    };

    writeln!(out)?;
    writeln!(out, "class {}({}):", names.cam, bases)?;
    if config.html_docs {
        writeln!(out, "    _html_docs = ['{}Doc.html']", names.device)?;
    }
    writeln!(out, "    _default_configuration_attrs = (")?;
    writeln!(out, "        {}._default_configuration_attrs", config.cam_base)?;
    writeln!(out, "    )")?;

    for entry in signals.mapping.iter() {
        let attribute = attribute_name_for(&entry.pv);
        if attribute.is_empty() {
            log::warn!("Skipping PV {:?}: no attribute name can be derived", entry.pv);
            continue;
        }

        writeln!(
            out,
            "    {} = {}({}, '{}')",
            attribute,
            config.component,
            entry.kind.ophyd_class(),
            entry.pv
        )?;
    }

    Ok(())
}

/// Write both classes, Detector first
pub fn write_boilerplate<W: Write>(
    out: &mut W,
    names: &DriverNames,
    signals: &CollectedSignals,
    config: &GeneratorConfig,
) -> Result<()> {
    write_detector_class(out, names, config)?;
    write_cam_class(out, names, signals, config)?;
    Ok(())
}

/// Render both classes into a string
pub fn render_boilerplate(
    names: &DriverNames,
    signals: &CollectedSignals,
    config: &GeneratorConfig,
) -> Result<String> {
    let mut buf = Vec::new();
    write_boilerplate(&mut buf, names, signals, config)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
