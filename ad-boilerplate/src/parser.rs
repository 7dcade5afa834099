//! EPICS template record parser
//!
//! Only two kinds of lines carry meaning here: `record(<type>, "<name>")`
//! declarations and the include directive of the file-writing template.
//! Everything else (fields, comments, aliases) is ignored.

use crate::config::GeneratorConfig;
use crate::mapping::CollectedSignals;
use crate::types::{BoilerplateError, PvRecord, Result, ScanStats};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Matches `record(<type>, "<name>")`, tolerating whitespace
fn record_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r#"^\s*record\s*\(\s*(?P<type>[A-Za-z0-9_]+)\s*,\s*"(?P<name>[^"]*)"\s*\)"#)
            .expect("Invalid regex")
    })
}

/// Matches leading `$(P)$(R)` or `${P}` macro references
fn macro_prefix_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^(?:\$(?:\([^)]*\)|\{[^}]*\}))+").expect("Invalid regex")
    })
}

/// True if the line declares a record
pub fn is_record_line(line: &str) -> bool {
    line.trim_start().starts_with("record")
}

/// Extract the record declared on a line
///
/// Returns `None` if the line does not have the `record(<type>, "<name>")`
/// shape or the name is empty once macros are removed.
pub fn parse_record(line: &str) -> Option<PvRecord> {
    let caps = record_regex().captures(line)?;
    let raw_name = &caps["name"];
    let name = macro_prefix_regex().replace(raw_name, "");

    if name.is_empty() {
        return None;
    }

    Some(PvRecord::new(&caps["type"], name.into_owned()))
}

/// Accumulates signals across template files
pub struct TemplateParser<'a> {
    config: &'a GeneratorConfig,
    include_directive: String,
    collected: CollectedSignals,
    stats: ScanStats,
}

impl<'a> TemplateParser<'a> {
    /// Create a parser using the given configuration
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            include_directive: config.include_directive(),
            collected: CollectedSignals::default(),
            stats: ScanStats::default(),
        }
    }

    /// Read a template file and fold its records into the mapping
    pub fn parse_file(&mut self, path: &Path) -> Result<()> {
        log::debug!(
            "Collecting pv info from {:?}",
            path.file_name().unwrap_or_default()
        );

        let bytes = std::fs::read(path)?;
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(err) => {
                // Latin-1 fallback for templates with stray non-UTF-8 bytes
                log::warn!("Template {:?} is not UTF-8, reading as Latin-1", path);
                err.into_bytes().iter().map(|&b| b as char).collect()
            }
        };

        self.parse_str(path, &content)
    }

    /// Parse template text; `source` is only used in diagnostics
    pub fn parse_str(&mut self, source: &Path, content: &str) -> Result<()> {
        self.stats.templates_scanned += 1;

        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim_start();

            if trimmed.starts_with(&self.include_directive) {
                if !self.collected.includes_file_handling {
                    log::debug!("{:?} includes {}", source, self.config.file_template);
                }
                self.collected.includes_file_handling = true;
            }

            if !is_record_line(trimmed) {
                continue;
            }

            match parse_record(trimmed) {
                Some(record) => {
                    self.stats.records_found += 1;
                    self.collected.mapping.insert_record(&record);
                }
                None if self.config.strict => {
                    return Err(BoilerplateError::ParseError {
                        file: source.to_path_buf(),
                        line: idx + 1,
                        message: format!("expected record(<type>, \"<name>\"), got `{}`", line.trim()),
                    });
                }
                None => {
                    self.stats.records_skipped += 1;
                    log::warn!(
                        "Skipping malformed record in {:?} line {}: {}",
                        source,
                        idx + 1,
                        line.trim()
                    );
                }
            }
        }

        Ok(())
    }

    /// Finish parsing and hand back the collected signals
    pub fn finish(self) -> (CollectedSignals, ScanStats) {
        (self.collected, self.stats)
    }
}

/// Parse every template in order
pub fn collect_signals(
    templates: &[PathBuf],
    config: &GeneratorConfig,
) -> Result<(CollectedSignals, ScanStats)> {
    let mut parser = TemplateParser::new(config);
    for template in templates {
        parser.parse_file(template)?;
    }
    Ok(parser.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SignalKind;

    fn parse(content: &str, config: &GeneratorConfig) -> Result<(CollectedSignals, ScanStats)> {
        let mut parser = TemplateParser::new(config);
        parser.parse_str(Path::new("test.template"), content)?;
        Ok(parser.finish())
    }

    #[test]
    fn test_parse_record_with_macros() {
        let record = parse_record(r#"record(ao, "$(P)$(R)AcquireTime")"#).unwrap();
        assert_eq!(record.record_type, "ao");
        assert_eq!(record.name, "AcquireTime");

        let record = parse_record(r#"record( mbbi , "${P}${R}TriggerMode_RBV" ) {"#).unwrap();
        assert_eq!(record.record_type, "mbbi");
        assert_eq!(record.name, "TriggerMode_RBV");
    }

    #[test]
    fn test_parse_record_literal_name() {
        let record = parse_record(r#"record(ai, "Foo:Bar")"#).unwrap();
        assert_eq!(record.name, "Foo:Bar");
    }

    #[test]
    fn test_parse_record_rejects_malformed() {
        assert!(parse_record("record(ai)").is_none());
        assert!(parse_record(r#"record(ai, $(P)$(R)Gain)"#).is_none());
        assert!(parse_record(r#"record(ai, "$(P)$(R)")"#).is_none());
        assert!(parse_record(r#"field(DESC, "Gain")"#).is_none());
    }

    #[test]
    fn test_template_mapping() {
        let template = r#"
# Gain control
record(ao, "$(P)$(R)Gain")
{
    field(PINI, "YES")
    field(DTYP, "asynFloat64")
}

record(ai, "$(P)$(R)Gain_RBV")
{
    field(SCAN, "I/O Intr")
}

record(ai, "$(P)$(R)Temperature_RBV")
record(bo, "$(P)$(R)Reset")
"#;
        let config = GeneratorConfig::new();
        let (collected, stats) = parse(template, &config).unwrap();

        assert_eq!(stats.records_found, 4);
        assert_eq!(stats.records_skipped, 0);
        assert!(!collected.includes_file_handling);

        let mapping = &collected.mapping;
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping.get("Gain"), Some(SignalKind::ReadWriteWithReadback));
        assert_eq!(mapping.get("Temperature_RBV"), Some(SignalKind::ReadOnly));
        assert_eq!(mapping.get("Reset"), Some(SignalKind::ReadWrite));
    }

    #[test]
    fn test_include_directive_sets_file_handling() {
        let config = GeneratorConfig::new();
        let (collected, _) = parse(
            "include \"ADBase.template\"\ninclude \"NDFile.template\"\n",
            &config,
        )
        .unwrap();
        assert!(collected.includes_file_handling);

        let (collected, _) = parse("include \"ADBase.template\"\n", &config).unwrap();
        assert!(!collected.includes_file_handling);
    }

    #[test]
    fn test_file_handling_is_sticky_across_files() {
        let config = GeneratorConfig::new();
        let mut parser = TemplateParser::new(&config);
        parser
            .parse_str(Path::new("a.template"), "include \"NDFile.template\"\n")
            .unwrap();
        parser
            .parse_str(Path::new("b.template"), "record(ai, \"$(P)$(R)X\")\n")
            .unwrap();

        let (collected, stats) = parser.finish();
        assert!(collected.includes_file_handling);
        assert_eq!(stats.templates_scanned, 2);
    }

    #[test]
    fn test_malformed_record_skipped_by_default() {
        let config = GeneratorConfig::new();
        let (collected, stats) = parse(
            "record(ai)\nrecord(ai, \"$(P)$(R)Good\")\n",
            &config,
        )
        .unwrap();

        assert_eq!(stats.records_skipped, 1);
        assert_eq!(collected.mapping.len(), 1);
    }

    #[test]
    fn test_malformed_record_fatal_in_strict_mode() {
        let config = GeneratorConfig::new().with_strict(true);
        let result = parse("\nrecord(ai)\n", &config);

        match result {
            Err(BoilerplateError::ParseError { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_collect_signals_from_files() {
        let tmp = tempfile::TempDir::new().unwrap();
        let a = tmp.path().join("a.template");
        let b = tmp.path().join("b.template");
        std::fs::write(&a, "record(ai, \"$(P)$(R)Bias_RBV\")\n").unwrap();
        std::fs::write(&b, "record(ao, \"$(P)$(R)Bias\")\n").unwrap();

        let config = GeneratorConfig::new();
        let (collected, stats) = collect_signals(&[a, b], &config).unwrap();
        assert_eq!(stats.templates_scanned, 2);
        assert_eq!(collected.mapping.len(), 1);
        assert_eq!(
            collected.mapping.get("Bias"),
            Some(SignalKind::ReadWriteWithReadback)
        );
    }

    #[test]
    fn test_latin1_template() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("latin.template");
        let mut bytes = b"# Temp in \xB0C\n".to_vec();
        bytes.extend_from_slice(b"record(ai, \"$(P)$(R)Temp_RBV\")\n");
        std::fs::write(&path, bytes).unwrap();

        let config = GeneratorConfig::new();
        let (collected, _) = collect_signals(&[path], &config).unwrap();
        assert_eq!(collected.mapping.get("Temp_RBV"), Some(SignalKind::ReadOnly));
    }
}
