//! Template discovery
//!
//! The standard areaDetector layout is `AD<Device>/<Device>App/Db/*.template`.
//! When no `*App` folder exists the driver root itself is searched.

use crate::types::{BoilerplateError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve the directory holding a driver's templates
pub fn find_template_dir(driver_dir: &Path) -> Result<PathBuf> {
    if !driver_dir.is_dir() {
        return Err(BoilerplateError::NotADirectory(driver_dir.to_path_buf()));
    }

    let mut app_dirs: Vec<PathBuf> = fs::read_dir(driver_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.ends_with("App"))
                .unwrap_or(false)
        })
        .collect();
    app_dirs.sort();

    match app_dirs.into_iter().next() {
        Some(app_dir) => {
            let template_dir = app_dir.join("Db");
            log::debug!("Found template dir: {:?}", template_dir);
            Ok(template_dir)
        }
        None => {
            log::warn!(
                "No *App directory in {:?}, searching the driver root for templates",
                driver_dir
            );
            Ok(driver_dir.to_path_buf())
        }
    }
}

/// List `.template` files in a directory, sorted by file name
pub fn list_templates(template_dir: &Path) -> Result<Vec<PathBuf>> {
    if !template_dir.is_dir() {
        return Err(BoilerplateError::NotADirectory(template_dir.to_path_buf()));
    }

    let mut templates = Vec::new();
    for entry in fs::read_dir(template_dir)? {
        let path = entry?.path();
        let is_template = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.ends_with(".template"))
            .unwrap_or(false);

        if is_template && path.is_file() {
            templates.push(path);
        }
    }

    templates.sort();
    for template in &templates {
        log::debug!("Found template file {:?}", template.file_name().unwrap_or_default());
    }

    Ok(templates)
}

/// Find all template files belonging to a driver
pub fn scan_driver(driver_dir: &Path) -> Result<Vec<PathBuf>> {
    let template_dir = find_template_dir(driver_dir)?;
    list_templates(&template_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_standard_layout() {
        let tmp = TempDir::new().unwrap();
        let db = tmp.path().join("FooApp").join("Db");
        fs::create_dir_all(&db).unwrap();
        touch(&db.join("foo.template"));
        touch(&db.join("bar.template"));
        touch(&db.join("Makefile"));
        touch(&db.join("foo.substitutions"));

        let templates = scan_driver(tmp.path()).unwrap();
        let names: Vec<_> = templates
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["bar.template", "foo.template"]);
    }

    #[test]
    fn test_first_app_dir_by_name() {
        let tmp = TempDir::new().unwrap();
        for app in ["bApp", "aApp"] {
            let db = tmp.path().join(app).join("Db");
            fs::create_dir_all(&db).unwrap();
            touch(&db.join(format!("{}.template", app)));
        }

        let template_dir = find_template_dir(tmp.path()).unwrap();
        assert_eq!(template_dir, tmp.path().join("aApp").join("Db"));

        let templates = scan_driver(tmp.path()).unwrap();
        assert_eq!(templates, vec![template_dir.join("aApp.template")]);
    }

    #[test]
    fn test_falls_back_to_root() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("root.template"));
        fs::create_dir(tmp.path().join("docs")).unwrap();

        assert_eq!(find_template_dir(tmp.path()).unwrap(), tmp.path());
        let templates = scan_driver(tmp.path()).unwrap();
        assert_eq!(templates.len(), 1);
    }

    #[test]
    fn test_app_file_is_not_a_template_dir() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("NotAnApp"));

        assert_eq!(find_template_dir(tmp.path()).unwrap(), tmp.path());
    }

    #[test]
    fn test_missing_db_dir() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("FooApp")).unwrap();

        let result = scan_driver(tmp.path());
        assert!(matches!(result, Err(BoilerplateError::NotADirectory(_))));
    }

    #[test]
    fn test_not_a_directory() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("plain.txt");
        touch(&file);

        assert!(matches!(
            find_template_dir(&file),
            Err(BoilerplateError::NotADirectory(_))
        ));
    }
}
