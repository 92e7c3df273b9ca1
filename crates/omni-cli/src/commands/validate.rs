use crate::GlobalOpts;
use clap::Args;
use colored::Colorize;
use omni_config::Config;
use omni_logger as logger;
use omni_manifest::{
    collect_manifest_errors, load_manifest, missing_structure_paths, validate_manifest,
    validate_structure, ManifestDocument, ManifestError, PluginManifest, ValidationError,
    MANIFEST_FILE_NAME,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Clone, Default)]
pub struct ValidateCommand {
    /// Plugin package directory (default: config `plugin-dir`, then the current directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Report every failed check instead of stopping at the first one
    #[arg(long)]
    pub all_errors: bool,
}

/// Validate a plugin package and print the report to stdout.
///
/// Returns whether the package is valid.
pub fn handle_validate(cmd: ValidateCommand, _opts: &GlobalOpts) -> bool {
    let root = resolve_plugin_dir(cmd.dir);
    logger::debug(&format!("Validating plugin package at: {}", root.display()));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match validate_package(&root, cmd.all_errors, &mut out) {
        Ok(valid) => valid,
        Err(e) => {
            logger::error(&format!("Failed to write validation report: {}", e));
            false
        }
    }
}

fn resolve_plugin_dir(dir: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = dir {
        return dir;
    }
    match Config::load() {
        Ok(config) => config
            .plugin_dir
            .map_or_else(|| PathBuf::from("."), PathBuf::from),
        Err(e) => {
            logger::warn(&format!("Failed to load config: {}", e));
            PathBuf::from(".")
        }
    }
}

/// Run the manifest checks, then the layout check, writing progress to `out`
pub fn validate_package<W: Write>(
    root: &Path,
    all_errors: bool,
    out: &mut W,
) -> io::Result<bool> {
    writeln!(out, "Validating plugin manifest...")?;

    let doc = match load_manifest(&root.join(MANIFEST_FILE_NAME)) {
        Ok(doc) => doc,
        Err(err) => {
            logger::step(&format!("Manifest load failed: {}", err));
            report_load_error(&err, out)?;
            return Ok(false);
        }
    };

    let manifest = match check_manifest(&doc, all_errors) {
        Ok(manifest) => manifest,
        Err(errors) => {
            report_failure(out, "Manifest", &errors)?;
            return Ok(false);
        }
    };
    writeln!(out, "{} Manifest validation passed", "✓".green())?;

    writeln!(out, "Validating plugin structure...")?;
    if let Err(errors) = check_structure(root, all_errors) {
        report_failure(out, "Structure", &errors)?;
        return Ok(false);
    }
    writeln!(out, "{} Structure validation passed", "✓".green())?;

    writeln!(out, "✅ Plugin validation successful!")?;
    writeln!(out, "   Plugin ID: {}", manifest.id)?;
    writeln!(out, "   Version: {}", manifest.version)?;
    writeln!(out, "   Permissions: {}", manifest.permission_list())?;

    Ok(true)
}

fn check_manifest(
    doc: &ManifestDocument,
    all_errors: bool,
) -> Result<PluginManifest, Vec<ValidationError>> {
    if all_errors {
        let errors = collect_manifest_errors(doc);
        if !errors.is_empty() {
            return Err(errors);
        }
    }
    validate_manifest(doc).map_err(|e| vec![e])
}

fn check_structure(root: &Path, all_errors: bool) -> Result<(), Vec<ValidationError>> {
    if !all_errors {
        return validate_structure(root).map_err(|e| vec![e]);
    }

    let missing = missing_structure_paths(root);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing
            .into_iter()
            .map(|path| ValidationError::MissingFile(path.to_string()))
            .collect())
    }
}

fn report_load_error<W: Write>(err: &ManifestError, out: &mut W) -> io::Result<()> {
    match err {
        ManifestError::NotFound(_) => {
            writeln!(out, "❌ Error: {} not found", MANIFEST_FILE_NAME)
        }
        ManifestError::Json(e) => {
            writeln!(out, "❌ Error: Invalid JSON in {}: {}", MANIFEST_FILE_NAME, e)
        }
        other => writeln!(out, "❌ Error: Failed to read {}: {}", MANIFEST_FILE_NAME, other),
    }
}

fn report_failure<W: Write>(
    out: &mut W,
    stage: &str,
    errors: &[ValidationError],
) -> io::Result<()> {
    if let [single] = errors {
        return writeln!(out, "❌ {} validation failed: {}", stage, single);
    }

    writeln!(
        out,
        "❌ {} validation failed with {} errors:",
        stage,
        errors.len()
    )?;
    for error in errors {
        writeln!(out, "   - {}", error)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use omni_manifest::REQUIRED_FILES;
    use std::fs;
    use tempfile::TempDir;

    const VALID_MANIFEST: &str = r#"{
  "id": "com.omnitak.example",
  "name": "Example Plugin",
  "version": "0.1.0",
  "description": "Example OmniTAK plugin",
  "author": "OmniTAK",
  "license": "MIT",
  "omnitak_version": ">=0.1.0",
  "type": "ui",
  "platforms": ["ios"],
  "permissions": ["ui.create", "notifications.send"],
  "entry_points": { "ios": "ExamplePlugin" }
}"#;

    fn package(manifest: &str) -> Option<TempDir> {
        let temp_dir = TempDir::new().ok()?;
        for relative in REQUIRED_FILES {
            let path = temp_dir.path().join(relative);
            fs::create_dir_all(path.parent()?).ok()?;
            fs::write(path, "").ok()?;
        }
        fs::write(temp_dir.path().join(MANIFEST_FILE_NAME), manifest).ok()?;
        Some(temp_dir)
    }

    fn run(root: &Path, all_errors: bool) -> (bool, String) {
        let mut out = Vec::new();
        let valid = validate_package(root, all_errors, &mut out).unwrap_or(false);
        (valid, String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn test_valid_package() {
        let Some(dir) = package(VALID_MANIFEST) else {
            return;
        };
        let (valid, report) = run(dir.path(), false);

        assert!(valid, "report:\n{}", report);
        assert!(report.contains("Manifest validation passed"));
        assert!(report.contains("Structure validation passed"));
        assert!(report.contains("Plugin validation successful!"));
        assert!(report.contains("Plugin ID: com.omnitak.example"));
        assert!(report.contains("Permissions: ui.create, notifications.send"));
    }

    #[test]
    fn test_missing_manifest() {
        let Ok(dir) = TempDir::new() else {
            return;
        };
        let (valid, report) = run(dir.path(), false);

        assert!(!valid);
        assert!(report.contains("Error: plugin.json not found"));
    }

    #[test]
    fn test_invalid_json() {
        let Some(dir) = package("{ not json") else {
            return;
        };
        let (valid, report) = run(dir.path(), false);

        assert!(!valid);
        assert!(report.contains("Invalid JSON in plugin.json"));
        assert!(!report.contains("Validating plugin structure"));
    }

    #[test]
    fn test_first_failure_only() {
        let manifest = VALID_MANIFEST
            .replace("\"0.1.0\"", "\"0.1\"")
            .replace("ui.create", "root.access");
        let Some(dir) = package(&manifest) else {
            return;
        };
        let (valid, report) = run(dir.path(), false);

        assert!(!valid);
        assert!(report.contains("Manifest validation failed: Invalid version format: 0.1"));
        assert!(!report.contains("root.access"));
    }

    #[test]
    fn test_all_errors_mode() {
        let manifest = VALID_MANIFEST
            .replace("\"0.1.0\"", "\"0.1\"")
            .replace("ui.create", "root.access");
        let Some(dir) = package(&manifest) else {
            return;
        };
        let (valid, report) = run(dir.path(), true);

        assert!(!valid);
        assert!(report.contains("Manifest validation failed with 2 errors:"));
        assert!(report.contains("   - Invalid version format: 0.1"));
        assert!(report.contains("   - Invalid permission: root.access"));
    }

    #[test]
    fn test_missing_structure_file() {
        let Some(dir) = package(VALID_MANIFEST) else {
            return;
        };
        if fs::remove_file(dir.path().join("ios/Info.plist")).is_err() {
            return;
        }
        let (valid, report) = run(dir.path(), false);

        assert!(!valid);
        assert!(report.contains("Manifest validation passed"));
        assert!(report
            .contains("Structure validation failed: Missing required file: ios/Info.plist"));
    }
}
