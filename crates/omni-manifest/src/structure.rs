//! Check 8: the plugin package layout

use crate::errors::ValidationError;
use std::path::Path;
use tracing::debug;

/// Paths every plugin package must contain, relative to the package root
pub const REQUIRED_FILES: [&str; 4] = [
    "plugin.json",
    "ios/BUILD.bazel",
    "ios/Info.plist",
    "ios/Sources/PluginMain.swift",
];

/// Every entry of [`REQUIRED_FILES`] absent under `root`, in list order
pub fn missing_structure_paths(root: &Path) -> Vec<&'static str> {
    REQUIRED_FILES
        .into_iter()
        .filter(|relative| {
            let exists = root.join(relative).exists();
            debug!("Checking {:?}: {}", root.join(relative), exists);
            !exists
        })
        .collect()
}

/// Fail on the first entry of [`REQUIRED_FILES`] that does not exist under `root`
pub fn validate_structure(root: &Path) -> Result<(), ValidationError> {
    match missing_structure_paths(root).first() {
        Some(missing) => Err(ValidationError::MissingFile((*missing).to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn scaffold(root: &Path, paths: &[&str]) -> std::io::Result<()> {
        for relative in paths {
            let path = root.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, "")?;
        }
        Ok(())
    }

    #[test]
    fn test_complete_layout() -> std::io::Result<()> {
        let temp_dir = TempDir::new()?;
        scaffold(temp_dir.path(), &REQUIRED_FILES)?;

        assert!(missing_structure_paths(temp_dir.path()).is_empty());
        assert_eq!(validate_structure(temp_dir.path()), Ok(()));
        Ok(())
    }

    #[test]
    fn test_reports_first_missing_file() -> std::io::Result<()> {
        let temp_dir = TempDir::new()?;
        scaffold(temp_dir.path(), &["plugin.json", "ios/BUILD.bazel"])?;

        assert_eq!(
            missing_structure_paths(temp_dir.path()),
            vec!["ios/Info.plist", "ios/Sources/PluginMain.swift"]
        );
        assert_eq!(
            validate_structure(temp_dir.path()),
            Err(ValidationError::MissingFile("ios/Info.plist".to_string()))
        );
        Ok(())
    }

    #[test]
    fn test_directory_satisfies_requirement() -> std::io::Result<()> {
        let temp_dir = TempDir::new()?;
        scaffold(
            temp_dir.path(),
            &["plugin.json", "ios/BUILD.bazel", "ios/Sources/PluginMain.swift"],
        )?;
        fs::create_dir_all(temp_dir.path().join("ios/Info.plist"))?;

        assert_eq!(validate_structure(temp_dir.path()), Ok(()));
        Ok(())
    }
}
