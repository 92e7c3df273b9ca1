use crate::errors::PbxprojError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Appended to the project file name to form the backup name
pub const BACKUP_SUFFIX: &str = ".backup";

/// Sibling backup path: `project.pbxproj` -> `project.pbxproj.backup`
pub fn backup_path_for(project: &Path) -> PathBuf {
    let mut name = project
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(BACKUP_SUFFIX);
    project.with_file_name(name)
}

/// Copy `project` to its backup path, replacing any previous backup
pub fn create_backup(project: &Path) -> Result<PathBuf, PbxprojError> {
    if !project.is_file() {
        return Err(PbxprojError::ProjectNotFound(project.to_path_buf()));
    }

    let backup = backup_path_for(project);
    if backup.exists() {
        debug!("Removing previous backup: {:?}", backup);
        fs::remove_file(&backup).map_err(|source| PbxprojError::Backup {
            path: backup.clone(),
            source,
        })?;
    }

    fs::copy(project, &backup).map_err(|source| PbxprojError::Backup {
        path: backup.clone(),
        source,
    })?;

    Ok(backup)
}
