use crate::backup::create_backup;
use crate::errors::PbxprojError;
use crate::sources_phase::dedup_source_phases;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome of a dedup run against a project file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupReport {
    pub project: PathBuf,
    /// `None` for a preview, which writes nothing
    pub backup: Option<PathBuf>,
    pub removed: Vec<String>,
}

impl DedupReport {
    pub fn duplicates_removed(&self) -> usize {
        self.removed.len()
    }
}

fn read_project(project: &Path) -> Result<String, PbxprojError> {
    fs::read_to_string(project).map_err(|source| PbxprojError::Read {
        path: project.to_path_buf(),
        source,
    })
}

/// Back up `project`, then overwrite it with its duplicate entries removed.
///
/// The rewrite is a plain overwrite; the backup is the only recovery path.
pub fn fix_duplicate_build_files(project: &Path) -> Result<DedupReport, PbxprojError> {
    let backup = create_backup(project)?;
    info!("Created backup: {:?}", backup);

    let content = read_project(project)?;
    let result = dedup_source_phases(&content);
    debug!(
        "Removed {} duplicate entries from {:?}",
        result.duplicates_removed(),
        project
    );

    fs::write(project, &result.content).map_err(|source| PbxprojError::Write {
        path: project.to_path_buf(),
        source,
    })?;
    info!("Fixed project file: {:?}", project);

    Ok(DedupReport {
        project: project.to_path_buf(),
        backup: Some(backup),
        removed: result.removed,
    })
}

/// Report the entries [`fix_duplicate_build_files`] would remove, touching nothing
pub fn preview_duplicate_build_files(project: &Path) -> Result<DedupReport, PbxprojError> {
    if !project.is_file() {
        return Err(PbxprojError::ProjectNotFound(project.to_path_buf()));
    }

    let content = read_project(project)?;
    let result = dedup_source_phases(&content);

    Ok(DedupReport {
        project: project.to_path_buf(),
        backup: None,
        removed: result.removed,
    })
}
