use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while patching a project file
#[derive(Error, Debug)]
pub enum PbxprojError {
    #[error("Project file not found at {}", .0.display())]
    ProjectNotFound(PathBuf),

    #[error("Failed to create backup {}: {}", .path.display(), .source)]
    Backup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
