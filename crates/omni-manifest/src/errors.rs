use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a manifest file
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Manifest not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Manifest root must be a JSON object")]
    NotAnObject,
}

/// A failed manifest or package layout check; the message names the offending value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Invalid plugin ID format: {0}")]
    InvalidPluginId(String),

    #[error("Invalid version format: {0}")]
    InvalidVersion(String),

    #[error("Invalid permission: {0}")]
    InvalidPermission(String),

    #[error("{0} platform not supported")]
    UnsupportedPlatform(String),

    #[error("Missing {0} entry point")]
    MissingEntryPoint(String),

    #[error("Invalid plugin type: {0}")]
    InvalidPluginType(String),

    #[error("Missing required file: {0}")]
    MissingFile(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::MissingField("version".to_string()).to_string(),
            "Missing required field: version"
        );
        assert_eq!(
            ValidationError::InvalidPermission("root.access".to_string()).to_string(),
            "Invalid permission: root.access"
        );
        assert_eq!(
            ValidationError::UnsupportedPlatform("iOS".to_string()).to_string(),
            "iOS platform not supported"
        );
        assert_eq!(
            ValidationError::MissingEntryPoint("iOS".to_string()).to_string(),
            "Missing iOS entry point"
        );
    }
}
