//! Reading `plugin.json` into an untyped document

use crate::errors::{ManifestError, ValidationError};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// A parsed manifest that has not been validated yet.
///
/// Kept untyped: each check decodes only the field it reads, at its own
/// position in the check order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManifestDocument {
    fields: Map<String, Value>,
}

impl ManifestDocument {
    pub fn from_value(value: Value) -> Result<Self, ManifestError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(ManifestError::NotAnObject),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self, ManifestError> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// The raw value of a field, or [`ValidationError::MissingField`]
    pub fn field(&self, field: &str) -> Result<&Value, ValidationError> {
        self.fields
            .get(field)
            .ok_or_else(|| ValidationError::MissingField(field.to_string()))
    }

    /// Decode one field, naming it in the error when it is absent or mistyped
    pub fn decode_field<T: DeserializeOwned>(&self, field: &str) -> Result<T, ValidationError> {
        T::deserialize(self.field(field)?).map_err(|e| ValidationError::InvalidField {
            field: field.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Load the manifest at `path`
pub fn load_manifest(path: &Path) -> Result<ManifestDocument, ManifestError> {
    debug!("Reading plugin manifest from: {:?}", path);

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(ManifestError::NotFound(path.to_path_buf()));
        }
        Err(err) => return Err(ManifestError::Io(err)),
    };

    ManifestDocument::from_json_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_manifest() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let result = load_manifest(&temp_dir.path().join("plugin.json"));
        assert!(matches!(result, Err(ManifestError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_json() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("plugin.json");
        assert!(fs::write(&path, "{ \"id\": ").is_ok());

        let result = load_manifest(&path);
        assert!(matches!(result, Err(ManifestError::Json(_))));
    }

    #[test]
    fn test_load_invalid_utf8() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("plugin.json");
        assert!(fs::write(&path, b"{\xff\xfe}").is_ok());

        let result = load_manifest(&path);
        assert!(matches!(result, Err(ManifestError::Io(_))));
    }

    #[test]
    fn test_root_must_be_object() {
        let result = ManifestDocument::from_json_str("[\"id\"]");
        assert!(matches!(result, Err(ManifestError::NotAnObject)));
    }

    #[test]
    fn test_decode_field_names_the_field() {
        let Ok(doc) = ManifestDocument::from_value(json!({ "version": 1.2 })) else {
            return;
        };
        let result = doc.decode_field::<String>("version");
        assert!(matches!(
            result,
            Err(ValidationError::InvalidField { ref field, .. }) if field == "version"
        ));
        assert_eq!(
            doc.decode_field::<String>("id"),
            Err(ValidationError::MissingField("id".to_string()))
        );
        assert_eq!(doc.field("version"), Ok(&json!(1.2)));
    }
}
