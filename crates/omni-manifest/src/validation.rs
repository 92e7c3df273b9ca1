//! Manifest checks 1-7
//!
//! Every check returns the checked value, or a [`ValidationError`] naming the
//! offending value. [`validate_manifest`] runs them in order and stops at the first
//! failure.

use crate::errors::ValidationError;
use crate::loader::ManifestDocument;
use crate::types::{
    Permission, PluginManifest, PluginType, DESIGNATED_PLATFORM, DESIGNATED_PLATFORM_LABEL,
    REQUIRED_FIELDS,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static PLUGIN_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z][a-z0-9]*(\.[a-z][a-z0-9]*)+$").expect("plugin ID pattern must compile")
});

#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+\.\d+\.\d+(-[a-zA-Z0-9]+)?$").expect("version pattern must compile")
});

/// Check 1: every field in [`REQUIRED_FIELDS`] is present
pub fn check_required_fields(doc: &ManifestDocument) -> Result<(), ValidationError> {
    match REQUIRED_FIELDS.iter().find(|field| !doc.contains(field)) {
        Some(field) => Err(ValidationError::MissingField((*field).to_string())),
        None => Ok(()),
    }
}

/// Check 2: reverse-DNS ID, e.g. `com.example.weather`
pub fn check_plugin_id(id: &str) -> Result<(), ValidationError> {
    if PLUGIN_ID.is_match(id) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPluginId(id.to_string()))
    }
}

/// Check 3: `<major>.<minor>.<patch>` with an optional `-<alphanumeric>` suffix
pub fn check_version(version: &str) -> Result<(), ValidationError> {
    if VERSION.is_match(version) {
        Ok(())
    } else {
        Err(ValidationError::InvalidVersion(version.to_string()))
    }
}

/// Check 4: every permission is on the allow-list; the first unknown one is reported
pub fn check_permissions(permissions: &[String]) -> Result<Vec<Permission>, ValidationError> {
    permissions.iter().map(|p| p.parse()).collect()
}

/// Check 5: the designated platform is declared
pub fn check_platform_support(platforms: &[String]) -> Result<(), ValidationError> {
    if platforms.iter().any(|p| p == DESIGNATED_PLATFORM) {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedPlatform(
            DESIGNATED_PLATFORM_LABEL.to_string(),
        ))
    }
}

/// Check 6: the designated platform has an entry point
pub fn check_entry_point(entry_points: &Map<String, Value>) -> Result<(), ValidationError> {
    if entry_points.contains_key(DESIGNATED_PLATFORM) {
        Ok(())
    } else {
        Err(ValidationError::MissingEntryPoint(
            DESIGNATED_PLATFORM_LABEL.to_string(),
        ))
    }
}

/// Check 7: the plugin type is one of [`PluginType::ALL`]. Non-string values never match.
pub fn check_plugin_type(plugin_type: &Value) -> Result<PluginType, ValidationError> {
    match plugin_type {
        Value::String(name) => name.parse(),
        other => Err(ValidationError::InvalidPluginType(other.to_string())),
    }
}

/// Run checks 1-7 in order, stopping at the first failure.
///
/// Each check decodes only the field it reads, so a mistyped field fails at
/// its own check's position and descriptive fields are never decoded.
pub fn validate_manifest(doc: &ManifestDocument) -> Result<PluginManifest, ValidationError> {
    check_required_fields(doc)?;

    let id: String = doc.decode_field("id")?;
    check_plugin_id(&id)?;

    let version: String = doc.decode_field("version")?;
    check_version(&version)?;

    let permissions = check_permissions(&doc.decode_field::<Vec<String>>("permissions")?)?;

    let platforms: Vec<String> = doc.decode_field("platforms")?;
    check_platform_support(&platforms)?;

    let entry_points: Map<String, Value> = doc.decode_field("entry_points")?;
    check_entry_point(&entry_points)?;

    let plugin_type = check_plugin_type(doc.field("type")?)?;

    debug!("Manifest for {} passed all checks", id);
    Ok(PluginManifest {
        id,
        version,
        plugin_type,
        platforms,
        permissions,
        entry_points,
        name: doc.field("name")?.clone(),
        description: doc.field("description")?.clone(),
        author: doc.field("author")?.clone(),
        license: doc.field("license")?.clone(),
        omnitak_version: doc.field("omnitak_version")?.clone(),
    })
}

fn check_field<T, R>(
    doc: &ManifestDocument,
    field: &str,
    check: impl FnOnce(&T) -> Result<R, ValidationError>,
    errors: &mut Vec<ValidationError>,
) where
    T: DeserializeOwned,
{
    // Absent fields were already reported by the presence check.
    if !doc.contains(field) {
        return;
    }
    if let Err(err) = doc.decode_field::<T>(field).and_then(|value| check(&value)) {
        errors.push(err);
    }
}

/// Run checks 1-7 without stopping and return every failure, in check order.
///
/// Returns an empty list exactly when [`validate_manifest`] succeeds.
pub fn collect_manifest_errors(doc: &ManifestDocument) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !doc.contains(field))
        .map(|field| ValidationError::MissingField((*field).to_string()))
        .collect();

    check_field::<String, _>(doc, "id", |id| check_plugin_id(id), &mut errors);
    check_field::<String, _>(doc, "version", |v| check_version(v), &mut errors);
    check_field::<Vec<String>, _>(doc, "permissions", |p| check_permissions(p), &mut errors);
    check_field::<Vec<String>, _>(doc, "platforms", |p| check_platform_support(p), &mut errors);
    check_field::<Map<String, Value>, _>(doc, "entry_points", check_entry_point, &mut errors);
    check_field::<Value, _>(doc, "type", check_plugin_type, &mut errors);

    errors
}
