//! Omni plugin manifest validation
//!
//! A plugin package carries a `plugin.json` manifest describing its identity,
//! compatibility and declared capabilities, next to the iOS sources it ships.
//! This crate loads that manifest and runs the fixed sequence of checks a
//! package must pass before it can be built:
//!
//! 1. all required fields present
//! 2. plugin ID in reverse-DNS form
//! 3. semantic version
//! 4. permissions drawn from the allow-list
//! 5. the iOS platform declared
//! 6. an iOS entry point declared
//! 7. a known plugin type
//! 8. the expected files present on disk
//!
//! [`validate_manifest`] stops at the first failure; [`collect_manifest_errors`]
//! reports every failure of checks 1-7 at once.

pub mod errors;
pub mod loader;
pub mod structure;
pub mod types;
pub mod validation;

pub use errors::{ManifestError, ValidationError};
pub use loader::{load_manifest, ManifestDocument};
pub use structure::{missing_structure_paths, validate_structure, REQUIRED_FILES};
pub use types::{
    Permission, PluginManifest, PluginType, DESIGNATED_PLATFORM, DESIGNATED_PLATFORM_LABEL,
    MANIFEST_FILE_NAME, REQUIRED_FIELDS,
};
pub use validation::{
    check_entry_point, check_permissions, check_platform_support, check_plugin_id,
    check_plugin_type, check_required_fields, check_version, collect_manifest_errors,
    validate_manifest,
};
