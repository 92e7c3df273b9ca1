//! Duplicate build-file cleanup for Xcode `project.pbxproj` files
//!
//! Xcode occasionally records the same source file twice in a target's
//! `PBXSourcesBuildPhase`, which makes the build fail with duplicate symbols.
//! This crate removes the repeated entries, section by section, after saving a
//! byte-identical backup next to the project file.

pub mod backup;
pub mod errors;
pub mod fix;
pub mod sources_phase;

pub use backup::{backup_path_for, create_backup, BACKUP_SUFFIX};
pub use errors::PbxprojError;
pub use fix::{fix_duplicate_build_files, preview_duplicate_build_files, DedupReport};
pub use sources_phase::{
    dedup_source_phases, source_entry_name, Deduplicated, SOURCES_PHASE_BEGIN, SOURCES_PHASE_END,
};
