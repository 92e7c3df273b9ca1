//! Line pass over the `PBXSourcesBuildPhase` sections of a project file
//!
//! Only [`source_entry_name`] knows how an entry line is spelled; the filter
//! itself works on section markers and extracted names.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

/// Marker comment opening a sources build phase section
pub const SOURCES_PHASE_BEGIN: &str = "Begin PBXSourcesBuildPhase";
/// Marker comment closing a sources build phase section
pub const SOURCES_PHASE_END: &str = "End PBXSourcesBuildPhase";

const SOURCES_ENTRY_MARKER: &str = " in Sources */";

#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static SOURCE_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/\* (.+?) in Sources \*/").expect("source entry pattern must compile")
});

/// Extract the file name from a build phase entry comment.
///
/// `A1B2C3 /* MapView.swift in Sources */,` yields `MapView.swift`.
pub fn source_entry_name(line: &str) -> Option<&str> {
    SOURCE_ENTRY
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Result of a deduplication pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deduplicated {
    /// The rewritten file content
    pub content: String,
    /// Names of the dropped entries, in the order they were dropped
    pub removed: Vec<String>,
}

impl Deduplicated {
    pub fn duplicates_removed(&self) -> usize {
        self.removed.len()
    }
}

#[derive(Default)]
struct SourcesPhaseFilter {
    in_sources_phase: bool,
    seen: HashSet<String>,
    removed: Vec<String>,
}

impl SourcesPhaseFilter {
    /// Decide whether `line` survives. Anything the filter does not recognize is kept.
    fn keep(&mut self, line: &str) -> bool {
        if line.contains(SOURCES_PHASE_BEGIN) {
            self.in_sources_phase = true;
            return true;
        }

        if line.contains(SOURCES_PHASE_END) {
            self.in_sources_phase = false;
            self.seen.clear();
            return true;
        }

        if !self.in_sources_phase || !line.contains(SOURCES_ENTRY_MARKER) {
            return true;
        }

        let Some(name) = source_entry_name(line) else {
            return true;
        };

        if self.seen.insert(name.to_string()) {
            true
        } else {
            debug!("Removing duplicate: {}", name);
            self.removed.push(name.to_string());
            false
        }
    }
}

/// Drop repeated entries inside every sources build phase section.
///
/// Names are unique per section: the seen-set resets when a section closes.
/// Line terminators are kept as they are in `content`.
pub fn dedup_source_phases(content: &str) -> Deduplicated {
    let mut filter = SourcesPhaseFilter::default();
    let mut output = String::with_capacity(content.len());

    for line in content.split_inclusive('\n') {
        if filter.keep(line) {
            output.push_str(line);
        }
    }

    Deduplicated {
        content: output,
        removed: filter.removed,
    }
}
