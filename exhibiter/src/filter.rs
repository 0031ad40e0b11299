//! Inclusion predicates shared by every stage of assembly.
//!
//! A name is excluded when it carries an `(UNUSED)` or legacy `(EXCLUDE)`
//! marker, in any letter case. Callers pass their `respect_exclusions`
//! flag explicitly; nothing here holds state.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Extensions accepted as page sources, lower-case.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["pdf", "png", "jpg", "jpeg"];

/// Name of the file whose text fills an exhibit's disputes column.
pub const DISPUTE_FILE: &str = "evidentiary disputes.txt";

static EXCLUSION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\((?:unused|exclude)\)").unwrap());

/// The marker plus one adjacent space: the leading space when there is
/// one, otherwise a trailing one.
static EXCLUSION_MARKER_WITH_SPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i) \((?:unused|exclude)\)|\((?:unused|exclude)\) ?").unwrap()
});

/// Check whether a file name has a supported extension.
pub fn is_supported_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Check whether a name carries an exclusion marker.
pub fn is_excluded(name: &str) -> bool {
    EXCLUSION_MARKER.is_match(name)
}

/// Decide whether a name survives the filter.
pub fn passes(name: &str, respect_exclusions: bool) -> bool {
    !respect_exclusions || !is_excluded(name)
}

/// Remove every exclusion marker together with one adjacent space.
pub fn strip_exclusion_marker(name: &str) -> String {
    EXCLUSION_MARKER_WITH_SPACE.replace_all(name, "").into_owned()
}
