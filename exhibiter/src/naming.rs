//! Filename grammar for exhibits and documents.
//!
//! Exhibit folders are named `<index>[.][ <title>]`, where the index is a
//! number or a capital letter from A to Y:
//!
//! ```text
//! 101
//! 101 (Lease)
//! 102. Party Communications
//! A
//! ```
//!
//! Document names are derived from file stems by [`display_name`].

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::error::{ExhibitError, Result};
use crate::filter::strip_exclusion_marker;
use crate::index::ExhibitIndex;

static EXHIBIT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+|[A-Y])(?:\.?(?: (.+))?)?$").unwrap());

static SINGLE_FILE_EXHIBIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[0-9]+|[A-Y])\. (.+)$").unwrap());

static LEADING_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2})([0-9]{2})-([0-9]{2})-([0-9]{2}) (.+)$").unwrap());

static LEADING_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+\. ").unwrap());

/// Index and optional title parsed from an exhibit folder or file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExhibitName {
    /// The exhibit's index.
    pub index: ExhibitIndex,
    /// Free text after the index, if any.
    pub title: Option<String>,
}

/// Turn a file stem into a document's display name.
///
/// In order:
/// 1. drop any `(UNUSED)`/`(EXCLUDE)` marker and one adjacent space;
/// 2. rewrite a leading `YYYY-MM-DD ` date as a trailing `M/D/YY`;
/// 3. otherwise, if requested, drop a leading `"<digits>. "` prefix.
///
/// # Examples
///
/// ```
/// use exhibiter::naming::display_name;
///
/// assert_eq!(display_name("2022-03-04 Invoice", true), "Invoice 3/4/22");
/// assert_eq!(display_name("3. Lease", true), "Lease");
/// assert_eq!(display_name("3. Lease", false), "3. Lease");
/// ```
pub fn display_name(stem: &str, strip_leading_digits: bool) -> String {
    let name = strip_exclusion_marker(stem);

    if let Some(caps) = LEADING_DATE.captures(&name) {
        return format!(
            "{} {}/{}/{}",
            &caps[5],
            caps[3].trim_start_matches('0'),
            caps[4].trim_start_matches('0'),
            &caps[2]
        );
    }

    if strip_leading_digits {
        return LEADING_DIGITS.replace(&name, "").into_owned();
    }

    name
}

/// Parse an exhibit name such as `"101 (Lease)"` or `"A"`.
///
/// The title, when present, has its exclusion marker removed and
/// surrounding parentheses and spaces trimmed. `path` is only used to
/// name the offender in errors.
pub fn parse_exhibit_name(name: &str, path: &Path) -> Result<ExhibitName> {
    let caps = EXHIBIT_NAME.captures(name).ok_or_else(|| {
        ExhibitError::invalid_exhibit_name(
            path.to_path_buf(),
            "the name must start with a number or a capital letter from A-Y",
        )
    })?;

    let index: ExhibitIndex = caps[1]
        .parse()
        .map_err(|_| ExhibitError::invalid_exhibit_name(path.to_path_buf(), "invalid index"))?;

    let title = caps
        .get(2)
        .map(|rest| {
            strip_exclusion_marker(rest.as_str())
                .trim_matches(|c| c == '(' || c == ')' || c == ' ')
                .to_string()
        })
        .filter(|title| !title.is_empty());

    Ok(ExhibitName { index, title })
}

/// Check a name against the exhibit grammar without building anything.
pub fn is_exhibit_name(name: &str) -> bool {
    EXHIBIT_NAME.is_match(name)
}

/// Parse the stem of a file that stands alone as an exhibit.
///
/// Such files must be titled, e.g. `"101. Rental Agreement"`. The title
/// becomes the name of the exhibit's only document; the exhibit itself
/// has no title.
pub fn parse_single_file_exhibit(stem: &str, path: &Path) -> Result<(ExhibitIndex, String)> {
    let exhibit = parse_exhibit_name(stem, path)?;

    let title = SINGLE_FILE_EXHIBIT
        .captures(stem)
        .map(|caps| strip_exclusion_marker(&caps[1]))
        .filter(|title| !title.trim().is_empty())
        .ok_or_else(|| ExhibitError::MissingExhibitTitle {
            path: path.to_path_buf(),
        })?;

    Ok((exhibit.index, title))
}

/// Name used to classify a path: the full name for folders, the stem
/// for files.
pub fn entry_name(path: &Path) -> String {
    let name = if path.is_dir() {
        path.file_name()
    } else {
        path.file_stem()
    };
    name.map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
