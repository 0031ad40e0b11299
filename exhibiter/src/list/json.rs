//! JSON rendering of the exhibit list.

use serde::Serialize;

use super::{ExhibitList, ExhibitRow};
use crate::config::Party;
use crate::error::{ExhibitError, Result};

#[derive(Serialize)]
struct JsonList<'a> {
    title: String,
    heading: String,
    attachment_no: u32,
    party: Party,
    rows: &'a [ExhibitRow],
}

/// Render `list` as pretty-printed JSON.
pub fn render(list: &ExhibitList) -> Result<String> {
    let json = JsonList {
        title: list.title(),
        heading: list.heading(),
        attachment_no: list.attachment_no(),
        party: list.party(),
        rows: list.rows(),
    };

    let mut out = serde_json::to_string_pretty(&json)
        .map_err(|e| ExhibitError::other(format!("Failed to serialize exhibit list: {e}")))?;
    out.push('\n');
    Ok(out)
}
