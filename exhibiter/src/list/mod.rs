//! The exhibit list: one row per exhibit, ready for a court filing.
//!
//! Rows carry the exhibit number, an identification mark, a blank
//! evidence column, the description paragraphs and any evidentiary
//! disputes. The list renders as Markdown (for pandoc and word
//! processors) or JSON (for templating tools).

pub mod json;
pub mod markdown;

use serde::Serialize;

use crate::assemble::Exhibit;
use crate::config::{ListFormat, ListOptions, Party};
use crate::error::{ExhibitError, Result};
use crate::index::ExhibitIndex;

/// Mark placed in every row's ID column.
pub const ID_MARK: &str = "X";

/// Description of the row reserved for rebuttal exhibits.
pub const REBUTTAL_DESCRIPTION: &str = "Reserved for Rebuttal";

/// One row of the exhibit list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExhibitRow {
    /// Exhibit number or letter.
    pub index: ExhibitIndex,
    /// Identification mark.
    #[serde(rename = "id")]
    pub id_mark: String,
    /// Left blank for the court.
    pub evidence: String,
    /// Description paragraphs, in order.
    pub description: Vec<String>,
    /// Evidentiary disputes, verbatim.
    pub disputes: String,
}

impl ExhibitRow {
    /// A row with the standard ID mark and a blank evidence column.
    pub fn new(index: ExhibitIndex, description: Vec<String>, disputes: impl Into<String>) -> Self {
        Self {
            index,
            id_mark: ID_MARK.to_string(),
            evidence: String::new(),
            description,
            disputes: disputes.into(),
        }
    }

    /// The row describing `exhibit`.
    pub fn from_exhibit(exhibit: &Exhibit, show_page_numbers: bool) -> Self {
        Self::new(
            exhibit.index(),
            exhibit.description(show_page_numbers),
            exhibit.evidentiary_disputes().unwrap_or_default(),
        )
    }
}

/// A party's exhibit list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExhibitList {
    attachment_no: u32,
    party: Party,
    rows: Vec<ExhibitRow>,
}

impl ExhibitList {
    /// An empty list for `party`, filed as attachment `attachment_no`.
    pub fn new(attachment_no: u32, party: Party) -> Self {
        Self {
            attachment_no,
            party,
            rows: Vec::new(),
        }
    }

    /// An empty list with the header from `options`.
    pub fn from_options(options: &ListOptions) -> Self {
        Self::new(options.attachment_no, options.party)
    }

    /// Attachment number of the list in the filing.
    pub fn attachment_no(&self) -> u32 {
        self.attachment_no
    }

    /// Whose list this is.
    pub fn party(&self) -> Party {
        self.party
    }

    /// Rows in exhibit order.
    pub fn rows(&self) -> &[ExhibitRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the list has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `Attachment <N>: <Party> Exhibit List`
    pub fn title(&self) -> String {
        format!(
            "Attachment {}: {} Exhibit List",
            self.attachment_no,
            self.party.label()
        )
    }

    /// `<PARTY> EXHIBITS`
    pub fn heading(&self) -> String {
        format!("{} EXHIBITS", self.party.label().to_uppercase())
    }

    /// Append a row.
    pub fn push(&mut self, row: ExhibitRow) {
        self.rows.push(row);
    }

    /// Append the "Reserved for Rebuttal" row after the last exhibit.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or the last index has no
    /// successor.
    pub fn reserve_rebuttal(&mut self) -> Result<&ExhibitRow> {
        let last = self
            .rows
            .last()
            .map(|row| row.index)
            .ok_or_else(|| ExhibitError::other("Cannot reserve a rebuttal exhibit in an empty list"))?;

        let index = last
            .successor()
            .ok_or_else(|| ExhibitError::NoSuccessorIndex {
                index: last.to_string(),
            })?;

        self.rows.push(ExhibitRow::new(
            index,
            vec![REBUTTAL_DESCRIPTION.to_string()],
            "",
        ));
        Ok(&self.rows[self.rows.len() - 1])
    }

    /// Render the list in `format`.
    pub fn render(&self, format: ListFormat) -> Result<String> {
        match format {
            ListFormat::Markdown => Ok(markdown::render(self)),
            ListFormat::Json => json::render(self),
        }
    }
}
