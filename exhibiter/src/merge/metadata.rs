//! PDF metadata management.
//!
//! Fills the document Info dictionary: title and subject, creator and
//! producer, creation and modification dates.

use crate::error::{ExhibitError, Result};
use crate::merge::text_string;
use lopdf::{Dictionary, Document, Object};
use std::time::{SystemTime, UNIX_EPOCH};

/// Info dictionary contents for an output PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    /// Document title, e.g. "Defense Exhibits".
    pub title: String,
    /// Optional subject line.
    pub subject: Option<String>,
}

impl DocumentInfo {
    /// Info with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subject: None,
        }
    }
}

/// Manager for PDF metadata.
#[derive(Debug, Default)]
pub struct MetadataManager;

impl MetadataManager {
    /// Create a new metadata manager.
    pub fn new() -> Self {
        Self
    }

    /// Set the document's Info dictionary from `info`.
    pub fn set_info(&self, doc: &mut Document, info: &DocumentInfo) -> Result<()> {
        let info_id = match doc.trailer.get(b"Info").and_then(Object::as_reference) {
            Ok(id) => id,
            Err(_) => {
                let id = doc.new_object_id();
                doc.trailer.set("Info", Object::Reference(id));
                id
            }
        };

        if !matches!(doc.objects.get(&info_id), Some(Object::Dictionary(_))) {
            doc.objects
                .insert(info_id, Object::Dictionary(Dictionary::new()));
        }
        let info_dict = doc
            .get_dictionary_mut(info_id)
            .map_err(|e| ExhibitError::other(format!("Failed to create Info dictionary: {e}")))?;

        info_dict.set("Title", text_string(&info.title));
        if let Some(subject) = &info.subject {
            info_dict.set("Subject", text_string(subject));
        }

        let producer = format!("{} {}", crate::NAME, crate::VERSION);
        info_dict.set("Creator", text_string(crate::NAME));
        info_dict.set("Producer", text_string(&producer));

        let date = format_pdf_date(SystemTime::now());
        info_dict.set("CreationDate", text_string(&date));
        info_dict.set("ModDate", text_string(&date));

        Ok(())
    }

    /// The document title, if it has one.
    pub fn title(&self, doc: &Document) -> Option<String> {
        let info_id = doc.trailer.get(b"Info").and_then(Object::as_reference).ok()?;
        let info = doc.get_dictionary(info_id).ok()?;
        match info.get(b"Title").ok()? {
            Object::String(bytes, _) => decode_text_string(bytes),
            _ => None,
        }
    }
}

fn decode_text_string(bytes: &[u8]) -> Option<String> {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16(&units).ok()
        }
        _ => String::from_utf8(bytes.to_vec()).ok(),
    }
}

/// Format a SystemTime as a PDF date string in UTC.
///
/// PDF date format: D:YYYYMMDDHHmmSSZ
fn format_pdf_date(time: SystemTime) -> String {
    let secs = time
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let days = (secs / 86_400) as i64;
    let (year, month, day) = civil_from_days(days);
    let time_of_day = secs % 86_400;

    format!(
        "D:{:04}{:02}{:02}{:02}{:02}{:02}Z",
        year,
        month,
        day,
        time_of_day / 3_600,
        (time_of_day % 3_600) / 60,
        time_of_day % 60
    )
}

/// Gregorian (year, month, day) for a count of days since 1970-01-01.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
