//! Bookmark (outline) management.
//!
//! The evidence PDF gets one flat outline entry per exhibit, pointing at
//! the exhibit's cover sheet.

use crate::error::{ExhibitError, Result};
use crate::merge::text_string;
use lopdf::{Dictionary, Document, Object, ObjectId};

/// One outline entry: a title and the page it opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    /// Text shown in the viewer's outline pane.
    pub title: String,
    /// Destination page in the output document.
    pub page_id: ObjectId,
}

/// Manager for PDF bookmarks (outlines).
#[derive(Debug, Default)]
pub struct BookmarkManager;

impl BookmarkManager {
    /// Create a new bookmark manager.
    pub fn new() -> Self {
        Self
    }

    /// Replace the document's outline with `entries`, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the document has no catalog.
    pub fn add_outline(&self, doc: &mut Document, entries: &[OutlineEntry]) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let outline_id = doc.new_object_id();
        let item_ids: Vec<ObjectId> = entries.iter().map(|_| doc.new_object_id()).collect();

        for (i, (entry, &item_id)) in entries.iter().zip(&item_ids).enumerate() {
            // [page /XYZ null null null]: open the page keeping the zoom
            let dest = vec![
                Object::Reference(entry.page_id),
                Object::Name(b"XYZ".to_vec()),
                Object::Null,
                Object::Null,
                Object::Null,
            ];

            let mut item = Dictionary::new();
            item.set("Title", text_string(&entry.title));
            item.set("Parent", Object::Reference(outline_id));
            item.set("Dest", Object::Array(dest));
            if i > 0 {
                item.set("Prev", Object::Reference(item_ids[i - 1]));
            }
            if let Some(&next) = item_ids.get(i + 1) {
                item.set("Next", Object::Reference(next));
            }

            doc.objects.insert(item_id, Object::Dictionary(item));
        }

        let mut outline = Dictionary::new();
        outline.set("Type", Object::Name(b"Outlines".to_vec()));
        outline.set("Count", Object::Integer(item_ids.len() as i64));
        if let (Some(&first), Some(&last)) = (item_ids.first(), item_ids.last()) {
            outline.set("First", Object::Reference(first));
            outline.set("Last", Object::Reference(last));
        }
        doc.objects.insert(outline_id, Object::Dictionary(outline));

        let catalog = doc
            .catalog_mut()
            .map_err(|e| ExhibitError::other(format!("Failed to get catalog: {e}")))?;
        catalog.set("Outlines", Object::Reference(outline_id));
        catalog.set("PageMode", Object::Name(b"UseOutlines".to_vec()));

        Ok(())
    }

    /// Check if a document has bookmarks.
    pub fn has_bookmarks(&self, doc: &Document) -> bool {
        doc.catalog()
            .map(|catalog| catalog.has(b"Outlines"))
            .unwrap_or(false)
    }
}
