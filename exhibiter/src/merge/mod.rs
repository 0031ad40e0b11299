//! Building the output PDF.
//!
//! - [`PageSequence`] binds pages, in order, into one document
//! - [`BookmarkManager`] adds an outline entry per exhibit
//! - [`MetadataManager`] fills the Info dictionary
//!
//! # Examples
//!
//! ```no_run
//! use exhibiter::merge::{DocumentInfo, PageSequence};
//! use exhibiter::render::{LopdfRenderer, PageRenderer};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let renderer = LopdfRenderer::new();
//! let mut sequence = PageSequence::new();
//!
//! let cover = renderer.render_cover_page(&"101".parse()?)?;
//! sequence.push_bookmarked(cover, "EXHIBIT 101: Lease")?;
//!
//! let document = sequence.finish(&DocumentInfo::new("Defense Exhibits"), true)?;
//! # Ok(())
//! # }
//! ```

pub mod binder;
pub mod bookmarks;
pub mod metadata;

pub use binder::PageSequence;
pub use bookmarks::{BookmarkManager, OutlineEntry};
pub use metadata::{DocumentInfo, MetadataManager};

use lopdf::{Object, StringFormat};

/// Encode `text` as a PDF text string: plain bytes when ASCII, UTF-16BE
/// with a byte order mark otherwise.
pub(crate) fn text_string(text: &str) -> Object {
    let bytes = if text.is_ascii() {
        text.as_bytes().to_vec()
    } else {
        [0xFE, 0xFF]
            .into_iter()
            .chain(text.encode_utf16().flat_map(u16::to_be_bytes))
            .collect()
    };
    Object::String(bytes, StringFormat::Literal)
}
