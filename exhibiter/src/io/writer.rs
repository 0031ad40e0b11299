//! PDF writing.
//!
//! The evidence PDF is serialized off the async runtime and written
//! atomically: bytes go to a temporary file next to the destination,
//! which is renamed into place only once everything has been flushed.
//! A failed write leaves no file behind.
//!
//! # Examples
//!
//! ```no_run
//! use exhibiter::io::writer::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! let stats = writer.save(doc, Path::new("Defense Exhibits.pdf")).await?;
//! println!("Wrote {}", stats.format_file_size());
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use super::{format_file_size, temp_file_in};
use crate::config::CompressionLevel;
use crate::error::{ExhibitError, Result};

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// How hard to compress before writing.
    pub compression: CompressionLevel,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compression: CompressionLevel::Standard,
            buffer_size: 64 * 1024,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Compression applied.
    pub compression: CompressionLevel,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer with the given compression level.
    pub fn with_compression(compression: CompressionLevel) -> Self {
        Self::with_options(WriteOptions {
            compression,
            ..Default::default()
        })
    }

    /// Save a PDF document to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Output directory doesn't exist
    /// - Insufficient permissions
    /// - Write operation fails
    pub async fn save(&self, doc: Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();

        task::spawn_blocking(move || write_document(doc, path_buf, &options))
            .await
            .map_err(|e| ExhibitError::other(format!("Write task failed: {e}")))?
    }
}

fn write_document(
    mut doc: Document,
    path: PathBuf,
    options: &WriteOptions,
) -> Result<WriteStatistics> {
    let start = Instant::now();

    match options.compression {
        CompressionLevel::None => {}
        CompressionLevel::Standard => doc.compress(),
        CompressionLevel::Maximum => {
            doc.prune_objects();
            doc.compress();
        }
    }
    doc.renumber_objects();

    if options.atomic {
        let mut temp = temp_file_in(&path)?;
        let temp_path = temp.path().to_path_buf();
        write_buffered(&mut doc, temp.as_file_mut(), options.buffer_size, &temp_path)?;
        temp.persist(&path).map_err(|e| ExhibitError::FailedToWrite {
            path: path.clone(),
            source: e.error,
        })?;
    } else {
        let mut file =
            std::fs::File::create(&path).map_err(|e| ExhibitError::FailedToCreateOutput {
                path: path.clone(),
                source: e,
            })?;
        write_buffered(&mut doc, &mut file, options.buffer_size, &path)?;
    }

    let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

    Ok(WriteStatistics {
        write_time: start.elapsed(),
        file_size,
        output_path: path,
        compression: options.compression,
    })
}

fn write_buffered(
    doc: &mut Document,
    file: &mut std::fs::File,
    buffer_size: usize,
    path: &Path,
) -> Result<()> {
    let failed = |source| ExhibitError::FailedToWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = std::io::BufWriter::with_capacity(buffer_size, file);
    doc.save_to(&mut writer)
        .map_err(|e| failed(std::io::Error::other(e)))?;
    writer.flush().map_err(failed)
}
