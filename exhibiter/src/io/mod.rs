//! I/O operations for exhibiter.
//!
//! This module handles all file I/O:
//! - Loading source PDFs and splitting them into pages
//! - Writing the evidence PDF
//! - Writing the exhibit list
//!
//! # Examples
//!
//! ```no_run
//! use exhibiter::io::{PdfReader, PdfWriter};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(&PathBuf::from("input.pdf"))?;
//!
//! let writer = PdfWriter::new();
//! writer.save(loaded.document, &PathBuf::from("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

pub mod list_writer;
pub mod reader;
pub mod writer;

pub use list_writer::{ListWriteStatistics, ListWriter};
pub use reader::{LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};

use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::{ExhibitError, Result};

/// Check that an output file could be created at `path`.
///
/// Performs pre-flight checks without writing anything.
///
/// # Errors
///
/// Returns an error if:
/// - Parent directory doesn't exist
/// - Parent directory is not writable
/// - `path` is an existing directory
pub async fn can_write(path: &Path) -> Result<()> {
    if tokio::fs::metadata(path)
        .await
        .is_ok_and(|metadata| metadata.is_dir())
    {
        return Err(ExhibitError::invalid_config(format!(
            "Output path is a directory: {}",
            path.display()
        )));
    }

    let parent = output_dir(path);
    let metadata = tokio::fs::metadata(parent).await.map_err(|_| {
        ExhibitError::invalid_config(format!(
            "Output directory does not exist: {}",
            parent.display()
        ))
    })?;

    if metadata.permissions().readonly() {
        return Err(ExhibitError::invalid_config(format!(
            "Output directory is not writable: {}",
            parent.display()
        )));
    }

    Ok(())
}

/// Check if an output file exists.
pub async fn exists(path: &Path) -> bool {
    tokio::fs::metadata(path).await.is_ok()
}

/// Directory an output file lands in; `.` for bare file names.
fn output_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// A temporary file in the same directory as `path`, removed on drop
/// unless persisted.
pub(crate) fn temp_file_in(path: &Path) -> Result<NamedTempFile> {
    tempfile::Builder::new()
        .prefix(".exhibiter-")
        .suffix(".tmp")
        .tempfile_in(output_dir(path))
        .map_err(|e| ExhibitError::FailedToCreateOutput {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_can_write() {
        let temp_dir = TempDir::new().unwrap();
        assert!(can_write(&temp_dir.path().join("out.pdf")).await.is_ok());
    }

    #[tokio::test]
    async fn test_can_write_bare_file_name() {
        assert!(can_write(Path::new("Defense Exhibits.pdf")).await.is_ok());
    }

    #[tokio::test]
    async fn test_can_write_nonexistent_directory() {
        assert!(can_write(Path::new("/nonexistent/output.pdf")).await.is_err());
    }

    #[tokio::test]
    async fn test_can_write_rejects_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(can_write(temp_dir.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_exists() {
        let temp_dir = TempDir::new().unwrap();
        let existing = temp_dir.path().join("existing.pdf");
        std::fs::File::create(&existing).unwrap();

        assert!(exists(&existing).await);
        assert!(!exists(&temp_dir.path().join("missing.pdf")).await);
    }

    #[test]
    fn test_output_dir() {
        assert_eq!(output_dir(Path::new("out.pdf")), Path::new("."));
        assert_eq!(output_dir(Path::new("/tmp/out.pdf")), Path::new("/tmp"));
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(100), "100 bytes");
        assert_eq!(format_file_size(1024), "1.00 KB");
        assert_eq!(format_file_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_file_size(1536 * 1024), "1.50 MB");
    }
}
