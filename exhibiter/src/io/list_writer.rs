//! Writing the rendered exhibit list.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::{format_file_size, temp_file_in};
use crate::error::{ExhibitError, Result};

/// Statistics about a list write.
#[derive(Debug, Clone)]
pub struct ListWriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl ListWriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Writes exhibit lists with tokio, through a temporary sibling file.
#[derive(Debug, Clone, Default)]
pub struct ListWriter;

impl ListWriter {
    /// Create a list writer.
    pub fn new() -> Self {
        Self
    }

    /// Write `contents` to `path`, replacing any existing file.
    ///
    /// The list goes to a uniquely named temporary file in the target
    /// directory first and is renamed into place.
    pub async fn save(&self, contents: &str, path: &Path) -> Result<ListWriteStatistics> {
        let start = Instant::now();
        let temp = temp_file_in(path)?;

        if let Err(source) = tokio::fs::write(temp.path(), contents).await {
            return Err(ExhibitError::FailedToWrite {
                path: path.to_path_buf(),
                source,
            });
        }

        temp.persist(path).map_err(|e| ExhibitError::FailedToWrite {
            path: path.to_path_buf(),
            source: e.error,
        })?;

        Ok(ListWriteStatistics {
            write_time: start.elapsed(),
            file_size: contents.len() as u64,
            output_path: path.to_path_buf(),
        })
    }
}
