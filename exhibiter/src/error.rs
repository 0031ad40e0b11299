//! Error types for exhibiter.
//!
//! Every failure the engine can report is a variant of [`ExhibitError`].
//! All of them are fatal to a run: output files are only written after
//! every exhibit has been assembled, so an error never leaves a partial
//! filing behind.
//!
//! # Error Categories
//!
//! - **Naming Errors**: an exhibit folder or file breaks the naming grammar
//! - **Input Errors**: unsupported file types, unreadable files, bad PDFs
//! - **Run Errors**: no exhibits found, no rebuttal index available
//! - **Output Errors**: output exists, cannot be created or written

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for exhibiter operations.
pub type Result<T> = std::result::Result<T, ExhibitError>;

/// Main error type for exhibiter operations.
#[derive(Debug, Error)]
pub enum ExhibitError {
    /// An exhibit folder or file name does not follow the naming grammar.
    #[error(
        "'{}' isn't a valid name for an exhibit: {reason}\n  \
         Hint: names must start with a number or a capital letter A-Y, \
         optionally followed by a title, e.g. \"101\", \"102. Party Communications\" or \"A\"",
        path.display()
    )]
    InvalidExhibitName {
        /// Offending path.
        path: PathBuf,
        /// What is wrong with the name.
        reason: String,
    },

    /// A single-file exhibit has no title after its index.
    #[error(
        "'{}' is not a valid name for a single-document exhibit\n  \
         Hint: single-document exhibits must have a title, like \"101. Rental Agreement.pdf\"",
        path.display()
    )]
    MissingExhibitTitle {
        /// Offending path.
        path: PathBuf,
    },

    /// File extension is not one of pdf, png, jpg, jpeg.
    #[error(
        "Unsupported file type: {}\n  \
         Exhibits can be PDFs, JPGs, PNGs, or folders full of those things",
        path.display()
    )]
    UnsupportedType {
        /// Path to the unsupported file.
        path: PathBuf,
    },

    /// The input folder holds nothing that qualifies as an exhibit.
    #[error(
        "No exhibits found in: {}\n  \
         Exhibit folders must be named with a number or capital letter, e.g. \"101 (Rental Agreement)\"",
        root.display()
    )]
    NoExhibitsFound {
        /// The input root that was scanned.
        root: PathBuf,
    },

    /// The last exhibit index has no successor to reserve for rebuttal.
    #[error("Cannot reserve an exhibit for rebuttal after exhibit {index}")]
    NoSuccessorIndex {
        /// Index of the last exhibit.
        index: String,
    },

    /// Input path was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Missing path.
        path: PathBuf,
    },

    /// Input path is not a directory when one is required.
    #[error("Not a directory: {}", path.display())]
    NotADirectory {
        /// Path that is not a directory.
        path: PathBuf,
    },

    /// Failed to read an input file or folder.
    #[error("Failed to read: {}\n  Reason: {source}", path.display())]
    FailedToRead {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to load a PDF file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// PDF file is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// Failed to decode an image file.
    #[error("Failed to load image: {}\n  Reason: {reason}", path.display())]
    FailedToLoadImage {
        /// Path to the image.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  \
         Use --force to overwrite or choose a different output path",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create an output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to an output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Low-level PDF object error.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<anyhow::Error> for ExhibitError {
    fn from(err: anyhow::Error) -> Self {
        Self::invalid_config(err.to_string())
    }
}

impl ExhibitError {
    /// Create an InvalidExhibitName error.
    pub fn invalid_exhibit_name(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::InvalidExhibitName {
            path,
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedType error.
    pub fn unsupported_type(path: PathBuf) -> Self {
        Self::UnsupportedType { path }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a FailedToRead error.
    pub fn failed_to_read(path: PathBuf, source: io::Error) -> Self {
        Self::FailedToRead { path, source }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a FailedToLoadImage error.
    pub fn failed_to_load_image(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadImage {
            path,
            reason: reason.into(),
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error comes from the naming grammar.
    pub fn is_name_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidExhibitName { .. } | Self::MissingExhibitTitle { .. }
        )
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidExhibitName { .. } => 1,
            Self::MissingExhibitTitle { .. } => 1,
            Self::UnsupportedType { .. } => 1,
            Self::NoExhibitsFound { .. } => 1,
            Self::NoSuccessorIndex { .. } => 1,
            Self::FileNotFound { .. } => 2,
            Self::NotADirectory { .. } => 2,
            Self::FailedToRead { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::FailedToLoadImage { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130,
            Self::Pdf(_) => 6,
            Self::Io(_) => 5,
            Self::Other { .. } => 1,
        }
    }
}
