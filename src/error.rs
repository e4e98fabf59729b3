//! Error types for pagefit library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pagefit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while resizing documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The page size name is not in the page size table.
    #[error("Page size not recognized: {0}")]
    UnknownPageSize(String),

    /// Two entries of a page size table share a name.
    #[error("Duplicate page size name: {0}")]
    DuplicatePageSize(String),

    /// The input folder does not exist or is not a directory.
    #[error("Input folder does not exist or is not a directory: {}", .0.display())]
    InputFolderMissing(PathBuf),

    /// The input folder has no entries at all.
    #[error("Input folder is empty: {}", .0.display())]
    InputFolderEmpty(PathBuf),

    /// A page extent that cannot be fitted (non-positive or non-finite).
    #[error("Invalid page geometry: {width} x {height}")]
    InvalidGeometry {
        /// Source width in points
        width: f64,
        /// Source height in points
        height: f64,
    },

    /// A failure on a specific page (1-indexed).
    #[error("Page {page}: {source}")]
    Page {
        /// Page number (1-indexed)
        page: usize,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },

    /// A failure attributed to one input file of a batch.
    #[error("{}: {source}", .path.display())]
    File {
        /// The input file being processed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing or writing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// The PDF structure is corrupted or malformed.
    #[error("Corrupted PDF structure: {0}")]
    Corrupted(String),

    /// A required PDF object is missing.
    #[error("Missing required object: {0}")]
    MissingObject(String),

    /// Page index is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(usize, usize),
}

impl Error {
    /// Whether this error was caused by the caller's input rather than by a
    /// document or the filesystem.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownPageSize(_)
                | Error::DuplicatePageSize(_)
                | Error::InputFolderMissing(_)
                | Error::InputFolderEmpty(_)
        )
    }

    /// Whether this error (or the error it wraps) is an invalid page geometry.
    pub fn is_invalid_geometry(&self) -> bool {
        match self {
            Error::InvalidGeometry { .. } => true,
            Error::Page { source, .. } | Error::File { source, .. } => {
                source.is_invalid_geometry()
            }
            _ => false,
        }
    }

    pub(crate) fn on_page(self, page: usize) -> Self {
        Error::Page {
            page,
            source: Box::new(self),
        }
    }

    pub(crate) fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Error::File {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
