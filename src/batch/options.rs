//! Batch options and configuration.

use crate::model::{PageSize, DEFAULT_PAGE_SIZE};

/// Default name of the output subdirectory created inside the input folder.
pub const DEFAULT_OUTPUT_DIR: &str = "out";

/// Default suffix appended to each output file stem.
pub const DEFAULT_SUFFIX: &str = "_out";

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Requested page size; each page gets it in the page's own orientation
    pub page_size: PageSize,

    /// Name of the output subdirectory of the input folder
    pub output_dir_name: String,

    /// Suffix appended to the input file stem
    pub suffix: String,

    /// What to do when one file fails
    pub error_mode: ErrorMode,
}

impl BatchOptions {
    /// Create new batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the requested page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the output subdirectory name.
    pub fn with_output_dir_name(mut self, name: impl Into<String>) -> Self {
        self.output_dir_name = name.into();
        self
    }

    /// Set the output file suffix.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (record failing files and continue).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::from_inches(DEFAULT_PAGE_SIZE, 8.5, 11.0),
            output_dir_name: DEFAULT_OUTPUT_DIR.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            error_mode: ErrorMode::Strict,
        }
    }
}

/// Error handling mode across the files of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Abort the batch on the first failing file
    #[default]
    Strict,
    /// Record the failure and continue with the next file
    Lenient,
}
