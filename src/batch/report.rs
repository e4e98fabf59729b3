//! Batch results.

use std::path::PathBuf;

use serde::Serialize;

use crate::model::PageSize;

/// A file written by the batch.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Number of pages resized
    pub pages: usize,
}

/// A file skipped in lenient mode.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub input: PathBuf,
    /// Human-readable error description
    pub error: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub page_size: PageSize,
    pub files: Vec<FileReport>,
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    pub(crate) fn new(input_dir: PathBuf, output_dir: PathBuf, page_size: PageSize) -> Self {
        Self {
            input_dir,
            output_dir,
            page_size,
            files: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Total pages resized across all written files.
    pub fn total_pages(&self) -> usize {
        self.files.iter().map(|f| f.pages).sum()
    }

    /// Whether every eligible file was written.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_totals() {
        let mut report = BatchReport::new(
            PathBuf::from("in"),
            PathBuf::from("in/out"),
            PageSize::new("LETTER", 612.0, 792.0),
        );
        report.files.push(FileReport {
            input: PathBuf::from("in/a.pdf"),
            output: PathBuf::from("in/out/a_out.pdf"),
            pages: 3,
        });
        report.files.push(FileReport {
            input: PathBuf::from("in/b.pdf"),
            output: PathBuf::from("in/out/b_out.pdf"),
            pages: 0,
        });
        assert_eq!(report.total_pages(), 3);
        assert!(report.is_success());

        report.failures.push(FileFailure {
            input: PathBuf::from("in/c.pdf"),
            error: "Document is encrypted".to_string(),
        });
        assert!(!report.is_success());
    }

    #[test]
    fn test_report_json() {
        let report = BatchReport::new(
            PathBuf::from("in"),
            PathBuf::from("in/out"),
            PageSize::new("A4", 595.0, 842.0),
        );
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["page_size"]["name"], "A4");
        assert_eq!(value["files"].as_array().unwrap().len(), 0);
    }
}
