//! # pagefit
//!
//! Batch PDF page resizing for Rust.
//!
//! Every page of every PDF in a folder is resized to a named paper size. The
//! original content keeps its proportions: it is scaled uniformly until it
//! fits the new page, centered, and drawn inside a single transformed group.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pagefit::{resize_folder, PageSizeTable};
//!
//! fn main() -> pagefit::Result<()> {
//!     let table = PageSizeTable::standard();
//!     let report = resize_folder("scans", table.lookup_or_err("A4")?)?;
//!     println!("{} files written to {}", report.files.len(), report.output_dir.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Fitting a single page
//!
//! ```
//! use pagefit::{compute_fit, PageSize};
//!
//! let letter = PageSize::new("LETTER", 612.0, 792.0);
//! let fit = compute_fit(1000.0, 500.0, &letter).unwrap();
//! assert_eq!((fit.target_width, fit.target_height), (792.0, 612.0));
//! assert!((fit.dy - 108.0).abs() < 1e-9);
//! ```
//!
//! ## Features
//!
//! - **Orientation aware**: landscape pages get the landscape variant of the size
//! - **Proportional**: one uniform scale, never distorted
//! - **Centered**: equal margins on the short axis
//! - **Consistent boxes**: crop, bleed, trim and art boxes all match the new page
//! - **Content untouched**: existing content streams are moved, never re-encoded

pub mod backend;
pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod transform;

// Re-export commonly used types
pub use backend::{LopdfBackend, PageStore};
pub use batch::{
    BatchEvent, BatchOptions, BatchProcessor, BatchReport, ErrorMode, FileFailure, FileReport,
};
pub use detect::is_supported_extension;
pub use error::{Error, Result};
pub use model::{ContentNode, Group, Matrix, Page, PageSize, PageSizeTable, Rect};
pub use transform::{compute_fit, fit_page, rewrite_page, FitResult};

use std::path::Path;

/// Resize every PDF in `input_dir` to `page_size` with default options.
///
/// Output goes to `<input_dir>/out/<stem>_out.pdf`. The first failing file
/// aborts the run.
///
/// # Example
///
/// ```no_run
/// use pagefit::{resize_folder, PageSize};
///
/// let report = resize_folder("docs", PageSize::from_mm("A5", 148.0, 210.0)).unwrap();
/// println!("Pages: {}", report.total_pages());
/// ```
pub fn resize_folder<P: AsRef<Path>>(input_dir: P, page_size: PageSize) -> Result<BatchReport> {
    BatchProcessor::new(BatchOptions::new().with_page_size(page_size)).run(input_dir)
}

/// Resize every page of one PDF file and write the result to `output`.
///
/// Returns the number of pages resized.
///
/// # Example
///
/// ```no_run
/// use pagefit::{resize_file, PageSizeTable};
///
/// let table = PageSizeTable::standard();
/// let pages = resize_file("in.pdf", "in_letter.pdf", table.default_size().unwrap()).unwrap();
/// println!("Pages: {}", pages);
/// ```
pub fn resize_file<P, Q>(input: P, output: Q, page_size: &PageSize) -> Result<usize>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let mut backend = LopdfBackend::open(input)?;
    let pages = batch::fit_document(&mut backend, page_size, |_| {})?;
    backend.save(output)?;
    Ok(pages)
}

/// Resize every page of a PDF held in memory and return the new document bytes.
pub fn resize_bytes(data: &[u8], page_size: &PageSize) -> Result<Vec<u8>> {
    let mut backend = LopdfBackend::load_bytes(data)?;
    batch::fit_document(&mut backend, page_size, |_| {})?;
    backend.save_to_bytes()
}
