//! Document backend abstraction layer.
//!
//! Provides a trait-based interface for page access, isolating the concrete
//! PDF library (lopdf) from the fitting logic.

mod lopdf_backend;

pub use lopdf_backend::LopdfBackend;

use crate::error::Result;
use crate::model::Page;

/// Indexed read/write access to the pages of an open document.
///
/// Indices are 0-based and follow document order.
pub trait PageStore {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Read a page's extent, boundary boxes and content tree.
    fn read_page(&self, index: usize) -> Result<Page>;

    /// Write a page's extent, boundary boxes and content tree back.
    fn write_page(&mut self, index: usize, page: &Page) -> Result<()>;
}
