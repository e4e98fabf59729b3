//! Page model types.
//!
//! Named page sizes, geometry primitives, and the owned page content tree
//! that the fit transform rewrites. Nothing here touches a PDF file.

mod geometry;
mod page;
mod page_size;

pub use geometry::{Matrix, Rect};
pub use page::{ContentNode, Group, Page, StreamId};
pub use page_size::{
    PageSize, PageSizeTable, DEFAULT_PAGE_SIZE, POINTS_PER_INCH, POINTS_PER_MM,
};
