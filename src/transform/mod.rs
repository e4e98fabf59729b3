//! Page fitting: the pure fit computation and the page rewrite it drives.

mod fit;
mod rewrite;

pub use fit::{compute_fit, FitResult};
pub use rewrite::{fit_page, rewrite_page};
