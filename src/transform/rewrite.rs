//! Applying a fit to a page's boxes and content tree.

use crate::error::Result;
use crate::model::{ContentNode, Group, Page, PageSize, Rect};

use super::fit::{compute_fit, FitResult};

/// Resize `page` to the fit's target and move its content under one group
/// carrying the fit transform.
///
/// Afterwards the page has exactly one child, a group whose children are the
/// page's original children in their original order. A page without children
/// ends up with one empty group.
pub fn rewrite_page(page: &mut Page, fit: &FitResult) {
    page.set_size(fit.target_width, fit.target_height);
    page.set_all_boxes(Rect::from_size(fit.target_width, fit.target_height));

    let mut group = Group::new(fit.matrix());
    for child in page.extract_children() {
        group.append_child(child);
    }

    page.append_child(ContentNode::Group(group));
}

/// Fit `page` to `requested` using the page's current extent, rewrite it, and
/// return the fit that was applied.
pub fn fit_page(page: &mut Page, requested: &PageSize) -> Result<FitResult> {
    let fit = compute_fit(page.width, page.height, requested)?;
    rewrite_page(page, &fit);
    Ok(fit)
}
