//! Containment fit of a source extent onto a named page size.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Matrix, PageSize};

/// Target page dimensions plus the uniform scale and centering offsets that
/// place the source content on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// Orientation-corrected target width in points
    pub target_width: f64,
    /// Orientation-corrected target height in points
    pub target_height: f64,
    pub scale: f64,
    pub dx: f64,
    pub dy: f64,
}

impl FitResult {
    /// The content transform `[scale 0 0 scale dx dy]`.
    pub fn matrix(&self) -> Matrix {
        Matrix::scale_translate(self.scale, self.dx, self.dy)
    }

    pub fn target_dimensions(&self) -> (f64, f64) {
        (self.target_width, self.target_height)
    }
}

/// Compute how a `source_width` x `source_height` extent fits `requested`.
///
/// A landscape source (`width > height`) gets the landscape variant of the
/// requested size. Portrait and square sources keep the requested size as
/// given.
///
/// The scale is the largest uniform factor keeping both axes within the
/// target, and may exceed 1. Content is centered on both axes.
///
/// Fails with [`Error::InvalidGeometry`] if either source dimension is not a
/// positive finite number.
pub fn compute_fit(
    source_width: f64,
    source_height: f64,
    requested: &PageSize,
) -> Result<FitResult> {
    if !(source_width > 0.0 && source_height > 0.0)
        || !source_width.is_finite()
        || !source_height.is_finite()
    {
        return Err(Error::InvalidGeometry {
            width: source_width,
            height: source_height,
        });
    }

    let (mut target_width, mut target_height) = requested.dimensions();
    if source_width > source_height && target_width < target_height {
        std::mem::swap(&mut target_width, &mut target_height);
    }

    let scale = (target_width / source_width).min(target_height / source_height);
    let dx = (target_width - source_width * scale) / 2.0;
    let dy = (target_height - source_height * scale) / 2.0;

    Ok(FitResult {
        target_width,
        target_height,
        scale,
        dx,
        dy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter() -> PageSize {
        PageSize::new("LETTER", 612.0, 792.0)
    }

    #[test]
    fn test_identity_fit() {
        let fit = compute_fit(612.0, 792.0, &letter()).unwrap();
        assert_eq!(fit.target_dimensions(), (612.0, 792.0));
        assert_eq!(fit.scale, 1.0);
        assert_eq!(fit.dx, 0.0);
        assert_eq!(fit.dy, 0.0);
        assert!(fit.matrix().is_identity());
    }

    #[test]
    fn test_landscape_source_swaps_target() {
        let fit = compute_fit(1000.0, 500.0, &letter()).unwrap();
        assert_eq!(fit.target_dimensions(), (792.0, 612.0));
        assert!((fit.scale - 0.792).abs() < 1e-12);
        assert!(fit.dx.abs() < 1e-9);
        assert!((fit.dy - 108.0).abs() < 1e-9);
    }

    #[test]
    fn test_landscape_size_is_not_swapped_back() {
        let ledger = PageSize::new("LEDGER", 1224.0, 792.0);
        let fit = compute_fit(1000.0, 500.0, &ledger).unwrap();
        assert_eq!(fit.target_dimensions(), (1224.0, 792.0));
    }

    #[test]
    fn test_square_source_keeps_portrait() {
        let fit = compute_fit(500.0, 500.0, &letter()).unwrap();
        assert_eq!(fit.target_dimensions(), (612.0, 792.0));
        assert!((fit.scale - 612.0 / 500.0).abs() < 1e-12);
        assert!(fit.dx.abs() < 1e-9);
        assert!((fit.dy - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_small_source_is_enlarged() {
        let fit = compute_fit(306.0, 396.0, &letter()).unwrap();
        assert!((fit.scale - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_geometry() {
        for (w, h) in [(0.0, 792.0), (612.0, 0.0), (-1.0, 10.0), (f64::NAN, 1.0), (f64::INFINITY, 1.0)] {
            let result = compute_fit(w, h, &letter());
            assert!(
                matches!(result, Err(Error::InvalidGeometry { .. })),
                "{w} x {h} should be rejected"
            );
        }
    }
}
