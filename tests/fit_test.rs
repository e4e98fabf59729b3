//! Integration tests for the fit computation.

use pagefit::{compute_fit, Error, PageSize, PageSizeTable};

const EPSILON: f64 = 1e-9;

/// Source extents covering portrait, landscape, square, tiny and huge pages.
fn sample_sources() -> Vec<(f64, f64)> {
    vec![
        (612.0, 792.0),
        (792.0, 612.0),
        (1000.0, 500.0),
        (500.0, 1000.0),
        (300.0, 300.0),
        (1.0, 1000.0),
        (1000.0, 1.0),
        (0.5, 0.25),
        (14400.0, 14400.0),
        (2383.94, 3370.39),
    ]
}

#[test]
fn test_containment_law() {
    let table = PageSizeTable::standard();
    for size in table.iter() {
        for (w, h) in sample_sources() {
            let fit = compute_fit(w, h, size).unwrap();
            assert!(
                fit.scale * w <= fit.target_width + EPSILON,
                "{} with {w} x {h}: width overflows",
                size.name
            );
            assert!(
                fit.scale * h <= fit.target_height + EPSILON,
                "{} with {w} x {h}: height overflows",
                size.name
            );
        }
    }
}

#[test]
fn test_offsets_never_negative() {
    let table = PageSizeTable::standard();
    for size in table.iter() {
        for (w, h) in sample_sources() {
            let fit = compute_fit(w, h, size).unwrap();
            assert!(fit.dx >= -EPSILON, "{} with {w} x {h}: dx {}", size.name, fit.dx);
            assert!(fit.dy >= -EPSILON, "{} with {w} x {h}: dy {}", size.name, fit.dy);
        }
    }
}

#[test]
fn test_one_axis_is_filled() {
    let a4 = PageSizeTable::standard().lookup("A4").unwrap().clone();
    for (w, h) in sample_sources() {
        let fit = compute_fit(w, h, &a4).unwrap();
        assert!(fit.dx.abs() < 1e-6 || fit.dy.abs() < 1e-6, "{w} x {h}");
    }
}

#[test]
fn test_orientation_correction_is_idempotent() {
    let letter = PageSize::new("LETTER", 612.0, 792.0);
    let via_swap = compute_fit(1000.0, 500.0, &letter).unwrap();
    let direct = compute_fit(1000.0, 500.0, &letter.rotated()).unwrap();

    assert_eq!(via_swap.target_dimensions(), direct.target_dimensions());
    assert_eq!(via_swap.scale, direct.scale);
}

#[test]
fn test_letter_on_letter_is_identity() {
    let table = PageSizeTable::standard();
    let fit = compute_fit(612.0, 792.0, table.lookup("LETTER").unwrap()).unwrap();

    assert_eq!(fit.target_dimensions(), (612.0, 792.0));
    assert_eq!(fit.scale, 1.0);
    assert_eq!(fit.dx, 0.0);
    assert_eq!(fit.dy, 0.0);
}

#[test]
fn test_landscape_on_letter() {
    let table = PageSizeTable::standard();
    let fit = compute_fit(1000.0, 500.0, table.lookup("letter").unwrap()).unwrap();

    assert_eq!(fit.target_dimensions(), (792.0, 612.0));
    assert!((fit.scale - 0.792).abs() < EPSILON);
    assert!(fit.dx.abs() < EPSILON);
    assert!((fit.dy - 108.0).abs() < EPSILON);
}

#[test]
fn test_landscape_requested_size_with_portrait_source() {
    // LEDGER is landscape; a portrait source keeps the size as given.
    let table = PageSizeTable::standard();
    let fit = compute_fit(612.0, 792.0, table.lookup("LEDGER").unwrap()).unwrap();
    assert_eq!(fit.target_dimensions(), (1224.0, 792.0));
    assert!((fit.scale - 1.0).abs() < EPSILON);
    assert!((fit.dx - 306.0).abs() < EPSILON);
}

#[test]
fn test_non_positive_source_is_invalid_geometry() {
    let letter = PageSize::new("LETTER", 612.0, 792.0);
    let err = compute_fit(0.0, 0.0, &letter).unwrap_err();
    assert!(matches!(err, Error::InvalidGeometry { .. }));
    assert!(!err.is_user_error());
}
