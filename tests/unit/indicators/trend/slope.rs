//! Unit tests for the OLS slope

use macroscope::indicators::trend::{linear_slope, ols_slope, trailing_slope};

#[test]
fn test_ols_slope_of_a_line() {
    assert!((ols_slope(&[3.0, 5.0, 7.0, 9.0]) - 2.0).abs() < 1e-12);
    assert!((ols_slope(&[10.0, 9.0, 8.0]) + 1.0).abs() < 1e-12);
}

#[test]
fn test_ols_slope_flat_and_degenerate() {
    assert_eq!(ols_slope(&[4.0, 4.0, 4.0]), 0.0);
    assert_eq!(ols_slope(&[4.0]), 0.0);
    assert_eq!(ols_slope(&[]), 0.0);
}

#[test]
fn test_linear_slope_incomplete_window_reads_zero() {
    let values: Vec<Option<f64>> = (0..8).map(|i| Some(i as f64 * 0.5)).collect();
    let slope = linear_slope(&values, 5);

    assert_eq!(&slope[..4], &[0.0, 0.0, 0.0, 0.0]);
    for s in &slope[4..] {
        assert!((s - 0.5).abs() < 1e-12);
    }
}

#[test]
fn test_linear_slope_undefined_input_reads_zero() {
    let values = [None, None, Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
    let slope = linear_slope(&values, 3);
    assert_eq!(slope[3], 0.0);
    assert!((slope[4] - 1.0).abs() < 1e-12);
}

#[test]
fn test_trailing_slope_bounds() {
    let values = [Some(1.0), Some(2.0), Some(3.0)];
    assert_eq!(trailing_slope(&values, 1, 3), None);
    assert_eq!(trailing_slope(&values, 3, 3), None);
    assert!(trailing_slope(&values, 2, 3).is_some());
}
