//! Linear-trend slope (ordinary least squares, degree 1)

pub const DEFAULT_SLOPE_WINDOW: usize = 5;

/// Slope of the OLS line through `(0, y0), (1, y1), ...`.
pub fn ols_slope(ys: &[f64]) -> f64 {
    let n = ys.len();
    if n < 2 {
        return 0.0;
    }

    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = ys.iter().sum::<f64>() / n as f64;

    let mut num = 0.0;
    let mut den = 0.0;
    for (x, y) in ys.iter().enumerate() {
        let dx = x as f64 - x_mean;
        num += dx * (y - y_mean);
        den += dx * dx;
    }

    num / den
}

/// Slope over the `window` values ending at `end` (inclusive).
///
/// `None` when the window reaches before the start of the sequence or
/// contains an undefined value.
pub fn trailing_slope(values: &[Option<f64>], end: usize, window: usize) -> Option<f64> {
    if window == 0 || end >= values.len() || end + 1 < window {
        return None;
    }

    let ys = values[end + 1 - window..=end]
        .iter()
        .copied()
        .collect::<Option<Vec<f64>>>()?;

    Some(ols_slope(&ys))
}

/// Rolling slope for every position.
///
/// Incomplete windows and windows holding an undefined value read `0.0`,
/// which downstream rules treat as neither rising nor falling.
pub fn linear_slope(values: &[Option<f64>], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| trailing_slope(values, i, window).unwrap_or(0.0))
        .collect()
}
