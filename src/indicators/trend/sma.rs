//! Simple (arithmetic) moving average

/// Trailing mean over `window` values.
///
/// Position `i` is `None` for `i < window - 1`, and also when any value in
/// the trailing window is undefined.
pub fn moving_average_opt(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let slice = &values[i + 1 - window..=i];
            let mut sum = 0.0;
            for v in slice {
                sum += (*v)?;
            }
            Some(sum / window as f64)
        })
        .collect()
}

/// Moving average of a fully defined sequence.
pub fn moving_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let wrapped: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    moving_average_opt(&wrapped, window)
}
