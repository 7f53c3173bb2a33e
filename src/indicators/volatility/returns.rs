//! Return-based volatility: percent change and rolling standard deviation

/// One-step percent change. `None` at the first position and after a zero
/// price.
pub fn pct_change(values: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    if values.is_empty() {
        return out;
    }
    out.push(None);

    for pair in values.windows(2) {
        if pair[0] == 0.0 {
            out.push(None);
        } else {
            out.push(Some(pair[1] / pair[0] - 1.0));
        }
    }

    out
}

/// Trailing sample standard deviation (n - 1 denominator).
pub fn rolling_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window < 2 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let slice = values[i + 1 - window..=i]
                .iter()
                .copied()
                .collect::<Option<Vec<f64>>>()?;
            let mean = slice.iter().sum::<f64>() / window as f64;
            let var = slice.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (window - 1) as f64;
            Some(var.sqrt())
        })
        .collect()
}

/// Rolling standard deviation of one-step returns over `window` returns.
pub fn return_volatility(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling_std(&pct_change(closes), window)
}
