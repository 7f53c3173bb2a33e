//! RSI (Relative Strength Index) indicator

pub const DEFAULT_RSI_LENGTH: usize = 14;

/// Calculate RSI for every position of `closes`.
///
/// Gains and losses are smoothed with a non-adjusted exponential average,
/// `ema_t = a * x_t + (1 - a) * ema_{t-1}` with `a = 1 / length`, seeded with
/// the first delta. RSI = 100 - (100 / (1 + ema_up / ema_down)).
///
/// The first position has no delta and is `None`. A zero `ema_down`
/// saturates at 100.
pub fn relative_strength_index(closes: &[f64], length: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(closes.len());
    if closes.is_empty() {
        return out;
    }
    out.push(None);

    let alpha = 1.0 / length.max(1) as f64;
    let mut ema_up: Option<f64> = None;
    let mut ema_down: Option<f64> = None;

    for pair in closes.windows(2) {
        let delta = pair[1] - pair[0];
        let up = delta.max(0.0);
        let down = (-delta).max(0.0);

        let next_up = match ema_up {
            Some(prev) => alpha * up + (1.0 - alpha) * prev,
            None => up,
        };
        let next_down = match ema_down {
            Some(prev) => alpha * down + (1.0 - alpha) * prev,
            None => down,
        };
        ema_up = Some(next_up);
        ema_down = Some(next_down);

        out.push(Some(rsi_from_averages(next_up, next_down)));
    }

    out
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// Calculate RSI with the default length (14)
pub fn relative_strength_index_default(closes: &[f64]) -> Vec<Option<f64>> {
    relative_strength_index(closes, DEFAULT_RSI_LENGTH)
}
