//! Volume participation relative to its moving average

/// `volume / volume_ma` per position. Undefined while the average is
/// undefined or zero.
pub fn volume_ratio(volumes: &[f64], volume_ma: &[Option<f64>]) -> Vec<Option<f64>> {
    volumes
        .iter()
        .zip(volume_ma)
        .map(|(&v, ma)| match ma {
            Some(m) if *m > 0.0 => Some(v / m),
            _ => None,
        })
        .collect()
}

/// 1 where the ratio exceeds `threshold`, 0 otherwise (including undefined).
pub fn volume_spike(ratios: &[Option<f64>], threshold: f64) -> Vec<u8> {
    ratios
        .iter()
        .map(|r| u8::from(r.map_or(false, |r| r > threshold)))
        .collect()
}
