//! Unit tests for volume participation

use macroscope::indicators::volume::{volume_ratio, volume_spike};

#[test]
fn test_volume_ratio() {
    let ratios = volume_ratio(&[10.0, 30.0, 5.0], &[None, Some(20.0), Some(0.0)]);
    assert_eq!(ratios, vec![None, Some(1.5), None]);
}

#[test]
fn test_volume_spike_is_strictly_greater() {
    let spikes = volume_spike(&[Some(1.5), Some(1.3), Some(0.9), None], 1.3);
    assert_eq!(spikes, vec![1, 0, 0, 0]);
}
