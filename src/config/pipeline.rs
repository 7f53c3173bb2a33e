//! Pipeline parameters

use serde::{Deserialize, Serialize};

use crate::alignment::AlignPolicy;
use crate::error::PipelineError;

/// Windows and thresholds for annotating the primary series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub ma_short: usize,
    pub ma_long: usize,
    pub slope_window: usize,
    pub volume_ma: usize,
    pub volume_spike_ratio: f64,
    pub rsi_length: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            ma_short: 20,
            ma_long: 60,
            slope_window: 5,
            volume_ma: 20,
            volume_spike_ratio: 1.3,
            rsi_length: 14,
        }
    }
}

impl FrameConfig {
    /// Leading rows with at least one undefined windowed field.
    pub fn warmup(&self) -> usize {
        [
            self.ma_short,
            self.ma_long,
            self.volume_ma,
            self.ma_short + self.slope_window.saturating_sub(1),
            2,
        ]
        .into_iter()
        .max()
        .unwrap_or(1)
        .saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroConfig {
    /// First primary index that is scored.
    pub warmup: usize,
}

impl Default for MacroConfig {
    fn default() -> Self {
        Self { warmup: 60 }
    }
}

/// Relative strength and final signal rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    pub baseline_policy: AlignPolicy,
    pub rs_ma_window: usize,
    pub rs_slope_window: usize,
    pub internal_window: usize,
    pub internal_min: u32,
    pub buy_min_score: u8,
    pub sell_max_score: u8,
    /// Sell additionally requires a falling short moving average.
    pub sell_requires_downtrend: bool,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            baseline_policy: AlignPolicy::Pad,
            rs_ma_window: 20,
            rs_slope_window: 5,
            internal_window: 2,
            internal_min: 1,
            buy_min_score: 2,
            sell_max_score: 1,
            sell_requires_downtrend: true,
        }
    }
}

impl FusionConfig {
    /// Buy needs a rising slope; sell either needs a falling one or a score
    /// no buy can have. Anything else lets a date carry both flags.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.internal_window == 0 || self.rs_ma_window == 0 || self.rs_slope_window == 0 {
            return Err(PipelineError::InvalidConfig(
                "fusion windows must be positive".to_string(),
            ));
        }
        if !self.sell_requires_downtrend && self.sell_max_score >= self.buy_min_score {
            return Err(PipelineError::InvalidConfig(format!(
                "sell_max_score {} overlaps buy_min_score {}",
                self.sell_max_score, self.buy_min_score
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub frame: FrameConfig,
    pub macro_scoring: MacroConfig,
    pub fusion: FusionConfig,
}
