//! Fusion of the annotated primary series with the macro score table.

use tracing::{debug, warn};

use crate::alignment::SeriesIndex;
use crate::config::FusionConfig;
use crate::indicators::trend::{linear_slope, moving_average};
use crate::models::indicators::{IndicatorFrame, IndicatorRow};
use crate::models::series::TimeSeries;
use crate::models::signal::{MacroScoreTable, SignalRow, SignalTable};

pub struct SignalFusion<'a> {
    config: &'a FusionConfig,
}

impl<'a> SignalFusion<'a> {
    pub fn new(config: &'a FusionConfig) -> Self {
        Self { config }
    }

    /// Inner-join `frame` and `scores` on date, measure the primary against
    /// `baseline` and derive the buy/sell flags.
    ///
    /// A baseline sharing no date with the joined rows yields an empty table.
    /// Rows whose baseline close cannot be resolved are dropped.
    pub fn fuse(
        &self,
        frame: &IndicatorFrame,
        scores: &MacroScoreTable,
        baseline: &TimeSeries,
    ) -> SignalTable {
        let joined: Vec<(&IndicatorRow, u8)> = frame
            .rows()
            .iter()
            .filter_map(|row| scores.score(row.date).map(|score| (row, score)))
            .collect();

        let baseline_index = SeriesIndex::new(baseline.symbol(), baseline.dates());
        let joined_dates: Vec<_> = joined.iter().map(|(row, _)| row.date).collect();
        if !baseline_index.overlaps(&joined_dates) {
            warn!(
                symbol = %frame.symbol(),
                baseline = %baseline.symbol(),
                "baseline shares no date with the scored rows"
            );
            return SignalTable::empty(frame.symbol());
        }

        let bars = baseline.bars();
        let aligned: Vec<(&IndicatorRow, u8, f64)> = joined
            .into_iter()
            .filter_map(|(row, score)| {
                let pos = baseline_index.resolve(row.date, self.config.baseline_policy)?;
                let base_close = bars[pos].close;
                if base_close == 0.0 {
                    debug!(date = %row.date, "baseline close is zero; row dropped");
                    return None;
                }
                Some((row, score, row.close / base_close))
            })
            .collect();

        let rs: Vec<f64> = aligned.iter().map(|(_, _, rs)| *rs).collect();
        let rs_defined: Vec<Option<f64>> = rs.iter().copied().map(Some).collect();
        let rs_ma = moving_average(&rs, self.config.rs_ma_window);
        let rs_slope = linear_slope(&rs_defined, self.config.rs_slope_window);
        let internal: Vec<u8> = aligned.iter().map(|(row, _, _)| row.internal_score).collect();

        let rows = aligned
            .iter()
            .enumerate()
            .map(|(i, (row, score, relative_strength))| {
                let internal_strong = self.internal_strong(&internal, i);
                let final_buy = *score >= self.config.buy_min_score
                    && row.ma_slope > 0.0
                    && internal_strong;
                let sell = *score <= self.config.sell_max_score
                    && (!self.config.sell_requires_downtrend || row.ma_slope < 0.0);

                SignalRow {
                    date: row.date,
                    close: row.close,
                    volume: row.volume,
                    ma_short: row.ma_short,
                    ma_long: row.ma_long,
                    ma_slope: row.ma_slope,
                    volume_ma: row.volume_ma,
                    rsi: row.rsi,
                    internal_score: row.internal_score,
                    macro_score: *score,
                    relative_strength: *relative_strength,
                    rs_ma: rs_ma[i],
                    rs_slope: rs_slope[i],
                    internal_strong,
                    final_buy,
                    sell,
                }
            })
            .collect();

        SignalTable::new(frame.symbol(), rows)
    }

    /// Trailing sum of volume spikes over the fusion window; undefined (false)
    /// until the window is complete.
    fn internal_strong(&self, internal: &[u8], i: usize) -> bool {
        let window = self.config.internal_window;
        if window == 0 || i + 1 < window {
            return false;
        }
        let sum: u32 = internal[i + 1 - window..=i].iter().map(|&v| v as u32).sum();
        sum >= self.config.internal_min
    }
}
