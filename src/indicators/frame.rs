//! Annotation of a raw series with the primary-asset indicators.

use crate::config::FrameConfig;
use crate::indicators::momentum::relative_strength_index;
use crate::indicators::trend::{linear_slope, moving_average};
use crate::indicators::volume::{volume_ratio, volume_spike};
use crate::models::indicators::{IndicatorFrame, IndicatorRow};
use crate::models::series::TimeSeries;

/// Compute every derived column of the primary series in one pass per
/// indicator.
pub fn annotate(series: &TimeSeries, config: &FrameConfig) -> IndicatorFrame {
    let closes = series.closes();
    let volumes = series.volumes();

    let ma_short = moving_average(&closes, config.ma_short);
    let ma_long = moving_average(&closes, config.ma_long);
    let ma_slope = linear_slope(&ma_short, config.slope_window);
    let volume_ma = moving_average(&volumes, config.volume_ma);
    let ratios = volume_ratio(&volumes, &volume_ma);
    let spikes = volume_spike(&ratios, config.volume_spike_ratio);
    let rsi = relative_strength_index(&closes, config.rsi_length);

    let rows = series
        .bars()
        .iter()
        .enumerate()
        .map(|(i, bar)| IndicatorRow {
            date: bar.date,
            close: bar.close,
            volume: bar.volume,
            ma_short: ma_short[i],
            ma_long: ma_long[i],
            ma_slope: ma_slope[i],
            volume_ma: volume_ma[i],
            volume_ratio: ratios[i],
            internal_score: spikes[i],
            rsi: rsi[i],
        })
        .collect();

    IndicatorFrame::new(series.symbol(), rows, config.warmup())
}
