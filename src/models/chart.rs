//! Tail-window projection handed to the chart renderer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::signal::SignalTable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub close: f64,
    pub ma_short: Option<f64>,
    pub ma_long: Option<f64>,
    pub volume: u64,
    pub volume_ma: Option<f64>,
    pub relative_strength: f64,
    pub rs_ma: Option<f64>,
    /// Colours the RS segment ending at this point.
    pub rs_slope: f64,
    pub rsi: Option<f64>,
    pub final_buy: bool,
    pub sell: bool,
    pub macro_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub symbol: String,
    pub points: Vec<ChartPoint>,
}

impl ChartFrame {
    pub fn from_table(table: &SignalTable, tail: usize) -> Self {
        let points = table
            .tail(tail)
            .iter()
            .map(|r| ChartPoint {
                date: r.date,
                close: r.close,
                ma_short: r.ma_short,
                ma_long: r.ma_long,
                volume: r.volume,
                volume_ma: r.volume_ma,
                relative_strength: r.relative_strength,
                rs_ma: r.rs_ma,
                rs_slope: r.rs_slope,
                rsi: r.rsi,
                final_buy: r.final_buy,
                sell: r.sell,
                macro_score: r.macro_score,
            })
            .collect();

        Self {
            symbol: table.symbol().to_string(),
            points,
        }
    }
}
