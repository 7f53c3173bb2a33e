//! Shared data models spanning the engine layers.

pub mod chart;
pub mod indicators;
pub mod series;
pub mod signal;

pub use chart::{ChartFrame, ChartPoint};
pub use indicators::{IndicatorFrame, IndicatorRow};
pub use series::{Bar, TimeSeries};
pub use signal::{
    Column, ConditionOutcome, MacroScore, MacroScoreTable, SignalRow, SignalTable, SkippedDate,
};
