//! Macro scoring and signal fusion.

pub mod fusion;
pub mod macro_score;
pub mod rules;

pub use fusion::SignalFusion;
pub use macro_score::{MacroInputs, MacroScorer, PreparedSeries};
pub use rules::{MacroCheck, MacroCondition, MacroRole, ScoringRule, SeriesField};
