//! Macro score and fused signal tables.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::SkipReason;

/// Outcome of one macro condition on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionOutcome {
    pub id: String,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroScore {
    pub date: NaiveDate,
    pub score: u8,
    pub conditions: Vec<ConditionOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedDate {
    pub date: NaiveDate,
    #[serde(serialize_with = "serialize_reason")]
    pub reason: SkipReason,
}

fn serialize_reason<S: serde::Serializer>(reason: &SkipReason, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(reason)
}

/// Scored dates plus the dates that could not be scored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MacroScoreTable {
    scores: BTreeMap<NaiveDate, MacroScore>,
    skipped: Vec<SkippedDate>,
}

impl MacroScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, score: MacroScore) {
        self.scores.insert(score.date, score);
    }

    pub fn skip(&mut self, date: NaiveDate, reason: SkipReason) {
        self.skipped.push(SkippedDate { date, reason });
    }

    pub fn get(&self, date: NaiveDate) -> Option<&MacroScore> {
        self.scores.get(&date)
    }

    pub fn score(&self, date: NaiveDate) -> Option<u8> {
        self.scores.get(&date).map(|s| s.score)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MacroScore> {
        self.scores.values()
    }

    pub fn skipped(&self) -> &[SkippedDate] {
        &self.skipped
    }
}

/// Fused per-date row handed to the serving and rendering layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRow {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: u64,
    pub ma_short: Option<f64>,
    pub ma_long: Option<f64>,
    pub ma_slope: f64,
    pub volume_ma: Option<f64>,
    pub rsi: Option<f64>,
    pub internal_score: u8,
    pub macro_score: u8,
    pub relative_strength: f64,
    pub rs_ma: Option<f64>,
    pub rs_slope: f64,
    pub internal_strong: bool,
    pub final_buy: bool,
    pub sell: bool,
}

/// Columns the rendering collaborator expects to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Close,
    MaShort,
    MaLong,
    Volume,
    VolumeMa,
    RelativeStrength,
    RsMa,
    Rsi,
    FinalBuy,
    Sell,
    MacroScore,
}

impl Column {
    pub const RENDERED: [Column; 11] = [
        Column::Close,
        Column::MaShort,
        Column::MaLong,
        Column::Volume,
        Column::VolumeMa,
        Column::RelativeStrength,
        Column::RsMa,
        Column::Rsi,
        Column::FinalBuy,
        Column::Sell,
        Column::MacroScore,
    ];

    /// Columns fusion fills on every row. The windowed ones (moving
    /// averages, RSI) may stay undefined on a short history.
    pub const REQUIRED: [Column; 6] = [
        Column::Close,
        Column::Volume,
        Column::RelativeStrength,
        Column::FinalBuy,
        Column::Sell,
        Column::MacroScore,
    ];

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Column::Close => "close",
            Column::MaShort => "ma_short",
            Column::MaLong => "ma_long",
            Column::Volume => "volume",
            Column::VolumeMa => "volume_ma",
            Column::RelativeStrength => "relative_strength",
            Column::RsMa => "rs_ma",
            Column::Rsi => "rsi",
            Column::FinalBuy => "final_buy",
            Column::Sell => "sell",
            Column::MacroScore => "macro_score",
        }
    }
}

impl SignalRow {
    /// Whether `column` holds a defined value on this row.
    pub fn has(&self, column: Column) -> bool {
        match column {
            Column::MaShort => self.ma_short.is_some(),
            Column::MaLong => self.ma_long.is_some(),
            Column::VolumeMa => self.volume_ma.is_some(),
            Column::RsMa => self.rs_ma.is_some(),
            Column::Rsi => self.rsi.is_some(),
            Column::Close => self.close.is_finite(),
            Column::RelativeStrength => self.relative_strength.is_finite(),
            Column::Volume | Column::FinalBuy | Column::Sell | Column::MacroScore => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalTable {
    symbol: String,
    rows: Vec<SignalRow>,
}

impl SignalTable {
    pub fn new(symbol: impl Into<String>, rows: Vec<SignalRow>) -> Self {
        Self {
            symbol: symbol.into(),
            rows,
        }
    }

    pub fn empty(symbol: impl Into<String>) -> Self {
        Self::new(symbol, Vec::new())
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn rows(&self) -> &[SignalRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&SignalRow> {
        self.rows.last()
    }

    /// The last `n` rows (all rows when the table is shorter).
    pub fn tail(&self, n: usize) -> &[SignalRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }

    pub fn buy_dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().filter(|r| r.final_buy).map(|r| r.date).collect()
    }

    pub fn sell_dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().filter(|r| r.sell).map(|r| r.date).collect()
    }

    /// First rendered column with no defined value anywhere in the table.
    pub fn absent_column(&self) -> Option<Column> {
        Column::RENDERED
            .into_iter()
            .find(|&c| !self.rows.iter().any(|r| r.has(c)))
    }

    /// First required column undefined on some row.
    pub fn missing_required_column(&self) -> Option<Column> {
        Column::REQUIRED
            .into_iter()
            .find(|&c| !self.rows.iter().all(|r| r.has(c)))
    }
}
