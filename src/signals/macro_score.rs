//! Per-date macro environment scoring.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::alignment::SeriesIndex;
use crate::config::MacroConfig;
use crate::error::{PipelineError, SkipReason};
use crate::indicators::trend::moving_average;
use crate::indicators::volatility::return_volatility;
use crate::models::indicators::IndicatorFrame;
use crate::models::series::TimeSeries;
use crate::models::signal::{ConditionOutcome, MacroScore, MacroScoreTable};
use crate::signals::rules::{MacroRole, ScoringRule, SeriesField};

/// Macro inputs keyed by the role a rule refers to them by.
pub type MacroInputs<'a> = BTreeMap<MacroRole, &'a TimeSeries>;

/// A macro series with the derived columns its conditions read.
#[derive(Debug, Clone)]
pub struct PreparedSeries {
    index: SeriesIndex,
    columns: HashMap<SeriesField, Vec<Option<f64>>>,
}

impl PreparedSeries {
    pub fn new(series: &TimeSeries, fields: impl IntoIterator<Item = SeriesField>) -> Self {
        let closes = series.closes();
        let columns = fields
            .into_iter()
            .map(|field| (field, compute_field(field, &closes)))
            .collect();

        Self {
            index: SeriesIndex::new(series.symbol(), series.dates()),
            columns,
        }
    }

    pub fn index(&self) -> &SeriesIndex {
        &self.index
    }

    pub fn column(&self, field: SeriesField) -> Result<&[Option<f64>], SkipReason> {
        self.columns
            .get(&field)
            .map(Vec::as_slice)
            .ok_or_else(|| self.undefined(field))
    }

    pub fn value(&self, field: SeriesField, pos: usize) -> Result<f64, SkipReason> {
        self.column(field)?
            .get(pos)
            .copied()
            .flatten()
            .ok_or_else(|| self.undefined(field))
    }

    pub fn undefined(&self, field: SeriesField) -> SkipReason {
        SkipReason::UndefinedValue {
            series: self.index.name().to_string(),
            field: field.label(),
        }
    }
}

fn compute_field(field: SeriesField, closes: &[f64]) -> Vec<Option<f64>> {
    match field {
        SeriesField::Close => closes.iter().copied().map(Some).collect(),
        SeriesField::MovingAverage(window) => moving_average(closes, window),
        SeriesField::ReturnVolatility(window) => return_volatility(closes, window),
    }
}

/// Scores primary dates against the macro series of one rule.
pub struct MacroScorer<'a> {
    rule: &'a ScoringRule,
    series: BTreeMap<MacroRole, PreparedSeries>,
    warmup: usize,
}

impl<'a> MacroScorer<'a> {
    /// Prepare every series the rule refers to. A role the rule needs but the
    /// inputs lack, or an empty series, is a missing input.
    pub fn new(
        rule: &'a ScoringRule,
        inputs: &MacroInputs<'_>,
        config: &MacroConfig,
    ) -> Result<Self, PipelineError> {
        let mut series = BTreeMap::new();
        for role in rule.roles() {
            let input = inputs
                .get(&role)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| PipelineError::MissingInput {
                    series: role.as_str().to_string(),
                })?;
            series.insert(role, PreparedSeries::new(input, rule.fields_for(role)));
        }

        Ok(Self {
            rule,
            series,
            warmup: config.warmup,
        })
    }

    /// Score one date. The first condition that cannot be evaluated decides
    /// the skip reason; conditions are otherwise independent.
    pub fn score_date(&self, date: NaiveDate) -> Result<MacroScore, SkipReason> {
        let mut conditions = Vec::with_capacity(self.rule.conditions.len());
        for condition in &self.rule.conditions {
            let series = self.series.get(&condition.series).ok_or_else(|| {
                SkipReason::UnresolvableAlignment {
                    series: condition.series.as_str().to_string(),
                    date,
                }
            })?;
            let passed = condition.evaluate(date, series)?;
            conditions.push(ConditionOutcome {
                id: condition.id.clone(),
                passed,
            });
        }

        let score = conditions.iter().filter(|c| c.passed).count() as u8;
        Ok(MacroScore {
            date,
            score,
            conditions,
        })
    }

    /// Score every frame date from the warm-up index on. Dates that cannot be
    /// scored are recorded as skipped, never zero-filled.
    pub fn score(&self, frame: &IndicatorFrame) -> MacroScoreTable {
        let mut table = MacroScoreTable::new();

        for row in frame.rows().iter().skip(self.warmup) {
            match self.score_date(row.date) {
                Ok(score) => table.insert(score),
                Err(reason) => {
                    debug!(symbol = %frame.symbol(), date = %row.date, reason = %reason, "macro score skipped");
                    table.skip(row.date, reason);
                }
            }
        }

        debug!(
            symbol = %frame.symbol(),
            scored = table.len(),
            skipped = table.skipped().len(),
            "macro scoring complete"
        );

        table
    }
}
