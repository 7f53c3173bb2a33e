//! Signal pipeline orchestrator.
//!
//! Runs annotation, macro scoring and fusion for one symbol over series that
//! were already fetched. The run is a pure function of its inputs.

use tracing::{debug, info};

use crate::config::{AssetProfile, PipelineConfig};
use crate::error::PipelineError;
use crate::indicators::annotate;
use crate::models::indicators::IndicatorFrame;
use crate::models::series::TimeSeries;
use crate::models::signal::{MacroScoreTable, SignalTable};
use crate::signals::{MacroInputs, MacroRole, MacroScorer, ScoringRule, SignalFusion};

/// Every intermediate table of one run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub frame: IndicatorFrame,
    pub scores: MacroScoreTable,
    pub table: SignalTable,
}

#[derive(Debug, Clone)]
pub struct SignalPipeline {
    rule: ScoringRule,
    config: PipelineConfig,
}

impl SignalPipeline {
    pub fn new(rule: ScoringRule, config: PipelineConfig) -> Result<Self, PipelineError> {
        if rule.conditions.is_empty() {
            return Err(PipelineError::InvalidConfig(format!(
                "scoring rule {} has no conditions",
                rule.name
            )));
        }
        config.fusion.validate()?;
        Ok(Self { rule, config })
    }

    pub fn for_profile(profile: &AssetProfile) -> Result<Self, PipelineError> {
        Self::new(profile.rule.clone(), profile.pipeline.clone())
    }

    pub fn rule(&self) -> &ScoringRule {
        &self.rule
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Compute the signal table for `primary`.
    ///
    /// `baseline` doubles as the benchmark macro input unless `macros`
    /// already provides one.
    pub fn compute(
        &self,
        primary: &TimeSeries,
        baseline: &TimeSeries,
        macros: &MacroInputs<'_>,
    ) -> Result<SignalTable, PipelineError> {
        self.compute_detailed(primary, baseline, macros)
            .map(|output| output.table)
    }

    pub fn compute_detailed(
        &self,
        primary: &TimeSeries,
        baseline: &TimeSeries,
        macros: &MacroInputs<'_>,
    ) -> Result<PipelineOutput, PipelineError> {
        for series in [primary, baseline] {
            if series.is_empty() {
                return Err(PipelineError::MissingInput {
                    series: series.symbol().to_string(),
                });
            }
        }

        let warmup = self.config.macro_scoring.warmup;
        if primary.len() <= warmup {
            return Err(PipelineError::InsufficientHistory {
                series: primary.symbol().to_string(),
                observations: primary.len(),
                required: warmup + 1,
            });
        }

        let frame = annotate(primary, &self.config.frame);

        let mut inputs: MacroInputs<'_> = macros.iter().map(|(role, s)| (*role, *s)).collect();
        inputs.entry(MacroRole::Benchmark).or_insert(baseline);
        let scorer = MacroScorer::new(&self.rule, &inputs, &self.config.macro_scoring)?;
        let scores = scorer.score(&frame);

        if scores.is_empty() {
            return Err(PipelineError::NoScorableDates {
                symbol: primary.symbol().to_string(),
                skipped: scores.skipped().len(),
            });
        }

        let table = SignalFusion::new(&self.config.fusion).fuse(&frame, &scores, baseline);

        if let Some(column) = table.missing_required_column() {
            return Err(PipelineError::MissingColumn {
                column: column.name(),
            });
        }

        if let Some(column) = table.absent_column() {
            debug!(
                symbol = %primary.symbol(),
                column = column.name(),
                "column still in warm-up on every row"
            );
        }

        info!(
            symbol = %primary.symbol(),
            rule = %self.rule.name,
            rows = table.len(),
            skipped = scores.skipped().len(),
            buys = table.buy_dates().len(),
            sells = table.sell_dates().len(),
            "signal pipeline complete"
        );

        Ok(PipelineOutput {
            frame,
            scores,
            table,
        })
    }
}
