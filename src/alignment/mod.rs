//! Date alignment between series with different trading calendars.
//!
//! A crypto series trades every day while index and rate series follow
//! exchange calendars, so a primary date is mapped onto a reference series'
//! own index before any value is read from it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SkipReason;

/// How a target date is resolved against a reference date index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignPolicy {
    /// Latest observation dated on or before the target ("as of").
    Pad,
    /// Observation with the smallest day distance; ties go to the earlier date.
    Nearest,
}

/// Resolve `target` against a strictly increasing date index.
pub fn resolve(index: &[NaiveDate], target: NaiveDate, policy: AlignPolicy) -> Option<usize> {
    match policy {
        AlignPolicy::Pad => {
            let after = index.partition_point(|d| *d <= target);
            after.checked_sub(1)
        }
        AlignPolicy::Nearest => {
            if index.is_empty() {
                return None;
            }
            let pos = index.partition_point(|d| *d < target);
            if pos == 0 {
                return Some(0);
            }
            if pos == index.len() {
                return Some(pos - 1);
            }
            let before = (target - index[pos - 1]).num_days();
            let after = (index[pos] - target).num_days();
            if after < before {
                Some(pos)
            } else {
                Some(pos - 1)
            }
        }
    }
}

/// Resolve `target` and require `lookback` prior observations at the result.
///
/// Trailing comparisons read `index - lookback`; a position closer than that
/// to the start of the series is rejected rather than wrapped.
pub fn resolve_with_lookback(
    series: &str,
    index: &[NaiveDate],
    target: NaiveDate,
    policy: AlignPolicy,
    lookback: usize,
) -> Result<usize, SkipReason> {
    let pos = resolve(index, target, policy).ok_or_else(|| SkipReason::UnresolvableAlignment {
        series: series.to_string(),
        date: target,
    })?;

    if pos < lookback {
        return Err(SkipReason::InsufficientHistory {
            series: series.to_string(),
            index: pos,
            required: lookback,
        });
    }

    Ok(pos)
}

/// Owned date index of a reference series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesIndex {
    name: String,
    dates: Vec<NaiveDate>,
}

impl SeriesIndex {
    pub fn new(name: impl Into<String>, dates: Vec<NaiveDate>) -> Self {
        Self {
            name: name.into(),
            dates,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn resolve(&self, target: NaiveDate, policy: AlignPolicy) -> Option<usize> {
        resolve(&self.dates, target, policy)
    }

    pub fn resolve_with_lookback(
        &self,
        target: NaiveDate,
        policy: AlignPolicy,
        lookback: usize,
    ) -> Result<usize, SkipReason> {
        resolve_with_lookback(&self.name, &self.dates, target, policy, lookback)
    }

    /// Whether any date appears in both indexes.
    pub fn overlaps(&self, other: &[NaiveDate]) -> bool {
        other.iter().any(|d| self.dates.binary_search(d).is_ok())
    }
}
