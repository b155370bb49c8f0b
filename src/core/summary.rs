//! Cohort-level summary of a scoring run.

use std::fmt;

use serde::Serialize;

use crate::models::{Criterion, Indicator, SirsResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndicatorCounts {
    pub abnormal: usize,
    pub normal: usize,
    pub unknown: usize,
}

impl IndicatorCounts {
    fn record(&mut self, indicator: Indicator) {
        match indicator {
            Indicator::Abnormal => self.abnormal += 1,
            Indicator::Normal => self.normal += 1,
            Indicator::Unknown => self.unknown += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CohortSummary {
    pub stays: usize,
    /// Stays per total score, indexed 0..=4
    pub score_distribution: [usize; 5],
    pub temperature: IndicatorCounts,
    pub heart_rate: IndicatorCounts,
    pub respiration: IndicatorCounts,
    pub wbc: IndicatorCounts,
}

impl CohortSummary {
    pub fn from_results(results: &[SirsResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            summary.stays += 1;
            summary.score_distribution[usize::from(result.sirs.min(4))] += 1;

            let components = result.components();
            for criterion in Criterion::ALL {
                summary.counts_mut(criterion).record(components.get(criterion));
            }
        }
        summary
    }

    pub const fn counts(&self, criterion: Criterion) -> IndicatorCounts {
        match criterion {
            Criterion::Temperature => self.temperature,
            Criterion::HeartRate => self.heart_rate,
            Criterion::Respiration => self.respiration,
            Criterion::Wbc => self.wbc,
        }
    }

    fn counts_mut(&mut self, criterion: Criterion) -> &mut IndicatorCounts {
        match criterion {
            Criterion::Temperature => &mut self.temperature,
            Criterion::HeartRate => &mut self.heart_rate,
            Criterion::Respiration => &mut self.respiration,
            Criterion::Wbc => &mut self.wbc,
        }
    }
}

impl fmt::Display for CohortSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scored stays: {}", self.stays)?;
        writeln!(f, "SIRS distribution:")?;
        for (score, count) in self.score_distribution.iter().enumerate() {
            writeln!(f, "  {}: {}", score, count)?;
        }
        writeln!(f, "{:<12} {:>9} {:>9} {:>9}", "Criterion", "abnormal", "normal", "unknown")?;
        for criterion in Criterion::ALL {
            let counts = self.counts(criterion);
            writeln!(
                f,
                "{:<12} {:>9} {:>9} {:>9}",
                criterion.to_string(),
                counts.abnormal,
                counts.normal,
                counts.unknown
            )?;
        }
        Ok(())
    }
}
