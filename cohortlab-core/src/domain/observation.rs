//! Row-per-point observation table joining cohort and sampled value.

use serde::{Deserialize, Serialize};

use super::cohort::Cohort;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub cohort: Cohort,
    pub value: f64,
}

/// Observations for one marker, grouped in cohort order.
///
/// Built fresh per render pass and never persisted by the pipeline itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    pub rows: Vec<Observation>,
}

impl ObservationTable {
    /// Concatenate one sample per cohort. Each value keeps its own cohort label.
    pub fn from_samples(marker: Option<String>, samples: [Vec<f64>; 3]) -> Self {
        let mut rows = Vec::with_capacity(samples.iter().map(Vec::len).sum());
        for (cohort, sample) in Cohort::ALL.into_iter().zip(samples) {
            rows.extend(sample.into_iter().map(|value| Observation { cohort, value }));
        }
        Self { marker, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn values_for(&self, cohort: Cohort) -> Vec<f64> {
        self.rows
            .iter()
            .filter(|o| o.cohort == cohort)
            .map(|o| o.value)
            .collect()
    }

    pub fn count_for(&self, cohort: Cohort) -> usize {
        self.rows.iter().filter(|o| o.cohort == cohort).count()
    }

    /// Largest value across all cohorts, or `None` for an empty table.
    pub fn max_value(&self) -> Option<f64> {
        self.rows.iter().map(|o| o.value).reduce(f64::max)
    }
}
