//! Marker definitions: per-cohort (mean, sd) parameters plus an optional
//! significance annotation.

use serde::{Deserialize, Serialize};

use super::annotation::Annotation;
use super::cohort::Cohort;

/// Normal-distribution parameters for one cohort.
///
/// Serialized as a two-element array `[mean, sd]` so study files stay compact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct CohortParams {
    pub mean: f64,
    pub sd: f64,
}

impl CohortParams {
    pub const fn new(mean: f64, sd: f64) -> Self {
        Self { mean, sd }
    }
}

impl From<(f64, f64)> for CohortParams {
    fn from((mean, sd): (f64, f64)) -> Self {
        Self { mean, sd }
    }
}

impl From<CohortParams> for (f64, f64) {
    fn from(p: CohortParams) -> Self {
        (p.mean, p.sd)
    }
}

/// A named biological measurement with one parameter pair per cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    pub name: String,

    /// Section heading the marker is listed under (e.g. "CD56dim").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Parameters in cohort order.
    pub cohorts: [CohortParams; 3],

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<Annotation>,
}

impl MarkerSpec {
    pub fn new(name: impl Into<String>, cohorts: [CohortParams; 3]) -> Self {
        Self {
            name: name.into(),
            group: None,
            cohorts,
            annotation: None,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotation = Some(annotation);
        self
    }

    pub fn params(&self, cohort: Cohort) -> CohortParams {
        self.cohorts[cohort.position()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_indexed_by_cohort() {
        let spec = MarkerSpec::new(
            "X",
            [
                CohortParams::new(1.0, 0.1),
                CohortParams::new(2.0, 0.2),
                CohortParams::new(3.0, 0.3),
            ],
        );
        assert_eq!(spec.params(Cohort::CmvPositive).mean, 2.0);
        assert_eq!(spec.params(Cohort::Case).sd, 0.3);
    }

    #[test]
    fn params_serialize_as_pairs() {
        let json = serde_json::to_string(&CohortParams::new(0.63, 0.67)).unwrap();
        assert_eq!(json, "[0.63,0.67]");
    }
}
