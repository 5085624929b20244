//! Significance annotations: a bracket between two cohort positions and a
//! literal p-value label above it.

use serde::{Deserialize, Serialize};

use super::cohort::Cohort;

/// Bracket endpoints and label text for one marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub left: Cohort,
    pub right: Cohort,
    pub label: String,
}

impl Annotation {
    pub fn new(left: Cohort, right: Cohort, label: impl Into<String>) -> Self {
        Self {
            left,
            right,
            label: label.into(),
        }
    }

    /// Place the bracket above `y_max` using the given offset rule.
    pub fn bracket(&self, y_max: f64, rule: OffsetRule) -> BracketGeometry {
        let a = self.left.position().min(self.right.position()) as f64;
        let b = self.left.position().max(self.right.position()) as f64;
        let offset = rule.offset(y_max);
        let low = y_max + offset;
        let high = y_max + offset * 2.0;
        BracketGeometry {
            points: [(a, low), (a, high), (b, high), (b, low)],
            label_pos: ((a + b) / 2.0, y_max + offset * LABEL_LIFT),
            label: self.label.clone(),
        }
    }
}

/// Label height as a multiple of the offset.
const LABEL_LIFT: f64 = 2.2;

/// How far above the data maximum the bracket starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OffsetRule {
    /// `offset = fraction * y_max`. A non-positive maximum scales against 1.0
    /// so the bracket never collapses onto the axis.
    Fractional { fraction: f64 },

    /// Fixed offset in data units.
    Absolute { offset: f64 },
}

impl Default for OffsetRule {
    fn default() -> Self {
        OffsetRule::Fractional { fraction: 0.1 }
    }
}

impl OffsetRule {
    pub fn offset(self, y_max: f64) -> f64 {
        match self {
            OffsetRule::Fractional { fraction } => {
                let scale = if y_max > 0.0 { y_max } else { 1.0 };
                scale * fraction
            }
            OffsetRule::Absolute { offset } => offset,
        }
    }

    /// The configured magnitude, for validation.
    pub fn magnitude(self) -> f64 {
        match self {
            OffsetRule::Fractional { fraction } => fraction,
            OffsetRule::Absolute { offset } => offset,
        }
    }
}

/// Resolved bracket in data coordinates (x = cohort position).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketGeometry {
    /// Polyline: up from the left cohort, across, down to the right cohort.
    pub points: [(f64, f64); 4],
    pub label_pos: (f64, f64),
    pub label: String,
}

impl BracketGeometry {
    /// Highest y coordinate used by the annotation (the label anchor).
    pub fn top(&self) -> f64 {
        self.label_pos.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_bracket_matches_plot_layout() {
        let ann = Annotation::new(Cohort::CmvNegative, Cohort::Case, "* p=0.036");
        let g = ann.bracket(10.0, OffsetRule::Fractional { fraction: 0.1 });
        assert_eq!(g.points, [(0.0, 11.0), (0.0, 12.0), (2.0, 12.0), (2.0, 11.0)]);
        assert_eq!(g.label_pos.0, 1.0);
        assert!((g.label_pos.1 - 12.2).abs() < 1e-12);
        assert_eq!(g.label, "* p=0.036");
    }

    #[test]
    fn absolute_offset_ignores_scale() {
        let ann = Annotation::new(Cohort::CmvPositive, Cohort::Case, "* p=0.020");
        let g = ann.bracket(100.0, OffsetRule::Absolute { offset: 2.0 });
        assert_eq!(g.points[0], (1.0, 102.0));
        assert_eq!(g.points[1], (1.0, 104.0));
        assert_eq!(g.label_pos.0, 1.5);
    }

    #[test]
    fn reversed_endpoints_are_normalized() {
        let ann = Annotation::new(Cohort::Case, Cohort::CmvNegative, "x");
        let g = ann.bracket(1.0, OffsetRule::default());
        assert_eq!(g.points[0].0, 0.0);
        assert_eq!(g.points[3].0, 2.0);
    }

    #[test]
    fn zero_maximum_keeps_visible_offset() {
        assert!(OffsetRule::default().offset(0.0) > 0.0);
    }

    #[test]
    fn offset_rule_toml_shape() {
        #[derive(Deserialize)]
        struct Wrapper {
            offset: OffsetRule,
        }
        let w: Wrapper = toml::from_str("offset = { type = \"absolute\", offset = 3.5 }").unwrap();
        assert_eq!(w.offset, OffsetRule::Absolute { offset: 3.5 });
    }
}
