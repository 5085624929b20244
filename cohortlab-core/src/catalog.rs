//! Insertion-ordered marker catalog.
//!
//! The catalog is the single place that holds both the per-cohort (mean, sd)
//! table and the annotation descriptors. Annotation lookup is an exact match
//! on the marker name.

use serde::{Deserialize, Serialize};

use crate::domain::{Annotation, Cohort, MarkerSpec};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerCatalog {
    markers: Vec<MarkerSpec>,
}

impl MarkerCatalog {
    pub fn new(markers: Vec<MarkerSpec>) -> Self {
        Self { markers }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MarkerSpec> {
        self.markers.iter()
    }

    pub fn markers(&self) -> &[MarkerSpec] {
        &self.markers
    }

    pub fn get(&self, name: &str) -> Option<&MarkerSpec> {
        self.markers.iter().find(|m| m.name == name)
    }

    pub fn annotation_for(&self, name: &str) -> Option<&Annotation> {
        self.get(name).and_then(|m| m.annotation.as_ref())
    }

    /// Names of markers that carry an annotation, in catalog order.
    pub fn annotated(&self) -> Vec<&str> {
        self.markers
            .iter()
            .filter(|m| m.annotation.is_some())
            .map(|m| m.name.as_str())
            .collect()
    }

    /// The CMV / NK-cell study the figures were built for.
    pub fn builtin() -> Self {
        const GENERAL: &str = "Lenfosit & NK";
        const DIM: &str = "CD56dim";
        const BRIGHT: &str = "CD56bright";

        let m = |name: &str, group: &str, a: (f64, f64), b: (f64, f64), c: (f64, f64)| {
            MarkerSpec::new(name, [a.into(), b.into(), c.into()]).with_group(group)
        };

        Self::new(vec![
            m("Lenfosit Kapısı CD3+ T Hücre", GENERAL, (74.0, 4.3), (73.9, 5.6), (67.3, 12.4)),
            m("Lenfosit Kapısı NK Hücre Oranı", GENERAL, (9.9, 4.2), (11.3, 5.0), (11.2, 7.7)),
            m("CD3- Total NK Hücre Oranı", GENERAL, (43.9, 14.0), (47.6, 15.5), (49.5, 17.9)),
            m("CD56dim Sitotoksik NK Alt Grubu", DIM, (86.0, 6.5), (81.0, 22.0), (77.4, 24.4)),
            m("CD56dim PD1+", DIM, (1.00, 0.96), (5.11, 11.17), (4.20, 4.74)),
            m("CD56dim CTLA-4+", DIM, (0.63, 0.67), (0.72, 0.58), (2.05, 1.51)).with_annotation(
                Annotation::new(Cohort::CmvNegative, Cohort::Case, "* p=0.036"),
            ),
            m("CD56dim NKG2A", DIM, (49.3, 10.2), (36.1, 18.9), (34.3, 16.7)).with_annotation(
                Annotation::new(Cohort::CmvNegative, Cohort::Case, "* p<0.05"),
            ),
            m("CD56dim NKG2D", DIM, (1.40, 1.04), (0.85, 0.68), (1.07, 0.78)),
            m("CD56dim LAG3", DIM, (0.94, 1.00), (0.54, 0.86), (1.15, 1.74)),
            m("CD56bright Sitokin Üreten NK", BRIGHT, (12.9, 6.4), (16.7, 22.3), (20.2, 23.6)),
            m("CD56bright PD1", BRIGHT, (3.0, 2.9), (10.2, 20.0), (8.5, 6.7)),
            m("CD56bright CTLA-4", BRIGHT, (6.4, 4.0), (3.8, 2.4), (8.5, 4.4)).with_annotation(
                Annotation::new(Cohort::CmvPositive, Cohort::Case, "* p=0.020"),
            ),
            m("CD56bright NKG2A", BRIGHT, (80.3, 14.6), (69.1, 27.9), (61.9, 23.0)),
            m("CD56bright NKG2D", BRIGHT, (2.6, 1.5), (4.2, 2.3), (3.0, 2.1)),
            m("CD56bright LAG3", BRIGHT, (2.6, 1.9), (1.3, 1.4), (1.6, 1.4)),
        ])
    }
}

impl Default for MarkerCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a MarkerCatalog {
    type Item = &'a MarkerSpec;
    type IntoIter = std::slice::Iter<'a, MarkerSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.markers.iter()
    }
}
