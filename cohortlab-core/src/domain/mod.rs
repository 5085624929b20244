//! Domain types: cohorts, markers, annotations, observation tables.

pub mod annotation;
pub mod cohort;
pub mod marker;
pub mod observation;

pub use annotation::{Annotation, BracketGeometry, OffsetRule};
pub use cohort::{Cohort, Rgb};
pub use marker::{CohortParams, MarkerSpec};
pub use observation::{Observation, ObservationTable};
