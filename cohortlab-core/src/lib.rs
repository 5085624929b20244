//! CohortLab Core: cohorts, marker catalog, seeded sample generator, panel assembly.
//!
//! This crate contains everything that does not depend on a drawing backend:
//! - Domain types (cohorts, markers, annotations, observation tables)
//! - The clamped normal sample generator and its seeding policy
//! - Box summaries and grid layout
//! - Study configuration and the single render-pass pipeline
//! - The static summary table

pub mod catalog;
pub mod config;
pub mod domain;
pub mod layout;
pub mod panel;
pub mod pipeline;
pub mod rng;
pub mod sampler;
pub mod stats;
pub mod summary;

pub use catalog::MarkerCatalog;
pub use config::{ConfigError, StudyConfig};
pub use panel::{Panel, PanelError, PanelOptions};
pub use pipeline::{assemble, StudyError};
pub use rng::{SampleRng, SeedMode};
pub use sampler::{generate, generate_seeded, SampleError};
