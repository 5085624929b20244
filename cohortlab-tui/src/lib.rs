//! CohortLab dashboard: interactive box-and-strip panels in the terminal.
//!
//! The sidebar controls the sample count per cohort and whether individual
//! points are drawn. Each change re-runs the render pass and redraws the card
//! grid; the summary table and the static export share the same pass.

pub mod app;
pub mod input;
pub mod persistence;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use input::handle_key;
