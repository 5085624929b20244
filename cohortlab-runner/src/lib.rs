//! CohortLab Runner: static export of a study.
//!
//! This crate builds on `cohortlab-core` to provide:
//! - The study runner (one render pass, stamped with seed and time)
//! - Grid figure rendering to PNG or SVG via plotters
//! - Artifact export (JSON manifest, CSV observations, Markdown summary)

pub mod export;
pub mod figure;
pub mod runner;
pub mod style;

pub use export::{load_artifacts, save_artifacts};
pub use figure::{render_figure, FigureError, FigureOptions, ImageFormat};
pub use runner::{export_figure, render_study, run_study, RunError, StudyRun, SCHEMA_VERSION};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn study_run_is_send_sync() {
        assert_send::<StudyRun>();
        assert_sync::<StudyRun>();
    }

    #[test]
    fn figure_types_are_send_sync() {
        assert_send::<FigureOptions>();
        assert_sync::<FigureOptions>();
        assert_send::<FigureError>();
        assert_sync::<FigureError>();
    }

    #[test]
    fn run_error_is_send_sync() {
        assert_send::<RunError>();
        assert_sync::<RunError>();
    }
}
