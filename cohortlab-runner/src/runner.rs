//! Study runner: one render pass from config to panels, and the static export.
//!
//! Two entry points:
//! - `run_study()`: assembles every panel and stamps the run. Used by the
//!   dashboard on each control change and by the CLI.
//! - `render_study()`: `run_study()` followed by the grid figure export.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cohortlab_core::{assemble, Panel, SeedMode, StudyConfig, StudyError};

use crate::figure::{render_figure, FigureError, FigureOptions, ImageFormat};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("study error: {0}")]
    Study(#[from] StudyError),
    #[error("figure error: {0}")]
    Figure(#[from] FigureError),
}

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Everything produced by a single render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyRun {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub generated_at: DateTime<Utc>,
    pub seed: u64,
    pub seed_mode: SeedMode,
    pub sample_count: usize,
    pub show_points: bool,
    pub panels: Vec<Panel>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl StudyRun {
    /// Total observation rows across all panels.
    pub fn observation_count(&self) -> usize {
        self.panels.iter().map(|p| p.table.len()).sum()
    }

    pub fn panel(&self, marker: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.marker == marker)
    }
}

/// Assemble every panel for `config`.
pub fn run_study(config: &StudyConfig) -> Result<StudyRun, RunError> {
    let panels = assemble(config)?;
    Ok(StudyRun {
        schema_version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        seed: config.seed,
        seed_mode: config.seed_mode,
        sample_count: config.sample_count,
        show_points: config.show_points,
        panels,
    })
}

/// Draw an already assembled run to `path`.
pub fn export_figure(
    run: &StudyRun,
    config: &StudyConfig,
    path: &Path,
    format: ImageFormat,
) -> Result<(), RunError> {
    let opts = FigureOptions::from_config(&config.figure, run.show_points);
    render_figure(&run.panels, &opts, path, format)?;
    Ok(())
}

/// Static export: one render pass written to `config.figure.output`.
///
/// The format follows the output file's extension.
pub fn render_study(config: &StudyConfig) -> Result<StudyRun, RunError> {
    let run = run_study(config)?;
    let path = config.figure.output.as_path();
    export_figure(&run, config, path, ImageFormat::from_path(path))?;
    Ok(run)
}
