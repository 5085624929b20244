//! Application state: single-owner, main-thread only.
//!
//! Every control change re-runs the whole render pass synchronously; there
//! is no worker thread and no cache of previous passes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use cohortlab_core::layout::{AxisLabelPolicy, GridLayout};
use cohortlab_core::summary::{summary_rows, SummaryRow};
use cohortlab_core::{Panel, StudyConfig};
use cohortlab_runner::export::save_artifacts;
use cohortlab_runner::{export_figure, run_study, ImageFormat, StudyRun};

/// Sample-count slider bounds.
pub const MIN_SAMPLES: usize = 3;
pub const MAX_SAMPLES: usize = 50;

/// Cards per row in the dashboard grid.
pub const CARD_COLUMNS: usize = 3;

/// Main content view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    #[default]
    Cards,
    Table,
}

impl View {
    pub fn label(self) -> &'static str {
        match self {
            View::Cards => "Panels",
            View::Table => "Summary",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            View::Cards => View::Table,
            View::Table => View::Cards,
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub config: StudyConfig,

    // Sidebar controls
    pub sample_count: usize,
    pub show_points: bool,

    // Latest render pass
    pub run: Option<StudyRun>,
    pub summary: Vec<SummaryRow>,
    pub layout: GridLayout,

    // Navigation
    pub view: View,
    pub scroll: usize,
    pub overlay: Overlay,

    pub status_message: Option<(String, StatusLevel)>,
    pub export_dir: PathBuf,
}

impl AppState {
    pub fn new(config: StudyConfig, export_dir: PathBuf) -> Self {
        let summary = summary_rows(&config.markers);
        let mut app = Self {
            running: true,
            sample_count: clamp_samples(config.sample_count),
            show_points: config.show_points,
            config,
            run: None,
            summary,
            layout: GridLayout::new(CARD_COLUMNS, AxisLabelPolicy::EveryPanel),
            view: View::Cards,
            scroll: 0,
            overlay: Overlay::None,
            status_message: None,
            export_dir,
        };
        app.refresh();
        app
    }

    /// Study config with the sidebar controls applied.
    pub fn pass_config(&self) -> StudyConfig {
        StudyConfig {
            sample_count: self.sample_count,
            show_points: self.show_points,
            ..self.config.clone()
        }
    }

    /// Run a fresh render pass for the current controls.
    pub fn refresh(&mut self) {
        match run_study(&self.pass_config()) {
            Ok(run) => {
                tracing::debug!(n = self.sample_count, panels = run.panels.len(), "render pass");
                self.run = Some(run);
            }
            Err(e) => {
                self.run = None;
                self.set_error(format!("Render failed: {e}"));
            }
        }
        self.clamp_scroll();
    }

    pub fn panels(&self) -> &[Panel] {
        self.run.as_ref().map_or(&[], |r| r.panels.as_slice())
    }

    /// Set the sample count (clamped to the slider range) and re-render on change.
    pub fn set_sample_count(&mut self, n: usize) {
        let n = clamp_samples(n);
        if n != self.sample_count {
            self.sample_count = n;
            self.refresh();
        }
    }

    pub fn increase_samples(&mut self) {
        self.set_sample_count(self.sample_count.saturating_add(1));
    }

    pub fn decrease_samples(&mut self) {
        self.set_sample_count(self.sample_count.saturating_sub(1));
    }

    pub fn toggle_points(&mut self) {
        self.show_points = !self.show_points;
        self.refresh();
    }

    pub fn toggle_view(&mut self) {
        self.view = self.view.toggle();
        self.scroll = 0;
    }

    /// Number of scrollable rows in the active view.
    pub fn row_count(&self) -> usize {
        match self.view {
            View::Cards => self.layout.rows(self.panels().len()),
            View::Table => self.summary.len(),
        }
    }

    pub fn scroll_down(&mut self) {
        if self.scroll + 1 < self.row_count() {
            self.scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.row_count().saturating_sub(1));
    }

    /// Write the current pass through the static renderer, plus artifacts.
    pub fn export(&mut self) {
        let Some(run) = &self.run else {
            self.set_warning("Nothing to export");
            return;
        };
        let config = self.pass_config();
        let file_name = config
            .figure
            .output
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("cohortlab.png"));
        let path = self.export_dir.join(file_name);

        let result = export_figure(run, &config, &path, ImageFormat::from_path(&path))
            .map_err(anyhow::Error::from)
            .and_then(|()| save_artifacts(run, &config.markers, &self.export_dir));
        match result {
            Ok(dir) => {
                let msg = format!("Exported {} and {}", path.display(), dir.display());
                self.set_status(msg);
            }
            Err(e) => self.set_error(format!("Export failed: {e:#}")),
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        tracing::warn!(%msg, "dashboard error");
        self.status_message = Some((msg, StatusLevel::Error));
    }
}

pub fn clamp_samples(n: usize) -> usize {
    n.clamp(MIN_SAMPLES, MAX_SAMPLES)
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(StudyConfig::default(), PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_default_pass() {
        let app = AppState::default();
        assert_eq!(app.sample_count, 11);
        assert!(app.show_points);
        assert_eq!(app.panels().len(), 15);
        assert_eq!(app.summary.len(), 15);
    }

    #[test]
    fn five_samples_give_fifteen_rows() {
        let mut app = AppState::default();
        app.set_sample_count(5);
        for panel in app.panels() {
            assert_eq!(panel.table.len(), 15);
        }
    }

    #[test]
    fn sample_count_is_clamped() {
        let mut app = AppState::default();
        app.set_sample_count(0);
        assert_eq!(app.sample_count, MIN_SAMPLES);
        app.decrease_samples();
        assert_eq!(app.sample_count, MIN_SAMPLES);
        app.set_sample_count(500);
        assert_eq!(app.sample_count, MAX_SAMPLES);
        app.increase_samples();
        assert_eq!(app.sample_count, MAX_SAMPLES);
    }

    #[test]
    fn config_sample_count_outside_range_is_clamped() {
        let config = StudyConfig {
            sample_count: 200,
            ..StudyConfig::default()
        };
        let app = AppState::new(config, PathBuf::from("."));
        assert_eq!(app.sample_count, MAX_SAMPLES);
    }

    #[test]
    fn toggle_points_reaches_pass() {
        let mut app = AppState::default();
        app.toggle_points();
        assert!(!app.show_points);
        assert!(!app.run.as_ref().unwrap().show_points);
    }

    #[test]
    fn same_controls_same_panels() {
        let mut app = AppState::default();
        let before = app.panels().to_vec();
        app.increase_samples();
        app.decrease_samples();
        let after = app.panels();
        for (a, b) in before.iter().zip(after) {
            assert_eq!(a.table, b.table);
        }
    }

    #[test]
    fn scroll_is_bounded_per_view() {
        let mut app = AppState::default();
        for _ in 0..20 {
            app.scroll_down();
        }
        assert_eq!(app.scroll, 4); // 15 cards / 3 columns
        app.toggle_view();
        assert_eq!(app.view, View::Table);
        assert_eq!(app.scroll, 0);
        for _ in 0..20 {
            app.scroll_down();
        }
        assert_eq!(app.scroll, 14);
        app.scroll_up();
        assert_eq!(app.scroll, 13);
    }
}
