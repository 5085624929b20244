//! Sidebar persistence: JSON save/load across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use cohortlab_core::config::DEFAULT_SAMPLE_COUNT;

use crate::app::{clamp_samples, AppState, View};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub sample_count: usize,
    pub show_points: bool,
    pub view: View,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            show_points: true,
            view: View::Cards,
        }
    }
}

/// Load persisted state from disk. `None` if the file is missing or corrupt.
pub fn load(path: &Path) -> Option<PersistedState> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(state) => Some(state),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable dashboard state");
            None
        }
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        sample_count: app.sample_count,
        show_points: app.show_points,
        view: app.view,
    }
}

/// Startup restore. Without a saved state the study's own controls stand.
/// With `study_given` only the view is restored, so an explicit study file
/// keeps its sample count and point toggle.
pub fn restore(app: &mut AppState, saved: Option<PersistedState>, study_given: bool) {
    let Some(mut state) = saved else {
        return;
    };
    if study_given {
        state.sample_count = app.sample_count;
        state.show_points = app.show_points;
    }
    apply(app, state);
}

/// Apply persisted state, re-rendering once if the controls changed.
pub fn apply(app: &mut AppState, state: PersistedState) {
    let sample_count = clamp_samples(state.sample_count);
    let changed = sample_count != app.sample_count || state.show_points != app.show_points;
    app.sample_count = sample_count;
    app.show_points = state.show_points;
    app.view = state.view;
    if changed {
        app.refresh();
    }
}
