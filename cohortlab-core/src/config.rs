//! Study configuration, loaded from TOML or built from defaults.
//!
//! Defaults reproduce the published CMV / NK-cell figure: 11 points per
//! cohort, seed 42, a 3-column grid at 18x25 inches and 300 DPI.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::MarkerCatalog;
use crate::domain::OffsetRule;
use crate::rng::SeedMode;

pub const DEFAULT_SAMPLE_COUNT: usize = 11;
pub const DEFAULT_SEED: u64 = 42;
/// Largest figure side, in pixels, the bitmap backend is asked to allocate.
pub const MAX_FIGURE_SIDE_PX: f64 = 20_000.0;

/// Errors from loading or validating a study file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    pub sample_count: usize,
    pub seed: u64,
    pub seed_mode: SeedMode,
    pub show_points: bool,
    pub figure: FigureConfig,
    pub annotation: AnnotationConfig,
    pub markers: MarkerCatalog,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            seed: DEFAULT_SEED,
            seed_mode: SeedMode::default(),
            show_points: true,
            figure: FigureConfig::default(),
            annotation: AnnotationConfig::default(),
            markers: MarkerCatalog::builtin(),
        }
    }
}

/// Static figure settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub columns: usize,
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
    pub output: PathBuf,
    pub y_label: String,
    /// Tried in order; the first one the backend can load wins.
    pub font_families: Vec<String>,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            columns: 3,
            width_in: 18.0,
            height_in: 25.0,
            dpi: 300,
            output: PathBuf::from("cmv_analiz_sonuc.png"),
            y_label: "% Ekspresyon".into(),
            font_families: ["Arial", "DejaVu Sans", "Liberation Sans", "sans-serif"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl FigureConfig {
    /// Pixel size of the whole figure.
    pub fn pixel_size(&self) -> (u32, u32) {
        let px = |inches: f64| (inches * f64::from(self.dpi)).round().max(1.0) as u32;
        (px(self.width_in), px(self.height_in))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    pub offset: OffsetRule,
}

impl StudyConfig {
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: StudyConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_count == 0 {
            return Err(invalid("sample_count must be > 0"));
        }
        if self.figure.columns == 0 {
            return Err(invalid("figure.columns must be > 0"));
        }
        if self.figure.dpi == 0 {
            return Err(invalid("figure.dpi must be > 0"));
        }
        if !(self.figure.width_in > 0.0 && self.figure.height_in > 0.0) {
            return Err(invalid("figure.width_in and figure.height_in must be > 0"));
        }
        let dpi = f64::from(self.figure.dpi);
        let (width_px, height_px) = (self.figure.width_in * dpi, self.figure.height_in * dpi);
        if !(width_px <= MAX_FIGURE_SIDE_PX && height_px <= MAX_FIGURE_SIDE_PX) {
            return Err(invalid(format!(
                "figure is {width_px:.0}x{height_px:.0} px; each side must be <= {MAX_FIGURE_SIDE_PX}"
            )));
        }
        let magnitude = self.annotation.offset.magnitude();
        if !(magnitude.is_finite() && magnitude > 0.0) {
            return Err(invalid(format!(
                "annotation.offset must be finite and > 0, got {magnitude}"
            )));
        }
        if self.markers.is_empty() {
            return Err(invalid("markers must not be empty"));
        }

        let mut seen = HashSet::new();
        for spec in &self.markers {
            if !seen.insert(spec.name.as_str()) {
                return Err(invalid(format!("duplicate marker '{}'", spec.name)));
            }
            for p in &spec.cohorts {
                if !p.mean.is_finite() || !p.sd.is_finite() || p.sd < 0.0 {
                    return Err(invalid(format!(
                        "marker '{}': mean must be finite and sd >= 0, got ({}, {})",
                        spec.name, p.mean, p.sd
                    )));
                }
            }
            if let Some(ann) = &spec.annotation {
                if ann.left == ann.right {
                    return Err(invalid(format!(
                        "marker '{}': annotation needs two distinct cohorts",
                        spec.name
                    )));
                }
            }
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}
