//! Static grid figure: one box-and-strip panel per marker, drawn with plotters.
//!
//! Each panel places cohorts at x = 0, 1, 2. Boxes are 0.5 wide with Tukey
//! whiskers and no outlier markers; individual observations are drawn on top
//! as semi-transparent black dots. Annotated markers get a bracket and label
//! above the data. Any backend error aborts the render.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cohortlab_core::config::FigureConfig;
use cohortlab_core::domain::{Cohort, Rgb};
use cohortlab_core::layout::{AxisLabelPolicy, GridLayout};
use cohortlab_core::panel::BOX_WIDTH;
use cohortlab_core::Panel;

use crate::style::{pt, resolve_font_family, stroke_px};

#[derive(Debug, Error)]
pub enum FigureError {
    #[error("drawing backend error: {0}")]
    Backend(String),
    #[error("nothing to draw: no panels")]
    Empty,
    #[error("failed to create output directory: {0}")]
    Io(#[from] std::io::Error),
}

fn backend_err<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> FigureError {
    FigureError::Backend(e.to_string())
}

/// Output encoding of the figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    /// Guess from a file extension, defaulting to PNG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => ImageFormat::Svg,
            _ => ImageFormat::Png,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

/// Everything the renderer needs besides the panels.
#[derive(Debug, Clone)]
pub struct FigureOptions {
    pub layout: GridLayout,
    pub size: (u32, u32),
    pub dpi: u32,
    pub font_family: String,
    pub y_label: String,
    pub show_points: bool,
}

impl FigureOptions {
    /// Resolve options from config. Font lookup happens here, once per figure.
    pub fn from_config(figure: &FigureConfig, show_points: bool) -> Self {
        Self {
            layout: GridLayout::new(figure.columns, AxisLabelPolicy::LeftColumnOnly),
            size: figure.pixel_size(),
            dpi: figure.dpi,
            font_family: resolve_font_family(&figure.font_families),
            y_label: figure.y_label.clone(),
            show_points,
        }
    }
}

/// Render `panels` to `path` in the given format.
pub fn render_figure(
    panels: &[Panel],
    opts: &FigureOptions,
    path: &Path,
    format: ImageFormat,
) -> Result<(), FigureError> {
    if panels.is_empty() {
        return Err(FigureError::Empty);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    match format {
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, opts.size).into_drawing_area();
            draw_grid(&root, panels, opts)?;
            root.present().map_err(backend_err)?;
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, opts.size).into_drawing_area();
            draw_grid(&root, panels, opts)?;
            root.present().map_err(backend_err)?;
        }
    }
    tracing::info!(path = %path.display(), panels = panels.len(), ?format, "figure written");
    Ok(())
}

/// Draw all panels onto a grid split of `root`.
pub fn draw_grid<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    panels: &[Panel],
    opts: &FigureOptions,
) -> Result<(), FigureError> {
    root.fill(&WHITE).map_err(backend_err)?;
    let rows = opts.layout.rows(panels.len());
    let areas = root.split_evenly((rows, opts.layout.columns));

    for (i, (panel, area)) in panels.iter().zip(areas.iter()).enumerate() {
        let y_label = opts
            .layout
            .shows_y_label(i)
            .then_some(opts.y_label.as_str());
        draw_panel(area, panel, opts, y_label)?;
    }
    Ok(())
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

/// Tick label for a cohort position; blank between categories.
fn cohort_tick(x: f64) -> String {
    if (x - x.round()).abs() > 1e-6 || x < -0.5 {
        return String::new();
    }
    Cohort::from_position(x.round() as usize)
        .map(|c| c.label().to_string())
        .unwrap_or_default()
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    opts: &FigureOptions,
    y_label: Option<&str>,
) -> Result<(), FigureError> {
    let dpi = opts.dpi;
    let family = opts.font_family.as_str();
    let title_font = (family, pt(11.0, dpi)).into_font().style(FontStyle::Bold);
    let tick_font = (family, pt(9.0, dpi)).into_font();
    let line = stroke_px(1.5, dpi);

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.marker, title_font)
        .margin(pt(10.0, dpi) as u32)
        .x_label_area_size(pt(20.0, dpi) as u32)
        .y_label_area_size(pt(36.0, dpi) as u32)
        .build_cartesian_2d(-0.5f64..2.5f64, 0f64..panel.y_upper())
        .map_err(backend_err)?;

    let formatter = |x: &f64| cohort_tick(*x);
    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .disable_y_mesh()
        .x_labels(7)
        .x_label_formatter(&formatter)
        .label_style(tick_font.clone())
        .axis_desc_style(tick_font.clone())
        .axis_style(BLACK.stroke_width(line));
    if let Some(label) = y_label {
        mesh.y_desc(label);
    }
    mesh.draw().map_err(backend_err)?;

    let half = BOX_WIDTH / 2.0;
    let cap = half / 2.0;
    for summary in &panel.cohorts {
        let x = summary.cohort.position() as f64;
        let b = &summary.summary;
        let outline = BLACK.stroke_width(line);

        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(x - half, b.q1), (x + half, b.q3)],
                rgb(summary.cohort.color()).filled(),
            )))
            .map_err(backend_err)?;
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(x - half, b.q1), (x + half, b.q3)],
                outline,
            )))
            .map_err(backend_err)?;

        let segments = [
            vec![(x - half, b.median), (x + half, b.median)],
            vec![(x, b.q3), (x, b.whisker_high)],
            vec![(x, b.q1), (x, b.whisker_low)],
            vec![(x - cap, b.whisker_high), (x + cap, b.whisker_high)],
            vec![(x - cap, b.whisker_low), (x + cap, b.whisker_low)],
        ];
        chart
            .draw_series(segments.into_iter().map(|s| PathElement::new(s, outline)))
            .map_err(backend_err)?;
    }

    if opts.show_points {
        let radius = pt(2.5, dpi).round().max(1.0) as i32;
        let dot = BLACK.mix(0.6).filled();
        chart
            .draw_series(
                panel
                    .points()
                    .map(|(_, x, y)| Circle::new((x, y), radius, dot)),
            )
            .map_err(backend_err)?;
    }

    if let Some(bracket) = &panel.bracket {
        chart
            .draw_series(std::iter::once(PathElement::new(
                bracket.points.to_vec(),
                BLACK.stroke_width(line),
            )))
            .map_err(backend_err)?;

        let label_style = TextStyle::from((family, pt(9.0, dpi)).into_font().style(FontStyle::Bold))
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart
            .draw_series(std::iter::once(Text::new(
                bracket.label.clone(),
                bracket.label_pos,
                label_style,
            )))
            .map_err(backend_err)?;
    }

    Ok(())
}
