//! Integration tests for the static export path: artifacts on disk and the
//! grid figure.

use cohortlab_core::layout::{AxisLabelPolicy, GridLayout};
use cohortlab_core::{MarkerCatalog, SeedMode, StudyConfig};
use cohortlab_runner::export::{
    export_observations_csv, MANIFEST_FILE, OBSERVATIONS_FILE, SUMMARY_FILE,
};
use cohortlab_runner::style::fonts_available;
use cohortlab_runner::{
    load_artifacts, render_figure, run_study, save_artifacts, FigureOptions, ImageFormat,
};
use proptest::prelude::*;

fn config(n: usize) -> StudyConfig {
    StudyConfig {
        sample_count: n,
        ..StudyConfig::default()
    }
}

fn arb_seed_mode() -> impl Strategy<Value = SeedMode> {
    prop_oneof![
        Just(SeedMode::Shared),
        Just(SeedMode::Reseeded),
        Just(SeedMode::Derived),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// The CSV always has one non-negative value per observation.
    #[test]
    fn csv_rows_match_sample_count(n in 1usize..30, seed in any::<u64>(), mode in arb_seed_mode()) {
        let study = StudyConfig { sample_count: n, seed, seed_mode: mode, ..StudyConfig::default() };
        let run = run_study(&study).unwrap();
        let csv = export_observations_csv(&run).unwrap();
        let rows: Vec<&str> = csv.lines().skip(1).collect();
        prop_assert_eq!(rows.len(), 15 * 3 * n);
        for row in rows {
            let value: f64 = row.rsplit(',').next().unwrap().parse().unwrap();
            prop_assert!(value >= 0.0);
        }
    }
}

#[test]
fn artifacts_roundtrip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let run = run_study(&config(5)).unwrap();

    let run_dir = save_artifacts(&run, &MarkerCatalog::builtin(), dir.path()).unwrap();
    assert!(run_dir.join(MANIFEST_FILE).exists());
    assert!(run_dir.join(OBSERVATIONS_FILE).exists());
    assert!(run_dir.join(SUMMARY_FILE).exists());

    let loaded = load_artifacts(&run_dir).unwrap();
    assert_eq!(loaded.sample_count, 5);
    assert_eq!(loaded.panels.len(), 15);
    for panel in &loaded.panels {
        assert_eq!(panel.table.len(), 15);
    }

    let csv = std::fs::read_to_string(run_dir.join(OBSERVATIONS_FILE)).unwrap();
    assert_eq!(csv.lines().count(), 1 + 15 * 15);
}

#[test]
fn load_from_missing_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_artifacts(&dir.path().join("nope")).is_err());
}

/// Renders a small SVG. Text layout needs at least one system font, so the
/// check only runs on hosts that expose one.
#[test]
fn svg_figure_is_written() {
    if !fonts_available() {
        eprintln!("no system fonts; skipping figure check");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("figure.svg");
    let run = run_study(&config(11)).unwrap();
    let opts = FigureOptions {
        layout: GridLayout::new(3, AxisLabelPolicy::LeftColumnOnly),
        size: (900, 1250),
        dpi: 50,
        font_family: "sans-serif".into(),
        y_label: "% Ekspresyon".into(),
        show_points: true,
    };

    render_figure(&run.panels, &opts, &path, ImageFormat::Svg).unwrap();
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("CD56dim CTLA-4+"));
    assert!(svg.contains("* p=0.036"));
}
