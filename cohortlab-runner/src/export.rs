//! Artifact export: JSON manifest, CSV observations, Markdown summary.
//!
//! The manifest carries a `schema_version` field. Newer versions are
//! rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use cohortlab_core::domain::Cohort;
use cohortlab_core::summary::{summary_rows, to_markdown};
use cohortlab_core::MarkerCatalog;

use crate::runner::{StudyRun, SCHEMA_VERSION};

pub const MANIFEST_FILE: &str = "manifest.json";
pub const OBSERVATIONS_FILE: &str = "observations.csv";
pub const SUMMARY_FILE: &str = "summary.md";

// ─── JSON export ────────────────────────────────────────────────────

pub fn export_json(run: &StudyRun) -> Result<String> {
    serde_json::to_string_pretty(run).context("failed to serialize StudyRun to JSON")
}

/// Deserialize a `StudyRun`, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<StudyRun> {
    let run: StudyRun =
        serde_json::from_str(json).context("failed to deserialize StudyRun from JSON")?;
    if run.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            run.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(run)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Long-format observations. Columns: marker, cohort, value
pub fn export_observations_csv(run: &StudyRun) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["marker", "cohort", "value"])?;

    for panel in &run.panels {
        for obs in &panel.table.rows {
            wtr.write_record([
                panel.marker.as_str(),
                obs.cohort.label(),
                &format!("{:.6}", obs.value),
            ])?;
        }
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Markdown ───────────────────────────────────────────────────────

/// Summary table preceded by the run metadata.
pub fn generate_summary(run: &StudyRun, catalog: &MarkerCatalog) -> String {
    let mut md = String::with_capacity(2048);
    md.push_str("# Study Summary\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!(
        "| Generated | {} |\n",
        run.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!("| Seed | {} ({}) |\n", run.seed, run.seed_mode.label()));
    md.push_str(&format!("| Samples per cohort | {} |\n", run.sample_count));
    md.push_str(&format!("| Panels | {} |\n", run.panels.len()));
    md.push('\n');

    md.push_str("## Cohorts\n\n");
    md.push_str("| Cohort | Colour |\n");
    md.push_str("| --- | --- |\n");
    for cohort in Cohort::ALL {
        md.push_str(&format!("| {} | {} |\n", cohort.label(), cohort.color().hex()));
    }
    md.push('\n');

    md.push_str("## Configured parameters (mean ± sd)\n\n");
    md.push_str(&to_markdown(&summary_rows(catalog)));
    md.push('\n');

    // Clamping at zero lifts the sample mean for low-mean markers.
    md.push_str("## Sample statistics (configured → sample, mean ± sd)\n\n");
    md.push_str("| Marker | Cohort | Configured | Sample |\n");
    md.push_str("| --- | --- | --- | --- |\n");
    for panel in &run.panels {
        for c in &panel.cohorts {
            md.push_str(&format!(
                "| {} | {} | {:.2} ± {:.2} | {:.2} ± {:.2} |\n",
                panel.marker,
                c.cohort.label(),
                c.configured_mean,
                c.configured_sd,
                c.empirical_mean,
                c.empirical_sd
            ));
        }
    }
    md
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the artifact set for a run into a timestamped directory under
/// `output_dir` and return its path.
pub fn save_artifacts(run: &StudyRun, catalog: &MarkerCatalog, output_dir: &Path) -> Result<PathBuf> {
    let dirname = format!("run_{}", run.generated_at.format("%Y%m%d_%H%M%S"));
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    std::fs::write(run_dir.join(MANIFEST_FILE), export_json(run)?)?;
    std::fs::write(run_dir.join(OBSERVATIONS_FILE), export_observations_csv(run)?)?;
    std::fs::write(run_dir.join(SUMMARY_FILE), generate_summary(run, catalog))?;

    tracing::info!(dir = %run_dir.display(), "artifacts written");
    Ok(run_dir)
}

/// Load a `StudyRun` from an artifact directory's manifest.
pub fn load_artifacts(dir: &Path) -> Result<StudyRun> {
    let manifest_path = dir.join(MANIFEST_FILE);
    let json = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    import_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::run_study;
    use cohortlab_core::StudyConfig;

    fn small_run() -> StudyRun {
        let config = StudyConfig {
            sample_count: 4,
            ..StudyConfig::default()
        };
        run_study(&config).unwrap()
    }

    #[test]
    fn json_roundtrip() {
        let run = small_run();
        let back = import_json(&export_json(&run).unwrap()).unwrap();
        assert_eq!(back.generated_at, run.generated_at);
        assert_eq!(back.seed, run.seed);
        assert_eq!(back.seed_mode, run.seed_mode);
        assert_eq!(back.panels.len(), run.panels.len());
        for (a, b) in back.panels.iter().zip(&run.panels) {
            assert_eq!(a.marker, b.marker);
            assert_eq!(a.table.len(), b.table.len());
            for (x, y) in a.table.rows.iter().zip(&b.table.rows) {
                assert_eq!(x.cohort, y.cohort);
                assert!((x.value - y.value).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn newer_schema_is_rejected() {
        let mut run = small_run();
        run.schema_version = SCHEMA_VERSION + 1;
        let json = export_json(&run).unwrap();
        let err = import_json(&json).unwrap_err();
        assert!(err.to_string().contains("unsupported schema version"));
    }

    #[test]
    fn missing_schema_version_defaults_to_current() {
        let run = small_run();
        let mut value: serde_json::Value = serde_json::from_str(&export_json(&run).unwrap()).unwrap();
        value.as_object_mut().unwrap().remove("schema_version");
        let back = import_json(&value.to_string()).unwrap();
        assert_eq!(back.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn csv_has_one_row_per_observation() {
        let run = small_run();
        let csv = export_observations_csv(&run).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("marker,cohort,value"));
        assert_eq!(lines.count(), run.observation_count());
        assert!(csv.contains("CD56dim CTLA-4+,CMV (-),"));
        assert!(csv.contains(",Vaka Grubu,"));
    }

    #[test]
    fn summary_lists_every_marker() {
        let run = small_run();
        let catalog = MarkerCatalog::builtin();
        let md = generate_summary(&run, &catalog);
        assert!(md.starts_with("# Study Summary"));
        assert!(md.contains("| Samples per cohort | 4 |"));
        assert!(md.contains("| Vaka Grubu | #0D47A1 |"));
        assert!(md.contains("## Sample statistics"));
        for spec in &catalog {
            assert!(md.contains(&spec.name), "missing {}", spec.name);
        }
    }
}
