//! Backend-neutral panel assembly.
//!
//! A `Panel` holds everything a drawing backend needs for one marker: the
//! observation table, a box summary per cohort, per-point jitter and the
//! resolved annotation bracket. Backends only translate it into draw calls.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::{BracketGeometry, Cohort, MarkerSpec, ObservationTable, OffsetRule};
use crate::rng::SampleRng;
use crate::sampler::SampleError;
use crate::stats::{self, BoxSummary};

/// Half-width of the strip-plot jitter on the cohort axis.
pub const DEFAULT_JITTER: f64 = 0.15;

/// Width of each box on the cohort axis.
pub const BOX_WIDTH: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelOptions {
    pub sample_count: usize,
    pub jitter: f64,
    pub whisker: f64,
    pub offset: OffsetRule,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            sample_count: crate::config::DEFAULT_SAMPLE_COUNT,
            jitter: DEFAULT_JITTER,
            whisker: stats::DEFAULT_WHISKER,
            offset: OffsetRule::default(),
        }
    }
}

/// Box summary plus configured and empirical moments for one cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortSummary {
    pub cohort: Cohort,
    pub configured_mean: f64,
    pub configured_sd: f64,
    pub empirical_mean: f64,
    /// Zero for single-value samples.
    pub empirical_sd: f64,
    pub summary: BoxSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub marker: String,
    pub group: Option<String>,
    pub table: ObservationTable,
    pub cohorts: Vec<CohortSummary>,
    /// Horizontal offset of each table row from its cohort position.
    pub jitter: Vec<f64>,
    pub bracket: Option<BracketGeometry>,
    pub y_max: f64,
}

impl Panel {
    /// Upper y bound that fits the data and the annotation with some headroom.
    pub fn y_upper(&self) -> f64 {
        let top = self
            .bracket
            .as_ref()
            .map_or(self.y_max, |b| b.top().max(self.y_max));
        let top = if top > 0.0 { top } else { 1.0 };
        top * 1.1
    }

    /// Points in plot coordinates: (cohort position + jitter, value).
    pub fn points(&self) -> impl Iterator<Item = (Cohort, f64, f64)> + '_ {
        self.table
            .rows
            .iter()
            .zip(&self.jitter)
            .map(|(obs, dx)| (obs.cohort, obs.cohort.position() as f64 + dx, obs.value))
    }

    pub fn summary_for(&self, cohort: Cohort) -> Option<&CohortSummary> {
        self.cohorts.iter().find(|c| c.cohort == cohort)
    }
}

/// Failure while assembling a panel, tagged with where it happened.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("marker '{marker}', cohort {cohort}: {source}")]
pub struct PanelError {
    pub marker: String,
    pub cohort: Cohort,
    #[source]
    pub source: SampleError,
}

/// Generate, tabulate and summarise one marker.
pub fn build_panel(
    spec: &MarkerSpec,
    rng: &mut SampleRng,
    opts: &PanelOptions,
) -> Result<Panel, PanelError> {
    let n = opts.sample_count;
    let mut samples: [Vec<f64>; 3] = Default::default();
    for cohort in Cohort::ALL {
        let params = spec.params(cohort);
        let sample = rng
            .sample(&spec.name, cohort, params, n)
            .map_err(|source| PanelError {
                marker: spec.name.clone(),
                cohort,
                source,
            })?;
        tracing::debug!(marker = %spec.name, %cohort, n, mode = rng.mode().label(), "generated sample");
        samples[cohort.position()] = sample;
    }

    let cohorts = Cohort::ALL
        .into_iter()
        .filter_map(|cohort| {
            let values = &samples[cohort.position()];
            let params = spec.params(cohort);
            Some(CohortSummary {
                cohort,
                configured_mean: params.mean,
                configured_sd: params.sd,
                empirical_mean: stats::mean(values)?,
                empirical_sd: stats::std_dev(values).unwrap_or(0.0),
                summary: BoxSummary::from_values(values, opts.whisker)?,
            })
        })
        .collect();

    let table = ObservationTable::from_samples(Some(spec.name.clone()), samples);
    let y_max = table.max_value().unwrap_or(0.0);

    let mut jitter_rng = rng.jitter_rng(&spec.name);
    let jitter = (0..table.len())
        .map(|_| {
            if opts.jitter > 0.0 {
                jitter_rng.gen_range(-opts.jitter..=opts.jitter)
            } else {
                0.0
            }
        })
        .collect();

    let bracket = spec
        .annotation
        .as_ref()
        .map(|ann| ann.bracket(y_max, opts.offset));

    Ok(Panel {
        marker: spec.name.clone(),
        group: spec.group.clone(),
        table,
        cohorts,
        jitter,
        bracket,
        y_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MarkerCatalog;
    use crate::domain::CohortParams;
    use crate::rng::SeedMode;

    fn opts(n: usize) -> PanelOptions {
        PanelOptions {
            sample_count: n,
            ..PanelOptions::default()
        }
    }

    #[test]
    fn table_has_three_n_rows() {
        let cat = MarkerCatalog::builtin();
        let mut rng = SampleRng::new(42, SeedMode::Shared);
        let panel = build_panel(&cat.markers()[0], &mut rng, &opts(11)).unwrap();
        assert_eq!(panel.table.len(), 33);
        for cohort in Cohort::ALL {
            assert_eq!(panel.table.count_for(cohort), 11);
        }
        assert_eq!(panel.jitter.len(), 33);
        assert_eq!(panel.cohorts.len(), 3);
    }

    #[test]
    fn jitter_stays_within_spread() {
        let cat = MarkerCatalog::builtin();
        let mut rng = SampleRng::new(1, SeedMode::Shared);
        let panel = build_panel(&cat.markers()[3], &mut rng, &opts(20)).unwrap();
        assert!(panel.jitter.iter().all(|dx| dx.abs() <= DEFAULT_JITTER));
    }

    #[test]
    fn zero_jitter_aligns_points() {
        let cat = MarkerCatalog::builtin();
        let mut rng = SampleRng::new(1, SeedMode::Shared);
        let o = PanelOptions {
            jitter: 0.0,
            ..opts(4)
        };
        let panel = build_panel(&cat.markers()[0], &mut rng, &o).unwrap();
        for (cohort, x, _) in panel.points() {
            assert_eq!(x, cohort.position() as f64);
        }
    }

    #[test]
    fn annotated_marker_gets_bracket_above_data() {
        let cat = MarkerCatalog::builtin();
        let spec = cat.get("CD56dim NKG2A").unwrap();
        let mut rng = SampleRng::new(42, SeedMode::Shared);
        let panel = build_panel(spec, &mut rng, &opts(11)).unwrap();
        let bracket = panel.bracket.as_ref().unwrap();
        assert_eq!(bracket.label, "* p<0.05");
        assert!(bracket.points.iter().all(|(_, y)| *y > panel.y_max));
        assert!(panel.y_upper() > bracket.top());
    }

    #[test]
    fn plain_marker_has_no_bracket() {
        let cat = MarkerCatalog::builtin();
        let spec = cat.get("CD56dim LAG3").unwrap();
        let mut rng = SampleRng::new(42, SeedMode::Shared);
        let panel = build_panel(spec, &mut rng, &opts(11)).unwrap();
        assert!(panel.bracket.is_none());
    }

    #[test]
    fn invalid_params_report_marker_and_cohort() {
        let spec = MarkerSpec::new(
            "broken",
            [
                CohortParams::new(1.0, 1.0),
                CohortParams::new(1.0, -2.0),
                CohortParams::new(1.0, 1.0),
            ],
        );
        let mut rng = SampleRng::new(42, SeedMode::Shared);
        let err = build_panel(&spec, &mut rng, &opts(5)).unwrap_err();
        assert_eq!(err.marker, "broken");
        assert_eq!(err.cohort, Cohort::CmvPositive);
    }

    #[test]
    fn all_zero_panel_has_positive_upper_bound() {
        let spec = MarkerSpec::new("zero", [CohortParams::new(0.0, 0.0); 3]);
        let mut rng = SampleRng::new(42, SeedMode::Shared);
        let panel = build_panel(&spec, &mut rng, &opts(3)).unwrap();
        assert_eq!(panel.y_max, 0.0);
        assert!(panel.y_upper() > 0.0);
    }
}
