//! CohortLab CLI: static export and catalog inspection.
//!
//! Commands:
//! - `render`: generate every panel and write the grid figure (and optionally artifacts)
//! - `sample`: run the generator once and print the values as JSON
//! - `markers`: list the marker catalog with groups and annotations
//! - `table`: print the summary table as Markdown
//! - `default-config`: print the built-in study as TOML

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use cohortlab_core::summary::{summary_rows, to_markdown};
use cohortlab_core::{generate_seeded, SeedMode, StudyConfig};
use cohortlab_runner::export::save_artifacts;
use cohortlab_runner::{export_figure, run_study, ImageFormat};

const LOG_ENV: &str = "COHORTLAB_LOG";

#[derive(Parser)]
#[command(
    name = "cohortlab",
    about = "CohortLab CLI: synthetic cohort comparison figures"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate all panels and write the multi-panel figure.
    Render {
        /// Study TOML file. Defaults to the built-in CMV / NK-cell study.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Samples per cohort.
        #[arg(long)]
        samples: Option<usize>,

        /// Master seed.
        #[arg(long)]
        seed: Option<u64>,

        /// How the seed is applied across draws.
        #[arg(long, value_enum)]
        seed_mode: Option<SeedModeArg>,

        /// Output file. Defaults to the study's figure.output.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Image format. Defaults to the output file's extension.
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Resolution in dots per inch.
        #[arg(long)]
        dpi: Option<u32>,

        /// Draw boxes only, without individual points.
        #[arg(long, default_value_t = false)]
        no_points: bool,

        /// Also write manifest.json, observations.csv and summary.md under this directory.
        #[arg(long)]
        artifacts: Option<PathBuf>,
    },
    /// Draw one clamped normal sample and print it as JSON.
    Sample {
        #[arg(long, allow_negative_numbers = true)]
        mean: f64,

        #[arg(long, allow_negative_numbers = true)]
        sd: f64,

        /// Number of values.
        #[arg(long, default_value_t = cohortlab_core::config::DEFAULT_SAMPLE_COUNT)]
        n: usize,

        #[arg(long, default_value_t = cohortlab_core::config::DEFAULT_SEED)]
        seed: u64,
    },
    /// List the marker catalog.
    Markers {
        /// Study TOML file. Defaults to the built-in study.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the summary table (mean ± sd per cohort, p-value) as Markdown.
    Table {
        /// Study TOML file. Defaults to the built-in study.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the built-in study as TOML, ready to edit.
    DefaultConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum SeedModeArg {
    Shared,
    Reseeded,
    Derived,
}

impl From<SeedModeArg> for SeedMode {
    fn from(arg: SeedModeArg) -> Self {
        match arg {
            SeedModeArg::Shared => SeedMode::Shared,
            SeedModeArg::Reseeded => SeedMode::Reseeded,
            SeedModeArg::Derived => SeedMode::Derived,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Png,
    Svg,
}

impl From<FormatArg> for ImageFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => ImageFormat::Png,
            FormatArg::Svg => ImageFormat::Svg,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            config,
            samples,
            seed,
            seed_mode,
            output,
            format,
            dpi,
            no_points,
            artifacts,
        } => {
            let mut study = load_study(config)?;
            if let Some(n) = samples {
                study.sample_count = n;
            }
            if let Some(seed) = seed {
                study.seed = seed;
            }
            if let Some(mode) = seed_mode {
                study.seed_mode = mode.into();
            }
            if let Some(output) = output {
                study.figure.output = output;
            }
            if let Some(dpi) = dpi {
                study.figure.dpi = dpi;
            }
            if no_points {
                study.show_points = false;
            }
            run_render(&study, format.map(Into::into), artifacts)
        }
        Commands::Sample { mean, sd, n, seed } => {
            let values = generate_seeded(mean, sd, n, seed)?;
            println!("{}", serde_json::to_string(&values)?);
            Ok(())
        }
        Commands::Markers { config } => run_markers(&load_study(config)?),
        Commands::Table { config } => {
            let study = load_study(config)?;
            print!("{}", to_markdown(&summary_rows(&study.markers)));
            Ok(())
        }
        Commands::DefaultConfig => {
            print!("{}", StudyConfig::default().to_toml()?);
            Ok(())
        }
    }
}

fn load_study(path: Option<PathBuf>) -> Result<StudyConfig> {
    match path {
        Some(path) => StudyConfig::from_file(&path)
            .with_context(|| format!("failed to load study {}", path.display())),
        None => Ok(StudyConfig::default()),
    }
}

fn run_render(
    study: &StudyConfig,
    format: Option<ImageFormat>,
    artifacts: Option<PathBuf>,
) -> Result<()> {
    tracing::info!(
        samples = study.sample_count,
        seed = study.seed,
        markers = study.markers.len(),
        "render requested"
    );
    let run = run_study(study)?;
    let path = study.figure.output.as_path();
    let format = format.unwrap_or_else(|| ImageFormat::from_path(path));
    export_figure(&run, study, path, format)
        .with_context(|| format!("failed to render {}", path.display()))?;

    println!(
        "Rendered {} panels (n = {}, seed {} {}) to {}",
        run.panels.len(),
        run.sample_count,
        run.seed,
        run.seed_mode.label(),
        path.display()
    );

    if let Some(dir) = artifacts {
        let run_dir = save_artifacts(&run, &study.markers, &dir)?;
        println!("Artifacts saved to: {}", run_dir.display());
    }
    Ok(())
}

fn run_markers(study: &StudyConfig) -> Result<()> {
    for spec in &study.markers {
        let group = spec.group.as_deref().unwrap_or("-");
        let params: Vec<String> = spec
            .cohorts
            .iter()
            .map(|p| format!("{:.2}±{:.2}", p.mean, p.sd))
            .collect();
        let annotation = spec
            .annotation
            .as_ref()
            .map(|a| format!("  [{} vs {}: {}]", a.left, a.right, a.label))
            .unwrap_or_default();
        println!(
            "{:<34} {:<14} {}{}",
            spec.name,
            group,
            params.join("  "),
            annotation
        );
    }
    let annotated = study.markers.annotated();
    println!(
        "\n{} markers, {} annotated: {}",
        study.markers.len(),
        annotated.len(),
        annotated.join(", ")
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn render_flags_parse() {
        let cli = Cli::try_parse_from([
            "cohortlab",
            "render",
            "--samples",
            "5",
            "--seed-mode",
            "reseeded",
            "--format",
            "svg",
            "--no-points",
        ])
        .unwrap();
        match cli.command {
            Commands::Render {
                samples,
                seed_mode,
                format,
                no_points,
                ..
            } => {
                assert_eq!(samples, Some(5));
                assert!(matches!(seed_mode, Some(SeedModeArg::Reseeded)));
                assert!(matches!(format, Some(FormatArg::Svg)));
                assert!(no_points);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn sample_accepts_negative_mean() {
        let cli = Cli::try_parse_from(["cohortlab", "sample", "--mean", "-2", "--sd", "1"]).unwrap();
        match cli.command {
            Commands::Sample { mean, n, seed, .. } => {
                assert_eq!(mean, -2.0);
                assert_eq!(n, 11);
                assert_eq!(seed, 42);
            }
            _ => panic!("expected sample"),
        }
    }
}
