//! One render pass: config in, panels out.
//!
//! Static export and the dashboard both go through `assemble`. A pass owns
//! its `SampleRng`, so two passes with the same config produce identical
//! panels regardless of what ran before.

use thiserror::Error;

use crate::config::{ConfigError, StudyConfig};
use crate::panel::{build_panel, Panel, PanelError, PanelOptions};
use crate::rng::SampleRng;

#[derive(Debug, Error)]
pub enum StudyError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("sample generation failed: {0}")]
    Panel(#[from] PanelError),
}

impl StudyConfig {
    pub fn panel_options(&self) -> PanelOptions {
        PanelOptions {
            sample_count: self.sample_count,
            offset: self.annotation.offset,
            ..PanelOptions::default()
        }
    }
}

/// Build one panel per marker, in catalog order.
pub fn assemble(config: &StudyConfig) -> Result<Vec<Panel>, StudyError> {
    config.validate()?;
    let opts = config.panel_options();
    let mut rng = SampleRng::new(config.seed, config.seed_mode);

    let panels = config
        .markers
        .iter()
        .map(|spec| build_panel(spec, &mut rng, &opts))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(
        markers = panels.len(),
        sample_count = config.sample_count,
        seed = config.seed,
        seed_mode = config.seed_mode.label(),
        "assembled panels"
    );
    Ok(panels)
}
