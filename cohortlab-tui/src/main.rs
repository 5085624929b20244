//! CohortLab dashboard binary.
//!
//! Usage: `cohortlab-tui [study.toml]`. Without a study file the built-in
//! CMV / NK-cell catalog is used. Logging goes to a file, and only when
//! `COHORTLAB_LOG` is set.

use std::fs::File;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use cohortlab_core::StudyConfig;
use cohortlab_tui::app::AppState;
use cohortlab_tui::{input, persistence, ui};

const LOG_ENV: &str = "COHORTLAB_LOG";

fn main() -> Result<()> {
    let app_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cohortlab");
    init_logging(&app_dir)?;

    let study_path = std::env::args_os().nth(1);
    let config = match &study_path {
        Some(path) => StudyConfig::from_file(Path::new(&path))
            .with_context(|| format!("failed to load study {}", Path::new(&path).display()))?,
        None => StudyConfig::default(),
    };

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let state_path = app_dir.join("state.json");
    let export_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut app = AppState::new(config, export_dir);
    persistence::restore(&mut app, persistence::load(&state_path), study_path.is_some());

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    let _ = persistence::save(&state_path, &persistence::extract(&app));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}

/// File logging, enabled by `COHORTLAB_LOG`. The terminal stays untouched.
fn init_logging(app_dir: &Path) -> Result<()> {
    let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) else {
        return Ok(());
    };
    std::fs::create_dir_all(app_dir)
        .with_context(|| format!("failed to create {}", app_dir.display()))?;
    let log_path = app_dir.join("dashboard.log");
    let file = File::create(&log_path)
        .with_context(|| format!("failed to create log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    tracing::info!(path = %log_path.display(), "dashboard logging enabled");
    Ok(())
}
