//! `showcase`: terminal client for the university project showcase.
//!
//! # Usage
//!
//! ```
//! showcase --url https://showcase.uni.edu/api --session connect.sid=...
//! showcase --config ~/.config/showcase/config.toml
//! ```
//!
//! Logs go to a file (`showcase.log` in the config directory by default);
//! set `RUST_LOG` to change verbosity.

mod app;
mod debounce;
mod prefs;
mod route;
mod settings;
mod ui;

#[cfg(test)]
mod tests;

use std::{fs::OpenOptions, io, path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use prefs::Preferences;
use ratatui::{Terminal, backend::CrosstermBackend};
use route::Route;
use showcase_client::ShowcaseClient;
use showcase_query::{Hooks, QueryCache};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "showcase", version, about = "Terminal client for the project showcase")]
struct Args {
  /// Path to a TOML config file (url, session, prefs, log_file, timeout_secs).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// API root, e.g. https://showcase.uni.edu/api.
  #[arg(long, env = "SHOWCASE_URL")]
  url: Option<String>,

  /// Session cookie copied from a signed-in browser (`name=value`).
  #[arg(long, env = "SHOWCASE_SESSION")]
  session: Option<String>,

  /// Where UI preferences are kept.
  #[arg(long, value_name = "FILE")]
  prefs: Option<PathBuf>,

  /// Log file; the terminal is owned by the UI.
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  let file_cfg = settings::load(args.config.as_deref())?;

  let log_path = args
    .log_file
    .clone()
    .or_else(|| file_cfg.log_file.clone())
    .unwrap_or_else(|| settings::config_dir().join("showcase.log"));
  init_tracing(&log_path)?;

  let api_config = settings::api_config(args.url, args.session, &file_cfg);
  tracing::info!(base_url = %api_config.base_url, "starting");
  let client = ShowcaseClient::new(api_config)?;
  let hooks = Hooks::new(client, QueryCache::new());

  let prefs_path = args
    .prefs
    .or_else(|| file_cfg.prefs.clone())
    .unwrap_or_else(Preferences::default_path);
  let prefs = Preferences::load(&prefs_path);
  let mut app = App::new(hooks, prefs, prefs_path);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  app.navigate(Route::Projects).await;
  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  if let Err(e) = &run_result {
    tracing::error!(error = %e, "exited with error");
  }
  run_result
}

fn init_tracing(path: &std::path::Path) -> Result<()> {
  if let Some(dir) = path.parent() {
    std::fs::create_dir_all(dir)
      .with_context(|| format!("creating log directory {}", dir.display()))?;
  }
  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("opening log file {}", path.display()))?;

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(Arc::new(file))
    .with_ansi(false)
    .init();
  Ok(())
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    app.tick().await;

    if let Some(Event::Key(key)) = maybe_event
      && key.kind == KeyEventKind::Press
      && !app.handle_key(key).await
    {
      break;
    }
  }

  Ok(())
}
