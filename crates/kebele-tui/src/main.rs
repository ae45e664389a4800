//! `kebele` — terminal front-end for the kebele resident registry.
//!
//! # Usage
//!
//! ```
//! kebele --url http://localhost:8000 --token <bearer>
//! kebele --config ~/.config/kebele/config.toml
//! ```

mod app;
mod download;
mod ui;

use std::{io, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use kebele_cert::PdfEngine;
use kebele_client::{ApiClient, ApiConfig};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "kebele", about = "Terminal front-end for the kebele resident registry")]
struct Args {
  /// Path to a TOML config file (url, token, downloads_dir).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the registry backend (default: http://localhost:8000).
  #[arg(long, env = "KEBELE_URL")]
  url: Option<String>,

  /// API bearer token.
  #[arg(long, env = "KEBELE_TOKEN")]
  token: Option<String>,

  /// Directory generated certificates are written to (default: ./downloads).
  #[arg(long, env = "KEBELE_DOWNLOADS")]
  downloads_dir: Option<PathBuf>,

  /// Append tracing output to this file. Without it, nothing is logged —
  /// the terminal belongs to the UI.
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:           String,
  #[serde(default)]
  token:         String,
  #[serde(default)]
  downloads_dir: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  if let Some(path) = &args.log_file {
    let file = std::fs::OpenOptions::new()
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
      .with_writer(std::sync::Arc::new(file))
      .with_ansi(false)
      .init();
  }

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:8000".to_string()),
    token:    args
      .token
      .or_else(|| (!file_cfg.token.is_empty()).then(|| file_cfg.token.clone()))
      .unwrap_or_default(),
  };
  let downloads_dir = args
    .downloads_dir
    .or_else(|| (!file_cfg.downloads_dir.is_empty()).then(|| PathBuf::from(&file_cfg.downloads_dir)))
    .unwrap_or_else(|| PathBuf::from("downloads"));

  let client = ApiClient::new(api_config).context("building API client")?;

  // Acquire the drawing capability once, up front. A failure is survivable:
  // the app runs, and client-side generation reports it is unavailable.
  let engine = match PdfEngine::initialize() {
    Ok(engine) => Some(engine),
    Err(e) => {
      tracing::warn!("pdf engine unavailable: {e}");
      None
    }
  };

  let mut app = App::new(client, engine, downloads_dir);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Initial fetch; errors land in the list's load state, not here.
  app.load_residents().await;

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
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

    if let Some(evt) = maybe_event {
      match evt {
        Event::Key(key) => {
          let cont = app.handle_key(key).await?;
          if !cont {
            break;
          }
        }
        Event::Resize(_, _) => {
          // Terminal will redraw on next iteration.
        }
        _ => {}
      }
    }
  }

  Ok(())
}
