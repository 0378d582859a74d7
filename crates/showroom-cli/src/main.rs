//! `showroom`: terminal client for the car dealership inventory.
//!
//! # Usage
//!
//! ```
//! showroom --url http://localhost:5001
//! showroom --config ~/.config/showroom.toml --log-file /tmp/showroom.log
//! ```

mod app;
mod form;
mod settings;
mod ui;

use std::{fs::File, io, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use app::{App, Loaded};
use clap::Parser;
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
  },
};
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::Cli;
use showroom_client::HttpProvider;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const TICK: Duration = Duration::from_millis(50);

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  let log_file = File::create(&cli.log_file).with_context(|| {
    format!("failed to open log file {}", cli.log_file.display())
  })?;
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(Mutex::new(log_file))
    .with_ansi(false)
    .init();

  let client_config = cli.client_config()?;
  tracing::info!(base_url = %client_config.base_url, "starting showroom");
  let provider =
    HttpProvider::new(&client_config).context("failed to build HTTP client")?;

  let (mut app, rx) = App::new(provider);
  app.start();

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app, rx).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  tracing::info!("exiting showroom");
  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<HttpProvider>,
  mut rx: UnboundedReceiver<Loaded>,
) -> Result<()> {
  while !app.should_quit {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    tokio::select! {
      () = tokio::time::sleep(TICK) => {
        while event::poll(Duration::ZERO).context("polling terminal")? {
          match event::read().context("reading terminal event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
              app.handle_key(key);
            }
            // Resize and the rest redraw on the next iteration.
            _ => {}
          }
        }
      }

      Some(loaded) = rx.recv() => app.apply(loaded),
    }
  }

  Ok(())
}
