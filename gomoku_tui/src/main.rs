//! Terminal client for the gomoku game service.

#![warn(missing_docs)]

mod app;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use gomoku_client::{ClientConfig, DEFAULT_BOARD_SIZE, HttpGameService, SessionController};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;

/// Terminal client for the gomoku game service.
#[derive(Parser, Debug)]
#[command(name = "gomoku_tui", about = "Play gomoku against the game service", version)]
struct Cli {
    /// Game service base URL
    #[arg(long, default_value = "http://localhost:8080")]
    server_url: String,

    /// Board width in cells
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    width: u16,

    /// Board height in cells
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    height: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    info!(server_url = %cli.server_url, "Starting gomoku TUI");

    let config = ClientConfig::new(cli.server_url).with_board(cli.width, cli.height);
    let service = HttpGameService::new(config.base_url().clone());
    let controller = SessionController::new(Box::new(service), config);
    let mut app = App::new(controller);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if app.should_quit() {
            return Ok(());
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key).await;
                }
            }
        }
    }
}
