pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod forecast;
pub mod render;
pub mod ui;

#[cfg(test)]
mod test_support;

use std::{
    fs::OpenOptions,
    io::{self, Stdout},
    sync::Mutex,
    time::Duration,
};

use anyhow::{Context, Result};
use app::events::{AppEvent, spawn_input_task};
use app::state::{AppMode, AppState};
use cli::Cli;
use crossterm::{
    event::DisableMouseCapture,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const ONE_SHOT_TIMEOUT: Duration = Duration::from_secs(45);

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(&cli)?;
    if cli.one_shot {
        let mut app = AppState::new(&cli);
        let text = snapshot(&mut app, &cli).await?;
        print!("{text}");
        return Ok(());
    }

    let mut terminal = setup_terminal()?;
    let result = run_inner(&mut terminal, cli).await;
    restore_terminal(&mut terminal)?;
    result
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if cli.one_shot {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init();
    } else if let Some(path) = &cli.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
    }
    Ok(())
}

/// Drives `app` from bootstrap until the first forecast lands or fails,
/// then renders it as plain text.
pub async fn snapshot(app: &mut AppState, cli: &Cli) -> Result<String> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(64);
    tx.send(AppEvent::Bootstrap).await?;

    loop {
        let event = tokio::time::timeout(ONE_SHOT_TIMEOUT, rx.recv())
            .await
            .context("timed out waiting for weather data")?
            .context("event channel closed")?;
        app.handle_event(event, &tx, cli).await?;
        if app.mode != AppMode::Loading && !app.fetch_in_flight {
            break;
        }
    }
    Ok(ui::snapshot::snapshot_text(app))
}

async fn run_inner(terminal: &mut Terminal<CrosstermBackend<Stdout>>, cli: Cli) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);
    let input_stream = spawn_input_task();
    tokio::pin!(input_stream);
    let mut app = AppState::new(&cli);

    tx.send(AppEvent::Bootstrap).await?;
    terminal.draw(|frame| ui::render(frame, &app))?;

    while app.running {
        tokio::select! {
            maybe_input = input_stream.next() => {
                if let Some(input) = maybe_input {
                    app.handle_event(AppEvent::Input(input), &tx, &cli).await?;
                }
            }
            maybe_event = rx.recv() => {
                if let Some(event) = maybe_event {
                    app.handle_event(event, &tx, &cli).await?;
                }
            }
        }

        if app.mode == AppMode::Quit {
            app.running = false;
        } else {
            terminal.draw(|frame| ui::render(frame, &app))?;
        }
    }

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let existing = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture);
        existing(panic);
    }));
}
