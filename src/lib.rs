pub mod app;
pub mod cli;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;

use std::io::{self, Stdout};

use anyhow::{Context, Result};
use app::events::{AppEvent, spawn_input_task};
use app::settings::load_runtime_settings;
use app::state::AppState;
use cli::Cli;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use ui::color::detect_color_capability;

pub async fn run(cli: Cli) -> Result<()> {
    if let Some(path) = &cli.log_file {
        logging::init_file_logger(path)?;
    }
    let mut terminal = setup_terminal()?;
    let result = run_inner(&mut terminal, cli).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn run_inner(terminal: &mut Terminal<CrosstermBackend<Stdout>>, cli: Cli) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);
    let input_stream = spawn_input_task();
    tokio::pin!(input_stream);

    let (settings, settings_path) = load_runtime_settings(&cli, true);
    let color = detect_color_capability(cli.effective_color_mode());
    info!(
        "starting: fps {}, motion {}, color {}",
        settings.fps,
        settings.motion.label(),
        color.label()
    );
    let mut app = AppState::new(settings, settings_path, color, cli.seed);

    tx.send(AppEvent::Bootstrap).await?;

    while app.running {
        tokio::select! {
            maybe_input = input_stream.next() => {
                if let Some(input) = maybe_input {
                    app.handle_event(AppEvent::Input(input), &tx)?;
                }
            }
            maybe_event = rx.recv() => {
                if let Some(event) = maybe_event {
                    app.handle_event(event, &tx)?;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                app.handle_event(AppEvent::Quit, &tx)?;
            }
        }

        terminal
            .draw(|frame| ui::render(frame, &app))
            .context("drawing frame failed")?;
    }

    app.shutdown();
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    install_panic_hook();
    enable_raw_mode().context("enabling raw mode failed")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let existing = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen, Show);
        existing(panic);
    }));
}
