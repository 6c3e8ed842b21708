// src/main.rs

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::{Stdout, stdout};
use tokio::sync::mpsc;
use tracing::{error, info};

mod app;
mod config;
mod core;
mod logging;
mod ui;

use app::App;
use config::{Args, Config};
use crate::core::api::ApiClient;
use crate::core::requests::{self, Request, Response};

#[tokio::main]
async fn main() -> Result<()> {
    install_hooks()?;
    let config = Config::try_from(Args::parse())?;
    logging::initialize_logging()?;
    info!(api_url = %config.api_url, page_size = config.page_size, "Starting.");

    let api = ApiClient::new(&config)?;

    // --- Setup ---
    // Restores the terminal when dropped, including when a step below fails.
    let _guard = TerminalGuard;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let result = run(&mut terminal, &config, &api).await;

    if let Err(err) = &result {
        error!(error = %err, "Exited with an error.");
    }
    info!("Stopped.");
    result
}

// --- Restore Terminal ---

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Leaves raw mode and the alternate screen. Failures are ignored: this also
/// runs on paths that never finished entering them.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = stdout().execute(DisableMouseCapture);
    let _ = stdout().execute(LeaveAlternateScreen);
}

/// color-eyre hooks, with the panic report printed after the terminal is
/// restored so it stays readable.
fn install_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install()?;
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        error!(panic = %panic_info, "Panicked.");
        eprintln!("{}", panic_hook.panic_report(panic_info));
    }));
    Ok(())
}

/// The event loop: draw, read one key if any arrives within the tick, then
/// apply whatever responses came back in the meantime.
async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, config: &Config, api: &ApiClient) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Response>();
    let mut app = App::new(config);
    send_all(api, app.start(&config.start_path), &tx);

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        if event::poll(config.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let requests = app.handle_key(key.code);
                    send_all(api, requests, &tx);
                }
            }
        }

        while let Ok(response) = rx.try_recv() {
            let requests = app.handle_response(response);
            send_all(api, requests, &tx);
        }

        app.on_tick();
    }

    Ok(())
}

fn send_all(api: &ApiClient, requests: Vec<Request>, tx: &mpsc::UnboundedSender<Response>) {
    for request in requests {
        requests::dispatch(api, request, tx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_restores_even_when_setup_never_ran() {
        // Dropping the guard before any setup step must not panic.
        drop(TerminalGuard);
        restore_terminal();
    }
}
