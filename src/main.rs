//! Terminal entry point: parse arguments, set up logging and the terminal,
//! and run the event loop.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::Show,
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use newsline::app::App;
use newsline::source::{FilterType, GoogleNewsSource};
use newsline::worker::Worker;
use newsline::{input, ui};

#[derive(Parser, Debug)]
#[command(name = "newsline", about = "Google News headlines in the terminal")]
struct Args {
    /// Category to show first
    #[arg(long, value_enum, default_value_t = FilterType::Top)]
    category: FilterType,

    /// Write logs to this file (filtered by RUST_LOG, default `info`)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Terminal lifetime
// ---------------------------------------------------------------------------

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Leave raw mode and the alternate screen. Safe to call more than once.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Owns the TUI; restores the terminal when dropped, including on unwind.
struct TerminalGuard(Tui);

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self(Terminal::new(CrosstermBackend::new(io::stdout()))?))
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// The hook runs before unwinding reaches the guard; restore first so the
/// panic message lands on the normal screen.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        previous(info);
    }));
}

/// Stdout belongs to the TUI, so logs only go to a file when asked for.
fn init_logging(path: Option<&PathBuf>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;
    install_panic_hook();

    let source = GoogleNewsSource::new().context("building HTTP client")?;
    let (worker, rx) = Worker::new(Arc::new(source));

    let mut guard = TerminalGuard::enter()?;
    let mut app = App::new(args.category);
    tracing::info!(category = ?args.category, "starting");

    // ~10 fps. Each iteration: start queued loads, apply finished ones,
    // render, then wait up to one tick for input.
    let tick_rate = Duration::from_millis(100);

    loop {
        for ticket in app.take_pending() {
            worker.spawn(ticket);
        }

        while let Ok(msg) = rx.try_recv() {
            app.apply(msg);
        }

        guard.0.draw(|f| ui::draw(&mut app, f))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key);
            }
        }

        if app.quit {
            break;
        }
    }

    Ok(())
}
