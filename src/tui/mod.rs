//! Terminal User Interface for seccheat
//!
//! A full-screen browser over the cheat-sheet catalog.
//! Features:
//! - Result table with vim-style navigation
//! - Keystroke search combined with category buttons
//! - Details popup with shell syntax highlighting
//! - Add-record form writing to the canonical file
//! - Auto-refresh when files in the data directory change

pub mod app;
pub mod events;
pub mod form;
pub mod state; // Pure state transformations (functional core)
pub mod ui;
pub mod views;
pub mod widgets;

use std::io;
use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use ratatui::prelude::*;

use crate::config::Config;
use crate::error::{Error, Result};
use app::App;
use events::handle_event;

/// Run the TUI application
pub fn run(config: Config) -> Result<()> {
    // Load before touching the terminal so load errors print normally
    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app, ensuring cleanup happens even on error
    let result = run_app_inner(&mut terminal, &mut app);

    // Restore terminal - this MUST run even if app fails
    let _ = disable_raw_mode();
    let _ = execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    );
    let _ = terminal.show_cursor();

    result
}

fn run_app_inner<B: Backend + std::io::Write>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let size = terminal.size()?;
    app.resize(size.width, size.height);

    // Setup file watcher for auto-refresh
    let (tx, rx) = mpsc::channel();
    let _watcher = watch_data_dir(app.data_dir(), tx)?;

    // Run the main loop
    run_event_loop(terminal, app, rx)
}

/// Watch the data directory and signal changes to `*.json` files
fn watch_data_dir(dir: &Path, tx: mpsc::Sender<()>) -> Result<RecommendedWatcher> {
    let mut watcher = RecommendedWatcher::new(
        move |res: std::result::Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                let touches_json = event
                    .paths
                    .iter()
                    .any(|p| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")));
                let changed =
                    event.kind.is_modify() || event.kind.is_create() || event.kind.is_remove();
                if changed && touches_json {
                    let _ = tx.send(());
                }
            }
        },
        notify::Config::default(),
    )
    .map_err(|e| Error::Terminal(format!("cannot start file watcher: {}", e)))?;

    watcher
        .watch(dir, RecursiveMode::NonRecursive)
        .map_err(|e| Error::Terminal(format!("cannot watch {}: {}", dir.display(), e)))?;
    tracing::debug!(dir = %dir.display(), "watching data directory");

    Ok(watcher)
}

fn run_event_loop<B: Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    file_change_rx: mpsc::Receiver<()>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        // Draw the UI
        terminal.draw(|f| ui::draw(f, app))?;

        // Handle input with timeout
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if poll(timeout)? {
            match read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_event(app, key) {
                        return Ok(()); // Quit signal
                    }
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse);
                }
                Event::Resize(width, height) => {
                    app.resize(width, height);
                }
                _ => {}
            }
        }

        // Check for file changes (non-blocking), collapsing bursts into one reload
        if file_change_rx.try_recv().is_ok() {
            while file_change_rx.try_recv().is_ok() {}
            app.refresh();
        }

        // Tick for animations/updates
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }
}
