//! battle_tui - Terminal boss arena driving battle_core
//!
//! Usage: `battle_tui [--constants FILE] [--bosses FILE] [--seed N] [--log-dir DIR]`

mod app;
mod cli;
mod logging;
mod ui;

use app::App;
use clap::Parser;
use cli::Cli;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::Rng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_guard = match logging::init(&cli.log_dir) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("battle_tui: cannot open log in {}: {}", cli.log_dir.display(), e);
            return ExitCode::FAILURE;
        }
    };

    // Config errors are reported before the terminal switches to raw mode
    let (constants, roster) = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "failed to load configuration");
            eprintln!("battle_tui: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let seed = cli.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let result = run(App::new(roster, constants, seed));
    drop(log_guard);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("battle_tui: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(mut app: App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut last_frame = Instant::now();

    // Main loop
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match (key.code, key.modifiers) {
                        (KeyCode::Char('q'), _)
                        | (KeyCode::Esc, _)
                        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => app.quit(),
                        (KeyCode::Char(' '), _) | (KeyCode::Char('a'), _) => app.attack(),
                        (KeyCode::Char('d'), _) => app.defend(),
                        (KeyCode::Char(c @ '1'..='4'), _) => app.elemental(c as usize - '1' as usize),
                        (KeyCode::Char('n'), _) => app.next_boss(),
                        (KeyCode::Char('r'), _) => app.restart(),
                        (KeyCode::Char('?'), _) => app.toggle_help(),
                        _ => {}
                    }
                }
            }
        }

        let now = Instant::now();
        app.tick(now - last_frame);
        last_frame = now;
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
