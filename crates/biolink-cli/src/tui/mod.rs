//! Biolink admin panel
//!
//! Terminal interface for managing the link list and page settings of a
//! running biolink server.
//!
//! ## Layout
//!
//! - Top: page header preview (title, subtitle, profile image)
//! - Left: links in page order, hidden ones dimmed
//! - Right: selected link details, or the active form
//!
//! ## Navigation
//!
//! - j/k or ↑/↓: Move selection up/down
//! - g/G: First/last link
//! - Enter: Open link in browser
//! - q: Quit
//!
//! ## Commands
//!
//! - a: Add link
//! - e: Edit link (Enter saves, Esc discards)
//! - J/K: Move link down/up
//! - h or Space: Hide/show link
//! - d: Delete link
//! - s: Page settings
//! - p: Open the public page
//! - r: Reload from server

mod app;
mod ui;

use std::fs::File;
use std::io::stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use biolink_core::{Config, Direction};

use crate::api::AdminApi;
use app::{Action, App, InputMode, Phase};

/// Run the admin panel against `api`
pub async fn run(config: &Config, api: &dyn AdminApi, public_url: String) -> Result<()> {
    // Initialize TUI logging (file-based, only if BIOLINK_LOG is set)
    init_tui_logging(config);

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(public_url);
    let result = run_app(&mut terminal, &mut app, api).await;

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    api: &dyn AdminApi,
) -> Result<()> {
    submit(terminal, app, api, Action::Reload).await?;

    loop {
        app.check_status_timeout();
        terminal.draw(|frame| ui::draw(frame, app))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        // Only handle key press events (not release)
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if let Some(action) = handle_key(app, key) {
            submit(terminal, app, api, action).await?;
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Show the submitting state, then run the action
async fn submit<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    api: &dyn AdminApi,
    action: Action,
) -> Result<()> {
    app.phase = Phase::Submitting;
    terminal.draw(|frame| ui::draw(frame, app))?;
    app.perform(action, api).await;
    Ok(())
}

/// Route a key press; returns the server action it triggers, if any
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    // An acknowledgement must be dismissed before anything else
    if app.acknowledgement.is_some() {
        app.dismiss_acknowledgement();
        return None;
    }

    // If help is showing, any key dismisses it
    if app.show_help {
        app.show_help = false;
        return None;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key.code, key.modifiers),
        InputMode::AddForm | InputMode::EditDraft | InputMode::SettingsForm => {
            handle_form_mode(app, key.code, key.modifiers)
        }
    }
}

/// Handle key events in normal mode
fn handle_normal_mode(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    match code {
        // Quit
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true
        }

        // Reordering
        KeyCode::Char('K') => return Some(Action::Move(Direction::Up)),
        KeyCode::Char('J') => return Some(Action::Move(Direction::Down)),
        KeyCode::Up if modifiers.contains(KeyModifiers::SHIFT) => {
            return Some(Action::Move(Direction::Up))
        }
        KeyCode::Down if modifiers.contains(KeyModifiers::SHIFT) => {
            return Some(Action::Move(Direction::Down))
        }

        // Selection
        KeyCode::Char('k') | KeyCode::Up => app.select_up(),
        KeyCode::Char('j') | KeyCode::Down => app.select_down(),
        KeyCode::Char('g') => app.select_first(),
        KeyCode::Char('G') => app.select_last(),

        KeyCode::Enter => {
            if let Some(link) = app.current_link().cloned() {
                open_in_browser(app, &link.url, &link.title);
            }
        }
        KeyCode::Char('p') => {
            let url = app.public_url.clone();
            open_in_browser(app, &url, "public page");
        }

        KeyCode::Char('a') => app.enter_add_form(),
        KeyCode::Char('e') => app.begin_edit(),
        KeyCode::Char('s') => app.enter_settings_form(),
        KeyCode::Char('h') | KeyCode::Char(' ') => return Some(Action::ToggleHidden),
        KeyCode::Char('d') => return Some(Action::Delete),
        KeyCode::Char('r') => return Some(Action::Reload),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }

    None
}

/// Handle key events while a form is open
fn handle_form_mode(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    match code {
        // Cancel
        KeyCode::Esc => app.exit_input_mode(),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => app.exit_input_mode(),

        // Submit
        KeyCode::Enter => {
            return match app.input_mode {
                InputMode::AddForm => Some(Action::SubmitAdd),
                InputMode::EditDraft => Some(Action::SaveDraft),
                InputMode::SettingsForm => Some(Action::SaveSettings),
                InputMode::Normal => None,
            };
        }

        // Field navigation
        KeyCode::Tab | KeyCode::Down => app.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.prev_field(),

        // Text input
        KeyCode::Char(c) => app.insert_char(c),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),

        _ => {}
    }

    None
}

/// Open a URL in the default browser without blocking the panel
fn open_in_browser(app: &mut App, url: &str, label: &str) {
    match open::that_detached(url) {
        Ok(()) => {
            info!("Opened {}", url);
            app.set_status(format!("Opened '{}'", label));
        }
        Err(e) => {
            warn!("Failed to open {}: {}", url, e);
            app.set_status(format!("Failed to open: {}", e));
        }
    }
}

/// Initialize logging for TUI mode
///
/// Only initializes if BIOLINK_LOG environment variable is set.
/// Logs to file (config.log_file or default {data_dir}/admin.log).
fn init_tui_logging(config: &Config) {
    let Ok(log_level) = std::env::var("BIOLINK_LOG") else {
        return;
    };

    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    // A bare level applies to our crates; a full directive list is used as is
    let directives = if log_level.contains('=') {
        log_level
    } else {
        format!("biolink_core={},biolink_cli={}", log_level, log_level)
    };
    let env_filter =
        EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("biolink_cli=info"));

    // Initialize file-based logging (ignore error if already initialized)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("Admin panel logging to {:?}", log_path);
}
