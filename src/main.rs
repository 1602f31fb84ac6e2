// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # easyplay terminal player.
//!
//! The main thread owns the terminal and the playback controller. An input
//! thread and a tick thread feed the shared event channel; the progress
//! synchronizer adds its sample ticks to the same channel while playing.
//!
//! The application follows a strict setup-run-teardown pattern so the
//! terminal is restored even when the event loop fails.

use std::{
    env,
    io::{self, Stdout},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use easyplay::{
    app::App,
    config::{self, AppConfig},
    engine::{LoftyProbe, MpvEngine, PlaybackEngine},
    events::{self, TICK_INTERVAL},
    logging,
    model::Playlist,
    player::{ControllerOptions, LogNowPlaying, NowPlayingPublisher},
    settings::{ConfyStore, SettingsStore},
    util,
};

/// The entry point of the application.
///
/// Loads the configuration, builds the playlist and the controller, and runs
/// the TUI until the user quits.
fn main() -> Result<()> {
    let _log_guard = logging::init_logging(&config::log_dir())?;

    let config = config::load_config();
    let playlist = build_playlist(&config)?;
    tracing::info!("Playlist has {} tracks", playlist.len());

    let store = ConfyStore::open_default().context("Failed to locate the settings file")?;

    let mut app = App::new(
        playlist,
        MpvEngine::new(),
        Arc::new(LoftyProbe),
        store,
        ControllerOptions::from(&config),
    );
    app.controller
        .subscribe(Box::new(NowPlayingPublisher::new(LogNowPlaying)));

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

/// Scans the media directory for audio files, falling back to the numbered
/// playlist when it holds none.
fn build_playlist(config: &AppConfig) -> Result<Playlist> {
    let dir = match &config.media_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("Failed to read the working directory")?,
    };

    if config.media_dir.is_some() {
        let scanned = Playlist::scan(&dir);
        if !scanned.is_empty() {
            return Ok(scanned);
        }
        tracing::info!("No audio files under {}, using numbered playlist", dir.display());
    }

    Ok(Playlist::numbered(&resolve(dir), config.track_count, &config.file_type))
}

fn resolve(dir: PathBuf) -> PathBuf {
    dir.canonicalize().unwrap_or(dir)
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal<E: PlaybackEngine, S: SettingsStore>(app: &App<E, S>) -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();

    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    util::term::set_terminal_bg(&mut stdout, app.theme.background_colour)
        .context("Failed to set terminal background")?;

    enable_raw_mode().context("Failed to enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// Best-effort: failures are ignored because this also runs after the event
/// loop has failed.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg(terminal.backend_mut()).ok();
    terminal.show_cursor().ok();
}

/// Starts the input and tick threads and enters the main event loop.
fn run<E: PlaybackEngine, S: SettingsStore>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<E, S>,
) -> Result<()> {
    events::spawn_input_thread(app.event_tx.clone());
    events::spawn_tick_thread(app.event_tx.clone(), TICK_INTERVAL);

    events::process_events(terminal, app)
}
