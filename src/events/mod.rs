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

//! Application events and the main event loop.
//!
//! Every input reaches the main thread as an [`AppEvent`] on one channel:
//! key presses from the input thread, UI ticks from the tick thread, and
//! progress samples from the playback synchronizer. The loop applies each
//! event to the [`App`] and redraws.

mod key_handlers;

use std::{
    sync::mpsc::Sender,
    thread,
    time::Duration,
};

use anyhow::Result;
use crossterm::event::{self, KeyEvent};
use ratatui::{Terminal, backend::Backend};

use crate::{
    app::App,
    engine::PlaybackEngine,
    player::TickSink,
    render::draw,
    settings::SettingsStore,
};

pub use key_handlers::process_key_event;

/// Interval of the UI tick; the minimum redraw rate.
pub const TICK_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),

    /// Periodic UI refresh.
    Tick,

    /// Progress sample request from the synchronizer of the given generation.
    SyncTick(u64),

    ExitApplication,
}

/// Forwards synchronizer ticks into the event loop.
impl TickSink for Sender<AppEvent> {
    fn tick(&self, generation: u64) -> bool {
        self.send(AppEvent::SyncTick(generation)).is_ok()
    }
}

/// Applies one event to the application state.
///
/// Returns `false` once the application should exit.
pub fn handle_event<E: PlaybackEngine, S: SettingsStore>(app: &mut App<E, S>, event: AppEvent) -> bool {
    match event {
        AppEvent::Key(key) => process_key_event(app, key),
        AppEvent::Tick => app.on_tick(),
        AppEvent::SyncTick(generation) => app.controller.handle_sync_tick(generation),
        AppEvent::ExitApplication => app.should_quit = true,
    }

    !app.should_quit
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
pub fn process_events<B, E, S>(terminal: &mut Terminal<B>, app: &mut App<E, S>) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
    E: PlaybackEngine,
    S: SettingsStore,
{
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        if !handle_event(app, event) {
            break;
        }

        terminal.draw(|f| draw(f, app))?;
    }
    Ok(())
}

/// Spawns a thread translating raw key events to application events.
pub fn spawn_input_thread(event_tx: Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event::Event::Key(key)) => {
                    if event_tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!("Failed to read terminal input: {}", e);
                    break;
                }
            }
        }
    });
}

/// Spawns a thread sending a periodic tick application event, this is
/// effectively the minimum "frame rate" for rendering the TUI application.
pub fn spawn_tick_thread(event_tx: Sender<AppEvent>, interval: Duration) {
    thread::spawn(move || {
        while event_tx.send(AppEvent::Tick).is_ok() {
            thread::sleep(interval);
        }
    });
}
