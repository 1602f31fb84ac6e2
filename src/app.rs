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

//! Application state of the terminal front-end.

use std::sync::{
    Arc,
    mpsc::{self, Receiver, Sender},
};

use crate::{
    engine::{DurationProbe, PlaybackEngine},
    events::AppEvent,
    model::Playlist,
    player::{ControllerOptions, PlaybackController},
    settings::SettingsStore,
    theme::Theme,
};

/// Fraction of the track moved by one seek key press.
pub const SEEK_STEP: f64 = 0.05;

pub struct App<E: PlaybackEngine, S: SettingsStore> {
    pub controller: PlaybackController<E, S>,

    pub theme: Theme,

    /// Playlist entry under the selection cursor.
    pub selected: usize,

    /// Set by a seek key since the last UI tick.
    pub seek_touched: bool,

    pub should_quit: bool,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,
}

impl<E: PlaybackEngine, S: SettingsStore> App<E, S> {
    /// Create a new instance of application state.
    pub fn new(
        playlist: Playlist,
        engine: E,
        probe: Arc<dyn DurationProbe>,
        store: S,
        options: ControllerOptions,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        let controller = PlaybackController::new(playlist, engine, probe, store, Arc::new(event_tx.clone()), options);
        let selected = controller.state().current_index;

        Self {
            controller,
            theme: Theme::default(),
            selected,
            seek_touched: false,
            should_quit: false,
            event_tx,
            event_rx,
        }
    }

    pub fn select_next(&mut self) {
        if let Some(index) = self.controller.playlist().next_index(self.selected) {
            self.selected = index;
        }
    }

    pub fn select_previous(&mut self) {
        if let Some(index) = self.controller.playlist().previous_index(self.selected) {
            self.selected = index;
        }
    }

    pub fn play_selected(&mut self) {
        self.controller.play(self.selected);
    }

    /// Moves the seek gesture by `delta`, starting from the current progress.
    pub fn step_seek(&mut self, delta: f64) {
        if self.controller.state().duration_seconds <= 0.0 {
            return;
        }
        let progress = self.controller.state().progress + delta;
        self.controller.set_seek_progress(progress);
        self.seek_touched = true;
    }

    /// Ends a seek gesture, if one is in progress.
    pub fn commit_seek(&mut self) {
        self.seek_touched = false;
        if self.controller.state().is_seeking {
            self.controller.end_seek();
        }
    }

    pub fn on_tick(&mut self) {
        self.controller.poll_duration();

        if self.seek_touched {
            self.seek_touched = false;
        } else {
            self.commit_seek();
        }
    }
}
