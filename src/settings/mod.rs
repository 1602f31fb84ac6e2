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

//! Persisted playback settings.
//!
//! A durable mirror of the parts of the playback state that survive a
//! restart: the current playlist index, the elapsed and total seconds of the
//! current track, and the duration display mode.
//!
//! The playback controller is the only writer. Every change to a mirrored
//! field is written through to the [`SettingsStore`] immediately; there is no
//! batching and the last write wins.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{config::APP_NAME, error::Result, model::DisplayMode};

const STATE_NAME: &str = "playback";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(default)]
pub struct PersistedSettings {
    pub current_index: usize,
    pub current_position_seconds: f64,
    pub duration_seconds: f64,
    pub display_mode: DisplayMode,
}

/// Durable storage for [`PersistedSettings`].
pub trait SettingsStore {
    /// Reads the stored settings, or defaults when nothing is stored yet.
    fn load(&self) -> Result<PersistedSettings>;

    fn save(&mut self, settings: &PersistedSettings) -> Result<()>;
}

/// Stores the settings in a TOML file managed by `confy`.
pub struct ConfyStore {
    path: PathBuf,
}

impl ConfyStore {
    /// Uses the platform configuration directory of the application.
    pub fn open_default() -> Result<Self> {
        let path = confy::get_configuration_file_path(APP_NAME, STATE_NAME)?;
        Ok(Self { path })
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SettingsStore for ConfyStore {
    fn load(&self) -> Result<PersistedSettings> {
        Ok(confy::load_path(&self.path)?)
    }

    fn save(&mut self, settings: &PersistedSettings) -> Result<()> {
        Ok(confy::store_path(&self.path, settings)?)
    }
}

/// Keeps settings in memory only.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub stored: PersistedSettings,
    pub writes: usize,
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<PersistedSettings> {
        Ok(self.stored)
    }

    fn save(&mut self, settings: &PersistedSettings) -> Result<()> {
        self.stored = *settings;
        self.writes += 1;
        Ok(())
    }
}

/// Write-through view of the persisted settings.
pub struct Settings<S: SettingsStore> {
    values: PersistedSettings,
    store: S,
}

impl<S: SettingsStore> Settings<S> {
    /// Reads the stored settings once.
    ///
    /// A stored index outside `0..playlist_len` means the playlist changed
    /// since the last run: the index is reset to 0 and the position to 0.
    /// Unreadable storage is treated as empty.
    pub fn load(store: S, playlist_len: usize) -> Self {
        let mut values = store.load().unwrap_or_else(|e| {
            tracing::warn!("Failed to read persisted settings, using defaults: {}", e);
            PersistedSettings::default()
        });

        sanitize_seconds(&mut values.current_position_seconds);
        sanitize_seconds(&mut values.duration_seconds);

        let mut settings = Self { values, store };

        if settings.values.current_index >= playlist_len {
            tracing::info!(
                "Persisted index {} is outside a playlist of {}, starting from the top",
                settings.values.current_index,
                playlist_len
            );
            settings.values.current_index = 0;
            settings.values.current_position_seconds = 0.0;
            settings.flush();
        }

        settings
    }

    pub fn values(&self) -> &PersistedSettings {
        &self.values
    }

    pub fn current_index(&self) -> usize {
        self.values.current_index
    }

    pub fn current_position_seconds(&self) -> f64 {
        self.values.current_position_seconds
    }

    pub fn duration_seconds(&self) -> f64 {
        self.values.duration_seconds
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.values.display_mode
    }

    pub fn set_current_index(&mut self, index: usize) {
        if self.values.current_index != index {
            self.values.current_index = index;
            self.flush();
        }
    }

    pub fn set_current_position_seconds(&mut self, seconds: f64) {
        if self.values.current_position_seconds != seconds {
            self.values.current_position_seconds = seconds;
            self.flush();
        }
    }

    pub fn set_duration_seconds(&mut self, seconds: f64) {
        if self.values.duration_seconds != seconds {
            self.values.duration_seconds = seconds;
            self.flush();
        }
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        if self.values.display_mode != mode {
            self.values.display_mode = mode;
            self.flush();
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn flush(&mut self) {
        if let Err(e) = self.store.save(&self.values) {
            tracing::warn!("Failed to persist playback settings: {}", e);
        }
    }
}

fn sanitize_seconds(seconds: &mut f64) {
    if !seconds.is_finite() || *seconds < 0.0 {
        *seconds = 0.0;
    }
}
