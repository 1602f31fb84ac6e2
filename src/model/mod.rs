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

//! Domain models.
//!
//! This module defines the playable items of the playlist and the small
//! value types shared between the playback controller, persisted settings and
//! the user interface.

mod playlist;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use playlist::Playlist;

/// One playable entry of the playlist.
///
/// Items are created once when the playlist is built and never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistItem {
    /// Position of the item in its playlist.
    pub id: usize,
    pub display_name: String,
    pub file_extension: String,
    /// Location of the underlying media resource.
    pub location: PathBuf,
}

impl PlaylistItem {
    pub fn new(id: usize, display_name: impl Into<String>, file_extension: impl Into<String>, location: PathBuf) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            file_extension: file_extension.into(),
            location,
        }
    }
}

/// Whether the duration label shows the total length or the time remaining.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum DisplayMode {
    #[default]
    ShowTotal,
    ShowRemaining,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::ShowTotal => DisplayMode::ShowRemaining,
            DisplayMode::ShowRemaining => DisplayMode::ShowTotal,
        }
    }
}

impl From<u8> for DisplayMode {
    fn from(value: u8) -> Self {
        match value {
            1 => DisplayMode::ShowRemaining,
            _ => DisplayMode::ShowTotal,
        }
    }
}

impl From<DisplayMode> for u8 {
    fn from(mode: DisplayMode) -> u8 {
        match mode {
            DisplayMode::ShowTotal => 0,
            DisplayMode::ShowRemaining => 1,
        }
    }
}
