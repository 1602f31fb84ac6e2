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

//! Error types for the playback core.
//!
//! Errors produced here never escape a controller command. They are logged,
//! recorded as the controller's last error, and otherwise absorbed.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlayerError>;

#[derive(Error, Debug)]
pub enum PlayerError {
    /// The media resource behind a playlist item does not exist.
    #[error("Audio file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The playback engine refused an instruction or could not be created.
    #[error("Playback engine error: {0}")]
    Engine(String),

    /// Reading the duration of a media resource failed.
    #[error("Failed to read duration of {}: {reason}", .path.display())]
    DurationProbe { path: PathBuf, reason: String },

    #[error("Settings error: {0}")]
    Settings(#[from] confy::ConfyError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
