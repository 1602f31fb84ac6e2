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

//! Playback engine boundary.
//!
//! The controller never decodes or outputs audio itself. It drives a
//! [`PlaybackEngine`], which creates one [`EngineHandle`] per media resource,
//! and learns track durations from a [`DurationProbe`] running off the main
//! thread.
//!
//! # Implementations
//!
//! * `MpvEngine` (feature `mpv`): libmpv-backed playback, audio only.
//! * [`LoftyProbe`]: reads the duration and artist from the file's tags and
//!   audio properties.

#[cfg(feature = "mpv")]
mod mpv;
mod probe;

#[cfg(feature = "mpv")]
pub use self::mpv::MpvEngine;
pub use probe::{DurationProbe, DurationTask, LoftyProbe, TrackDetails};

use crate::{error::Result, model::PlaylistItem};

/// Factory for playback sessions.
pub trait PlaybackEngine {
    type Handle: EngineHandle;

    /// Opens a playback session for `item`, initially paused at the start.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PlayerError::NotFound`] if the media resource does not
    /// exist, or an engine error if the session cannot be created.
    fn create(&mut self, item: &PlaylistItem) -> Result<Self::Handle>;
}

/// A playback session for one media resource.
///
/// Dropping the handle releases the session.
pub trait EngineHandle {
    fn play(&mut self);

    fn pause(&mut self);

    fn seek(&mut self, seconds: f64);

    /// Current playback position in seconds.
    fn current_position(&mut self) -> f64;

    /// Whether the engine has reported the end of the resource.
    fn finished(&mut self) -> bool {
        false
    }
}
