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

//! Playback state owned by the controller and the snapshots published from it.

use crate::{
    model::DisplayMode,
    util::format::{format_duration_label, format_time},
};

/// Transport status, derived from whether an engine session exists and
/// whether it is playing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportState {
    /// No engine session exists.
    Stopped,
    Paused,
    Playing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub current_index: usize,
    pub is_playing: bool,
    /// Set while the user is dragging the seek control; the synchronizer
    /// leaves position and progress alone meanwhile.
    pub is_seeking: bool,
    /// Normalized position in `0.0..=1.0`.
    pub progress: f64,
    pub current_position_seconds: f64,
    pub duration_seconds: f64,
    pub display_mode: DisplayMode,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_index: 0,
            is_playing: false,
            is_seeking: false,
            progress: 0.0,
            current_position_seconds: 0.0,
            duration_seconds: 0.0,
            display_mode: DisplayMode::ShowTotal,
        }
    }
}

impl PlaybackState {
    /// Recomputes `progress` from the position and the duration.
    pub fn sync_progress(&mut self) {
        self.progress = progress_ratio(self.current_position_seconds, self.duration_seconds);
    }

    /// Progress as shown to the user, 0 whenever the duration is unknown.
    pub fn reported_progress(&self) -> f64 {
        if has_duration(self.duration_seconds) && self.progress.is_finite() {
            self.progress.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn played_time_label(&self) -> String {
        format_time(self.current_position_seconds)
    }

    pub fn duration_time_label(&self) -> String {
        format_duration_label(self.current_position_seconds, self.duration_seconds, self.display_mode)
    }
}

/// `position / duration` clamped to `0.0..=1.0`, or 0 when the duration is
/// zero or not a number.
pub fn progress_ratio(position_seconds: f64, duration_seconds: f64) -> f64 {
    if !has_duration(duration_seconds) || !position_seconds.is_finite() {
        return 0.0;
    }
    (position_seconds / duration_seconds).clamp(0.0, 1.0)
}

fn has_duration(duration_seconds: f64) -> bool {
    duration_seconds.is_finite() && duration_seconds > 0.0
}

/// Read-only view of the controller handed to the UI and to observers.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub current_index: usize,
    pub current_track_name: String,
    pub artist: Option<String>,
    pub transport: TransportState,
    pub is_playing: bool,
    pub is_seeking: bool,
    pub progress: f64,
    pub position_seconds: f64,
    pub duration_seconds: f64,
    pub played_time_label: String,
    pub duration_time_label: String,
    pub display_mode: DisplayMode,
    /// Most recent failure absorbed by the controller.
    pub last_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_of_a_hundred_seconds() {
        let mut state = PlaybackState {
            current_position_seconds: 25.0,
            duration_seconds: 100.0,
            display_mode: DisplayMode::ShowRemaining,
            ..PlaybackState::default()
        };
        state.sync_progress();

        assert_eq!(state.progress, 0.25);
        assert_eq!(state.played_time_label(), "0:25");
        assert_eq!(state.duration_time_label(), "-1:15");
    }

    #[test]
    fn zero_duration_reports_zero_progress() {
        assert_eq!(progress_ratio(12.0, 0.0), 0.0);
        assert_eq!(progress_ratio(0.0, 0.0), 0.0);
        assert_eq!(progress_ratio(f64::INFINITY, 10.0), 0.0);

        let state = PlaybackState { progress: 0.7, ..PlaybackState::default() };
        assert_eq!(state.reported_progress(), 0.0);
    }

    #[test]
    fn nan_progress_is_reported_as_zero() {
        let state = PlaybackState {
            progress: f64::NAN,
            duration_seconds: 100.0,
            ..PlaybackState::default()
        };

        assert_eq!(state.reported_progress(), 0.0);
    }

    #[test]
    fn position_past_the_end_is_capped() {
        assert_eq!(progress_ratio(130.0, 100.0), 1.0);
    }
}
