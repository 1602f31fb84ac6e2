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

//! Visual styling and color configuration for the TUI.
//!
//! Playlist entries are coloured by play state: the current track is pink
//! while playing and purple while paused or stopped, every other track is
//! indigo.

use ratatui::style::Color;

use crate::player::TransportState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background_colour: Color,
    pub accent_colour: Color,
    pub border_colour: Color,
    pub gauge_track_colour: Color,
    pub text_colour: Color,
    pub error_colour: Color,

    pub current_playing_colour: Color,
    pub current_paused_colour: Color,
    pub track_colour: Color,
}

impl Default for Theme {
    // Returns the standard application theme.
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    // Constructs the default theme.
    pub const fn default_theme() -> Self {
        Self {
            background_colour: Color::Rgb(40, 20, 50),
            accent_colour: Color::Rgb(250, 189, 47),
            border_colour: Color::Rgb(102, 102, 102),
            gauge_track_colour: Color::Rgb(50, 30, 60),
            text_colour: Color::Rgb(255, 255, 255),
            error_colour: Color::Rgb(255, 69, 58),

            current_playing_colour: Color::Rgb(255, 45, 85),
            current_paused_colour: Color::Rgb(175, 82, 222),
            track_colour: Color::Rgb(88, 86, 214),
        }
    }

    /// Background of a playlist entry.
    pub fn track_background(&self, is_current: bool, transport: TransportState) -> Color {
        match (is_current, transport) {
            (true, TransportState::Playing) => self.current_playing_colour,
            (true, _) => self.current_paused_colour,
            (false, _) => self.track_colour,
        }
    }
}
