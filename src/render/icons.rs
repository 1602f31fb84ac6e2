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

//! Unicode symbols for the transport state.

use crate::player::TransportState;

pub(crate) const ICON_PLAY: &str = "\u{25B6}";
pub(crate) const ICON_PAUSE: &str = "\u{23F8}";
pub(crate) const ICON_STOP: &str = "\u{23F9}";

// Text-style variant (Variation Selector-15), rendered as monochrome text
// rather than an emoji so it takes the TUI's colour.
pub(crate) const ICON_SEEK: &str = "\u{23E9}\u{FE0E}";

pub(crate) fn transport_icon(transport: TransportState, is_seeking: bool) -> &'static str {
    if is_seeking {
        return ICON_SEEK;
    }
    match transport {
        TransportState::Playing => ICON_PLAY,
        TransportState::Paused => ICON_PAUSE,
        TransportState::Stopped => ICON_STOP,
    }
}
