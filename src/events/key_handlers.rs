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

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{
    app::{App, SEEK_STEP},
    engine::PlaybackEngine,
    player::RemoteCommand,
    settings::SettingsStore,
};

/// Maps keyboard input to application actions and playback commands.
///
/// Transport keys go through [`RemoteCommand`], the same path a media-key
/// adapter uses. Any key other than a seek key first commits a pending seek
/// gesture.
pub fn process_key_event<E: PlaybackEngine, S: SettingsStore>(app: &mut App<E, S>, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    if !matches!(key.code, KeyCode::Left | KeyCode::Right) {
        app.commit_seek();
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        (KeyCode::Char(' '), _) => RemoteCommand::TogglePlay.dispatch(&mut app.controller),
        (KeyCode::Char('n'), _) => RemoteCommand::Next.dispatch(&mut app.controller),
        (KeyCode::Char('p'), _) => RemoteCommand::Previous.dispatch(&mut app.controller),

        (KeyCode::Left, _) => app.step_seek(-SEEK_STEP),
        (KeyCode::Right, _) => app.step_seek(SEEK_STEP),

        // Navigation: Down / j
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => app.select_next(),
        // Navigation: Up / k
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => app.select_previous(),

        (KeyCode::Enter, _) => app.play_selected(),

        (KeyCode::Char('d'), _) => app.controller.toggle_display_mode(),

        _ => {}
    }
}
