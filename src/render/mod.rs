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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called after
//! every event to provide a reactive user interface.

mod icons;
mod player;
mod playlist;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::{
    app::App,
    engine::PlaybackEngine,
    player::PlayerSnapshot,
    render::{player::draw_player, playlist::draw_playlist},
    settings::SettingsStore,
    theme::Theme,
};

const KEY_HELP: &str = "space play/pause  n/p next/prev  \u{2190}/\u{2192} seek  enter play  d time  q quit";

/// Renders the user interface to the terminal frame.
///
/// The screen is split into the playlist grid, the player panel with the
/// progress gauge, and a one-line status bar.
pub fn draw<E: PlaybackEngine, S: SettingsStore>(f: &mut Frame, app: &App<E, S>) {
    let area = f.area();
    let snapshot = app.controller.snapshot();

    f.render_widget(Block::default().style(Style::default().bg(app.theme.background_colour)), area);

    // Outer layout: playlist, player, status
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(area);

    draw_playlist(f, outer[0], app.controller.playlist().items(), &snapshot, app.selected, &app.theme);
    draw_player(f, outer[1], &snapshot, &app.theme);
    draw_status(f, outer[2], &snapshot, &app.theme);
}

/// The last playback error when there is one, the key help otherwise.
fn draw_status(f: &mut Frame, area: Rect, snapshot: &PlayerSnapshot, theme: &Theme) {
    let line = match &snapshot.last_error {
        Some(error) => Line::from(Span::styled(error.as_str(), Style::default().fg(theme.error_colour))),
        None => Line::from(Span::styled(KEY_HELP, Style::default().fg(theme.border_colour))),
    };
    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
pub(crate) mod tests {
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    use super::*;
    use crate::app::test_support::*;

    pub(crate) fn buffer_text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(crate) fn render(app: &mut TestApp, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn idle_screen_shows_playlist_and_help() {
        let mut app = test_app(3);

        let screen = render(&mut app, 80, 12);

        assert!(screen.contains("001"));
        assert!(screen.contains("003"));
        assert!(screen.contains("space play/pause"));
    }

    #[test]
    fn playing_screen_shows_track_and_times() {
        let mut app = test_app(2);
        playing(&mut app, 1);

        let screen = render(&mut app, 80, 12);

        assert!(screen.contains("002"));
        assert!(screen.contains("Test Artist"));
        assert!(screen.contains("0:00 / 1:40"));
    }
}
