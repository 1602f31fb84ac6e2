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

//! Render the player panel.
//!
//! Shows the current track with its transport icon, the played and duration
//! labels, and the progress gauge.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{player::PlayerSnapshot, render::icons::transport_icon, theme::Theme};

/// Renders the player widget: track info, time labels and progress.
pub(crate) fn draw_player(f: &mut Frame, area: Rect, snapshot: &PlayerSnapshot, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    let info_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(20)])
        .split(chunks[0]);

    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut track_line = vec![
        Span::styled(format!(" {} ", transport_icon(snapshot.transport, snapshot.is_seeking)), bold).fg(theme.text_colour),
        Span::styled(snapshot.current_track_name.as_str(), bold).fg(theme.accent_colour),
    ];
    if let Some(artist) = &snapshot.artist {
        track_line.push(Span::raw(" by ").fg(theme.text_colour));
        track_line.push(Span::styled(artist.as_str(), bold).fg(theme.accent_colour));
    }
    f.render_widget(Paragraph::new(Line::from(track_line)), info_chunks[0]);

    let time_line = Line::from(vec![
        Span::styled(snapshot.played_time_label.as_str(), bold).fg(theme.accent_colour),
        Span::styled(" / ", bold).fg(theme.text_colour),
        Span::styled(snapshot.duration_time_label.as_str(), bold).fg(theme.accent_colour),
    ]);
    f.render_widget(Paragraph::new(time_line).alignment(Alignment::Right), info_chunks[1]);

    let position_gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.accent_colour).bg(theme.gauge_track_colour))
        .ratio(snapshot.progress.clamp(0.0, 1.0))
        .label("")
        .use_unicode(true);

    f.render_widget(position_gauge, chunks[2]);
}
