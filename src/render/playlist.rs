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

//! Render the playlist as a grid of tiles.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph},
};

use crate::{model::PlaylistItem, player::PlayerSnapshot, theme::Theme};

const TILE_GAP: usize = 1;

pub(crate) fn draw_playlist(
    f: &mut Frame,
    area: Rect,
    items: &[PlaylistItem],
    snapshot: &PlayerSnapshot,
    selected: usize,
    theme: &Theme,
) {
    let block = Block::default()
        .title(Line::from(" Playlist ").style(Style::default().fg(theme.border_colour)))
        .padding(Padding::new(1, 1, 1, 0));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    if items.is_empty() {
        let empty = Paragraph::new("No tracks").style(Style::default().fg(theme.border_colour));
        f.render_widget(empty, inner_area);
        return;
    }

    let tile_width = items
        .iter()
        .map(|item| item.display_name.chars().count())
        .max()
        .unwrap_or(0)
        + 2;
    let columns = grid_columns(inner_area.width as usize, tile_width);

    let mut lines: Vec<Line> = items
        .chunks(columns)
        .map(|row| {
            let mut spans = Vec::with_capacity(row.len() * 2);
            for item in row {
                let is_current = item.id == snapshot.current_index;
                let mut style = Style::default()
                    .fg(theme.text_colour)
                    .bg(theme.track_background(is_current, snapshot.transport));
                if is_current {
                    style = style.add_modifier(Modifier::BOLD);
                }
                if item.id == selected {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }

                spans.push(Span::styled(format!("{:^width$}", item.display_name, width = tile_width), style));
                spans.push(Span::raw(" ".repeat(TILE_GAP)));
            }
            Line::from(spans)
        })
        .collect();

    // Keep the selected row on screen
    let visible_rows = (inner_area.height as usize).max(1);
    let selected_row = selected / columns;
    let first_row = (selected_row + 1).saturating_sub(visible_rows);
    lines.drain(..first_row.min(lines.len()));

    f.render_widget(Paragraph::new(lines), inner_area);
}

fn grid_columns(width: usize, tile_width: usize) -> usize {
    ((width + TILE_GAP) / (tile_width + TILE_GAP)).max(1)
}
