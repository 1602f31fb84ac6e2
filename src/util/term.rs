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

//! Terminal background colour control through OSC escape sequences.
//!
//! OSC 11 sets the emulator background and OSC 111 restores the user's own
//! colour. Terminals that do not understand them ignore the sequences.

use std::io::{self, Write};

use ratatui::style::Color;

/// Writes the OSC 11 sequence for `colour` and flushes.
///
/// Non-RGB colours have no portable hex form and are skipped.
pub fn set_terminal_bg(out: &mut impl Write, colour: Color) -> io::Result<()> {
    if let Some(hex) = to_hex(colour) {
        write!(out, "\x1b]11;{}\x07", hex)?;
        out.flush()?;
    }
    Ok(())
}

/// Writes the OSC 111 sequence and flushes.
pub fn reset_terminal_bg(out: &mut impl Write) -> io::Result<()> {
    write!(out, "\x1b]111\x07")?;
    out.flush()
}

fn to_hex(colour: Color) -> Option<String> {
    match colour {
        Color::Rgb(r, g, b) => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_background_is_written_as_hex() {
        let mut out = Vec::new();
        set_terminal_bg(&mut out, Color::Rgb(40, 20, 50)).unwrap();

        assert_eq!(out, b"\x1b]11;#281432\x07");
    }

    #[test]
    fn named_colours_are_skipped() {
        let mut out = Vec::new();
        set_terminal_bg(&mut out, Color::Red).unwrap();

        assert!(out.is_empty());
    }
}
