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

//! Transport command sink.
//!
//! Keyboard shortcuts and external remote controls (media keys, a system
//! now-playing panel) drive playback through [`TransportControls`] rather than
//! through the controller type, so a platform adapter only needs this trait.

/// The commands an external control surface can issue.
pub trait TransportControls {
    fn is_playing(&self) -> bool;

    fn toggle_play(&mut self);

    fn play_next(&mut self);

    fn play_previous(&mut self);

    /// Moves playback to `seconds` from the start of the current track.
    fn seek_to(&mut self, seconds: f64);
}

/// A command received from a remote-control surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RemoteCommand {
    TogglePlay,
    Play,
    Pause,
    Next,
    Previous,
    SeekTo(f64),
}

impl RemoteCommand {
    pub fn dispatch<T: TransportControls + ?Sized>(self, target: &mut T) {
        match self {
            RemoteCommand::TogglePlay => target.toggle_play(),
            RemoteCommand::Play if !target.is_playing() => target.toggle_play(),
            RemoteCommand::Pause if target.is_playing() => target.toggle_play(),
            RemoteCommand::Play | RemoteCommand::Pause => {}
            RemoteCommand::Next => target.play_next(),
            RemoteCommand::Previous => target.play_previous(),
            RemoteCommand::SeekTo(seconds) => target.seek_to(seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        playing: bool,
        calls: Vec<&'static str>,
        seeks: Vec<f64>,
    }

    impl TransportControls for Recorder {
        fn is_playing(&self) -> bool {
            self.playing
        }

        fn toggle_play(&mut self) {
            self.playing = !self.playing;
            self.calls.push("toggle");
        }

        fn play_next(&mut self) {
            self.calls.push("next");
        }

        fn play_previous(&mut self) {
            self.calls.push("previous");
        }

        fn seek_to(&mut self, seconds: f64) {
            self.seeks.push(seconds);
        }
    }

    #[test]
    fn play_and_pause_only_toggle_when_needed() {
        let mut recorder = Recorder::default();

        RemoteCommand::Pause.dispatch(&mut recorder);
        assert!(recorder.calls.is_empty());

        RemoteCommand::Play.dispatch(&mut recorder);
        RemoteCommand::Play.dispatch(&mut recorder);
        assert_eq!(recorder.calls, ["toggle"]);
        assert!(recorder.playing);

        RemoteCommand::Pause.dispatch(&mut recorder);
        assert!(!recorder.playing);
    }

    #[test]
    fn commands_reach_their_handlers() {
        let mut recorder = Recorder::default();

        RemoteCommand::Next.dispatch(&mut recorder);
        RemoteCommand::Previous.dispatch(&mut recorder);
        RemoteCommand::SeekTo(12.5).dispatch(&mut recorder);

        assert_eq!(recorder.calls, ["next", "previous"]);
        assert_eq!(recorder.seeks, [12.5]);
    }
}
