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

//! State-change observers and now-playing publication.
//!
//! The controller publishes a [`PlayerSnapshot`] to every registered
//! [`PlaybackObserver`] whenever the snapshot changes. [`NowPlayingPublisher`]
//! is such an observer: it narrows the snapshot to what a system now-playing
//! service displays and forwards it only when that changed.

use crate::player::state::PlayerSnapshot;

pub trait PlaybackObserver {
    fn on_change(&mut self, snapshot: &PlayerSnapshot);
}

/// Track information for a platform now-playing service.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlayingInfo {
    pub title: String,
    pub artist: Option<String>,
    pub duration_seconds: f64,
    /// Whole seconds elapsed; sub-second movement is not published.
    pub elapsed_seconds: u64,
    /// Playback rate, 1.0 while playing and 0.0 otherwise.
    pub rate: f64,
}

impl From<&PlayerSnapshot> for NowPlayingInfo {
    fn from(snapshot: &PlayerSnapshot) -> Self {
        Self {
            title: snapshot.current_track_name.clone(),
            artist: snapshot.artist.clone(),
            duration_seconds: snapshot.duration_seconds,
            elapsed_seconds: snapshot.position_seconds.max(0.0) as u64,
            rate: if snapshot.is_playing { 1.0 } else { 0.0 },
        }
    }
}

pub trait NowPlayingSink {
    fn publish(&mut self, info: &NowPlayingInfo);
}

/// Writes now-playing updates to the log, for hosts without a system
/// now-playing service.
#[derive(Debug, Default)]
pub struct LogNowPlaying;

impl NowPlayingSink for LogNowPlaying {
    fn publish(&mut self, info: &NowPlayingInfo) {
        tracing::debug!(
            title = %info.title,
            artist = info.artist.as_deref().unwrap_or(""),
            duration = info.duration_seconds,
            elapsed = info.elapsed_seconds,
            rate = info.rate,
            "now playing"
        );
    }
}

pub struct NowPlayingPublisher<S: NowPlayingSink> {
    sink: S,
    last: Option<NowPlayingInfo>,
}

impl<S: NowPlayingSink> NowPlayingPublisher<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, last: None }
    }
}

impl<S: NowPlayingSink> PlaybackObserver for NowPlayingPublisher<S> {
    fn on_change(&mut self, snapshot: &PlayerSnapshot) {
        let info = NowPlayingInfo::from(snapshot);
        if self.last.as_ref() != Some(&info) {
            self.sink.publish(&info);
            self.last = Some(info);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{model::DisplayMode, player::state::TransportState};

    #[derive(Clone, Default)]
    struct SharedSink(Rc<RefCell<Vec<NowPlayingInfo>>>);

    impl NowPlayingSink for SharedSink {
        fn publish(&mut self, info: &NowPlayingInfo) {
            self.0.borrow_mut().push(info.clone());
        }
    }

    fn snapshot(position: f64, playing: bool) -> PlayerSnapshot {
        PlayerSnapshot {
            current_index: 0,
            current_track_name: "001".to_string(),
            artist: None,
            transport: if playing { TransportState::Playing } else { TransportState::Paused },
            is_playing: playing,
            is_seeking: false,
            progress: position / 100.0,
            position_seconds: position,
            duration_seconds: 100.0,
            played_time_label: String::new(),
            duration_time_label: String::new(),
            display_mode: DisplayMode::ShowTotal,
            last_error: None,
        }
    }

    #[test]
    fn sub_second_movement_is_not_republished() {
        let sink = SharedSink::default();
        let mut publisher = NowPlayingPublisher::new(sink.clone());

        publisher.on_change(&snapshot(1.1, true));
        publisher.on_change(&snapshot(1.2, true));
        publisher.on_change(&snapshot(2.0, true));

        let published = sink.0.borrow();
        assert_eq!(published.len(), 2);
        assert_eq!(published[1].elapsed_seconds, 2);
    }

    #[test]
    fn pausing_publishes_zero_rate() {
        let sink = SharedSink::default();
        let mut publisher = NowPlayingPublisher::new(sink.clone());

        publisher.on_change(&snapshot(5.0, true));
        publisher.on_change(&snapshot(5.0, false));

        let published = sink.0.borrow();
        assert_eq!(published.last().unwrap().rate, 0.0);
    }
}
