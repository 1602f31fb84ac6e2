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

//! Playback control and progress synchronization.
//!
//! [`PlaybackController`] is the single authority over transport state. It
//! owns the current engine session, issues every play/pause/seek instruction,
//! samples the playback position while the progress synchronizer ticks, and
//! writes the mirrored fields through to the persisted settings.
//!
//! # States
//!
//! * **Stopped**: no engine session exists yet, or creating one failed.
//! * **Paused**: a session exists and is paused.
//! * **Playing**: a session exists and the synchronizer is running.
//!
//! Selecting a different track from any state discards the current session
//! and starts a new one. There is no terminal state.
//!
//! # Failures
//!
//! Commands never return errors. A missing media resource or a failing engine
//! leaves the controller stopped and records the failure in
//! [`PlayerSnapshot::last_error`]; a failing duration probe leaves the
//! duration at 0, which reports progress as 0.

mod now_playing;
mod state;
mod sync;
mod transport;

use std::{
    sync::Arc,
    time::Duration,
};

pub use now_playing::{LogNowPlaying, NowPlayingInfo, NowPlayingPublisher, NowPlayingSink, PlaybackObserver};
pub use state::{PlaybackState, PlayerSnapshot, TransportState, progress_ratio};
pub use sync::{ProgressSynchronizer, TickSink};
pub use transport::{RemoteCommand, TransportControls};

use crate::{
    config::AppConfig,
    engine::{DurationProbe, DurationTask, EngineHandle, PlaybackEngine},
    model::{DisplayMode, Playlist, PlaylistItem},
    settings::{Settings, SettingsStore},
};

/// Tunables of the controller, normally taken from [`AppConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerOptions {
    /// Interval between two position samples.
    pub sync_interval: Duration,
    /// Past this many seconds, "previous" restarts the current track.
    pub restart_threshold_secs: f64,
    /// A position this close to the duration counts as the end of the track.
    pub end_of_track_tolerance_secs: f64,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ControllerOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            sync_interval: config.sync_interval(),
            restart_threshold_secs: config.restart_threshold_secs,
            end_of_track_tolerance_secs: config.end_of_track_tolerance_secs.max(0.0),
        }
    }
}

pub struct PlaybackController<E: PlaybackEngine, S: SettingsStore> {
    playlist: Playlist,
    engine: E,
    player: Option<E::Handle>,
    probe: Arc<dyn DurationProbe>,
    duration_task: Option<DurationTask>,
    settings: Settings<S>,
    state: PlaybackState,
    artist: Option<String>,
    last_error: Option<String>,
    sync: ProgressSynchronizer,
    options: ControllerOptions,
    observers: Vec<Box<dyn PlaybackObserver>>,
    published: Option<PlayerSnapshot>,
}

impl<E: PlaybackEngine, S: SettingsStore> PlaybackController<E, S> {
    /// Creates the controller and restores the persisted playback state.
    ///
    /// Synchronizer ticks are delivered to `ticks` from a background thread
    /// and must be handed back on the owning thread through
    /// [`PlaybackController::handle_sync_tick`].
    pub fn new(
        playlist: Playlist,
        engine: E,
        probe: Arc<dyn DurationProbe>,
        store: S,
        ticks: Arc<dyn TickSink>,
        options: ControllerOptions,
    ) -> Self {
        let settings = Settings::load(store, playlist.len());
        let restored = *settings.values();

        let mut state = PlaybackState {
            current_index: restored.current_index,
            current_position_seconds: restored.current_position_seconds,
            duration_seconds: restored.duration_seconds,
            display_mode: restored.display_mode,
            ..PlaybackState::default()
        };
        state.sync_progress();

        tracing::info!(
            current_index = state.current_index,
            position = state.current_position_seconds,
            duration = state.duration_seconds,
            "Restored playback state"
        );

        Self {
            playlist,
            engine,
            player: None,
            probe,
            duration_task: None,
            settings,
            state,
            artist: None,
            last_error: None,
            sync: ProgressSynchronizer::new(options.sync_interval, ticks),
            options,
            observers: Vec::new(),
            published: None,
        }
    }

    /// Registers an observer and immediately hands it the current snapshot.
    pub fn subscribe(&mut self, mut observer: Box<dyn PlaybackObserver>) {
        observer.on_change(&self.snapshot());
        self.observers.push(observer);
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn settings(&self) -> &Settings<S> {
        &self.settings
    }

    pub fn current_item(&self) -> Option<&PlaylistItem> {
        self.playlist.get(self.state.current_index)
    }

    pub fn transport_state(&self) -> TransportState {
        match (&self.player, self.state.is_playing) {
            (None, _) => TransportState::Stopped,
            (Some(_), true) => TransportState::Playing,
            (Some(_), false) => TransportState::Paused,
        }
    }

    pub fn is_syncing(&self) -> bool {
        self.sync.is_running()
    }

    pub fn duration_pending(&self) -> bool {
        self.duration_task.is_some()
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            current_index: self.state.current_index,
            current_track_name: self
                .current_item()
                .map(|item| item.display_name.clone())
                .unwrap_or_default(),
            artist: self.artist.clone(),
            transport: self.transport_state(),
            is_playing: self.state.is_playing,
            is_seeking: self.state.is_seeking,
            progress: self.state.reported_progress(),
            position_seconds: self.state.current_position_seconds,
            duration_seconds: self.state.duration_seconds,
            played_time_label: self.state.played_time_label(),
            duration_time_label: self.state.duration_time_label(),
            display_mode: self.state.display_mode,
            last_error: self.last_error.clone(),
        }
    }

    /// Flips between playing and paused.
    ///
    /// Starting playback creates the engine session on first use and resumes
    /// from the stored position.
    pub fn toggle_play(&mut self) {
        if self.playlist.is_empty() {
            return;
        }

        self.state.is_playing = !self.state.is_playing;

        if self.state.is_playing {
            if self.player.is_none() {
                self.player = self.create_player();
            }

            let position = self.state.current_position_seconds;
            match self.player.as_mut() {
                Some(player) => {
                    player.seek(position);
                    player.play();
                    self.sync.start();
                }
                None => self.state.is_playing = false,
            }
        } else {
            if let Some(player) = self.player.as_mut() {
                player.pause();
            }
            self.sync.stop();
        }

        self.publish();
    }

    /// Goes back one track, or restarts the current track once it has played
    /// past the restart threshold.
    pub fn play_previous(&mut self) {
        if self.state.current_position_seconds > self.options.restart_threshold_secs {
            self.state.progress = 0.0;
            self.seek_by_progress();
            return;
        }

        if let Some(index) = self.playlist.previous_index(self.state.current_index) {
            self.play(index);
        }
    }

    pub fn play_next(&mut self) {
        if let Some(index) = self.playlist.next_index(self.state.current_index) {
            self.play(index);
        }
    }

    /// Plays the track at `index`.
    ///
    /// Does nothing if that track is already playing. Selecting another track
    /// releases the current engine session and starts the new track from the
    /// beginning.
    pub fn play(&mut self, index: usize) {
        if index >= self.playlist.len() {
            tracing::warn!("Ignoring play of index {} in a playlist of {}", index, self.playlist.len());
            return;
        }

        if index == self.state.current_index && self.state.is_playing {
            return;
        }

        if index != self.state.current_index {
            self.sync.stop();
            self.duration_task = None;
            self.player = None;

            self.set_current_index(index);
            self.set_position(0.0);
            self.set_duration(0.0);
            self.state.progress = 0.0;
            self.state.is_seeking = false;
            self.artist = None;

            self.player = self.create_player();
        } else if self.player.is_none() {
            self.player = self.create_player();

            let position = self.state.current_position_seconds;
            if let Some(player) = self.player.as_mut() {
                player.seek(position);
            }
        }

        self.start_session();
    }

    /// Moves playback to `duration * progress`.
    ///
    /// The engine is paused around the seek and resumed only if playback was
    /// active before.
    pub fn seek_by_progress(&mut self) {
        if self.state.duration_seconds > 0.0 && self.state.progress.is_finite() {
            self.state.progress = self.state.progress.clamp(0.0, 1.0);
        } else {
            self.state.progress = 0.0;
        }

        let position = self.state.duration_seconds * self.state.progress;
        self.set_position(position);

        let resume = self.state.is_playing;
        if let Some(player) = self.player.as_mut() {
            player.pause();
            player.seek(position);
            if resume {
                player.play();
            }
        }

        self.publish();
    }

    /// Starts a seek gesture; sampling stops updating the progress until
    /// [`PlaybackController::end_seek`].
    pub fn begin_seek(&mut self) {
        self.state.is_seeking = true;
        self.publish();
    }

    /// Moves the seek gesture to `progress`, starting one if needed.
    pub fn set_seek_progress(&mut self, progress: f64) {
        self.state.is_seeking = true;
        self.state.progress = if progress.is_finite() { progress.clamp(0.0, 1.0) } else { 0.0 };
        self.publish();
    }

    /// Finishes the seek gesture and seeks to the chosen progress.
    pub fn end_seek(&mut self) {
        if self.state.is_seeking {
            self.state.is_seeking = false;
            self.seek_by_progress();
        }
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.state.display_mode = mode;
        self.settings.set_display_mode(mode);
        self.publish();
    }

    pub fn toggle_display_mode(&mut self) {
        self.set_display_mode(self.state.display_mode.toggled());
    }

    /// Acts on a synchronizer tick, ignoring ticks of a stopped or replaced
    /// synchronizer.
    pub fn handle_sync_tick(&mut self, generation: u64) {
        if self.sync.accepts(generation) {
            self.sample();
        }
    }

    /// Samples the engine position once.
    ///
    /// Leaves the state untouched unless playback is active and no seek
    /// gesture is in progress. Reaching the end of the track advances to the
    /// next one.
    pub fn sample(&mut self) {
        self.poll_duration();

        if !self.state.is_playing || self.state.is_seeking {
            return;
        }

        let Some(player) = self.player.as_mut() else {
            return;
        };

        let mut position = player.current_position();
        let finished = player.finished();
        if !position.is_finite() || position < 0.0 {
            position = 0.0;
        }

        self.set_position(position);
        self.state.sync_progress();

        if finished || self.reached_end() {
            tracing::info!("Finished track {}", self.state.current_index);
            self.advance_after_end();
        } else {
            self.publish();
        }
    }

    /// Applies the result of the running duration probe, if it has arrived.
    pub fn poll_duration(&mut self) {
        let Some(result) = self.duration_task.as_ref().and_then(DurationTask::poll) else {
            return;
        };
        self.duration_task = None;

        match result {
            Ok(details) => {
                tracing::debug!("Duration of track {} is {}s", self.state.current_index, details.duration_seconds);
                self.set_duration(details.duration_seconds);
                self.artist = details.artist;
                if !self.state.is_seeking {
                    self.state.sync_progress();
                }
            }
            Err(e) => tracing::warn!("{}", e),
        }

        self.publish();
    }

    fn reached_end(&self) -> bool {
        let duration = self.state.duration_seconds;
        duration > 0.0
            && self.state.current_position_seconds >= duration - self.options.end_of_track_tolerance_secs
    }

    fn advance_after_end(&mut self) {
        match self.playlist.next_index(self.state.current_index) {
            Some(next) if next != self.state.current_index => self.play(next),
            Some(_) => {
                // A single-track playlist wraps onto itself. A finished
                // session may already have unloaded its media, so it is
                // replaced rather than sought back.
                self.sync.stop();
                self.player = None;
                self.set_position(0.0);
                self.state.progress = 0.0;
                self.player = self.create_player();
                self.start_session();
            }
            None => {}
        }
    }

    /// Plays the current session and starts sampling, or falls back to
    /// stopped when there is no session.
    fn start_session(&mut self) {
        match self.player.as_mut() {
            Some(player) => {
                player.play();
                self.sync.start();
                self.state.is_playing = true;
            }
            None => {
                self.sync.stop();
                self.state.is_playing = false;
            }
        }

        self.publish();
    }

    fn create_player(&mut self) -> Option<E::Handle> {
        let item = self.current_item()?.clone();

        match self.engine.create(&item) {
            Ok(handle) => {
                self.duration_task = Some(DurationTask::spawn(Arc::clone(&self.probe), item));
                self.last_error = None;
                Some(handle)
            }
            Err(e) => {
                tracing::warn!("Cannot play {}: {}", item.display_name, e);
                self.last_error = Some(e.to_string());
                None
            }
        }
    }

    fn set_current_index(&mut self, index: usize) {
        tracing::info!("Selected track {}", index);
        self.state.current_index = index;
        self.settings.set_current_index(index);
    }

    fn set_position(&mut self, seconds: f64) {
        self.state.current_position_seconds = seconds;
        self.settings.set_current_position_seconds(seconds);
    }

    fn set_duration(&mut self, seconds: f64) {
        self.state.duration_seconds = seconds;
        self.settings.set_duration_seconds(seconds);
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        if self.published.as_ref() == Some(&snapshot) {
            return;
        }

        for observer in &mut self.observers {
            observer.on_change(&snapshot);
        }
        self.published = Some(snapshot);
    }
}

impl<E: PlaybackEngine, S: SettingsStore> TransportControls for PlaybackController<E, S> {
    fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    fn toggle_play(&mut self) {
        PlaybackController::toggle_play(self);
    }

    fn play_next(&mut self) {
        PlaybackController::play_next(self);
    }

    fn play_previous(&mut self) {
        PlaybackController::play_previous(self);
    }

    fn seek_to(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            tracing::warn!("Ignoring seek to {}s", seconds);
            return;
        }
        if self.state.duration_seconds <= 0.0 {
            tracing::debug!("Ignoring seek to {}s, duration unknown", seconds);
            return;
        }
        self.state.progress = seconds / self.state.duration_seconds;
        self.seek_by_progress();
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        path::Path,
        rc::Rc,
        sync::mpsc::{self, Receiver},
        thread,
        time::Instant,
    };

    use super::*;
    use crate::{
        engine::TrackDetails,
        error::{PlayerError, Result},
        settings::{MemoryStore, PersistedSettings},
    };

    #[derive(Clone, Default)]
    struct FakeEngine {
        calls: Rc<RefCell<Vec<String>>>,
        missing: Vec<usize>,
        position: Rc<Cell<f64>>,
        finished: Rc<Cell<bool>>,
    }

    impl FakeEngine {
        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn clear(&self) {
            self.calls.borrow_mut().clear();
        }
    }

    struct FakeHandle {
        id: usize,
        engine: FakeEngine,
    }

    impl FakeHandle {
        fn record(&self, call: String) {
            self.engine.calls.borrow_mut().push(call);
        }
    }

    impl PlaybackEngine for FakeEngine {
        type Handle = FakeHandle;

        fn create(&mut self, item: &PlaylistItem) -> Result<FakeHandle> {
            if self.missing.contains(&item.id) {
                return Err(PlayerError::NotFound(item.location.clone()));
            }
            self.calls.borrow_mut().push(format!("create {}", item.id));
            self.position.set(0.0);
            self.finished.set(false);
            Ok(FakeHandle { id: item.id, engine: self.clone() })
        }
    }

    impl EngineHandle for FakeHandle {
        fn play(&mut self) {
            self.record(format!("play {}", self.id));
        }

        fn pause(&mut self) {
            self.record(format!("pause {}", self.id));
        }

        fn seek(&mut self, seconds: f64) {
            self.engine.position.set(seconds);
            self.record(format!("seek {} {}", self.id, seconds));
        }

        fn current_position(&mut self) -> f64 {
            self.engine.position.get()
        }

        fn finished(&mut self) -> bool {
            self.engine.finished.get()
        }
    }

    impl Drop for FakeHandle {
        fn drop(&mut self) {
            self.record(format!("drop {}", self.id));
        }
    }

    struct FixedProbe(f64);

    impl DurationProbe for FixedProbe {
        fn probe(&self, _item: &PlaylistItem) -> Result<TrackDetails> {
            Ok(TrackDetails::new(self.0, None))
        }
    }

    struct FailingProbe;

    impl DurationProbe for FailingProbe {
        fn probe(&self, item: &PlaylistItem) -> Result<TrackDetails> {
            Err(PlayerError::DurationProbe {
                path: item.location.clone(),
                reason: "unreadable".to_string(),
            })
        }
    }

    type TestController = PlaybackController<FakeEngine, MemoryStore>;

    fn options() -> ControllerOptions {
        ControllerOptions {
            sync_interval: Duration::from_secs(3600),
            ..ControllerOptions::default()
        }
    }

    fn build(
        len: usize,
        engine: FakeEngine,
        probe: Arc<dyn DurationProbe>,
        stored: PersistedSettings,
    ) -> (TestController, Receiver<u64>) {
        let (tx, rx) = mpsc::channel::<u64>();
        let playlist = Playlist::numbered(Path::new("media"), len, "m4a");
        let store = MemoryStore { stored, writes: 0 };
        let controller = PlaybackController::new(playlist, engine, probe, store, Arc::new(tx), options());
        (controller, rx)
    }

    fn controller(len: usize, duration: f64) -> (TestController, FakeEngine, Receiver<u64>) {
        let engine = FakeEngine::default();
        let (c, rx) = build(len, engine.clone(), Arc::new(FixedProbe(duration)), PersistedSettings::default());
        (c, engine, rx)
    }

    fn settle(c: &mut TestController) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while c.duration_pending() {
            assert!(Instant::now() < deadline, "duration probe did not finish");
            c.poll_duration();
            thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn replaying_the_playing_track_changes_nothing() {
        let (mut c, engine, _rx) = controller(3, 100.0);

        c.play(1);
        settle(&mut c);
        let before = c.snapshot();
        let calls = engine.calls();

        c.play(1);

        assert_eq!(c.snapshot(), before);
        assert_eq!(engine.calls(), calls);
    }

    #[test]
    fn next_cycles_through_the_whole_playlist() {
        let (mut c, _engine, _rx) = controller(4, 100.0);
        c.play(2);

        for _ in 0..4 {
            c.play_next();
        }

        assert_eq!(c.state().current_index, 2);
    }

    #[test]
    fn next_wraps_in_a_two_track_playlist() {
        let (mut c, _engine, _rx) = controller(2, 100.0);
        assert_eq!(c.state().current_index, 0);

        c.play_next();
        assert_eq!(c.state().current_index, 1);
        assert_eq!(c.snapshot().current_track_name, "002");

        c.play_next();
        assert_eq!(c.state().current_index, 0);
        assert!(c.state().is_playing);
    }

    #[test]
    fn previous_near_the_start_selects_the_previous_track() {
        let (mut c, _engine, _rx) = controller(3, 100.0);

        c.play_previous();

        assert_eq!(c.state().current_index, 2);
        assert!(c.state().is_playing);
    }

    #[test]
    fn previous_after_ten_seconds_restarts_the_track() {
        let (mut c, engine, _rx) = controller(3, 100.0);
        c.play(1);
        settle(&mut c);

        engine.position.set(42.0);
        c.sample();
        assert_eq!(c.state().current_position_seconds, 42.0);
        engine.clear();

        c.play_previous();

        assert_eq!(c.state().current_index, 1);
        assert_eq!(c.state().progress, 0.0);
        assert_eq!(c.state().current_position_seconds, 0.0);
        assert_eq!(engine.calls(), ["pause 1", "seek 1 0", "play 1"]);
    }

    #[test]
    fn previous_at_exactly_ten_seconds_changes_track() {
        let (mut c, engine, _rx) = controller(3, 100.0);
        c.play(1);
        settle(&mut c);

        engine.position.set(10.0);
        c.sample();
        c.play_previous();

        assert_eq!(c.state().current_index, 0);
    }

    #[test]
    fn seeking_twice_to_the_same_progress_lands_on_the_same_position() {
        let (mut c, _engine, _rx) = controller(2, 200.0);
        c.play(0);
        settle(&mut c);

        c.set_seek_progress(0.3);
        c.end_seek();
        let first = c.state().current_position_seconds;
        c.seek_by_progress();

        assert_eq!(first, 60.0);
        assert_eq!(c.state().current_position_seconds, first);
        assert!(!c.state().is_seeking);
    }

    #[test]
    fn seek_while_paused_does_not_resume() {
        let (mut c, engine, _rx) = controller(2, 100.0);
        c.toggle_play();
        settle(&mut c);
        c.toggle_play();
        engine.clear();

        c.set_seek_progress(0.5);
        c.end_seek();

        assert_eq!(engine.calls(), ["pause 0", "seek 0 50"]);
        assert_eq!(c.transport_state(), TransportState::Paused);
    }

    #[test]
    fn unknown_duration_reports_zero_progress() {
        let engine = FakeEngine::default();
        let (mut c, _rx) = build(2, engine.clone(), Arc::new(FailingProbe), PersistedSettings::default());

        c.play(1);
        settle(&mut c);
        engine.position.set(5.0);
        c.sample();

        let snapshot = c.snapshot();
        assert_eq!(snapshot.position_seconds, 5.0);
        assert_eq!(snapshot.progress, 0.0);
        assert!(snapshot.progress.is_finite());
        assert_eq!(snapshot.transport, TransportState::Playing);
    }

    #[test]
    fn sampling_updates_progress_and_persists_position() {
        let (mut c, engine, _rx) = controller(2, 100.0);
        c.play(1);
        settle(&mut c);

        engine.position.set(25.0);
        c.sample();

        assert_eq!(c.state().progress, 0.25);
        let persisted = c.settings().values();
        assert_eq!(persisted.current_index, 1);
        assert_eq!(persisted.current_position_seconds, 25.0);
        assert_eq!(persisted.duration_seconds, 100.0);
    }

    #[test]
    fn sampling_leaves_a_seek_gesture_alone() {
        let (mut c, engine, _rx) = controller(2, 100.0);
        c.play(0);
        settle(&mut c);

        c.set_seek_progress(0.8);
        engine.position.set(3.0);
        c.sample();

        assert_eq!(c.state().progress, 0.8);
        assert_eq!(c.state().current_position_seconds, 0.0);
    }

    #[test]
    fn reaching_the_end_advances_to_the_next_track() {
        let (mut c, engine, _rx) = controller(3, 100.0);
        c.play(2);
        settle(&mut c);

        engine.position.set(99.9);
        c.sample();

        assert_eq!(c.state().current_index, 0);
        assert_eq!(c.state().current_position_seconds, 0.0);
        assert!(c.state().is_playing);
    }

    #[test]
    fn engine_finished_signal_advances() {
        let (mut c, engine, _rx) = controller(3, 100.0);
        c.play(0);
        settle(&mut c);

        engine.position.set(40.0);
        engine.finished.set(true);
        c.sample();

        assert_eq!(c.state().current_index, 1);
    }

    #[test]
    fn single_track_playlist_restarts_at_the_end() {
        let (mut c, engine, _rx) = controller(1, 30.0);
        c.play(0);
        settle(&mut c);
        engine.clear();

        engine.position.set(30.0);
        c.sample();

        assert_eq!(c.state().current_index, 0);
        assert_eq!(c.state().current_position_seconds, 0.0);
        assert_eq!(engine.calls(), ["drop 0", "create 0", "play 0"]);
        assert_eq!(c.transport_state(), TransportState::Playing);
    }

    #[test]
    fn single_track_restarts_on_the_engine_signal_without_a_duration() {
        let engine = FakeEngine::default();
        let (mut c, _rx) = build(1, engine.clone(), Arc::new(FailingProbe), PersistedSettings::default());
        c.play(0);
        settle(&mut c);
        engine.clear();

        engine.position.set(0.0);
        engine.finished.set(true);
        c.sample();

        assert_eq!(engine.calls(), ["drop 0", "create 0", "play 0"]);
        assert!(c.is_syncing());

        engine.position.set(3.0);
        c.sample();
        assert_eq!(c.state().current_position_seconds, 3.0);
    }

    #[test]
    fn missing_media_leaves_playback_stopped() {
        let engine = FakeEngine { missing: vec![0], ..FakeEngine::default() };
        let (mut c, _rx) = build(2, engine.clone(), Arc::new(FixedProbe(10.0)), PersistedSettings::default());

        c.toggle_play();

        assert!(!c.state().is_playing);
        assert_eq!(c.transport_state(), TransportState::Stopped);
        assert!(!c.is_syncing());
        assert!(c.snapshot().last_error.unwrap().contains("not found"));
        assert!(engine.calls().is_empty());

        c.play_next();
        assert_eq!(c.transport_state(), TransportState::Playing);
        assert_eq!(c.snapshot().last_error, None);
    }

    #[test]
    fn toggle_resumes_from_the_persisted_position() {
        let stored = PersistedSettings {
            current_index: 1,
            current_position_seconds: 12.0,
            duration_seconds: 48.0,
            ..PersistedSettings::default()
        };
        let engine = FakeEngine::default();
        let (mut c, _rx) = build(2, engine.clone(), Arc::new(FixedProbe(48.0)), stored);

        assert_eq!(c.state().progress, 0.25);
        assert_eq!(c.transport_state(), TransportState::Stopped);

        c.toggle_play();
        assert_eq!(engine.calls(), ["create 1", "seek 1 12", "play 1"]);
        assert_eq!(c.transport_state(), TransportState::Playing);
        assert!(c.is_syncing());

        c.toggle_play();
        assert_eq!(engine.calls().last().unwrap(), "pause 1");
        assert_eq!(c.transport_state(), TransportState::Paused);
        assert!(!c.is_syncing());
    }

    #[test]
    fn out_of_range_persisted_index_starts_at_the_top() {
        let stored = PersistedSettings {
            current_index: 5,
            current_position_seconds: 80.0,
            ..PersistedSettings::default()
        };
        let (c, _rx) = build(2, FakeEngine::default(), Arc::new(FixedProbe(1.0)), stored);

        assert_eq!(c.state().current_index, 0);
        assert_eq!(c.state().current_position_seconds, 0.0);
    }

    #[test]
    fn changing_track_releases_the_previous_session_first() {
        let (mut c, engine, _rx) = controller(2, 100.0);
        c.play(0);
        engine.clear();

        c.play(1);

        assert_eq!(engine.calls(), ["drop 0", "create 1", "play 1"]);
    }

    #[test]
    fn playing_the_stopped_current_track_creates_a_session() {
        let (mut c, engine, _rx) = controller(2, 100.0);

        c.play(0);

        assert_eq!(engine.calls(), ["create 0", "seek 0 0", "play 0"]);
        assert!(c.state().is_playing);
    }

    #[test]
    fn ticks_from_another_generation_are_ignored() {
        let (mut c, engine, _rx) = controller(2, 100.0);
        c.play(0);
        settle(&mut c);

        engine.position.set(20.0);
        c.handle_sync_tick(999);

        assert_eq!(c.state().current_position_seconds, 0.0);
    }

    #[test]
    fn track_change_resets_duration_until_probed() {
        let (mut c, _engine, _rx) = controller(2, 100.0);
        c.play(0);
        settle(&mut c);
        assert_eq!(c.state().duration_seconds, 100.0);

        c.play(1);
        assert_eq!(c.state().duration_seconds, 0.0);

        settle(&mut c);
        assert_eq!(c.state().duration_seconds, 100.0);
    }

    #[test]
    fn display_mode_is_persisted_and_changes_the_label() {
        let (mut c, engine, _rx) = controller(2, 100.0);
        c.play(0);
        settle(&mut c);
        engine.position.set(25.0);
        c.sample();

        assert_eq!(c.snapshot().duration_time_label, "1:40");
        c.toggle_display_mode();

        assert_eq!(c.snapshot().duration_time_label, "-1:15");
        assert_eq!(c.settings().display_mode(), DisplayMode::ShowRemaining);
    }

    #[test]
    fn empty_playlist_ignores_transport_commands() {
        let (mut c, engine, _rx) = controller(0, 100.0);

        c.toggle_play();
        c.play_next();
        c.play_previous();
        c.play(0);

        assert!(engine.calls().is_empty());
        assert_eq!(c.transport_state(), TransportState::Stopped);
    }

    #[test]
    fn seek_to_via_transport_controls() {
        let (mut c, _engine, _rx) = controller(2, 80.0);
        c.play(0);
        settle(&mut c);

        TransportControls::seek_to(&mut c, 20.0);

        assert_eq!(c.state().progress, 0.25);
        assert_eq!(c.state().current_position_seconds, 20.0);
    }

    #[test]
    fn non_finite_seek_targets_are_ignored() {
        let (mut c, engine, _rx) = controller(2, 80.0);
        c.play(0);
        settle(&mut c);
        TransportControls::seek_to(&mut c, 20.0);
        engine.clear();

        TransportControls::seek_to(&mut c, f64::NAN);
        TransportControls::seek_to(&mut c, f64::INFINITY);

        assert!(engine.calls().is_empty());
        assert_eq!(c.state().progress, 0.25);
        assert_eq!(c.state().current_position_seconds, 20.0);
        assert_eq!(c.settings().current_position_seconds(), 20.0);
    }

    #[test]
    fn seeking_with_a_non_finite_progress_lands_at_the_start() {
        let (mut c, _engine, _rx) = controller(2, 80.0);
        c.play(0);
        settle(&mut c);

        c.state.progress = f64::NAN;
        c.seek_by_progress();

        let snapshot = c.snapshot();
        assert_eq!(snapshot.progress, 0.0);
        assert_eq!(snapshot.position_seconds, 0.0);
        assert_eq!(c.settings().current_position_seconds(), 0.0);
    }

    #[test]
    fn dropping_the_controller_stops_the_synchronizer() {
        let engine = FakeEngine::default();
        let (tx, rx) = mpsc::channel::<u64>();
        let options = ControllerOptions {
            sync_interval: Duration::from_millis(5),
            ..ControllerOptions::default()
        };
        let mut c = PlaybackController::new(
            Playlist::numbered(Path::new("media"), 2, "m4a"),
            engine,
            Arc::new(FixedProbe(100.0)),
            MemoryStore::default(),
            Arc::new(tx),
            options,
        );
        c.play(0);
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());

        drop(c);
        while rx.try_recv().is_ok() {}

        thread::sleep(Duration::from_millis(30));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn observers_see_each_change_once() {
        struct Counter(Rc<Cell<usize>>);

        impl PlaybackObserver for Counter {
            fn on_change(&mut self, _snapshot: &PlayerSnapshot) {
                self.0.set(self.0.get() + 1);
            }
        }

        let (mut c, _engine, _rx) = controller(2, 100.0);
        let count = Rc::new(Cell::new(0));
        c.subscribe(Box::new(Counter(Rc::clone(&count))));
        assert_eq!(count.get(), 1);

        c.play(1);
        let after_play = count.get();
        assert!(after_play > 1);

        c.play(1);
        assert_eq!(count.get(), after_play);
    }

    #[test]
    fn synchronizer_ticks_drive_sampling() {
        let engine = FakeEngine::default();
        let (tx, rx) = mpsc::channel::<u64>();
        let options = ControllerOptions {
            sync_interval: Duration::from_millis(5),
            ..ControllerOptions::default()
        };
        let mut c = PlaybackController::new(
            Playlist::numbered(Path::new("media"), 2, "m4a"),
            engine.clone(),
            Arc::new(FixedProbe(100.0)),
            MemoryStore::default(),
            Arc::new(tx),
            options,
        );
        c.play(0);
        settle(&mut c);
        engine.position.set(50.0);

        let generation = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        c.handle_sync_tick(generation);

        assert_eq!(c.state().progress, 0.5);
    }
}
