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

//! Asynchronous track duration probing.
//!
//! Reading a file's audio properties may block on disk I/O, so each probe runs
//! on its own worker thread. The single result is handed back through a
//! one-slot channel and only applied when the owner polls the task on the
//! main thread.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, TryRecvError},
    },
    thread,
};

use lofty::{prelude::*, probe::Probe};

use crate::{
    error::{PlayerError, Result},
    model::PlaylistItem,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackDetails {
    pub duration_seconds: f64,
    pub artist: Option<String>,
}

impl TrackDetails {
    /// Non-finite or negative durations are reported as 0.
    pub fn new(duration_seconds: f64, artist: Option<String>) -> Self {
        let duration_seconds = if duration_seconds.is_finite() && duration_seconds > 0.0 {
            duration_seconds
        } else {
            0.0
        };

        Self { duration_seconds, artist }
    }
}

/// Learns the total duration of a media resource.
pub trait DurationProbe: Send + Sync {
    fn probe(&self, item: &PlaylistItem) -> Result<TrackDetails>;
}

/// Reads durations and artist tags with `lofty`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyProbe;

impl DurationProbe for LoftyProbe {
    fn probe(&self, item: &PlaylistItem) -> Result<TrackDetails> {
        let probe_error = |reason: String| PlayerError::DurationProbe {
            path: item.location.clone(),
            reason,
        };

        let tagged_file = Probe::open(&item.location)
            .and_then(|p| p.read())
            .map_err(|e| probe_error(e.to_string()))?;

        let artist = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag())
            .and_then(|tag| tag.artist().map(|a| a.to_string()));

        let duration = tagged_file.properties().duration().as_secs_f64();

        Ok(TrackDetails::new(duration, artist))
    }
}

/// A running probe whose result has not been collected yet.
///
/// Dropping the task cancels it: a result that arrives afterwards is
/// discarded by the worker.
pub struct DurationTask {
    result_rx: Receiver<Result<TrackDetails>>,
    cancelled: Arc<AtomicBool>,
}

impl DurationTask {
    pub fn spawn(probe: Arc<dyn DurationProbe>, item: PlaylistItem) -> Self {
        let (result_tx, result_rx) = mpsc::sync_channel(1);
        let cancelled = Arc::new(AtomicBool::new(false));
        let worker_cancelled = Arc::clone(&cancelled);

        thread::spawn(move || {
            if worker_cancelled.load(Ordering::Acquire) {
                return;
            }

            let result = probe.probe(&item);

            if !worker_cancelled.load(Ordering::Acquire) {
                // The receiver is gone when the task was dropped meanwhile.
                let _ = result_tx.send(result);
            }
        });

        Self { result_rx, cancelled }
    }

    /// Collects the result without blocking.
    ///
    /// Returns `None` while the probe is still running. A worker that died
    /// without answering is reported as a probe failure.
    pub fn poll(&self) -> Option<Result<TrackDetails>> {
        match self.result_rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(PlayerError::Engine(
                "duration probe ended without a result".to_string(),
            ))),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

impl Drop for DurationTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, time::{Duration, Instant}};

    use super::*;

    struct FixedProbe(f64);

    impl DurationProbe for FixedProbe {
        fn probe(&self, _item: &PlaylistItem) -> Result<TrackDetails> {
            Ok(TrackDetails::new(self.0, Some("Artist".to_string())))
        }
    }

    fn item() -> PlaylistItem {
        PlaylistItem::new(0, "001", "m4a", PathBuf::from("001.m4a"))
    }

    fn wait(task: &DurationTask) -> Result<TrackDetails> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(result) = task.poll() {
                return result;
            }
            assert!(Instant::now() < deadline, "probe did not finish");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn task_delivers_probe_result() {
        let task = DurationTask::spawn(Arc::new(FixedProbe(93.5)), item());

        let details = wait(&task).unwrap();
        assert_eq!(details.duration_seconds, 93.5);
        assert_eq!(details.artist.as_deref(), Some("Artist"));
    }

    #[test]
    fn infinite_duration_is_reported_as_zero() {
        assert_eq!(TrackDetails::new(f64::INFINITY, None).duration_seconds, 0.0);
        assert_eq!(TrackDetails::new(f64::NAN, None).duration_seconds, 0.0);
    }

    #[test]
    fn lofty_probe_fails_for_missing_file() {
        let missing = PlaylistItem::new(0, "nope", "m4a", PathBuf::from("/definitely/not/here.m4a"));

        let err = LoftyProbe.probe(&missing).unwrap_err();
        assert!(matches!(err, PlayerError::DurationProbe { .. }));
    }
}
