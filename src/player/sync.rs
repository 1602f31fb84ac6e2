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

//! Progress synchronizer.
//!
//! While playback is active a ticker thread hands a tick to a [`TickSink`] at
//! a fixed interval. The terminal front-end forwards the ticks into its event
//! loop, which owns the controller, so sampling the engine and mutating the
//! playback state never leaves the main thread.
//!
//! Each start of the synchronizer bumps a generation number carried by its
//! ticks. A tick from an earlier generation that was already queued when the
//! synchronizer stopped or restarted is ignored.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::Sender,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

/// Receiver of synchronizer ticks, called from the ticker thread.
pub trait TickSink: Send + Sync + 'static {
    /// Delivers the tick of `generation`. Returns `false` once nobody listens
    /// any more, which ends the ticker.
    fn tick(&self, generation: u64) -> bool;
}

impl TickSink for Sender<u64> {
    fn tick(&self, generation: u64) -> bool {
        self.send(generation).is_ok()
    }
}

pub struct ProgressSynchronizer {
    interval: Duration,
    sink: Arc<dyn TickSink>,
    generation: u64,
    ticker: Option<Ticker>,
}

impl ProgressSynchronizer {
    pub fn new(interval: Duration, sink: Arc<dyn TickSink>) -> Self {
        Self {
            interval,
            sink,
            generation: 0,
            ticker: None,
        }
    }

    /// Starts ticking, replacing any running ticker.
    pub fn start(&mut self) {
        self.stop();
        self.generation += 1;
        self.ticker = Some(Ticker::spawn(self.interval, self.generation, Arc::clone(&self.sink)));
        tracing::debug!("Progress synchronizer started, generation {}", self.generation);
    }

    pub fn stop(&mut self) {
        if self.ticker.take().is_some() {
            tracing::debug!("Progress synchronizer stopped, generation {}", self.generation);
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Whether a tick of `generation` should be acted upon.
    pub fn accepts(&self, generation: u64) -> bool {
        self.is_running() && generation == self.generation
    }
}

/// Background thread emitting ticks until dropped.
struct Ticker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    fn spawn(interval: Duration, generation: u64, sink: Arc<dyn TickSink>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            'ticking: loop {
                let deadline = Instant::now() + interval;
                loop {
                    if thread_stop.load(Ordering::Acquire) {
                        break 'ticking;
                    }
                    let now = Instant::now();
                    if now >= deadline {
                        break;
                    }
                    thread::park_timeout(deadline - now);
                }

                if !sink.tick(generation) {
                    break;
                }
            }
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};

    use super::*;

    fn synchronizer() -> (ProgressSynchronizer, Receiver<u64>) {
        let (tx, rx) = mpsc::channel::<u64>();
        (ProgressSynchronizer::new(Duration::from_millis(5), Arc::new(tx)), rx)
    }

    #[test]
    fn ticks_carry_the_current_generation() {
        let (mut sync, rx) = synchronizer();

        sync.start();
        let generation = rx.recv_timeout(Duration::from_secs(5)).unwrap();

        assert!(sync.accepts(generation));
    }

    #[test]
    fn restart_invalidates_earlier_ticks() {
        let (mut sync, _rx) = synchronizer();

        sync.start();
        sync.start();

        assert!(!sync.accepts(1));
        assert!(sync.accepts(2));
    }

    #[test]
    fn no_ticks_after_stop() {
        let (mut sync, rx) = synchronizer();

        sync.start();
        sync.stop();
        while rx.try_recv().is_ok() {}

        thread::sleep(Duration::from_millis(30));
        assert!(rx.try_recv().is_err());
        assert!(!sync.is_running());
        assert!(!sync.accepts(1));
    }

    #[test]
    fn dropping_the_synchronizer_ends_the_ticker() {
        let (mut sync, rx) = synchronizer();

        sync.start();
        drop(sync);
        while rx.try_recv().is_ok() {}

        thread::sleep(Duration::from_millis(30));
        assert!(rx.try_recv().is_err());
    }
}
