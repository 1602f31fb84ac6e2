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

//! MPV-backed playback engine.
//!
//! Every [`EngineHandle`] owns its own `libmpv` context with video output
//! disabled, so replacing the handle tears the previous session down. MPV
//! events are drained whenever the handle is touched; they tell us when the
//! file is loaded (pending seeks can then be applied) and when it reached its
//! end.

use anyhow::Context;

use crate::{
    engine::{EngineHandle, PlaybackEngine},
    error::{PlayerError, Result},
    model::PlaylistItem,
};

#[derive(Debug, Default)]
pub struct MpvEngine;

impl MpvEngine {
    pub fn new() -> Self {
        Self
    }
}

impl PlaybackEngine for MpvEngine {
    type Handle = MpvHandle;

    fn create(&mut self, item: &PlaylistItem) -> Result<MpvHandle> {
        tracing::info!("play {} {}", item.display_name, item.file_extension);

        if !item.location.is_file() {
            return Err(PlayerError::NotFound(item.location.clone()));
        }

        let location = item
            .location
            .to_str()
            .ok_or_else(|| PlayerError::Engine(format!("Path is not valid UTF-8: {:?}", item.location)))?;

        let handler = (|| {
            let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
            builder
                .set_option("vo", "null")
                .context("Failed to set no video output")?;
            let mut handler = builder.build().context("Failed to build MPV handler")?;
            handler
                .set_property("pause", true)
                .context("Failed to pause MPV")?;
            handler
                .command(&["loadfile", location, "replace"])
                .context(format!("Failed to load file: {}", location))?;
            anyhow::Ok(handler)
        })()
        .map_err(|e| PlayerError::Engine(format!("{:#}", e)))?;

        Ok(MpvHandle {
            handler,
            loaded: false,
            finished: false,
            pending_seek: None,
            last_position: 0.0,
        })
    }
}

pub struct MpvHandle {
    handler: mpv::MpvHandler,
    loaded: bool,
    finished: bool,
    pending_seek: Option<f64>,
    last_position: f64,
}

impl MpvHandle {
    /// Drains queued MPV events without waiting.
    fn pump_events(&mut self) {
        while let Some(event) = self.handler.wait_event(0.0) {
            match event {
                mpv::Event::FileLoaded => {
                    self.loaded = true;
                    if let Some(seconds) = self.pending_seek.take() {
                        self.seek_now(seconds);
                    }
                }
                mpv::Event::EndFile(Ok(mpv::EndFileReason::MPV_END_FILE_REASON_EOF)) => {
                    self.finished = true;
                }
                _ => {}
            }
        }
    }

    fn seek_now(&mut self, seconds: f64) {
        let target = format!("{:.3}", seconds);
        if let Err(e) = self.handler.command(&["seek", &target, "absolute"]) {
            tracing::warn!("MPV seek to {} failed: {:?}", target, e);
        }
    }

    fn set_paused(&mut self, paused: bool) {
        if let Err(e) = self.handler.set_property("pause", paused) {
            tracing::warn!("Failed to set MPV pause={}: {:?}", paused, e);
        }
    }
}

impl EngineHandle for MpvHandle {
    fn play(&mut self) {
        self.pump_events();
        self.set_paused(false);
    }

    fn pause(&mut self) {
        self.pump_events();
        self.set_paused(true);
    }

    fn seek(&mut self, seconds: f64) {
        self.pump_events();
        self.finished = false;
        self.last_position = seconds;

        if self.loaded {
            self.seek_now(seconds);
        } else {
            self.pending_seek = Some(seconds);
        }
    }

    fn current_position(&mut self) -> f64 {
        self.pump_events();

        if self.loaded && self.pending_seek.is_none() {
            if let Ok(seconds) = self.handler.get_property::<f64>("time-pos") {
                if seconds >= 0.0 {
                    self.last_position = seconds;
                }
            }
        }

        self.last_position
    }

    fn finished(&mut self) -> bool {
        self.pump_events();
        self.finished
    }
}
