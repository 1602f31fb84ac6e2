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

//! # easyplay
//!
//! A small audio player: a fixed playlist, one track playing at a time, a
//! progress indicator kept in step with the playback engine, and playback
//! state that survives restarts.
//!
//! ## Architecture
//!
//! * [`player::PlaybackController`] owns all transport state and drives a
//!   [`engine::PlaybackEngine`]. It runs on the main thread.
//! * Background threads only produce events: key presses, UI ticks, and
//!   progress sampler ticks all arrive as [`events::AppEvent`]s on one
//!   channel consumed by [`events::process_events`].
//! * Track durations are read off the main thread by a
//!   [`engine::DurationProbe`] and picked up on the next event.
//! * [`settings::Settings`] writes every change of the mirrored fields
//!   through to durable storage.

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod logging;
pub mod model;
pub mod player;
pub mod render;
pub mod settings;
pub mod theme;
pub mod util;

pub use error::{PlayerError, Result};
