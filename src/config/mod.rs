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

//! Application configuration.
//!
//! This module manages the application configuration file. The file is created
//! with default values the first time the application runs.

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "easyplay";

const CONFIG_NAME: &str = "config";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub version: u32,

    /// Directory holding the audio files. When unset, or when nothing playable
    /// is found there, the numbered playlist is resolved against the working
    /// directory.
    pub media_dir: Option<PathBuf>,

    /// File type of the numbered playlist entries.
    pub file_type: String,
    /// Number of entries in the numbered playlist.
    pub track_count: usize,

    pub sync_interval_ms: u64,
    pub restart_threshold_secs: f64,
    pub end_of_track_tolerance_secs: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            media_dir: None,
            file_type: "m4a".to_string(),
            track_count: 2,
            sync_interval_ms: 100,
            restart_threshold_secs: 10.0,
            end_of_track_tolerance_secs: 0.25,
        }
    }
}

impl AppConfig {
    pub fn sync_interval(&self) -> Duration {
        Duration::from_millis(self.sync_interval_ms.max(1))
    }
}

pub fn load_config() -> AppConfig {
    match confy::load(APP_NAME, CONFIG_NAME) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load configuration, using defaults: {}", e);
            AppConfig::default()
        }
    }
}

/// Directory used for log files, alongside the configuration file.
pub fn log_dir() -> PathBuf {
    confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
        .ok()
        .and_then(|path| path.parent().map(|dir| dir.join("logs")))
        .unwrap_or_else(|| PathBuf::from(".logs"))
}
