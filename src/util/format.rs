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

use crate::model::DisplayMode;

/// Formats a duration in seconds as `M:SS`, or `H:MM:SS` from one hour up.
///
/// Fractional seconds are truncated. Negative and non-finite values are shown
/// as zero.
///
/// # Examples
///
/// ```
/// use easyplay::util::format::format_time;
///
/// assert_eq!(format_time(65.9), "1:05");
/// assert_eq!(format_time(3725.0), "1:02:05");
/// ```
pub fn format_time(seconds: f64) -> String {
    let total_seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };

    let hours = total_seconds / 3600;
    let mins = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

/// Formats the duration label, either the total length or the time left
/// prefixed with "-".
pub fn format_duration_label(position_seconds: f64, duration_seconds: f64, mode: DisplayMode) -> String {
    match mode {
        DisplayMode::ShowTotal => format_time(duration_seconds),
        DisplayMode::ShowRemaining => {
            let remaining = (duration_seconds - position_seconds).max(0.0);
            format!("-{}", format_time(remaining))
        }
    }
}
