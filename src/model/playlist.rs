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

//! Playlist construction.
//!
//! A playlist is an ordered, immutable list of [`PlaylistItem`]s. It is built
//! either from a fixed numbered enumeration ("001", "002", ...) or by scanning
//! a media directory with `WalkDir`.

use std::path::Path;

use walkdir::WalkDir;

use crate::model::PlaylistItem;

const AUDIO_EXTENSIONS: [&str; 5] = ["m4a", "mp3", "flac", "ogg", "wav"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    items: Vec<PlaylistItem>,
}

impl Playlist {
    pub fn new(items: Vec<PlaylistItem>) -> Self {
        let items = items
            .into_iter()
            .enumerate()
            .map(|(id, item)| PlaylistItem { id, ..item })
            .collect();

        Self { items }
    }

    /// Builds the numbered playlist, `count` entries of one file type named
    /// "001", "002" and so on, resolved against `dir`.
    pub fn numbered(dir: &Path, count: usize, file_type: &str) -> Self {
        let items = (0..count)
            .map(|i| {
                let name = format!("{:03}", i + 1);
                let location = dir.join(format!("{}.{}", name, file_type));
                PlaylistItem::new(i, name, file_type, location)
            })
            .collect();

        Self { items }
    }

    /// Recursively collects the audio files below `root`, ordered by file name.
    ///
    /// Unreadable directory entries are skipped.
    pub fn scan(root: &Path) -> Self {
        let mut found: Vec<_> = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                let path = e.into_path();
                let ext = path.extension()?.to_str()?.to_ascii_lowercase();
                AUDIO_EXTENSIONS.contains(&ext.as_str()).then_some((path, ext))
            })
            .collect();

        found.sort_by(|(a, _), (b, _)| a.file_name().cmp(&b.file_name()));

        let items = found
            .into_iter()
            .enumerate()
            .map(|(id, (path, ext))| {
                let name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                PlaylistItem::new(id, name, ext, path)
            })
            .collect();

        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PlaylistItem> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[PlaylistItem] {
        &self.items
    }

    /// Index following `index`, wrapping to the start.
    pub fn next_index(&self, index: usize) -> Option<usize> {
        match self.len() {
            0 => None,
            n => Some((index + 1) % n),
        }
    }

    /// Index preceding `index`, wrapping to the end.
    pub fn previous_index(&self, index: usize) -> Option<usize> {
        match self.len() {
            0 => None,
            n => Some((index % n + n - 1) % n),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn numbered_playlist_uses_zero_padded_names() {
        let playlist = Playlist::numbered(Path::new("/media"), 2, "m4a");

        let names: Vec<_> = playlist.items().iter().map(|i| i.display_name.as_str()).collect();
        assert_eq!(names, ["001", "002"]);

        let second = playlist.get(1).unwrap();
        assert_eq!(second.id, 1);
        assert_eq!(second.file_extension, "m4a");
        assert_eq!(second.location, Path::new("/media/002.m4a"));
    }

    #[test]
    fn indices_wrap_in_both_directions() {
        let playlist = Playlist::numbered(Path::new("."), 3, "m4a");

        assert_eq!(playlist.next_index(2), Some(0));
        assert_eq!(playlist.next_index(0), Some(1));
        assert_eq!(playlist.previous_index(0), Some(2));
        assert_eq!(playlist.previous_index(2), Some(1));
    }

    #[test]
    fn empty_playlist_has_no_neighbours() {
        let playlist = Playlist::default();

        assert_eq!(playlist.next_index(0), None);
        assert_eq!(playlist.previous_index(0), None);
    }

    #[test]
    fn scan_finds_audio_files_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b-side.MP3"), b"").unwrap();
        fs::write(dir.path().join("nested/a-side.m4a"), b"").unwrap();
        fs::write(dir.path().join("cover.jpg"), b"").unwrap();

        let playlist = Playlist::scan(dir.path());

        assert_eq!(playlist.len(), 2);
        let first = playlist.get(0).unwrap();
        assert_eq!(first.display_name, "a-side");
        assert_eq!(first.file_extension, "m4a");
        let second = playlist.get(1).unwrap();
        assert_eq!(second.id, 1);
        assert_eq!(second.display_name, "b-side");
        assert_eq!(second.file_extension, "mp3");
    }

    #[test]
    fn new_renumbers_items_by_position() {
        let playlist = Playlist::new(vec![
            PlaylistItem::new(7, "x", "m4a", "x.m4a".into()),
            PlaylistItem::new(7, "y", "m4a", "y.m4a".into()),
        ]);

        assert_eq!(playlist.get(1).unwrap().id, 1);
    }
}
