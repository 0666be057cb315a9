use super::*;
use crate::config::LibrarySettings;
use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn names(library: &Library) -> Vec<String> {
    library.entries().iter().map(|e| e.name.clone()).collect()
}

fn index_for(root: &Path) -> DirectoryIndex {
    DirectoryIndex::new(root, &LibrarySettings::default())
}

#[test]
fn scan_filters_non_audio_and_sorts_by_display_name_case_insensitive() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("A.ogg"), b"not a real ogg").unwrap();
    fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

    let library = scan(&index_for(dir.path()));
    assert_eq!(names(&library), vec!["A.ogg", "b.MP3"]);
}

#[test]
fn scan_skips_excluded_directories_but_keeps_nested_music() {
    let dir = tempdir().unwrap();
    let ringtones = dir.path().join("Ringtones");
    let album = dir.path().join("Albums").join("First");
    fs::create_dir_all(&ringtones).unwrap();
    fs::create_dir_all(&album).unwrap();
    fs::write(ringtones.join("beep.mp3"), b"x").unwrap();
    fs::write(album.join("song.flac"), b"x").unwrap();

    let index = index_for(dir.path());
    let library = scan(&index);
    assert_eq!(names(&library), vec!["song.flac"]);

    let every = index
        .query(&MediaQuery {
            selection: Predicate::AnyAudio,
            order: Order::DisplayNameAsc,
        })
        .unwrap();
    let every: Vec<&str> = every.iter().map(|r| r.display_name.as_str()).collect();
    assert_eq!(every, vec!["beep.mp3", "song.flac"]);
}

#[test]
fn scan_skips_hidden_entries_by_default() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"x").unwrap();
    fs::create_dir_all(dir.path().join(".cache")).unwrap();
    fs::write(dir.path().join(".cache").join("inner.mp3"), b"x").unwrap();
    fs::write(dir.path().join("visible.mp3"), b"x").unwrap();

    let library = scan(&index_for(dir.path()));
    assert_eq!(names(&library), vec!["visible.mp3"]);

    let settings = LibrarySettings {
        include_hidden: true,
        ..LibrarySettings::default()
    };
    let library = scan(&DirectoryIndex::new(dir.path(), &settings));
    assert_eq!(library.len(), 3);
}

#[test]
fn scan_ids_are_unique_and_refs_point_at_files() {
    let dir = tempdir().unwrap();
    for name in ["x.mp3", "y.mp3", "z.wav"] {
        fs::write(dir.path().join(name), b"x").unwrap();
    }

    let library = scan(&index_for(dir.path()));
    let mut ids: Vec<u64> = library.entries().iter().map(|e| e.track.id()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 3);
    for entry in library.entries() {
        assert!(entry.track.locator().is_file());
        assert!(entry.track.locator().ends_with(&entry.name));
    }
}

#[test]
fn scan_of_missing_root_is_empty() {
    let dir = tempdir().unwrap();
    let index = index_for(&dir.path().join("absent"));
    assert!(index.query(&MediaQuery::music()).is_none());
    assert!(scan(&index).is_empty());
}

#[test]
fn display_name_resolves_while_file_exists() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tune.mp3");
    fs::write(&path, b"x").unwrap();
    let index = index_for(dir.path());

    let track = TrackRef::new(7, &path);
    assert_eq!(index.display_name(&track).as_deref(), Some("tune.mp3"));

    fs::remove_file(&path).unwrap();
    assert_eq!(index.display_name(&track), None);
}

struct CountingIndex {
    rows: Vec<MediaRow>,
    queries: Cell<usize>,
}

impl MediaIndex for CountingIndex {
    fn query(&self, query: &MediaQuery) -> Option<Vec<MediaRow>> {
        assert_eq!(*query, MediaQuery::music());
        self.queries.set(self.queries.get() + 1);
        Some(self.rows.clone())
    }

    fn display_name(&self, _track: &TrackRef) -> Option<String> {
        None
    }
}

#[test]
fn scan_issues_one_music_query_and_preserves_row_order() {
    let row = |id: u64, name: &str| MediaRow {
        id,
        display_name: name.to_string(),
        locator: PathBuf::from(format!("/media/{id}")),
    };
    let index = CountingIndex {
        // Deliberately not alphabetical: the scanner keeps the index's order.
        rows: vec![row(3, "Zed"), row(1, "Alpha")],
        queries: Cell::new(0),
    };

    let library = scan(&index);
    assert_eq!(index.queries.get(), 1);
    assert_eq!(names(&library), vec!["Zed", "Alpha"]);
    assert_eq!(library.get(0).unwrap().track, TrackRef::new(3, "/media/3"));
}
