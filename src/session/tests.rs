use super::*;
use crate::activity::PlayCount;
use crate::library::Origin;
use std::cell::RefCell;
use std::fs;
use std::io;
use tempfile::tempdir;

#[derive(Default)]
struct RecordingPlayer {
    played: RefCell<Vec<String>>,
    broken: bool,
}

impl Player for RecordingPlayer {
    fn play(&self, location: &str) -> Result<(), PlaybackError> {
        if self.broken {
            return Err(PlaybackError::Launch {
                command: "fake".into(),
                source: io::Error::other("boom"),
            });
        }
        self.played.borrow_mut().push(location.to_string());
        Ok(())
    }

    fn is_available(&self) -> bool {
        !self.broken
    }
}

struct FixedRemote(Catalog);

impl RemoteSource for FixedRemote {
    fn search(&self, query: &str) -> Result<Catalog, RemoteError> {
        Ok(self
            .0
            .iter()
            .filter(|t| !query.is_empty() && t.title.contains(query))
            .cloned()
            .collect())
    }
}

fn session(settings: Settings) -> Session<RecordingPlayer, FixedRemote> {
    Session::new(
        settings,
        RecordingPlayer::default(),
        FixedRemote(vec![
            TrackRecord::remote("Zeta (live)", "https://yt/zeta"),
            TrackRecord::remote("Alpha (live)", "https://yt/alpha"),
        ]),
    )
}

fn library() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    let files = [
        ("medium live.mp3", 300),
        ("tiny.ogg", 10),
        ("sub/huge.flac", 900),
        ("sub/large live.wav", 600),
        ("sub/deep/small.aac", 100),
        ("cover.jpg", 5000),
    ];
    for (rel, len) in files {
        let p = dir.path().join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, vec![1u8; len]).unwrap();
    }
    dir
}

fn view_titles(view: &LibraryView) -> Vec<&str> {
    view.records().map(|r| r.title.as_str()).collect()
}

#[test]
fn library_view_sorts_by_size_and_marks_largest() {
    let dir = library();
    let s = session(Settings::default());

    let view = s.library_view(dir.path(), "").unwrap();
    assert_eq!(view.scanned, 5);
    assert!(!view.filtered);
    assert_eq!(
        view_titles(&view),
        vec![
            "tiny.ogg",
            "small.aac",
            "medium live.mp3",
            "large live.wav",
            "huge.flac"
        ]
    );
    let marked: Vec<bool> = view.rows.iter().map(|r| r.top_k).collect();
    assert_eq!(marked, vec![false, false, true, true, true]);
}

#[test]
fn library_view_filters_but_keeps_whole_library_top_k() {
    let dir = library();
    let mut settings = Settings::default();
    settings.ranking.top_k = 1;
    let s = session(settings);

    let view = s.library_view(dir.path(), "  LIVE ").unwrap();
    assert!(view.filtered);
    assert_eq!(view.scanned, 5);
    assert_eq!(view_titles(&view), vec!["medium live.mp3", "large live.wav"]);
    // "huge.flac" holds the single top slot, so neither visible row is marked.
    assert!(view.rows.iter().all(|r| !r.top_k));
}

#[test]
fn blank_keyword_means_no_filter() {
    let dir = library();
    let s = session(Settings::default());
    let view = s.library_view(dir.path(), " \t ").unwrap();
    assert!(!view.filtered);
    assert_eq!(view.len(), 5);
}

#[test]
fn library_view_can_order_by_title() {
    let dir = library();
    let mut settings = Settings::default();
    settings.ranking.order = crate::config::RankOrderSetting::Title;
    let s = session(settings);

    let view = s.library_view(dir.path(), "").unwrap();
    assert_eq!(view_titles(&view)[0], "huge.flac");
    assert_eq!(view_titles(&view)[4], "tiny.ogg");
}

#[test]
fn empty_library_and_unmatched_keyword_are_empty_views() {
    let dir = tempdir().unwrap();
    let s = session(Settings::default());

    let view = s.library_view(dir.path(), "").unwrap();
    assert!(view.is_empty());
    assert_eq!(view.scanned, 0);

    let view = s.library_view(dir.path(), "anything").unwrap();
    assert!(view.is_empty());

    let lib = library();
    let view = s.library_view(lib.path(), "no such song").unwrap();
    assert!(view.is_empty());
    assert_eq!(view.scanned, 5);
}

#[test]
fn library_view_rejects_missing_root() {
    let dir = tempdir().unwrap();
    let s = session(Settings::default());
    assert!(matches!(
        s.library_view(&dir.path().join("gone"), ""),
        Err(ScanError::InvalidDirectory(_))
    ));
}

#[test]
fn play_hands_location_to_player_and_records_title() {
    let dir = library();
    let mut s = session(Settings::default());
    let view = s.library_view(dir.path(), "").unwrap();
    let huge = view.rows[4].record.clone();
    let tiny = view.rows[0].record.clone();

    s.play(&huge).unwrap();
    s.play(&tiny).unwrap();
    s.play(&huge).unwrap();

    assert_eq!(
        *s.player().played.borrow(),
        vec![
            huge.location.clone(),
            tiny.location.clone(),
            huge.location.clone()
        ]
    );
    assert_eq!(s.tracker().history(), ["huge.flac", "tiny.ogg", "huge.flac"]);
    assert_eq!(
        s.tracker().top_played(3),
        vec![
            PlayCount {
                title: "huge.flac".into(),
                count: 2
            },
            PlayCount {
                title: "tiny.ogg".into(),
                count: 1
            },
        ]
    );
}

#[test]
fn failed_launch_records_nothing() {
    let mut s = Session::new(
        Settings::default(),
        RecordingPlayer {
            broken: true,
            ..RecordingPlayer::default()
        },
        FixedRemote(Vec::new()),
    );
    let track = TrackRecord::remote("x", "https://yt/x");
    assert!(s.play(&track).is_err());
    assert!(s.tracker().is_empty());
}

#[test]
fn remote_and_local_plays_share_one_tracker() {
    let dir = library();
    let mut s = session(Settings::default());

    let hits = s.search_remote("live").unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].title, "Zeta (live)", "remote order is kept");
    assert_eq!(hits[0].origin, Origin::Remote);
    s.play(&hits[0]).unwrap();

    let view = s.library_view(dir.path(), "tiny").unwrap();
    s.play(&view.rows[0].record).unwrap();

    assert_eq!(s.tracker().history(), ["Zeta (live)", "tiny.ogg"]);
}

#[test]
fn plays_are_saved_when_a_store_is_attached() {
    let state = tempdir().unwrap();
    let store = HistoryStore::new(state.path().join("history.toml"));
    let previous = ActivityTracker::from_history(["old.mp3"]);

    let mut s = session(Settings::default()).with_store(store.clone(), previous);
    s.play(&TrackRecord::remote("new", "https://yt/new")).unwrap();

    let reloaded = store.load().unwrap();
    assert_eq!(reloaded.history(), ["old.mp3", "new"]);
}

#[test]
fn narrowing_an_existing_view_keeps_order_and_markers() {
    let dir = library();
    let s = session(Settings::default());
    let full = s.library_view(dir.path(), "").unwrap();

    let same = full.clone().filter("   ");
    assert!(!same.filtered);
    assert_eq!(same.rows, full.rows);

    let live = full.filter("Live");
    assert!(live.filtered);
    assert_eq!(live.scanned, 5);
    assert_eq!(view_titles(&live), vec!["medium live.mp3", "large live.wav"]);
    assert!(live.rows.iter().all(|r| r.top_k));
}

#[test]
fn seeded_tracker_keeps_counting_without_a_store() {
    let mut s = session(Settings::default())
        .with_tracker(ActivityTracker::from_history(["a", "b", "a"]));
    s.play(&TrackRecord::remote("b", "https://yt/b")).unwrap();

    assert_eq!(s.tracker().total_plays(), 4);
    assert_eq!(s.tracker().play_count("b"), 2);
}
