//! A listening session: one activity tracker plus the collaborators that feed it.
//!
//! The session owns its tracker outright, so every mutation goes through
//! `&mut self` and the history and counts cannot drift apart.

use std::collections::HashSet;
use std::path::Path;

use log::{info, warn};

use crate::activity::{ActivityTracker, HistoryStore};
use crate::config::Settings;
use crate::filter::{filter_by_keyword, is_blank};
use crate::library::{self, Catalog, ScanError, TrackRecord};
use crate::playback::{PlaybackError, Player};
use crate::ranking::{SortKey, top_k_by_size};
use crate::remote::{RemoteError, RemoteSource};

/// One row of the offline library table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    pub record: TrackRecord,
    /// Whether the record is among the largest `top_k` files of the whole scan.
    pub top_k: bool,
}

/// The ranked (and possibly filtered) library as shown to the user.
#[derive(Debug, Clone, Default)]
pub struct LibraryView {
    pub rows: Vec<ViewRow>,
    /// Tracks found by the scan before filtering.
    pub scanned: usize,
    /// True when a keyword filter was applied.
    pub filtered: bool,
    pub top_k: usize,
}

impl LibraryView {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &TrackRecord> {
        self.rows.iter().map(|r| &r.record)
    }

    /// Keep only rows whose title contains `keyword`; a blank keyword keeps all.
    ///
    /// Row order and top-k markers are unchanged.
    pub fn filter(self, keyword: &str) -> LibraryView {
        if is_blank(keyword) {
            return self;
        }

        let records: Catalog = self.rows.iter().map(|r| r.record.clone()).collect();
        let marked: HashSet<&str> = self
            .rows
            .iter()
            .filter(|r| r.top_k)
            .map(|r| r.record.location.as_str())
            .collect();

        let rows = filter_by_keyword(&records, keyword.trim())
            .into_iter()
            .map(|record| ViewRow {
                top_k: marked.contains(record.location.as_str()),
                record,
            })
            .collect();

        LibraryView {
            rows,
            filtered: true,
            ..self
        }
    }
}

pub struct Session<P, R> {
    settings: Settings,
    tracker: ActivityTracker,
    store: Option<HistoryStore>,
    player: P,
    remote: R,
}

impl<P: Player, R: RemoteSource> Session<P, R> {
    /// Start a session with an empty history.
    pub fn new(settings: Settings, player: P, remote: R) -> Self {
        Self {
            settings,
            tracker: ActivityTracker::new(),
            store: None,
            player,
            remote,
        }
    }

    /// Seed the session with plays recorded elsewhere.
    pub fn with_tracker(mut self, tracker: ActivityTracker) -> Self {
        self.tracker = tracker;
        self
    }

    /// Resume from a previously saved history and keep saving to `store`.
    pub fn with_store(self, store: HistoryStore, tracker: ActivityTracker) -> Self {
        let mut session = self.with_tracker(tracker);
        session.store = Some(store);
        session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tracker(&self) -> &ActivityTracker {
        &self.tracker
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    /// Scan `root`, rank it, mark the largest files and apply `keyword` unless blank.
    pub fn library_view(&self, root: &Path, keyword: &str) -> Result<LibraryView, ScanError> {
        let catalog = library::scan(root, &self.settings.library)?;
        let ranked = SortKey::from(self.settings.ranking.order).sort(&catalog);

        let top_k = self.settings.ranking.top_k;
        let largest: HashSet<String> = top_k_by_size(&catalog, top_k)
            .into_iter()
            .map(|t| t.location)
            .collect();

        let rows = ranked
            .into_iter()
            .map(|record| ViewRow {
                top_k: largest.contains(&record.location),
                record,
            })
            .collect();

        let view = LibraryView {
            rows,
            scanned: catalog.len(),
            filtered: false,
            top_k,
        };
        Ok(view.filter(keyword))
    }

    /// Hand `record` to the player and record the play once it started.
    pub fn play(&mut self, record: &TrackRecord) -> Result<(), PlaybackError> {
        self.player.play(&record.location)?;

        if let Err(e) = self.tracker.record_play(record.title.as_str()) {
            warn!("not recording play of {}: {e}", record.location);
            return Ok(());
        }
        info!("recorded play {} of `{}'", self.tracker.total_plays(), record.title);

        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.tracker) {
                warn!("failed to save play history: {e}");
            }
        }
        Ok(())
    }

    /// Ask the remote source for candidates; order is the source's own.
    pub fn search_remote(&self, query: &str) -> Result<Catalog, RemoteError> {
        self.remote.search(query)
    }
}

#[cfg(test)]
mod tests;
