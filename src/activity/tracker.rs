use std::collections::HashMap;

use log::trace;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error("cannot record a play without a title")]
    InvalidTitle,
}

/// A title and how many times it was played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCount {
    pub title: String,
    pub count: u64,
}

/// Chronological play history plus a frequency table kept in step with it.
///
/// Every recorded play appends one history entry and bumps exactly one count,
/// so the counts always sum to the history length.
#[derive(Debug, Default, Clone)]
pub struct ActivityTracker {
    history: Vec<String>,
    /// Counts in the order titles were first played.
    tallies: Vec<PlayCount>,
    /// title -> position in `tallies`.
    index: HashMap<String, usize>,
}

impl ActivityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a tracker by replaying `titles` in order. Blank titles are dropped.
    pub fn from_history<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tracker = Self::new();
        for title in titles {
            let _ = tracker.record_play(title);
        }
        tracker
    }

    /// Record one play of `title`. Titles are compared by exact string match.
    pub fn record_play(&mut self, title: impl Into<String>) -> Result<(), TrackerError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TrackerError::InvalidTitle);
        }

        match self.index.get(&title) {
            Some(&pos) => self.tallies[pos].count += 1,
            None => {
                self.index.insert(title.clone(), self.tallies.len());
                self.tallies.push(PlayCount {
                    title: title.clone(),
                    count: 1,
                });
            }
        }
        trace!("recorded play of `{title}'");
        self.history.push(title);
        Ok(())
    }

    /// Played titles, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Up to `n` titles by play count, most played first; equal counts keep
    /// the order in which the titles were first played.
    pub fn top_played(&self, n: usize) -> Vec<PlayCount> {
        let mut ranked = self.tallies.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }

    pub fn play_count(&self, title: &str) -> u64 {
        self.index
            .get(title)
            .map(|&pos| self.tallies[pos].count)
            .unwrap_or(0)
    }

    pub fn total_plays(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
