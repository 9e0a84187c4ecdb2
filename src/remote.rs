//! Remote track discovery through an external search tool.
//!
//! Results come back as remote `TrackRecord`s in the order the tool reports
//! them; they are never re-ranked.

use std::io;
use std::process::Command;

use log::{debug, warn};
use thiserror::Error;

use crate::config::RemoteSettings;
use crate::library::{Catalog, TrackRecord};

const UNKNOWN_TITLE: &str = "Unknown Title";
/// yt-dlp's placeholder for a missing field.
const MISSING_FIELD: &str = "NA";

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("failed to start `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("search failed: {0}")]
    Failed(String),
}

/// A catalog source that answers free-text queries.
pub trait RemoteSource {
    fn search(&self, query: &str) -> Result<Catalog, RemoteError>;
}

/// Flat (metadata-only) `ytsearchN:` queries through yt-dlp.
#[derive(Debug, Clone)]
pub struct YtDlpSource {
    command: String,
    results: usize,
}

impl YtDlpSource {
    pub fn new(settings: &RemoteSettings) -> Self {
        Self {
            command: settings.command.clone(),
            results: settings.results.max(1),
        }
    }

    fn args(&self, query: &str) -> Vec<String> {
        vec![
            "--flat-playlist".to_string(),
            "--no-warnings".to_string(),
            "--ignore-errors".to_string(),
            "--print".to_string(),
            "%(title)s\t%(url)s".to_string(),
            format!("ytsearch{}:{}", self.results, query.trim()),
        ]
    }
}

impl RemoteSource for YtDlpSource {
    fn search(&self, query: &str) -> Result<Catalog, RemoteError> {
        if query.trim().is_empty() {
            return Ok(Catalog::new());
        }

        debug!("searching `{}' via {}", query.trim(), self.command);
        let output = Command::new(&self.command)
            .args(self.args(query))
            .output()
            .map_err(|source| RemoteError::Launch {
                command: self.command.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let hits = parse_search_output(&stdout);
        if !output.status.success() && hits.is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RemoteError::Failed(stderr.trim().to_string()));
        }
        Ok(hits)
    }
}

/// Parse `title<TAB>url` lines into remote records.
pub fn parse_search_output(text: &str) -> Catalog {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let (title, url) = line.rsplit_once('\t').unwrap_or((line, ""));
            let url = url.trim();
            if url.is_empty() || url == MISSING_FIELD {
                warn!("search hit without a URL skipped: {line}");
                return None;
            }
            let title = title.trim();
            let title = if title.is_empty() || title == MISSING_FIELD {
                UNKNOWN_TITLE
            } else {
                title
            };
            Some(TrackRecord::remote(title, url))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Origin;

    #[test]
    fn parses_titles_and_urls_in_reported_order() {
        let out = "Song B\thttps://yt/b\nSong A\thttps://yt/a\n";
        let hits = parse_search_output(out);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Song B");
        assert_eq!(hits[0].location, "https://yt/b");
        assert_eq!(hits[1].title, "Song A");
        assert!(hits.iter().all(|h| h.origin == Origin::Remote && h.size_bytes == 0));
    }

    #[test]
    fn missing_title_becomes_unknown_and_missing_url_is_dropped() {
        let out = "NA\thttps://yt/x\nNo Link\tNA\nBare line\n\n";
        let hits = parse_search_output(out);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, UNKNOWN_TITLE);
    }

    #[test]
    fn titles_may_contain_tabs() {
        let hits = parse_search_output("A\tB\thttps://yt/ab");
        assert_eq!(hits[0].title, "A\tB");
        assert_eq!(hits[0].location, "https://yt/ab");
    }

    #[test]
    fn search_args_request_the_configured_number_of_hits() {
        let source = YtDlpSource::new(&RemoteSettings {
            command: "yt-dlp".into(),
            results: 7,
        });
        let args = source.args("  daft punk ");
        assert_eq!(args.last().unwrap(), "ytsearch7:daft punk");
        assert!(args.contains(&"--flat-playlist".to_string()));
    }

    #[test]
    fn empty_query_runs_nothing() {
        let source = YtDlpSource::new(&RemoteSettings {
            command: "encore-no-such-search-tool".into(),
            results: 5,
        });
        assert!(source.search("   ").unwrap().is_empty());
        assert!(matches!(
            source.search("x"),
            Err(RemoteError::Launch { .. })
        ));
    }
}
