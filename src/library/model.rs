use std::path::Path;

/// Where a track came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Discovered on disk by the scanner.
    Local,
    /// Returned by a remote search; `size_bytes` carries no meaning.
    Remote,
}

/// One playable item. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRecord {
    pub title: String,
    /// Filesystem path or stream URL, handed verbatim to the player.
    pub location: String,
    pub size_bytes: u64,
    pub origin: Origin,
}

impl TrackRecord {
    pub fn local(path: &Path, size_bytes: u64) -> Self {
        let title = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            title,
            location: path.to_string_lossy().into_owned(),
            size_bytes,
            origin: Origin::Local,
        }
    }

    pub fn remote(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            location: url.into(),
            size_bytes: 0,
            origin: Origin::Remote,
        }
    }

    /// Size in mebibytes, as shown in library tables.
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0 / 1024.0
    }
}

/// An ordered sequence of tracks from one traversal or search.
pub type Catalog = Vec<TrackRecord>;
