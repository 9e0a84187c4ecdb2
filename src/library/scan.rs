use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{Catalog, TrackRecord};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("{} is not a readable directory", .0.display())]
    InvalidDirectory(PathBuf),
}

/// Result of a best-effort walk: the catalog plus every path that was skipped
/// because it could not be read or stat'ed.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub catalog: Catalog,
    pub skipped: Vec<PathBuf>,
}

fn normalized_extensions(settings: &LibrarySettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Name-based match: `.mp3` on its own counts, `mp3` without a dot does not.
fn is_audio_file(path: &Path, exts: &[String]) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy().to_lowercase();
    exts.iter().any(|e| {
        name.strip_suffix(e.as_str())
            .is_some_and(|stem| stem.ends_with('.'))
    })
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn ensure_readable_dir(root: &Path) -> Result<(), ScanError> {
    let invalid = || ScanError::InvalidDirectory(root.to_path_buf());
    let meta = fs::metadata(root).map_err(|_| invalid())?;
    if !meta.is_dir() {
        return Err(invalid());
    }
    fs::read_dir(root).map_err(|_| invalid())?;
    Ok(())
}

/// Walk `root` and collect every qualifying audio file, skipping entries that
/// fail to read instead of aborting.
pub fn scan_with_report(root: &Path, settings: &LibrarySettings) -> Result<ScanReport, ScanError> {
    ensure_readable_dir(root)?;

    let exts = normalized_extensions(settings);
    let mut report = ScanReport::default();
    // Canonical paths already listed; only needed when links can alias files.
    let mut seen: HashSet<PathBuf> = HashSet::new();

    let walker = WalkDir::new(root)
        .follow_links(settings.follow_links)
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                debug!("skipping unreadable entry: {err}");
                if let Some(p) = err.path() {
                    report.skipped.push(p.to_path_buf());
                }
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || !is_audio_file(path, &exts) {
            continue;
        }

        if settings.follow_links {
            let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
            if !seen.insert(canonical) {
                debug!("{} already listed through another link", path.display());
                continue;
            }
        }

        match entry.metadata() {
            Ok(meta) => report.catalog.push(TrackRecord::local(path, meta.len())),
            Err(err) => {
                debug!("skipping {}: {err}", path.display());
                report.skipped.push(path.to_path_buf());
            }
        }
    }

    debug!(
        "scanned {}: {} tracks, {} skipped",
        root.display(),
        report.catalog.len(),
        report.skipped.len()
    );
    Ok(report)
}

/// Walk `root` into a catalog in traversal order.
///
/// Fails only when `root` itself is missing or unreadable; an empty catalog is
/// a valid result.
pub fn scan(root: &Path, settings: &LibrarySettings) -> Result<Catalog, ScanError> {
    let report = scan_with_report(root, settings)?;
    if !report.skipped.is_empty() {
        warn!(
            "{} entries under {} could not be read and were skipped",
            report.skipped.len(),
            root.display()
        );
    }
    Ok(report.catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn exts() -> Vec<String> {
        normalized_extensions(&LibrarySettings::default())
    }

    #[test]
    fn is_audio_file_matches_default_extensions_case_insensitive() {
        let exts = exts();
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &exts));
        assert!(is_audio_file(Path::new("/tmp/a.MP3"), &exts));
        assert!(is_audio_file(Path::new("/tmp/a.flac"), &exts));
        assert!(is_audio_file(Path::new("/tmp/a.wav"), &exts));
        assert!(is_audio_file(Path::new("/tmp/a.Ogg"), &exts));
        assert!(is_audio_file(Path::new("/tmp/a.aac"), &exts));
        assert!(!is_audio_file(Path::new("/tmp/a.m4a"), &exts));
        assert!(!is_audio_file(Path::new("/tmp/a.txt"), &exts));
        assert!(!is_audio_file(Path::new("/tmp/a"), &exts));
        assert!(!is_audio_file(Path::new("/tmp/mp3"), &exts));
        assert!(is_audio_file(Path::new("/tmp/.mp3"), &exts));
        assert!(is_audio_file(Path::new("/tmp/x.tar.FLAC"), &exts));
        assert!(!is_audio_file(Path::new("/tmp/xmp3"), &exts));
    }

    #[test]
    fn configured_extensions_tolerate_dots_and_case() {
        let settings = LibrarySettings {
            extensions: vec![".M4A".into(), "  opus ".into(), "".into()],
            ..LibrarySettings::default()
        };
        let exts = normalized_extensions(&settings);
        assert_eq!(exts, vec!["m4a".to_string(), "opus".to_string()]);
        assert!(is_audio_file(Path::new("x.m4a"), &exts));
        assert!(!is_audio_file(Path::new("x.mp3"), &exts));
    }

    #[test]
    fn scan_records_file_name_full_path_and_size() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("Song.MP3");
        fs::write(&file, vec![0u8; 1234]).unwrap();

        let catalog = scan(dir.path(), &LibrarySettings::default()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].title, "Song.MP3");
        assert_eq!(catalog[0].location, file.to_string_lossy());
        assert_eq!(catalog[0].size_bytes, 1234);
    }

    #[test]
    fn scan_respects_include_hidden_false() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"x").unwrap();
        fs::write(dir.path().join("visible.mp3"), b"x").unwrap();
        let hidden_dir = dir.path().join(".cache");
        fs::create_dir_all(&hidden_dir).unwrap();
        fs::write(hidden_dir.join("inside.mp3"), b"x").unwrap();

        let settings = LibrarySettings {
            include_hidden: false,
            ..LibrarySettings::default()
        };
        let catalog = scan(dir.path(), &settings).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].title, "visible.mp3");

        let all = scan(dir.path(), &LibrarySettings::default()).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn scan_rejects_a_regular_file_as_root() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.mp3");
        fs::write(&file, b"x").unwrap();

        let err = scan(&file, &LibrarySettings::default()).unwrap_err();
        assert!(matches!(err, ScanError::InvalidDirectory(p) if p == file));
    }
}
