use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

use super::load::default_state_dir;

const LIBRARY_FILE: &str = "library.toml";
const HISTORY_FILE: &str = "history.toml";

#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize state: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct LibraryRootFile {
    root: PathBuf,
}

/// Location of the files the player persists between runs.
#[derive(Debug, Clone)]
pub struct StateFiles {
    dir: PathBuf,
}

impl StateFiles {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// State files under the XDG state directory, if `HOME` or `XDG_STATE_HOME` is set.
    pub fn from_env() -> Option<Self> {
        default_state_dir().map(Self::new)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn library_root_path(&self) -> PathBuf {
        self.dir.join(LIBRARY_FILE)
    }

    pub fn history_path(&self) -> PathBuf {
        self.dir.join(HISTORY_FILE)
    }

    /// The remembered library root, if one was saved and it is still a directory.
    pub fn load_library_root(&self) -> Result<Option<PathBuf>, StateError> {
        let saved: Option<LibraryRootFile> = read_toml(&self.library_root_path())?;
        Ok(saved.map(|f| f.root).filter(|root| root.is_dir()))
    }

    pub fn save_library_root(&self, root: &Path) -> Result<(), StateError> {
        write_toml(
            &self.library_root_path(),
            &LibraryRootFile {
                root: root.to_path_buf(),
            },
        )
    }
}

/// Check user input names an existing directory and return its canonical path.
pub fn validate_library_root(input: &str) -> Option<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let path = Path::new(trimmed);
    if !path.is_dir() {
        return None;
    }
    Some(fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()))
}

/// Read a TOML state file. A missing file is `Ok(None)`.
pub fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StateError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StateError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&raw)
        .map(Some)
        .map_err(|source| StateError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Write a TOML state file, creating its parent directory.
///
/// The text goes to a sibling `.tmp` file first and is renamed over `path`, so
/// readers see either the old contents or the new ones.
pub fn write_toml<T: Serialize>(path: &Path, value: &T) -> Result<(), StateError> {
    let io_err = |source: io::Error| StateError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let text = toml::to_string(value)?;

    let tmp = temp_sibling(path);
    fs::write(&tmp, text).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(|source| {
        let _ = fs::remove_file(&tmp);
        io_err(source)
    })
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
