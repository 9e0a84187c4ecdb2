//! Playback through an external media player process.
//!
//! The player gets a location and blocks until the process exits. Exit status
//! is not interpreted: once the process started, the play counts.

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, info};
use thiserror::Error;

use crate::config::PlayerSettings;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("media player `{0}` was not found; install it or set player.command")]
    Unavailable(String),
    #[error("failed to start `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },
}

/// Something that can play a track location.
pub trait Player {
    /// Play `location` to completion (or until the user quits the player).
    fn play(&self, location: &str) -> Result<(), PlaybackError>;

    /// Whether the player can be launched at all.
    fn is_available(&self) -> bool;
}

/// Runs a command-line player such as `mpv --no-video <location>`.
#[derive(Debug, Clone)]
pub struct ProcessPlayer {
    command: String,
    args: Vec<String>,
}

impl ProcessPlayer {
    pub fn new(settings: &PlayerSettings) -> Self {
        Self {
            command: settings.command.clone(),
            args: settings.args.clone(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Player for ProcessPlayer {
    fn play(&self, location: &str) -> Result<(), PlaybackError> {
        info!("playing {location} with {}", self.command);
        let status = Command::new(&self.command)
            .args(&self.args)
            .arg(location)
            .stdin(Stdio::inherit())
            .status()
            .map_err(|source| {
                if source.kind() == io::ErrorKind::NotFound {
                    PlaybackError::Unavailable(self.command.clone())
                } else {
                    PlaybackError::Launch {
                        command: self.command.clone(),
                        source,
                    }
                }
            })?;
        debug!("{} exited with {status}", self.command);
        Ok(())
    }

    fn is_available(&self) -> bool {
        find_executable(&self.command).is_some()
    }
}

/// Locate `command` the way a shell would: paths with a separator are checked
/// directly, bare names are looked up in `PATH`.
pub fn find_executable(command: &str) -> Option<PathBuf> {
    let direct = Path::new(command);
    if direct.components().count() > 1 {
        return direct.is_file().then(|| direct.to_path_buf());
    }

    let path_var = env::var_os("PATH")?;
    env::split_paths(&path_var).find_map(|dir| {
        let candidate = dir.join(command);
        if candidate.is_file() {
            return Some(candidate);
        }
        if cfg!(windows) {
            let exe = dir.join(format!("{command}.exe"));
            if exe.is_file() {
                return Some(exe);
            }
        }
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_player_uses_configured_command() {
        let player = ProcessPlayer::new(&PlayerSettings::default());
        assert_eq!(player.command(), "mpv");
    }

    #[test]
    fn missing_player_is_unavailable() {
        let player = ProcessPlayer::new(&PlayerSettings {
            command: "encore-definitely-not-a-real-player".into(),
            args: Vec::new(),
        });
        assert!(!player.is_available());
        let err = player.play("/tmp/a.mp3").unwrap_err();
        assert!(matches!(err, PlaybackError::Unavailable(_)));
    }

    #[test]
    fn explicit_paths_are_checked_directly() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("player");
        std::fs::write(&exe, b"").unwrap();

        assert_eq!(find_executable(exe.to_str().unwrap()), Some(exe.clone()));
        assert_eq!(
            find_executable(dir.path().join("absent").to_str().unwrap()),
            None
        );
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_is_not_interpreted() {
        let player = ProcessPlayer::new(&PlayerSettings {
            command: "false".into(),
            args: Vec::new(),
        });
        assert!(player.play("ignored").is_ok());
    }
}
