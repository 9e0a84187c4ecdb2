use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/encore/config.toml` or `~/.config/encore/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ENCORE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub ranking: RankingSettings,
    pub history: HistorySettings,
    pub player: PlayerSettings,
    pub remote: RemoteSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning. A file reachable through
    /// several links is still listed once.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: ["mp3", "wav", "flac", "aac", "ogg"]
                .into_iter()
                .map(String::from)
                .collect(),
            follow_links: false,
            include_hidden: true,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankOrderSetting {
    #[serde(alias = "size_ascending", alias = "size-ascending")]
    Size,
    #[serde(alias = "name")]
    Title,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RankingSettings {
    /// How the offline library table is ordered.
    pub order: RankOrderSetting,
    /// How many of the largest files get the "Top K Largest" marker.
    pub top_k: usize,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            order: RankOrderSetting::Size,
            top_k: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Rows shown by "Show Top Played Songs".
    pub top_played: usize,
    /// Keep play history across restarts in the state directory.
    pub persist: bool,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            top_played: 3,
            persist: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Media player executable; the track location is appended to `args`.
    pub command: String,
    pub args: Vec<String>,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            command: "mpv".to_string(),
            args: vec!["--no-video".to_string()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    /// Search executable (yt-dlp compatible).
    pub command: String,
    /// Number of search hits requested per query.
    pub results: usize,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            command: "yt-dlp".to_string(),
            results: 5,
        }
    }
}
