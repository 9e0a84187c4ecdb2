//! Non-interactive subcommands.

use std::path::Path;

use anyhow::{Context, anyhow};

use crate::activity::ActivityTracker;
use crate::config::StateFiles;
use crate::playback::Player;
use crate::remote::RemoteSource;
use crate::session::Session;
use crate::ui;

use super::{cli_library_root, show_top_played};

pub fn scan<P: Player, R: RemoteSource>(
    session: &Session<P, R>,
    state: Option<&StateFiles>,
    dir: Option<&Path>,
    keyword: Option<&str>,
) -> anyhow::Result<()> {
    let root = match dir {
        Some(dir) => cli_library_root(dir)?,
        None => state
            .map(StateFiles::load_library_root)
            .transpose()
            .context("failed to read the saved library directory")?
            .flatten()
            .ok_or_else(|| anyhow!("no library directory saved; pass DIR or run `encore set-dir DIR`"))?,
    };

    let view = session
        .library_view(&root, keyword.unwrap_or(""))
        .with_context(|| format!("failed to scan {}", root.display()))?;

    if view.scanned == 0 {
        ui::warn("No music files found in directory!");
    } else if view.is_empty() {
        ui::warn("No songs found with that keyword!");
    } else {
        ui::print_library(&view);
    }
    Ok(())
}

pub fn history(tracker: &ActivityTracker) {
    ui::print_history(tracker.history());
}

pub fn top(tracker: &ActivityTracker, n: usize) {
    show_top_played(tracker, n);
}

pub fn set_dir(state: Option<&StateFiles>, dir: &Path) -> anyhow::Result<()> {
    let root = cli_library_root(dir)?;
    let state = state.ok_or_else(|| anyhow!("no state directory; set XDG_STATE_HOME or HOME"))?;
    state
        .save_library_root(&root)
        .context("failed to save the library directory")?;
    ui::success(&format!("Offline music directory set to '{}'", root.display()));
    Ok(())
}
