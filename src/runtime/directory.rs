use std::path::PathBuf;

use log::warn;

use crate::config::{StateFiles, validate_library_root};
use crate::ui;

/// The saved library directory, or one asked for until the answer is a directory.
pub fn library_root(state: Option<&StateFiles>) -> anyhow::Result<PathBuf> {
    if let Some(root) = saved_root(state) {
        return Ok(root);
    }
    ask_and_save(state)
}

/// Menu entry 3: always ask, even when a directory is already saved.
pub fn change_library_root(state: Option<&StateFiles>) -> anyhow::Result<()> {
    let root = ask_and_save(state)?;
    ui::success(&format!("Offline music directory set to '{}'", root.display()));
    Ok(())
}

fn saved_root(state: Option<&StateFiles>) -> Option<PathBuf> {
    match state?.load_library_root() {
        Ok(root) => root,
        Err(e) => {
            warn!("ignoring saved library directory: {e}");
            None
        }
    }
}

fn ask_and_save(state: Option<&StateFiles>) -> anyhow::Result<PathBuf> {
    let root = loop {
        let answer = ui::prompt("Enter path to your music directory", "")?;
        match validate_library_root(&answer) {
            Some(root) => break root,
            None => ui::error("Invalid path. Please enter a valid directory."),
        }
    };

    if let Some(state) = state {
        if let Err(e) = state.save_library_root(&root) {
            warn!("library directory not saved: {e}");
        }
    }
    Ok(root)
}
