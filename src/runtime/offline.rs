use crate::config::StateFiles;
use crate::playback::Player;
use crate::remote::RemoteSource;
use crate::selection::{DEFAULT_CHOICE, select};
use crate::session::{LibraryView, Session};
use crate::ui;

use super::directory;

pub fn play_offline<P: Player, R: RemoteSource>(
    session: &mut Session<P, R>,
    state: Option<&StateFiles>,
) -> anyhow::Result<()> {
    let root = directory::library_root(state)?;

    let view = match session.library_view(&root, "") {
        Ok(view) => view,
        Err(e) => {
            ui::error(&format!("{e}. Use option 3 to pick another directory."));
            return Ok(());
        }
    };
    if view.scanned == 0 {
        ui::warn("No music files found in directory!");
        return Ok(());
    }
    ui::success(&format!(
        "Found {} songs in '{}'",
        view.scanned,
        root.display()
    ));

    let keyword = ui::prompt("Enter keyword to search in song titles (leave empty to skip)", "")?;
    let view = view.filter(&keyword);

    let row = match view.len() {
        0 => {
            ui::warn("No songs found with that keyword!");
            return Ok(());
        }
        _ if plays_without_asking(&view) => 0,
        len => {
            ui::print_library(&view);
            let answer = ui::prompt("Enter the index of the song to play", DEFAULT_CHOICE)?;
            // `len` is non-zero here, so a selection always exists.
            let Some(choice) = select(&answer, len) else {
                return Ok(());
            };
            if choice.is_fallback() {
                ui::warn("Invalid choice! Playing first song.");
            }
            choice.index()
        }
    };

    let record = view.rows[row].record.clone();
    ui::now_playing(&record.title);
    if let Err(e) = session.play(&record) {
        ui::error(&e.to_string());
    }
    Ok(())
}

/// A keyword that narrowed the library to a single song plays it straight away.
fn plays_without_asking(view: &LibraryView) -> bool {
    view.filtered && view.len() == 1
}
