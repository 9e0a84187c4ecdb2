use crate::filter::is_blank;
use crate::playback::Player;
use crate::remote::RemoteSource;
use crate::selection::{DEFAULT_CHOICE, select};
use crate::session::Session;
use crate::ui;

pub fn search_and_play<P: Player, R: RemoteSource>(
    session: &mut Session<P, R>,
) -> anyhow::Result<()> {
    let query = ui::prompt("Enter song name", "")?;
    if is_blank(&query) {
        ui::warn("Nothing to search for.");
        return Ok(());
    }
    println!("Searching for: {}", query.trim());

    let hits = match session.search_remote(&query) {
        Ok(hits) => hits,
        Err(e) => {
            ui::error(&e.to_string());
            return Ok(());
        }
    };
    if hits.is_empty() {
        ui::warn("No results found.");
        return Ok(());
    }

    ui::print_search_results(&hits);
    let answer = ui::prompt("Enter the index of the song to play", DEFAULT_CHOICE)?;
    let Some(choice) = select(&answer, hits.len()) else {
        return Ok(());
    };
    if choice.is_fallback() {
        ui::warn("Invalid choice! Playing first song.");
    }

    let record = &hits[choice.index()];
    ui::now_playing(&record.title);
    if let Err(e) = session.play(record) {
        ui::error(&e.to_string());
    }
    Ok(())
}
