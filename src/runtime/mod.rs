//! Wiring between the command line, the session and the terminal.

use std::io;
use std::path::Path;

use log::{debug, warn};

use crate::activity::{ActivityTracker, HistoryStore};
use crate::cli::{Args, Command};
use crate::config::{Settings, StateFiles};
use crate::playback::{Player, ProcessPlayer};
use crate::remote::YtDlpSource;
use crate::session::Session;
use crate::ui;

mod commands;
mod directory;
mod offline;
mod online;
mod settings;

pub use settings::load_settings;

pub type LiveSession = Session<ProcessPlayer, YtDlpSource>;

pub fn run(args: Args) -> anyhow::Result<()> {
    let settings = load_settings(args.config.as_deref());
    let state = StateFiles::from_env();
    if state.is_none() {
        warn!("neither XDG_STATE_HOME nor HOME is set; nothing will be remembered");
    }

    match args.command {
        None => {
            let mut session = build_session(settings, state.as_ref());
            interactive(&mut session, state.as_ref())
        }
        Some(Command::Scan { dir, keyword }) => {
            let session = build_session(settings, state.as_ref());
            commands::scan(&session, state.as_ref(), dir.as_deref(), keyword.as_deref())
        }
        Some(Command::History) => {
            commands::history(&load_tracker(state.as_ref()));
            Ok(())
        }
        Some(Command::Top { count }) => {
            let n = count.unwrap_or(settings.history.top_played);
            commands::top(&load_tracker(state.as_ref()), n);
            Ok(())
        }
        Some(Command::SetDir { dir }) => commands::set_dir(state.as_ref(), &dir),
    }
}

/// Session backed by the configured player and search tool.
///
/// With `history.persist` on, plays from earlier runs are loaded and every new
/// play is saved.
pub fn build_session(settings: Settings, state: Option<&StateFiles>) -> LiveSession {
    let player = ProcessPlayer::new(&settings.player);
    let remote = YtDlpSource::new(&settings.remote);
    let persist = settings.history.persist;
    let session = Session::new(settings, player, remote);

    match state.filter(|_| persist) {
        Some(state) => {
            let store = HistoryStore::new(state.history_path());
            let tracker = load_or_empty(&store);
            session.with_store(store, tracker)
        }
        None => session,
    }
}

fn load_tracker(state: Option<&StateFiles>) -> ActivityTracker {
    state
        .map(|s| load_or_empty(&HistoryStore::new(s.history_path())))
        .unwrap_or_default()
}

fn load_or_empty(store: &HistoryStore) -> ActivityTracker {
    store.load().unwrap_or_else(|e| {
        warn!("ignoring play history: {e}");
        ActivityTracker::new()
    })
}

/// True when `err` means stdin was closed.
fn is_end_of_input(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::UnexpectedEof)
}

fn interactive(session: &mut LiveSession, state: Option<&StateFiles>) -> anyhow::Result<()> {
    println!("encore {}", env!("CARGO_PKG_VERSION"));
    if !session.player().is_available() {
        ui::warn(&format!(
            "Media player `{}` not found. Install it or set player.command in the config.",
            session.player().command()
        ));
    }

    loop {
        ui::print_menu();
        let result = ui::prompt("Choose an option", "1")
            .map_err(anyhow::Error::from)
            .and_then(|choice| match choice.trim() {
                "1" => online::search_and_play(session).map(|_| true),
                "2" => offline::play_offline(session, state).map(|_| true),
                "3" => directory::change_library_root(state).map(|_| true),
                "4" => {
                    ui::print_history(session.tracker().history());
                    Ok(true)
                }
                "5" => {
                    show_top_played(session.tracker(), session.settings().history.top_played);
                    Ok(true)
                }
                "6" => Ok(false),
                other => {
                    debug!("unknown menu choice `{other}'");
                    ui::error("Invalid option! Please try again.");
                    Ok(true)
                }
            });

        match result {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) if is_end_of_input(&e) => {
                println!();
                break;
            }
            Err(e) => return Err(e),
        }
    }

    ui::success("Goodbye!");
    Ok(())
}

fn show_top_played(tracker: &ActivityTracker, n: usize) {
    if tracker.is_empty() {
        ui::warn("No songs played yet.");
        return;
    }
    ui::print_top_played(&tracker.top_played(n), n);
}

/// Canonical form of a library directory given on the command line.
fn cli_library_root(dir: &Path) -> anyhow::Result<std::path::PathBuf> {
    crate::config::validate_library_root(&dir.to_string_lossy())
        .ok_or_else(|| anyhow::anyhow!("{} is not a directory", dir.display()))
}
