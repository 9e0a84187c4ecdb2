//! Terminal presentation: menus, prompts and tables.
//!
//! Tables are `ratatui` widgets rendered into an off-screen buffer and printed
//! as plain lines, so output stays in the normal scrollback. Highlights use
//! `crossterm` styling.

use std::io::{self, BufRead, Write};

use crossterm::style::Stylize;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Row, Table, Widget},
};

use crate::activity::PlayCount;
use crate::library::TrackRecord;
use crate::session::LibraryView;

const FALLBACK_WIDTH: u16 = 100;
const MAX_WIDTH: u16 = 160;
const ROWS_PER_TABLE: usize = 4096;

pub const MENU: [&str; 6] = [
    "Search & Play Online",
    "Play Offline Music",
    "Set Offline Music Directory",
    "Show Play History",
    "Show Top Played Songs",
    "Exit",
];

/// Size column text: mebibytes with two decimals.
pub fn format_size_mb(track: &TrackRecord) -> String {
    format!("{:.2}", track.size_mb())
}

/// `[index, title (+ marker), size]` cells for the library table.
pub fn library_rows(view: &LibraryView) -> Vec<[String; 3]> {
    let marker = format!(" [Top {} Largest]", view.top_k);
    view.rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut title = row.record.title.clone();
            if row.top_k {
                title.push_str(&marker);
            }
            [(i + 1).to_string(), title, format_size_mb(&row.record)]
        })
        .collect()
}

/// Numbered history lines, most recent first.
pub fn history_lines(history: &[String]) -> Vec<String> {
    history
        .iter()
        .rev()
        .enumerate()
        .map(|(i, title)| format!("{}. {}", i + 1, title))
        .collect()
}

fn render_lines<W: Widget>(widget: W, width: u16, height: u16) -> Vec<String> {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    widget.render(area, &mut buf);
    buf.content
        .chunks(width as usize)
        .map(|cells| {
            let line: String = cells.iter().map(|c| c.symbol()).collect();
            line.trim_end().to_string()
        })
        .collect()
}

fn table_lines(
    title: &str,
    header: &[&str],
    rows: Vec<Vec<String>>,
    widths: &[Constraint],
) -> Vec<String> {
    let width = crossterm::terminal::size()
        .map(|(w, _)| w)
        .unwrap_or(FALLBACK_WIDTH)
        .clamp(40, MAX_WIDTH);
    render_tables(title, header, rows, widths, width)
}

/// Render `rows` as one bordered table, or as numbered parts of at most
/// `ROWS_PER_TABLE` rows each since a buffer is limited to `u16::MAX` lines.
fn render_tables(
    title: &str,
    header: &[&str],
    rows: Vec<Vec<String>>,
    widths: &[Constraint],
    width: u16,
) -> Vec<String> {
    let parts = rows.len().div_ceil(ROWS_PER_TABLE).max(1);
    let mut rows = rows.into_iter();
    let mut lines = Vec::new();

    for part in 1..=parts {
        let chunk: Vec<Vec<String>> = rows.by_ref().take(ROWS_PER_TABLE).collect();
        let title = if parts == 1 {
            format!(" {title} ")
        } else {
            format!(" {title} ({part}/{parts}) ")
        };
        // Borders plus header row.
        let height = u16::try_from(chunk.len() + 3).unwrap_or(u16::MAX);

        let header =
            Row::new(header.iter().copied()).style(Style::new().add_modifier(Modifier::BOLD));
        let table = Table::new(chunk.into_iter().map(Row::new), widths.to_vec())
            .header(header)
            .column_spacing(2)
            .block(Block::bordered().title(title));
        lines.extend(render_lines(table, width, height));
    }
    lines
}

fn print_lines(lines: &[String]) {
    let mut out = io::stdout().lock();
    for line in lines {
        let _ = writeln!(out, "{line}");
    }
}

pub fn print_library(view: &LibraryView) {
    let title = if view.filtered {
        "Offline Songs (Filtered)"
    } else {
        "Offline Songs (Sorted)"
    };
    let rows = library_rows(view).into_iter().map(Vec::from).collect();
    let lines = table_lines(
        title,
        &["Index", "Title", "Size (MB)"],
        rows,
        &[Constraint::Length(5), Constraint::Fill(1), Constraint::Length(9)],
    );
    print_lines(&lines);
}

pub fn print_search_results(hits: &[TrackRecord]) {
    let rows = hits
        .iter()
        .enumerate()
        .map(|(i, t)| vec![(i + 1).to_string(), t.title.clone()])
        .collect();
    let lines = table_lines(
        "Search Results",
        &["Index", "Title"],
        rows,
        &[Constraint::Length(5), Constraint::Fill(1)],
    );
    print_lines(&lines);
}

pub fn print_top_played(top: &[PlayCount], n: usize) {
    let rows = top
        .iter()
        .enumerate()
        .map(|(i, p)| vec![(i + 1).to_string(), p.title.clone(), p.count.to_string()])
        .collect();
    let lines = table_lines(
        &format!("Top {n} Most Played Songs"),
        &["Rank", "Title", "Plays"],
        rows,
        &[Constraint::Length(4), Constraint::Fill(1), Constraint::Length(5)],
    );
    print_lines(&lines);
}

pub fn print_history(history: &[String]) {
    if history.is_empty() {
        warn("No play history yet.");
        return;
    }
    println!("{}", "Play History:".yellow().bold());
    print_lines(&history_lines(history));
}

pub fn print_menu() {
    println!();
    for (i, item) in MENU.iter().enumerate() {
        println!("{} {item}", format!("{}.", i + 1).cyan().bold());
    }
}

pub fn success(msg: &str) {
    println!("{}", msg.green().bold());
}

pub fn warn(msg: &str) {
    println!("{}", msg.yellow().bold());
}

pub fn error(msg: &str) {
    println!("{}", msg.red().bold());
}

pub fn now_playing(title: &str) {
    println!("{} {title}", "Now Playing:".blue().bold());
}

/// Ask a question on stdout and read one line from stdin.
///
/// An empty answer yields `default`. End of input is an error so callers
/// looping on prompts stop instead of spinning.
pub fn prompt(question: &str, default: &str) -> io::Result<String> {
    let mut out = io::stdout().lock();
    if default.is_empty() {
        write!(out, "{} ", format!("{question}:").bold())?;
    } else {
        write!(out, "{} {} ", question.bold(), format!("({default}):").cyan())?;
    }
    out.flush()?;
    drop(out);

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    let answer = line.trim_end_matches(['\r', '\n']);
    if answer.trim().is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer.to_string())
    }
}
