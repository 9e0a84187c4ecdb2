//! Local music library browsing and playback with a per-session play history.
//!
//! A scan of the music directory yields a [`library::Catalog`] that is ranked
//! by [`ranking`], narrowed by [`filter`] and played through a
//! [`session::Session`], which records every play in an
//! [`activity::ActivityTracker`].

pub mod activity;
pub mod cli;
pub mod config;
pub mod filter;
pub mod library;
pub mod playback;
pub mod ranking;
pub mod remote;
pub mod runtime;
pub mod selection;
pub mod session;
pub mod ui;
