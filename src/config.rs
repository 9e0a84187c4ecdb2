//! Configuration loader, schema types and persisted state.
//!
//! `schema` holds the settings read from `config.toml`; `state` holds the small
//! TOML files the player writes itself (library root, play history).

mod load;
mod schema;
mod state;

pub use load::{default_config_path, default_state_dir, resolve_config_path};
pub use schema::*;
pub use state::*;
