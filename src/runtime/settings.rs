use std::path::Path;

use log::warn;

use crate::config::Settings;

/// Load settings, falling back to defaults when the file is unreadable or invalid.
pub fn load_settings(explicit: Option<&Path>) -> Settings {
    match Settings::load(explicit) {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                warn!("invalid config, using defaults: {msg}");
                Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the player from starting.
            warn!("failed to load config, using defaults: {e}");
            Settings::default()
        }
    }
}
