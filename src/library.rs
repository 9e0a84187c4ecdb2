//! Library scanning: walks a music directory into a flat catalog of tracks.
//!
//! The scanner is read-only and keeps no cache; every call walks the disk again.

mod model;
mod scan;

pub use model::*;
pub use scan::*;
