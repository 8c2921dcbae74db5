//! Track library: scanning local storage and building display rows.
//!
//! A [`Track`] is immutable once scanned; its `path` is the locator the
//! playback backend resolves, and `display` is the precomposed row text
//! shown by the track list.

mod display;
mod model;
mod scan;

pub use display::display_from_fields;
pub use model::Track;
pub use scan::scan;
