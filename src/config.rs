//! Configuration loader and schema types.
//!
//! Settings come from an optional TOML file plus environment overrides
//! and drive library scanning, playback defaults, key behavior and
//! logging.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
