//! Application model: track list view state shared by the UI and runtime.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
