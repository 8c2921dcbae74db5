//! segue: a minimal terminal music player.
//!
//! The playback core lives in [`player`]: a session-traversal policy
//! (sequential or shuffle-without-repeat), a controller state machine
//! generic over a [`player::Decoder`] backend, and a single control
//! thread that serializes UI commands and decoder events.

pub mod app;
pub mod config;
pub mod library;
pub mod mpris;
pub mod player;
pub mod runtime;
pub mod ui;
