//! Small types shared across the playback core: commands, events,
//! errors and the shared playback-info handle.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;

use crate::library::Track;

/// Rule deciding which track plays next.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TraversalMode {
    /// Walk the list in order, wrapping at both ends.
    Sequential,
    /// Random pick that never repeats a track until every track has been
    /// presented once.
    Shuffle,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Audio-focus change reported by the host session. The controller only
/// logs these; no pause/duck reaction is implemented.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FocusChange {
    Gained,
    Lost,
    Duck,
}

#[derive(Debug, Error)]
pub enum PlayerError {
    /// The track list is empty, or the current index points past its end.
    #[error("no tracks available")]
    NoTracksAvailable,
    /// The decoder could not resolve a track's locator.
    #[error("source unavailable: {path}")]
    SourceUnavailable { path: PathBuf },
    /// The player was released; no further operation is valid.
    #[error("player has been released")]
    Disposed,
}

/// Commands accepted by the control thread.
#[derive(Debug)]
pub enum PlayerCmd {
    /// Replace the track list; traversal history is cleared.
    SetTracks(Vec<Track>),
    /// Set the current index directly (no bounds check until play time).
    SetIndex(usize),
    /// Load and prepare the track at the current index.
    Play,
    Pause,
    Resume,
    /// Scrub by the given number of seconds (negative = backwards).
    SeekBy(i64),
    /// Advance to the next track per the traversal policy.
    Next,
    /// Go back one track (always sequential, see `PlaybackSession`).
    Prev,
    ToggleShuffle,
    FocusChanged(FocusChange),
    /// Release the player and stop the control thread.
    Quit,
}

/// Outcome of an asynchronous preparation, tagged with the preparation
/// generation so stale outcomes can be discarded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DecoderEvent {
    Prepared { generation: u64 },
    Failed { generation: u64 },
}

/// Everything the control thread receives: commands from the UI and
/// events from the decoder, serialized onto one channel.
#[derive(Debug)]
pub enum PlayerMsg {
    Cmd(PlayerCmd),
    Decoder(DecoderEvent),
}

/// Notifications the controller publishes for the UI / media session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// Playback of a track started; carries the title for the
    /// now-playing surface.
    TrackStarted { index: usize, title: String },
    /// Every track has been presented once; history was cleared and
    /// playback stopped without starting a new track.
    CycleCompleted,
    /// The current track could not be loaded or decoded.
    PlaybackFailed { index: usize },
    /// The player was released; the now-playing surface should clear.
    Stopped,
}

/// Runtime playback information shared with the UI.
#[derive(Debug, Clone, Default)]
pub struct PlaybackInfo {
    /// Index of the active track, if any.
    pub index: Option<usize>,
    /// Elapsed playback time for the current track.
    pub elapsed: Duration,
    /// Whether playback is currently active.
    pub playing: bool,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
