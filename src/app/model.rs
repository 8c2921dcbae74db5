//! The `App` model: current library, list selection, playback flags and
//! the transient status message.

use std::time::{Duration, Instant};

use crate::library::Track;
use crate::player::PlaybackHandle;

/// How long a transient status message stays visible.
const MESSAGE_TTL: Duration = Duration::from_secs(4);

/// The playback state of the application.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// The main application model.
pub struct App {
    pub tracks: Vec<Track>,
    /// List cursor; each row is tagged with its track index so selecting
    /// a row maps straight back to the track list.
    pub selected: usize,
    pub playback: PlaybackState,
    pub playback_handle: Option<PlaybackHandle>,
    pub shuffle: bool,
    pub current_dir: Option<String>,
    message: Option<(String, Instant)>,
}

impl App {
    /// Create a new `App` with the provided list of `tracks`.
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            selected: 0,
            playback: PlaybackState::Stopped,
            playback_handle: None,
            shuffle: false,
            current_dir: None,
            message: None,
        }
    }

    /// Attach a `PlaybackHandle` used to observe playback progress.
    pub fn set_playback_handle(&mut self, h: PlaybackHandle) {
        self.playback_handle = Some(h);
    }

    /// Record the scanned directory in the app state.
    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
    }

    pub fn set_selected(&mut self, idx: usize) {
        if idx < self.tracks.len() {
            self.selected = idx;
        }
    }

    /// Move the cursor to the next row, wrapping at the end.
    pub fn select_next(&mut self) {
        if !self.tracks.is_empty() {
            self.selected = (self.selected + 1) % self.tracks.len();
        }
    }

    /// Move the cursor to the previous row, wrapping at the start.
    pub fn select_prev(&mut self) {
        if !self.tracks.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.tracks.len() - 1);
        }
    }

    /// Show a transient message (the toast analog) in the status box.
    pub fn set_message(&mut self, text: impl Into<String>) {
        self.message = Some((text.into(), Instant::now()));
    }

    /// The current transient message, if it has not expired yet.
    pub fn message(&self) -> Option<&str> {
        match &self.message {
            Some((text, since)) if since.elapsed() < MESSAGE_TTL => Some(text),
            _ => None,
        }
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }
}
