use std::sync::mpsc::Sender;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::library::Track;

use super::decoder::Decoder;
use super::session::{Advance, PlaybackSession};
use super::types::{Direction, FocusChange, PlayerError, PlayerEvent, TraversalMode};

/// Decoder-interaction state.
///
/// `Idle -> Preparing (play_current) -> Playing (on_prepared)
///  -> { Paused (pause) | Idle (completion / decoder error) }`;
/// `release()` moves to `Disposed` from anywhere, terminally.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Preparing,
    Playing,
    Paused,
    Disposed,
}

/// The playback controller: owns the decoder, the track list and the
/// traversal session. Not thread-safe by design; the control thread is
/// its single owner and serializes every call.
pub struct Player<D: Decoder> {
    decoder: D,
    tracks: Vec<Track>,
    session: PlaybackSession,
    state: PlayerState,
    /// Bumped on every decoder reset; preparation outcomes carrying an
    /// older value are stale and must not resurrect playback.
    generation: u64,
    events: Sender<PlayerEvent>,
    rng: StdRng,
}

impl<D: Decoder> Player<D> {
    pub fn new(decoder: D, events: Sender<PlayerEvent>) -> Self {
        Self::with_rng(decoder, events, StdRng::from_os_rng())
    }

    /// Construct with an explicit RNG; tests seed it for deterministic
    /// shuffle draws.
    pub fn with_rng(decoder: D, events: Sender<PlayerEvent>, rng: StdRng) -> Self {
        Self {
            decoder,
            tracks: Vec::new(),
            session: PlaybackSession::new(0),
            state: PlayerState::Idle,
            generation: 0,
            events,
            rng,
        }
    }

    fn ensure_live(&self) -> Result<(), PlayerError> {
        if self.state == PlayerState::Disposed {
            return Err(PlayerError::Disposed);
        }
        Ok(())
    }

    fn reset_decoder(&mut self) {
        self.decoder.reset();
        self.generation += 1;
        self.state = PlayerState::Idle;
    }

    /// Replace the track list. An empty list is accepted; playing from it
    /// fails with `NoTracksAvailable`.
    pub fn set_tracks(&mut self, tracks: Vec<Track>) -> Result<(), PlayerError> {
        self.ensure_live()?;
        self.session.reset_list(tracks.len());
        self.tracks = tracks;
        Ok(())
    }

    /// Set the current index directly (track picked from the list view).
    /// Bounds are enforced at play time, not here.
    pub fn set_index(&mut self, index: usize) -> Result<(), PlayerError> {
        self.ensure_live()?;
        self.session.set_index(index);
        Ok(())
    }

    /// Load the track at the current index and begin asynchronous
    /// preparation. The decoder is reset first so it can be reused across
    /// tracks; the reset also abandons any preparation still in flight.
    pub fn play_current(&mut self) -> Result<(), PlayerError> {
        self.ensure_live()?;
        self.reset_decoder();

        let index = self.session.index();
        let Some(track) = self.tracks.get(index) else {
            return Err(PlayerError::NoTracksAvailable);
        };

        if let Err(e) = self.decoder.set_source(&track.path) {
            warn!(index, path = %track.path.display(), error = %e, "cannot bind source");
            // Decoder stays reset; playback neither starts nor advances.
            let _ = self.events.send(PlayerEvent::PlaybackFailed { index });
            return Err(e);
        }

        self.decoder.prepare_async(self.generation);
        self.state = PlayerState::Preparing;
        Ok(())
    }

    /// Preparation finished: start playback and publish the now-playing
    /// title. Outcomes from an abandoned preparation are dropped.
    pub fn on_prepared(&mut self, generation: u64) -> Result<(), PlayerError> {
        self.ensure_live()?;
        if generation != self.generation || self.state != PlayerState::Preparing {
            debug!(generation, current = self.generation, "dropping stale prepared event");
            return Ok(());
        }

        self.decoder.start();
        self.state = PlayerState::Playing;

        let index = self.session.index();
        let title = self
            .tracks
            .get(index)
            .map(|t| t.title.clone())
            .unwrap_or_default();
        info!(index, %title, "playback started");
        let _ = self.events.send(PlayerEvent::TrackStarted { index, title });
        Ok(())
    }

    /// Preparation failed: reset and stay idle. A decoder fault is a
    /// transient condition requiring explicit user action; no auto-advance.
    pub fn on_decoder_failed(&mut self, generation: u64) -> Result<(), PlayerError> {
        self.ensure_live()?;
        if generation != self.generation {
            debug!(generation, current = self.generation, "dropping stale failure event");
            return Ok(());
        }

        let index = self.session.index();
        warn!(index, "decoder reported an error; resetting");
        self.reset_decoder();
        let _ = self.events.send(PlayerEvent::PlaybackFailed { index });
        Ok(())
    }

    /// The current track ended (or was deliberately ended early). Only a
    /// completion with real progress advances; zero-progress completions
    /// are spurious and ignored.
    pub fn on_completed(&mut self) -> Result<(), PlayerError> {
        self.ensure_live()?;
        if self.decoder.position() == Duration::ZERO {
            debug!("ignoring completion without progress");
            return Ok(());
        }

        self.reset_decoder();
        self.advance(Direction::Next)
    }

    /// Apply the traversal policy and play the resulting track, or stop
    /// on exhaustion.
    pub fn advance(&mut self, direction: Direction) -> Result<(), PlayerError> {
        self.ensure_live()?;
        if self.tracks.is_empty() {
            return Err(PlayerError::NoTracksAvailable);
        }

        match self.session.advance(direction, &mut self.rng) {
            Advance::To(_) => self.play_current(),
            Advance::Exhausted => {
                info!("every track has been played; starting a new cycle");
                self.reset_decoder();
                let _ = self.events.send(PlayerEvent::CycleCompleted);
                Ok(())
            }
        }
    }

    pub fn toggle_shuffle(&mut self) -> Result<TraversalMode, PlayerError> {
        self.ensure_live()?;
        Ok(self.session.toggle_shuffle())
    }

    pub fn pause(&mut self) -> Result<(), PlayerError> {
        self.ensure_live()?;
        if self.state == PlayerState::Playing {
            self.decoder.pause();
            self.state = PlayerState::Paused;
        }
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), PlayerError> {
        self.ensure_live()?;
        if self.state == PlayerState::Paused {
            self.decoder.start();
            self.state = PlayerState::Playing;
        }
        Ok(())
    }

    pub fn seek(&mut self, position: Duration) -> Result<(), PlayerError> {
        self.ensure_live()?;
        self.decoder.seek_to(position);
        Ok(())
    }

    pub fn position(&self) -> Result<Duration, PlayerError> {
        self.ensure_live()?;
        Ok(self.decoder.position())
    }

    pub fn duration(&self) -> Result<Option<Duration>, PlayerError> {
        self.ensure_live()?;
        Ok(self.decoder.duration())
    }

    pub fn is_playing(&self) -> Result<bool, PlayerError> {
        self.ensure_live()?;
        Ok(self.decoder.is_playing())
    }

    /// The host session's focus changed. The original player only ever
    /// surfaced this as a diagnostic; reproduced as a log line, nothing
    /// more.
    pub fn on_focus_change(&mut self, change: FocusChange) -> Result<(), PlayerError> {
        self.ensure_live()?;
        warn!(?change, "audio focus changed");
        Ok(())
    }

    /// Called by the control thread on its tick; turns "the backend ran
    /// out of audio" into a completion.
    pub fn poll_completion(&mut self) -> Result<(), PlayerError> {
        if self.state == PlayerState::Playing && self.decoder.finished() {
            return self.on_completed();
        }
        Ok(())
    }

    /// Terminal teardown. Every later operation fails with `Disposed`.
    pub fn release(&mut self) -> Result<(), PlayerError> {
        self.ensure_live()?;
        self.decoder.release();
        self.state = PlayerState::Disposed;
        let _ = self.events.send(PlayerEvent::Stopped);
        Ok(())
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.session.index()
    }

    /// Index of the active track while one is preparing, playing or
    /// paused.
    pub fn now_playing_index(&self) -> Option<usize> {
        match self.state {
            PlayerState::Preparing | PlayerState::Playing | PlayerState::Paused => {
                Some(self.session.index())
            }
            PlayerState::Idle | PlayerState::Disposed => None,
        }
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    pub fn decoder_mut(&mut self) -> &mut D {
        &mut self.decoder
    }
}
