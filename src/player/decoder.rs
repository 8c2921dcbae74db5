use std::path::Path;
use std::time::Duration;

use super::types::PlayerError;

/// Contract of the external decode/render engine the controller drives.
///
/// Preparation is the only asynchronous step: `prepare_async` returns
/// immediately and the outcome comes back as a
/// [`DecoderEvent`](super::DecoderEvent) on the control channel, tagged
/// with the preparation `generation` the controller handed in. Everything
/// else is synchronous.
pub trait Decoder {
    /// Drop any bound source and return to the idle state. Safe in any
    /// state; abandons an in-flight preparation.
    fn reset(&mut self);

    /// Bind a track locator. Fails with
    /// [`PlayerError::SourceUnavailable`] when it cannot be resolved.
    fn set_source(&mut self, locator: &Path) -> Result<(), PlayerError>;

    /// Begin asynchronous preparation of the bound source.
    fn prepare_async(&mut self, generation: u64);

    /// Start (or resume) rendering the prepared source.
    fn start(&mut self);

    fn pause(&mut self);

    fn seek_to(&mut self, position: Duration);

    /// Elapsed playback time of the current source.
    fn position(&self) -> Duration;

    /// Total duration of the current source, when the backend knows it.
    fn duration(&self) -> Option<Duration>;

    fn is_playing(&self) -> bool;

    /// True once the current source has rendered to its end. Polled by
    /// the control thread; the backend has no completion callback.
    fn finished(&self) -> bool;

    /// Final teardown. No other call is made afterwards.
    fn release(&mut self);
}
