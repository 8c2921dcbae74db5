//! Playback core: session traversal, controller state machine, decoder seam.
//!
//! All playback state is owned by one control thread (see
//! [`spawn`](PlayerHandle::new)); UI commands and decoder events arrive on a
//! single mpsc channel, so the controller itself never needs locking. The
//! traversal policy lives in [`PlaybackSession`] and is deterministic given
//! the RNG the caller supplies.

mod backend;
mod controller;
mod decoder;
mod handle;
mod session;
mod thread;
mod types;

pub use backend::RodioDecoder;
pub use controller::{Player, PlayerState};
pub use decoder::Decoder;
pub use handle::PlayerHandle;
pub use session::{Advance, PlaybackSession};
pub use types::{
    DecoderEvent, Direction, FocusChange, PlaybackHandle, PlaybackInfo, PlayerCmd, PlayerError,
    PlayerEvent, PlayerMsg, TraversalMode,
};
