use std::path::PathBuf;
use std::time::Duration;

/// One entry of the track list. Immutable after scanning; replaced only
/// when the whole list is replaced.
#[derive(Clone, Debug)]
pub struct Track {
    /// Locator resolved by the decoder backend.
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: Option<Duration>,
    /// Precomposed list-row text.
    pub display: String,
}
