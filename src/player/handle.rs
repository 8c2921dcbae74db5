use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::library::Track;

use super::thread::spawn_player_thread;
use super::types::{PlaybackHandle, PlaybackInfo, PlayerCmd, PlayerEvent, PlayerMsg};

/// Owner-side handle to the player control thread: a command sender, the
/// shared playback snapshot and the join handle for clean shutdown.
pub struct PlayerHandle {
    tx: Sender<PlayerMsg>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl PlayerHandle {
    /// Spawn the control thread with an initial track list. Returns the
    /// handle plus the receiver for the controller's events
    /// (now-playing, cycle-completed, failures).
    pub fn new(tracks: Vec<Track>, shuffle: bool) -> (Self, Receiver<PlayerEvent>) {
        let (msg_tx, msg_rx) = mpsc::channel::<PlayerMsg>();
        let (event_tx, event_rx) = mpsc::channel::<PlayerEvent>();
        let playback: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let join = spawn_player_thread(
            tracks,
            shuffle,
            msg_tx.clone(),
            msg_rx,
            event_tx,
            playback.clone(),
        );

        (
            Self {
                tx: msg_tx,
                playback,
                join: Mutex::new(Some(join)),
            },
            event_rx,
        )
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }

    pub fn send(&self, cmd: PlayerCmd) -> Result<(), mpsc::SendError<PlayerMsg>> {
        self.tx.send(PlayerMsg::Cmd(cmd))
    }

    /// Release the player and wait for the control thread to finish.
    pub fn quit(&self) {
        let _ = self.send(PlayerCmd::Quit);
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
