use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use crate::library::Track;

use super::backend::RodioDecoder;
use super::controller::Player;
use super::types::{
    DecoderEvent, Direction, PlaybackHandle, PlayerCmd, PlayerError, PlayerEvent, PlayerMsg,
};

/// Tick interval; doubles as the completion-poll period.
const RECV_TIMEOUT: Duration = Duration::from_millis(200);

pub(super) fn spawn_player_thread(
    tracks: Vec<Track>,
    shuffle: bool,
    msg_tx: Sender<PlayerMsg>,
    rx: Receiver<PlayerMsg>,
    events: Sender<PlayerEvent>,
    playback: PlaybackHandle,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let decoder = RodioDecoder::new(msg_tx);
        let mut player = Player::new(decoder, events);
        let _ = player.set_tracks(tracks);
        if shuffle {
            let _ = player.toggle_shuffle();
        }

        loop {
            match rx.recv_timeout(RECV_TIMEOUT) {
                Ok(PlayerMsg::Cmd(cmd)) => {
                    let quitting = matches!(cmd, PlayerCmd::Quit);
                    if let Err(e) = dispatch(&mut player, cmd) {
                        warn!(error = %e, "player command rejected");
                    }
                    publish_info(&player, &playback);
                    if quitting {
                        break;
                    }
                }
                Ok(PlayerMsg::Decoder(ev)) => {
                    let outcome = match ev {
                        DecoderEvent::Prepared { generation } => player.on_prepared(generation),
                        DecoderEvent::Failed { generation } => player.on_decoder_failed(generation),
                    };
                    if let Err(e) = outcome {
                        warn!(error = %e, "decoder event rejected");
                    }
                    publish_info(&player, &playback);
                }
                Err(RecvTimeoutError::Timeout) => {
                    if let Err(e) = player.poll_completion() {
                        warn!(error = %e, "auto-advance failed");
                    }
                    publish_info(&player, &playback);
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

fn dispatch(player: &mut Player<RodioDecoder>, cmd: PlayerCmd) -> Result<(), PlayerError> {
    match cmd {
        PlayerCmd::SetTracks(tracks) => player.set_tracks(tracks),
        PlayerCmd::SetIndex(i) => player.set_index(i),
        PlayerCmd::Play => player.play_current(),
        PlayerCmd::Pause => player.pause(),
        PlayerCmd::Resume => player.resume(),
        PlayerCmd::SeekBy(secs) => {
            let cur = player.position()?;
            let target = if secs >= 0 {
                cur.saturating_add(Duration::from_secs(secs as u64))
            } else {
                cur.saturating_sub(Duration::from_secs(secs.unsigned_abs()))
            };
            player.seek(target)
        }
        PlayerCmd::Next => player.advance(Direction::Next),
        PlayerCmd::Prev => player.advance(Direction::Previous),
        PlayerCmd::ToggleShuffle => player.toggle_shuffle().map(|_| ()),
        PlayerCmd::FocusChanged(change) => player.on_focus_change(change),
        PlayerCmd::Quit => player.release(),
    }
}

fn publish_info(player: &Player<RodioDecoder>, playback: &PlaybackHandle) {
    if let Ok(mut info) = playback.lock() {
        info.index = player.now_playing_index();
        info.elapsed = player.position().unwrap_or(Duration::ZERO);
        info.playing = player.is_playing().unwrap_or(false);
    }
}
