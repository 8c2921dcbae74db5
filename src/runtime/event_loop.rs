use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, PlaybackState};
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::{PlayerCmd, PlayerEvent, PlayerHandle};
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Last-known playing index as emitted to MPRIS.
    last_mpris_index: Option<usize>,
    /// Last-known playback state as emitted to MPRIS.
    last_mpris_playback: PlaybackState,
}

/// Main terminal event loop: handles input, UI drawing, sync with the
/// player thread and MPRIS. Returns `Ok(())` when shutdown is requested.
#[allow(clippy::too_many_arguments)]
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &PlayerHandle,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    event_rx: &mpsc::Receiver<PlayerEvent>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = EventLoopState {
        last_mpris_index: None,
        last_mpris_playback: app.playback,
    };

    loop {
        while let Ok(ev) = event_rx.try_recv() {
            handle_player_event(ev, app);
        }

        // Sync playback state from the player thread.
        let mut playback_index_snapshot: Option<usize> = None;
        if let Some(handle) = app.playback_handle.as_ref().cloned() {
            if let Ok(info) = handle.lock() {
                playback_index_snapshot = info.index;
                app.playback = match info.index {
                    Some(_) if info.playing => PlaybackState::Playing,
                    Some(_) => PlaybackState::Paused,
                    None => PlaybackState::Stopped,
                };
            }
        }

        // Keep MPRIS in sync even when playback changes come from
        // auto-advance or media keys.
        if playback_index_snapshot != state.last_mpris_index
            || app.playback != state.last_mpris_playback
        {
            update_mpris(mpris, app);
            state.last_mpris_index = playback_index_snapshot;
            state.last_mpris_playback = app.playback;
        }

        terminal.draw(|f| ui::draw(f, app, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app, player) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, player, control_tx) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn handle_player_event(ev: PlayerEvent, app: &mut App) {
    match ev {
        PlayerEvent::TrackStarted { index, .. } => {
            app.set_selected(index);
            app.clear_message();
        }
        PlayerEvent::CycleCompleted => {
            app.set_message("All tracks have been played, starting over");
        }
        PlayerEvent::PlaybackFailed { index } => {
            let what = app
                .tracks
                .get(index)
                .map(|t| t.display.clone())
                .unwrap_or_else(|| format!("track {index}"));
            app.set_message(format!("Playback failed: {what}"));
        }
        PlayerEvent::Stopped => {}
    }
}

/// Handle one remote MPRIS command. Returns `true` on quit.
fn handle_control_cmd(cmd: ControlCmd, app: &mut App, player: &PlayerHandle) -> bool {
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => match app.playback {
            PlaybackState::Paused => {
                let _ = player.send(PlayerCmd::Resume);
            }
            PlaybackState::Stopped => {
                if app.has_tracks() {
                    let _ = player.send(PlayerCmd::SetIndex(app.selected));
                    let _ = player.send(PlayerCmd::Play);
                }
            }
            PlaybackState::Playing => {}
        },
        ControlCmd::Pause => {
            if app.playback == PlaybackState::Playing {
                let _ = player.send(PlayerCmd::Pause);
            }
        }
        ControlCmd::PlayPause => match app.playback {
            PlaybackState::Stopped => {
                if app.has_tracks() {
                    let _ = player.send(PlayerCmd::SetIndex(app.selected));
                    let _ = player.send(PlayerCmd::Play);
                }
            }
            PlaybackState::Playing => {
                let _ = player.send(PlayerCmd::Pause);
            }
            PlaybackState::Paused => {
                let _ = player.send(PlayerCmd::Resume);
            }
        },
        // There is no dedicated stop; pausing is the closest we offer.
        ControlCmd::Stop => {
            if app.playback == PlaybackState::Playing {
                let _ = player.send(PlayerCmd::Pause);
            }
        }
        ControlCmd::Next => {
            if app.has_tracks() {
                let _ = player.send(PlayerCmd::Next);
            }
        }
        ControlCmd::Prev => {
            if app.has_tracks() {
                let _ = player.send(PlayerCmd::Prev);
            }
        }
    }

    false
}

/// Handle one key press. Returns `true` on quit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &PlayerHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Enter => {
            if app.has_tracks() {
                let _ = player.send(PlayerCmd::SetIndex(app.selected));
                let _ = player.send(PlayerCmd::Play);
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('l') => {
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('h') => {
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('s') => {
            let _ = player.send(PlayerCmd::ToggleShuffle);
            app.toggle_shuffle();
        }
        KeyCode::Char('L') => {
            let secs = settings.controls.seek_seconds.min(i64::MAX as u64) as i64;
            let _ = player.send(PlayerCmd::SeekBy(secs));
        }
        KeyCode::Char('H') => {
            let secs = settings.controls.seek_seconds.min(i64::MAX as u64) as i64;
            let _ = player.send(PlayerCmd::SeekBy(-secs));
        }
        _ => {}
    }

    false
}
