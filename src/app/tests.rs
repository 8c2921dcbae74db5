use super::*;
use std::path::PathBuf;

use crate::library::Track;

fn tracks(n: usize) -> Vec<Track> {
    (0..n)
        .map(|i| Track {
            path: PathBuf::from(format!("/tmp/{i}.mp3")),
            title: format!("Track {i}"),
            artist: None,
            album: None,
            duration: None,
            display: format!("Track {i}"),
        })
        .collect()
}

#[test]
fn selection_wraps_forward_and_backward() {
    let mut app = App::new(tracks(3));
    assert_eq!(app.selected, 0);

    app.select_next();
    app.select_next();
    assert_eq!(app.selected, 2);
    app.select_next();
    assert_eq!(app.selected, 0);

    app.select_prev();
    assert_eq!(app.selected, 2);
}

#[test]
fn selection_is_inert_without_tracks() {
    let mut app = App::new(Vec::new());
    assert!(!app.has_tracks());

    app.select_next();
    app.select_prev();
    app.set_selected(3);
    assert_eq!(app.selected, 0);
}

#[test]
fn set_selected_rejects_out_of_bounds() {
    let mut app = App::new(tracks(2));
    app.set_selected(1);
    assert_eq!(app.selected, 1);
    app.set_selected(5);
    assert_eq!(app.selected, 1);
}

#[test]
fn message_is_visible_until_cleared() {
    let mut app = App::new(tracks(1));
    assert!(app.message().is_none());

    app.set_message("All tracks have been played, starting over");
    assert_eq!(
        app.message(),
        Some("All tracks have been played, starting over")
    );

    app.clear_message();
    assert!(app.message().is_none());
}

#[test]
fn toggle_shuffle_flips_flag() {
    let mut app = App::new(tracks(1));
    assert!(!app.shuffle);
    app.toggle_shuffle();
    assert!(app.shuffle);
    app.toggle_shuffle();
    assert!(!app.shuffle);
}
