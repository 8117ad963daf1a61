use super::*;
use std::sync::mpsc;

fn make_track() -> Track {
    Track {
        song_name: Some("Test Title".to_string()),
        audio: "/tmp/music/test.mp3".to_string(),
        poster: None,
    }
}

fn make_handle() -> (MprisHandle, Arc<Mutex<SharedState>>) {
    let state = Arc::new(Mutex::new(SharedState::default()));
    (
        MprisHandle {
            state: state.clone(),
        },
        state,
    )
}

#[test]
fn set_track_metadata_sets_and_clears_shared_state() {
    let (handle, state) = make_handle();

    let track = make_track();
    handle.set_track_metadata(Some((7, &track)), "/tmp/default.jpg");

    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("Test Title"));
        assert_eq!(s.url.as_deref(), Some("file:///tmp/music/test.mp3"));
        assert_eq!(s.art_url.as_deref(), Some("file:///tmp/default.jpg"));
        assert_eq!(
            s.track_id.as_deref(),
            Some("/org/mpris/MediaPlayer2/track/7")
        );
    }

    handle.set_track_metadata(None, "/tmp/default.jpg");
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title, None);
        assert_eq!(s.art_url, None);
        assert_eq!(s.url, None);
        assert!(s.track_id.is_none());
    }
}

#[test]
fn remote_references_are_published_unchanged() {
    let (handle, state) = make_handle();
    let track = Track {
        song_name: None,
        audio: "https://example.com/a.mp3".to_string(),
        poster: Some("https://example.com/a.jpg".to_string()),
    };
    handle.set_track_metadata(Some((0, &track)), "unused.jpg");

    let s = state.lock().unwrap();
    assert_eq!(s.title.as_deref(), Some(crate::playlist::UNKNOWN_SONG_NAME));
    assert_eq!(s.url.as_deref(), Some("https://example.com/a.mp3"));
    assert_eq!(s.art_url.as_deref(), Some("https://example.com/a.jpg"));
}

#[test]
fn playback_status_maps_state_to_mpris_strings() {
    let (handle, state) = make_handle();
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    assert_eq!(iface.playback_status(), "Stopped");
    handle.set_playback(PlaybackState::Playing);
    assert_eq!(iface.playback_status(), "Playing");
    handle.set_playback(PlaybackState::Paused);
    assert_eq!(iface.playback_status(), "Paused");
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let (handle, state) = make_handle();
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    assert!(iface.metadata().is_empty());

    handle.set_track_metadata(Some((1, &make_track())), "/tmp/default.jpg");
    let map = iface.metadata();
    for k in ["mpris:trackid", "xesam:title", "xesam:url", "mpris:artUrl"] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}

#[test]
fn transport_methods_forward_control_commands() {
    let (_handle, state) = make_handle();
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    iface.play_pause();
    iface.next();
    iface.previous();
    iface.stop();

    let got: Vec<ControlCmd> = rx.try_iter().collect();
    assert_eq!(
        got,
        vec![
            ControlCmd::PlayPause,
            ControlCmd::Next,
            ControlCmd::Prev,
            ControlCmd::Stop
        ]
    );
}

#[test]
fn transport_capabilities_follow_the_playlist() {
    let (handle, state) = make_handle();
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    assert!(!iface.can_play());
    assert!(!iface.can_go_next());

    handle.set_has_tracks(true);
    assert!(iface.can_play());
    assert!(iface.can_pause());
    assert!(iface.can_go_next());
    assert!(iface.can_go_previous());
}
