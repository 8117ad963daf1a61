//! Media-key and `playerctl` integration over the MPRIS D-Bus interface.
//!
//! The service thread only forwards transport calls as [`ControlCmd`]s and
//! serves a snapshot the event loop publishes through [`MprisHandle`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc::Sender};

use async_io::block_on;
use zbus::{connection, interface};
use zvariant::{ObjectPath, OwnedValue, Value};

use crate::app::PlaybackState;
use crate::playlist::Track;

const BUS_NAME: &str = "org.mpris.MediaPlayer2.songbar";
const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
}

/// What the bus sees of the player.
#[derive(Debug, Default)]
struct SharedState {
    playback: PlaybackState,
    has_tracks: bool,
    title: Option<String>,
    art_url: Option<String>,
    url: Option<String>,
    track_id: Option<String>,
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    pub fn set_playback(&self, playback: PlaybackState) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
    }

    /// Transport capabilities are only advertised for a non-empty playlist.
    pub fn set_has_tracks(&self, has_tracks: bool) {
        if let Ok(mut s) = self.state.lock() {
            s.has_tracks = has_tracks;
        }
    }

    /// Publish the track at `index`, or clear the metadata when `None`.
    pub fn set_track_metadata(&self, now_playing: Option<(usize, &Track)>, default_poster: &str) {
        let Ok(mut s) = self.state.lock() else {
            return;
        };
        let published = now_playing.map(|(index, track)| {
            (
                track.display_name().to_string(),
                to_url(track.poster_or(default_poster)),
                to_url(&track.audio),
                format!("{OBJECT_PATH}/track/{index}"),
            )
        });
        match published {
            Some((title, art_url, url, track_id)) => {
                s.title = Some(title);
                s.art_url = Some(art_url);
                s.url = Some(url);
                s.track_id = Some(track_id);
            }
            None => {
                s.title = None;
                s.art_url = None;
                s.url = None;
                s.track_id = None;
            }
        }
    }
}

/// Local paths become `file://` URLs; anything with a scheme is kept.
fn to_url(reference: &str) -> String {
    if reference.contains("://") {
        reference.to_string()
    } else {
        format!("file://{reference}")
    }
}

fn forward(tx: &Sender<ControlCmd>, cmd: ControlCmd) {
    if let Err(e) = tx.send(cmd) {
        log::debug!("MPRIS: event loop is gone, dropping {:?}", e.0);
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn quit(&self) {
        forward(&self.tx, ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "songbar"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["file".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        ["audio/mpeg", "audio/ogg", "audio/flac", "audio/wav"]
            .map(String::from)
            .to_vec()
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

impl PlayerIface {
    fn has_tracks(&self) -> bool {
        self.state.lock().map(|s| s.has_tracks).unwrap_or(false)
    }
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        forward(&self.tx, ControlCmd::Next);
    }

    fn previous(&self) {
        forward(&self.tx, ControlCmd::Prev);
    }

    fn play(&self) {
        forward(&self.tx, ControlCmd::Play);
    }

    fn pause(&self) {
        forward(&self.tx, ControlCmd::Pause);
    }

    fn play_pause(&self) {
        forward(&self.tx, ControlCmd::PlayPause);
    }

    fn stop(&self) {
        forward(&self.tx, ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let playback = self.state.lock().map(|s| s.playback).unwrap_or_default();
        match playback {
            PlaybackState::Stopped => "Stopped",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
        }
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        self.has_tracks()
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        self.has_tracks()
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        self.has_tracks()
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        self.has_tracks()
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let Ok(s) = self.state.lock() else {
            return HashMap::new();
        };

        let track_id = s
            .track_id
            .as_deref()
            .and_then(|id| ObjectPath::try_from(id).ok())
            .map(Value::from);
        let entries = [
            ("mpris:trackid", track_id),
            ("xesam:title", s.title.as_deref().map(Value::from)),
            ("mpris:artUrl", s.art_url.as_deref().map(Value::from)),
            ("xesam:url", s.url.as_deref().map(Value::from)),
        ];

        entries
            .into_iter()
            .filter_map(|(key, value)| {
                let value = OwnedValue::try_from(value?).ok()?;
                Some((key.to_string(), value))
            })
            .collect()
    }
}

async fn serve(tx: Sender<ControlCmd>, state: Arc<Mutex<SharedState>>) -> zbus::Result<()> {
    let _connection = connection::Builder::session()?
        .name(BUS_NAME)?
        .serve_at(OBJECT_PATH, RootIface { tx: tx.clone() })?
        .serve_at(OBJECT_PATH, PlayerIface { tx, state })?
        .build()
        .await?;
    log::info!("MPRIS: serving {BUS_NAME}");

    // The connection handles calls in the background while it is alive.
    std::future::pending::<()>().await;
    Ok(())
}

/// Start the MPRIS service on its own thread. Without a session bus the
/// player keeps working; only the integration is missing.
pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let served = state.clone();
    std::thread::spawn(move || {
        if let Err(e) = block_on(serve(tx, served)) {
            log::warn!("MPRIS unavailable: {e}");
        }
    });

    MprisHandle { state }
}

#[cfg(test)]
mod tests;
