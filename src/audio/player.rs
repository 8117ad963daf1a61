use std::path::Path;
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, MediaEvent, OutputHandle, PlayTicket, Stamped};

/// Output handle backed by a rodio sink living on its own thread.
///
/// `paused` and `has_source` mirror what the audio thread will be in once it
/// has processed the commands sent so far, so callers can branch on them
/// without waiting.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    events: Receiver<Stamped>,
    join: Mutex<Option<JoinHandle<()>>>,
    next_ticket: u64,
    latest_ticket: Option<PlayTicket>,
    generation: u64,
    paused: bool,
    has_source: bool,
}

impl AudioPlayer {
    pub fn new(initial_volume: f32) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (events_tx, events_rx) = mpsc::channel::<Stamped>();
        let audio_handle = spawn_audio_thread(rx, events_tx, initial_volume);

        Self {
            tx,
            events: events_rx,
            join: Mutex::new(Some(audio_handle)),
            next_ticket: 0,
            latest_ticket: None,
            generation: 0,
            paused: true,
            has_source: false,
        }
    }

    fn send(&self, cmd: AudioCmd) {
        if let Err(e) = self.tx.send(cmd) {
            log::error!("audio thread is gone, dropping {:?}", e.0);
        }
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl OutputHandle for AudioPlayer {
    fn set_source(&mut self, source: &Path) {
        self.has_source = true;
        self.paused = true;
        self.generation += 1;
        self.send(AudioCmd::SetSource {
            path: source.to_path_buf(),
            generation: self.generation,
        });
    }

    fn play(&mut self) -> PlayTicket {
        let ticket = PlayTicket(self.next_ticket);
        self.next_ticket += 1;
        self.latest_ticket = Some(ticket);
        self.paused = false;
        self.send(AudioCmd::Play(ticket));
        ticket
    }

    fn pause(&mut self) {
        self.paused = true;
        self.send(AudioCmd::Pause);
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn has_source(&self) -> bool {
        self.has_source
    }

    fn seek_to_zero(&mut self) {
        self.send(AudioCmd::SeekToZero);
    }

    fn set_volume(&mut self, volume: f32) {
        self.send(AudioCmd::SetVolume(volume));
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        let current = self.generation;
        let events: Vec<MediaEvent> = self
            .events
            .try_iter()
            .filter(|(generation, event)| is_current(current, *generation, event))
            .map(|(_, event)| event)
            .collect();
        for event in &events {
            match event {
                MediaEvent::Ended => self.paused = true,
                MediaEvent::PlayResolved {
                    ticket,
                    result: Err(_),
                } if Some(*ticket) == self.latest_ticket => self.paused = true,
                _ => {}
            }
        }
        events
    }
}

/// Whether an event emitted under `generation` still concerns the loaded source.
///
/// Progress and end-of-track from a replaced sink are dropped. Play
/// resolutions always pass; their tickets identify them.
pub(super) fn is_current(current: u64, generation: u64, event: &MediaEvent) -> bool {
    matches!(event, MediaEvent::PlayResolved { .. }) || generation == current
}
