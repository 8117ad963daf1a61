use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::sink::{create_sink, probe_duration};
use super::types::{AudioCmd, MediaEvent, PlayTicket, PlaybackError, Stamped};

/// How often progress is reported and end-of-track is checked.
const TICK: Duration = Duration::from_millis(200);

/// Everything the audio thread owns between commands.
struct Deck {
    stream: Option<OutputStream>,
    source: Option<PathBuf>,
    sink: Option<Sink>,
    volume: f32,
    ended_sent: bool,
    generation: u64,
    events: Sender<Stamped>,
}

impl Deck {
    fn emit(&self, event: MediaEvent) {
        // The receiver only goes away on shutdown.
        let _ = self.events.send((self.generation, event));
    }

    /// Build a fresh paused sink for the current source and announce its duration.
    fn load(&mut self) -> Result<(), PlaybackError> {
        let path = self.source.clone().ok_or(PlaybackError::NoSource)?;
        let stream = self.stream.as_ref().ok_or(PlaybackError::NoDevice)?;

        if let Some(old) = self.sink.take() {
            old.stop();
        }

        let (sink, decoded_total) = create_sink(stream, &path, self.volume)?;
        self.sink = Some(sink);
        self.ended_sent = false;

        if let Some(total) = probe_duration(&path).or(decoded_total) {
            self.emit(MediaEvent::MetadataReady(total));
        }
        Ok(())
    }

    fn set_source(&mut self, path: PathBuf, generation: u64) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.generation = generation;
        self.source = Some(path);
        self.ended_sent = false;
        // Preload so metadata is known before playback starts. Failures are
        // reported again when playback is requested.
        if let Err(e) = self.load() {
            log::debug!("preload failed: {e}");
        }
    }

    fn play(&mut self, ticket: PlayTicket) {
        let needs_load = match self.sink.as_ref() {
            None => true,
            // Playing a finished source starts it over.
            Some(s) => s.empty(),
        };

        let result = if needs_load { self.load() } else { Ok(()) };
        if result.is_ok() {
            if let Some(s) = self.sink.as_ref() {
                s.play();
            }
        }
        self.emit(MediaEvent::PlayResolved { ticket, result });
    }

    fn seek_to_zero(&mut self) {
        let rewound = match self.sink.as_ref() {
            Some(s) if !s.empty() => s.try_seek(Duration::ZERO).is_ok(),
            _ => false,
        };

        if !rewound && self.source.is_some() {
            let was_paused = self.sink.as_ref().map_or(true, |s| s.is_paused());
            match self.load() {
                Ok(()) => {
                    if !was_paused {
                        if let Some(s) = self.sink.as_ref() {
                            s.play();
                        }
                    }
                }
                Err(e) => log::warn!("rewind failed: {e}"),
            }
        }
        self.ended_sent = false;
        self.emit(MediaEvent::TimeProgress(Duration::ZERO));
    }

    fn tick(&mut self) {
        let Some(s) = self.sink.as_ref() else {
            return;
        };
        if s.is_paused() {
            return;
        }
        if s.empty() {
            if !self.ended_sent {
                self.ended_sent = true;
                self.emit(MediaEvent::Ended);
            }
        } else {
            self.emit(MediaEvent::TimeProgress(s.get_pos()));
        }
    }
}

fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<Stamped>,
    volume: f32,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
                // but noisy for a TUI app.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                log::error!("no audio output device: {e}");
                None
            }
        };

        let mut deck = Deck {
            stream,
            source: None,
            sink: None,
            volume,
            ended_sent: false,
            generation: 0,
            events,
        };

        loop {
            match rx.recv_timeout(TICK) {
                Ok(cmd) => match cmd {
                    AudioCmd::SetSource { path, generation } => deck.set_source(path, generation),
                    AudioCmd::Play(ticket) => deck.play(ticket),
                    AudioCmd::Pause => {
                        if let Some(s) = deck.sink.as_ref() {
                            s.pause();
                        }
                    }
                    AudioCmd::SeekToZero => deck.seek_to_zero(),
                    AudioCmd::SetVolume(v) => {
                        deck.volume = v;
                        if let Some(s) = deck.sink.as_ref() {
                            s.set_volume(v);
                        }
                    }
                    AudioCmd::Quit { fade_out_ms } => {
                        if let Some(s) = deck.sink.as_ref() {
                            if !s.is_paused() {
                                fade_out_sink(s, deck.volume, fade_out_ms);
                            }
                            s.stop();
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => deck.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
