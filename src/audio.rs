//! Audio output: the `OutputHandle` abstraction and its rodio implementation.
//!
//! The rodio side runs on a dedicated thread fed by a command channel and
//! reporting back through an event channel.

mod player;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::*;
