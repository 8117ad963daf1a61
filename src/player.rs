//! Playback controller: track selection, transport operations and the
//! translation of output notifications into footer updates.

mod controller;

pub use controller::*;
