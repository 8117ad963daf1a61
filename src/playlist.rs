//! Playlist descriptor loading.
//!
//! A playlist is a JSON array of `{ "songName", "audio", "poster" }` records
//! loaded once at startup.

mod load;
mod model;

pub use load::{LoadError, load_playlist};
pub use model::*;
