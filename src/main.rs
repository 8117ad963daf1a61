mod app;
mod audio;
mod config;
mod logging;
mod mpris;
mod player;
mod playlist;
mod runtime;
mod ui;
mod view;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
