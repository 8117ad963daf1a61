use std::path::PathBuf;

use log::{Level, LevelFilter};
use thiserror::Error;

use crate::config::{self, LoggingSettings};

/// External crates only need to log warnings and errors
const ALLOWED_EXTERNAL_LEVELS: [Level; 2] = [Level::Warn, Level::Error];

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot open log file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("logger already initialized: {0}")]
    Init(#[from] log::SetLoggerError),
}

/// Where log records go. The terminal belongs to the UI, so always a file.
pub fn log_file_path(settings: &LoggingSettings) -> PathBuf {
    match settings.file.as_deref() {
        Some(p) if !p.trim().is_empty() => PathBuf::from(p),
        _ => config::default_log_path(),
    }
}

fn is_local(target: &str) -> bool {
    target.split("::").next() == Some(env!("CARGO_CRATE_NAME"))
}

pub fn init_logger(settings: &LoggingSettings) -> Result<PathBuf, LoggingError> {
    let path = log_file_path(settings);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| LoggingError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = fern::log_file(&path).map_err(|source| LoggingError::Io {
        path: path.clone(),
        source,
    })?;

    let level = settings.level.to_filter();
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {:<5} {} {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .filter(move |meta| {
            is_local(meta.target()) || ALLOWED_EXTERNAL_LEVELS.contains(&meta.level())
        })
        .chain(file)
        .apply()?;

    if level != LevelFilter::Off {
        log::info!("logging to {}", path.display());
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevelSetting;

    #[test]
    fn configured_file_wins_over_default() {
        let settings = LoggingSettings {
            level: LogLevelSetting::Debug,
            file: Some("/tmp/songbar-test.log".to_string()),
        };
        assert_eq!(
            log_file_path(&settings),
            PathBuf::from("/tmp/songbar-test.log")
        );
    }

    #[test]
    fn blank_file_falls_back_to_default() {
        let settings = LoggingSettings {
            level: LogLevelSetting::Info,
            file: Some("  ".to_string()),
        };
        assert!(log_file_path(&settings).ends_with("songbar/songbar.log"));
    }

    #[test]
    fn only_own_targets_are_local() {
        assert!(is_local("songbar"));
        assert!(is_local("songbar::player::controller"));
        assert!(!is_local("zbus::connection"));
        assert!(!is_local("rodio"));
    }
}
