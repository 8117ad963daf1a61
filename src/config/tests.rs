use super::load::{default_config_path, default_log_path, resolve_config_path};
use super::schema::*;
use crate::view::Region;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_songbar_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("SONGBAR_CONFIG_PATH", "/tmp/songbar-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/songbar-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("songbar")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("songbar")
            .join("config.toml")
    );
}

#[test]
fn default_log_path_uses_xdg_state_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_STATE_HOME", "/tmp/xdg-state");

    assert_eq!(
        default_log_path(),
        std::path::PathBuf::from("/tmp/xdg-state")
            .join("songbar")
            .join("songbar.log")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
quit_fade_out_ms = 123
initial_volume = 0.4

[controls]
volume_step = 0.1

[ui]
header_text = "hello"
footer_regions = ["song-name", "total"]
default_poster = "img/none.png"

[playlist]
path = "/srv/music/songs.json"

[logging]
level = "warning"
file = "/tmp/songbar.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SONGBAR_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("SONGBAR__AUDIO__INITIAL_VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.quit_fade_out_ms, 123);
    assert_eq!(s.audio.initial_volume, 0.4);
    assert_eq!(s.controls.volume_step, 0.1);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.footer_regions, vec![Region::SongName, Region::Total]);
    assert_eq!(s.ui.default_poster, "img/none.png");
    assert_eq!(s.playlist.path, "/srv/music/songs.json");
    assert_eq!(s.logging.level, LogLevelSetting::Warn);
    assert_eq!(s.logging.file.as_deref(), Some("/tmp/songbar.log"));
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
quit_fade_out_ms = 250
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SONGBAR_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("SONGBAR__AUDIO__QUIT_FADE_OUT_MS", "0");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.quit_fade_out_ms, 0);
}

#[test]
fn partial_toml_keeps_struct_defaults() {
    let s: Settings = toml::from_str("[controls]\nvolume_step = 0.2\n").unwrap();
    assert_eq!(s.controls.volume_step, 0.2);
    assert_eq!(s.audio.initial_volume, 1.0);
    assert_eq!(s.playlist.path, "songs.json");
    assert_eq!(s.ui.footer_regions.len(), 4);
    assert_eq!(s.logging.level, LogLevelSetting::Info);
}

#[test]
fn validate_rejects_out_of_range_volume_settings() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.audio.initial_volume = 1.5;
    assert!(s.validate().is_err());

    s.audio.initial_volume = 0.5;
    s.controls.volume_step = 0.0;
    assert!(s.validate().is_err());

    s.controls.volume_step = 0.1;
    s.playlist.path = "  ".to_string();
    assert!(s.validate().is_err());
}
