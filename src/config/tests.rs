use super::load::{default_config_path, default_log_dir, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
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
fn resolve_config_path_prefers_reprise_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("REPRISE_CONFIG_PATH", "/tmp/reprise-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/reprise-test-config.toml")
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
            .join("reprise")
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
            .join("reprise")
            .join("config.toml")
    );
}

#[test]
fn default_log_dir_uses_xdg_state_home_then_local_state() {
    let _lock = env_lock();
    {
        let _g1 = EnvGuard::set("XDG_STATE_HOME", "/tmp/xdg-state");
        assert_eq!(
            default_log_dir().unwrap(),
            std::path::PathBuf::from("/tmp/xdg-state/reprise")
        );
    }
    let _g1 = EnvGuard::remove("XDG_STATE_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");
    assert_eq!(
        default_log_dir().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.local/state/reprise")
    );
}

#[test]
fn default_music_dir_prefers_xdg_music_dir() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_MUSIC_DIR", "/tmp/tunes");
    assert_eq!(default_music_dir(), std::path::PathBuf::from("/tmp/tunes"));

    let _g2 = EnvGuard::remove("XDG_MUSIC_DIR");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");
    assert_eq!(
        default_music_dir(),
        std::path::PathBuf::from("/tmp/home-dir/Music")
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
[library]
root = "/srv/music"
extensions = ["mp3"]
include_hidden = true
follow_links = false
exclude_dirs = ["Voice Memos"]

[access]
platform_level = 30
prompt = false

[playback]
poll_interval_ms = 250

[controls]
seek_step_seconds = 9
seek_commit_ms = 1500

[ui]
header_text = "hello"
short_notice_ms = 100
long_notice_ms = 200

[log]
level = "debug"
dir = "/tmp/reprise-logs"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("REPRISE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("REPRISE__PLAYBACK__POLL_INTERVAL_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.library.root, std::path::PathBuf::from("/srv/music"));
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.exclude_dirs, vec!["Voice Memos".to_string()]);
    assert_eq!(s.access.platform_level, 30);
    assert!(!s.access.prompt);
    assert_eq!(s.playback.poll_interval_ms, 250);
    assert_eq!(s.controls.seek_step_seconds, 9);
    assert_eq!(s.controls.seek_commit_ms, 1500);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.short_notice_ms, 100);
    assert_eq!(s.ui.long_notice_ms, 200);
    assert_eq!(s.log.level, "debug");
    assert_eq!(
        s.log.dir,
        Some(std::path::PathBuf::from("/tmp/reprise-logs"))
    );
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
poll_interval_ms = 250
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("REPRISE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("REPRISE__PLAYBACK__POLL_INTERVAL_MS", "500");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.poll_interval_ms, 500);
}

#[test]
fn missing_config_file_yields_defaults() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let _g1 = EnvGuard::set(
        "REPRISE_CONFIG_PATH",
        dir.path().join("absent.toml").to_str().unwrap(),
    );

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.poll_interval_ms, 1000);
    assert_eq!(s.access.platform_level, 33);
    assert!(s.access.prompt);
    assert_eq!(s.ui.short_notice_ms, 2000);
    assert_eq!(s.ui.long_notice_ms, 3500);
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_zero_poll_interval_and_empty_extensions() {
    let mut s = Settings::default();
    s.playback.poll_interval_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.library.extensions = vec![".".into(), "  ".into()];
    assert!(s.validate().is_err());
}
