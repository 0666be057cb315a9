use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/reprise/config.toml` or `~/.config/reprise/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `REPRISE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub access: AccessSettings,
    pub playback: PlaybackSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory the media index is built from.
    pub root: PathBuf,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Directory names whose contents are audio but not music
    /// (ringtones, alarms...). Matched case-insensitively.
    pub exclude_dirs: Vec<String>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            root: default_music_dir(),
            extensions: vec![
                "mp3".into(),
                "flac".into(),
                "wav".into(),
                "ogg".into(),
                "m4a".into(),
            ],
            follow_links: true,
            include_hidden: false,
            exclude_dirs: vec![
                "Ringtones".into(),
                "Alarms".into(),
                "Notifications".into(),
                "Podcasts".into(),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AccessSettings {
    /// Platform level used to decide which permission guards the library.
    /// Levels >= 33 use the narrow audio-read permission.
    pub platform_level: u32,
    /// Ask for consent in the screen before the first scan of each launch.
    pub prompt: bool,
}

impl Default for AccessSettings {
    fn default() -> Self {
        Self {
            platform_level: 33,
            prompt: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Interval between position samples while playing (milliseconds).
    pub poll_interval_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds one `H` / `L` press moves the seek handle.
    pub seek_step_seconds: u64,
    /// Keyboard seek drags are committed after this much inactivity (milliseconds).
    pub seek_commit_ms: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            seek_step_seconds: 5,
            seek_commit_ms: 700,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// How long a short notice stays on screen (milliseconds).
    pub short_notice_ms: u64,
    /// How long a long notice stays on screen (milliseconds).
    pub long_notice_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ reprise ~ ".to_string(),
            short_notice_ms: 2000,
            long_notice_ms: 3500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default filter directive; `REPRISE_LOG` takes precedence.
    pub level: String,
    /// Directory for `reprise.log`. Defaults to the XDG state directory.
    pub dir: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

/// `$XDG_MUSIC_DIR`, else `~/Music`, else a relative `Music`.
pub fn default_music_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("XDG_MUSIC_DIR") {
        return PathBuf::from(dir);
    }
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join("Music"),
        None => PathBuf::from("Music"),
    }
}
