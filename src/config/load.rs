use std::{env, path::PathBuf};

use super::schema::Settings;

impl Settings {
    /// Build the player settings. Precedence is `REPRISE__SECTION__KEY`
    /// variables, then `config.toml` (a missing file is fine), then the
    /// section defaults. Problems with values are left to [`Settings::validate`].
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("REPRISE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Reject values the controller cannot run with: a zero poll interval
    /// or an extension list that matches no file.
    pub fn validate(&self) -> Result<(), String> {
        if self.playback.poll_interval_ms == 0 {
            return Err("playback.poll_interval_ms must be >= 1".to_string());
        }
        if self
            .library
            .extensions
            .iter()
            .all(|e| e.trim().trim_start_matches('.').is_empty())
        {
            return Err("library.extensions must name at least one extension".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `REPRISE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("REPRISE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/reprise/config.toml`
/// or `~/.config/reprise/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("reprise").join("config.toml"))
}

/// Compute the default log directory under `$XDG_STATE_HOME/reprise`
/// or `~/.local/state/reprise`.
pub fn default_log_dir() -> Option<PathBuf> {
    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
    };

    state_home.map(|d| d.join("reprise"))
}
