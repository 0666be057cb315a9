use crate::config;

/// Settings for this launch. A bad or unreadable config file never stops the
/// player; it starts on defaults and says why on stderr before the TUI opens.
pub fn load_settings() -> config::Settings {
    let (settings, problem) = usable(config::Settings::load());
    if let Some(problem) = problem {
        eprintln!("reprise: {problem}, using defaults");
    }
    settings
}

/// Settings the controller can run with, plus the reason when defaults
/// had to stand in.
fn usable(
    loaded: Result<config::Settings, ::config::ConfigError>,
) -> (config::Settings, Option<String>) {
    match loaded {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(msg) => (
                config::Settings::default(),
                Some(format!("invalid config: {msg}")),
            ),
        },
        Err(e) => (
            config::Settings::default(),
            Some(format!("failed to load config: {e}")),
        ),
    }
}
