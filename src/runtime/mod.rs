use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::access::DirectoryAccess;
use crate::app::App;
use crate::audio::RodioOutput;
use crate::library::DirectoryIndex;

mod event_loop;
mod logging;
mod notices;
mod settings;

/// The controller wired to the desktop platform.
pub type DesktopApp = App<DirectoryAccess, DirectoryIndex, RodioOutput>;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = settings::load_settings();
    if let Some(dir) = env::args().nth(1) {
        settings.library.root = PathBuf::from(dir);
    }

    let _log_guard = logging::init(&settings.log);
    tracing::info!(root = %settings.library.root.display(), "starting");

    let access = DirectoryAccess::new(settings.library.root.clone(), &settings.access);
    let index = DirectoryIndex::new(settings.library.root.clone(), &settings.library);
    let poll_interval = Duration::from_millis(settings.playback.poll_interval_ms);
    let mut app = App::new(access, index, RodioOutput::new(), poll_interval);

    app.ensure_access();

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new(&settings);
        event_loop::run(&mut terminal, &settings, &mut app, &mut state)
    })();

    app.teardown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &run_result {
        tracing::error!(%e, "event loop failed");
    }
    run_result
}
