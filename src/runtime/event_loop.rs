use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config;
use crate::runtime::DesktopApp;
use crate::runtime::notices::NoticeBoard;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    pub notices: NoticeBoard,
    /// Time of the last keyboard seek step; the drag commits once it is old enough.
    pub last_seek_key: Option<Instant>,
    /// A mouse drag on the progress bar is in progress.
    pub mouse_drag: bool,
    /// Where the progress bar was last drawn, for mouse hit-testing.
    pub progress_area: Rect,
}

impl EventLoopState {
    pub fn new(settings: &config::Settings) -> Self {
        Self {
            notices: NoticeBoard::new(&settings.ui),
            last_seek_key: None,
            mouse_drag: false,
            progress_area: Rect::default(),
        }
    }
}

/// Main terminal event loop: drives the controller clock, draws the screen
/// and turns input into controller operations. Returns `Ok(())` on quit.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut DesktopApp,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let commit_after = Duration::from_millis(settings.controls.seek_commit_ms);

    loop {
        let now = Instant::now();
        app.poll_events(now);

        if let Some(last) = state.last_seek_key {
            if app.is_dragging() && now.duration_since(last) >= commit_after {
                app.end_seek_drag();
                state.last_seek_key = None;
            }
        }

        while let Some(notice) = app.take_notice() {
            state.notices.push(notice);
        }
        state.notices.tick(now);

        let prompt = app.access().pending_prompt().map(|permissions| {
            let names: Vec<String> = permissions.iter().map(ToString::to_string).collect();
            format!(
                "Allow reprise to read {}?\n({})\n\n[y] allow   [n] deny",
                app.access().root().display(),
                names.join(", ")
            )
        });
        let view = ui::View {
            screen: app.screen(),
            library: app.library(),
            selection: app.selection(),
            prompt: prompt.as_deref(),
            notice: state.notices.current(),
        };
        let mut progress_area = state.progress_area;
        terminal.draw(|f| {
            progress_area = ui::draw(f, &view, &settings.ui, &settings.controls);
        })?;
        state.progress_area = progress_area;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(key, settings, app, state) {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, app, state),
                _ => {}
            }
        }
    }

    Ok(())
}

/// Returns true when the user asked to quit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut DesktopApp,
    state: &mut EventLoopState,
) -> bool {
    if app.access().pending_prompt().is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.access_mut().answer_prompt(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.access_mut().answer_prompt(false)
            }
            KeyCode::Char('q') => return true,
            _ => {}
        }
        return false;
    }

    let step_ms = settings.controls.seek_step_seconds.saturating_mul(1000);
    let step_ms = i64::try_from(step_ms).unwrap_or(i64::MAX);

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('s') => {
            app.ensure_access();
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => app.toggle_play_pause(),
        KeyCode::Char('l') | KeyCode::Char('n') => app.next(),
        KeyCode::Char('h') | KeyCode::Char('b') => app.previous(),
        KeyCode::Char('L') | KeyCode::Right => nudge_seek(app, state, step_ms),
        KeyCode::Char('H') | KeyCode::Left => nudge_seek(app, state, -step_ms),
        KeyCode::Enter => {
            if app.is_dragging() {
                app.end_seek_drag();
                state.last_seek_key = None;
            }
        }
        _ => {}
    }

    false
}

/// Keyboard drag: the first step grabs the handle, later steps move it.
fn nudge_seek(app: &mut DesktopApp, state: &mut EventLoopState, delta_ms: i64) {
    if !app.has_session() {
        return;
    }
    if !app.is_dragging() {
        app.begin_seek_drag();
    }
    let target = app.screen().seek_position.saturating_add_signed(delta_ms);
    app.drag_seek_to(target);
    state.last_seek_key = Some(Instant::now());
}

fn handle_mouse_event(mouse: MouseEvent, app: &mut DesktopApp, state: &mut EventLoopState) {
    let area = state.progress_area;
    let seek_max = app.screen().seek_max;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left)
            if app.has_session() && area.contains(Position::new(mouse.column, mouse.row)) =>
        {
            state.mouse_drag = true;
            state.last_seek_key = None;
            app.begin_seek_drag();
            app.drag_seek_to(position_at(area, mouse.column, seek_max));
        }
        MouseEventKind::Drag(MouseButton::Left) if state.mouse_drag => {
            app.drag_seek_to(position_at(area, mouse.column, seek_max));
        }
        MouseEventKind::Up(MouseButton::Left) if state.mouse_drag => {
            state.mouse_drag = false;
            app.end_seek_drag();
        }
        _ => {}
    }
}

/// Map a column inside the bordered progress bar to a track position.
fn position_at(area: Rect, column: u16, seek_max: u64) -> u64 {
    let inner_start = area.x.saturating_add(1);
    let inner_width = u64::from(area.width.saturating_sub(2).max(1));
    let offset = u64::from(column.saturating_sub(inner_start)).min(inner_width);
    let position = u128::from(seek_max) * u128::from(offset) / u128::from(inner_width);
    u64::try_from(position).unwrap_or(seek_max)
}

#[cfg(test)]
mod tests {
    use super::position_at;
    use ratatui::layout::Rect;

    #[test]
    fn position_at_maps_bar_columns_onto_track_range() {
        // Border at x=10 and x=21, ten inner columns 11..=20.
        let area = Rect::new(10, 5, 12, 3);
        assert_eq!(position_at(area, 11, 100_000), 0);
        assert_eq!(position_at(area, 16, 100_000), 50_000);
        assert_eq!(position_at(area, 21, 100_000), 100_000);
        assert_eq!(position_at(area, 0, 100_000), 0);
        assert_eq!(position_at(area, 200, 100_000), 100_000);
    }

    #[test]
    fn position_at_handles_degenerate_bars() {
        assert_eq!(position_at(Rect::new(0, 0, 0, 0), 3, 60_000), 60_000);
        assert_eq!(position_at(Rect::new(0, 0, 12, 3), 5, 0), 0);
    }
}
