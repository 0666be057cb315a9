//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the player screen using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{Notice, NoticeLength, Screen, Selection};
use crate::config::{ControlsSettings, UiSettings};
use crate::library::Library;

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("s".to_string(), "scan library".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("h/l".to_string(), "prev/next song".to_string());
    // H/L is filled dynamically from config.
    map.insert("enter".to_string(), "commit seek".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating the seek step.
fn controls_text(seek_seconds: u64) -> String {
    let order = ["s", "space/p", "h/l", "H/L", "enter", "q"];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] seek -/+{}s", seek_seconds))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Visible window `(start, end, selected_in_window)` that keeps the
/// selected row centered when the list is taller than the area.
fn list_window(total: usize, height: usize, selected: usize) -> (usize, usize, usize) {
    if total <= height || height == 0 {
        return (0, total, selected);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, selected - start)
}

fn bordered(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Everything one frame needs.
pub struct View<'a> {
    pub screen: &'a Screen,
    pub library: &'a Library,
    pub selection: Selection,
    /// Consent question waiting for an answer.
    pub prompt: Option<&'a str>,
    pub notice: Option<&'a Notice>,
}

/// Render the screen. Returns the area of the progress bar for mouse seeking.
pub fn draw(
    frame: &mut Frame,
    view: &View<'_>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" reprise ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status = Paragraph::new(view.screen.status.as_str())
        .block(bordered(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    let title = Paragraph::new(view.screen.song_title.as_str())
        .bold()
        .block(bordered(" now playing "))
        .wrap(Wrap { trim: true });
    frame.render_widget(title, chunks[2]);

    // Track list, only building items for the visible window.
    {
        let entries = view.library.entries();
        let list_height = chunks[3].height.saturating_sub(2) as usize;
        let selected = view.selection.index().unwrap_or(0);
        let (start, end, selected_in_window) = list_window(entries.len(), list_height, selected);

        let items: Vec<ListItem> = entries[start..end]
            .iter()
            .map(|entry| ListItem::new(entry.name.as_str()))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if view.selection.index().is_some() && !entries.is_empty() {
            state.select(Some(selected_in_window));
        }
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    let progress_area = chunks[4];
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" position "))
        .gauge_style(Style::default().add_modifier(Modifier::BOLD))
        .ratio(view.screen.progress_ratio().clamp(0.0, 1.0))
        .label(format!(
            "{} / {}",
            view.screen.current_time, view.screen.total_time
        ));
    frame.render_widget(gauge, progress_area);

    let buttons = Paragraph::new(format!(
        "[h] Previous    [space] {}    [l] Next",
        view.screen.play_button
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(buttons, chunks[5]);

    let footer = Paragraph::new(controls_text(controls_settings.seek_step_seconds))
        .block(bordered(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[6]);

    if let Some(prompt) = view.prompt {
        let popup_area = centered_rect_sized(60, 8, chunks[3]);
        frame.render_widget(Clear, popup_area);
        let popup = Paragraph::new(prompt)
            .alignment(Alignment::Center)
            .block(bordered(" permission "))
            .wrap(Wrap { trim: true });
        frame.render_widget(popup, popup_area);
    }

    if let Some(notice) = view.notice {
        let area = frame.area();
        let width = (notice.text.chars().count() as u16).saturating_add(4);
        let notice_area = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(4),
            width: width.min(area.width),
            height: 3.min(area.height),
        };
        frame.render_widget(Clear, notice_area);
        let text = Paragraph::new(notice.text.as_str())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        let text = match notice.length {
            NoticeLength::Short => text,
            NoticeLength::Long => text.bold(),
        };
        frame.render_widget(text, notice_area);
    }

    progress_area
}
