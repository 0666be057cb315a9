//! Queue that shows controller notices one at a time.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::app::{Notice, NoticeLength};
use crate::config::UiSettings;

pub struct NoticeBoard {
    queue: VecDeque<Notice>,
    active: Option<(Notice, Instant)>,
    short: Duration,
    long: Duration,
}

impl NoticeBoard {
    pub fn new(ui: &UiSettings) -> Self {
        Self {
            queue: VecDeque::new(),
            active: None,
            short: Duration::from_millis(ui.short_notice_ms),
            long: Duration::from_millis(ui.long_notice_ms),
        }
    }

    pub fn push(&mut self, notice: Notice) {
        self.queue.push_back(notice);
    }

    fn lifetime(&self, length: NoticeLength) -> Duration {
        match length {
            NoticeLength::Short => self.short,
            NoticeLength::Long => self.long,
        }
    }

    /// Expire the shown notice if its time is up and promote the next one.
    pub fn tick(&mut self, now: Instant) {
        if let Some((notice, shown_at)) = &self.active {
            if now.duration_since(*shown_at) >= self.lifetime(notice.length) {
                self.active = None;
            }
        }
        if self.active.is_none() {
            self.active = self.queue.pop_front().map(|n| (n, now));
        }
    }

    pub fn current(&self) -> Option<&Notice> {
        self.active.as_ref().map(|(n, _)| n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(text: &str, length: NoticeLength) -> Notice {
        Notice {
            text: text.to_string(),
            length,
        }
    }

    #[test]
    fn notices_are_shown_in_order_for_their_length() {
        let ui = UiSettings {
            short_notice_ms: 100,
            long_notice_ms: 300,
            ..UiSettings::default()
        };
        let mut board = NoticeBoard::new(&ui);
        let t0 = Instant::now();

        board.push(notice("first", NoticeLength::Short));
        board.push(notice("second", NoticeLength::Long));
        assert!(board.current().is_none());

        board.tick(t0);
        assert_eq!(board.current().unwrap().text, "first");
        board.tick(t0 + Duration::from_millis(99));
        assert_eq!(board.current().unwrap().text, "first");

        let t1 = t0 + Duration::from_millis(100);
        board.tick(t1);
        assert_eq!(board.current().unwrap().text, "second");
        board.tick(t1 + Duration::from_millis(299));
        assert_eq!(board.current().unwrap().text, "second");

        board.tick(t1 + Duration::from_millis(300));
        assert!(board.current().is_none());
    }
}
