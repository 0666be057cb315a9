//! `rodio`-backed output service.
//!
//! The output stream is opened on first use so a machine without an audio
//! device still gets through startup and scanning; the failure then surfaces
//! as a session setup error.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::error::SessionError;
use crate::library::TrackRef;

use super::types::{Output, Session};

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Read the duration from the container when the decoder cannot tell.
fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}

#[derive(Default)]
pub struct RodioOutput {
    stream: Option<OutputStream>,
}

impl RodioOutput {
    pub fn new() -> Self {
        Self::default()
    }

    fn stream(&mut self) -> Result<&OutputStream, SessionError> {
        let stream = match self.stream.take() {
            Some(stream) => stream,
            None => {
                let mut stream = OutputStreamBuilder::open_default_stream()
                    .map_err(|e| SessionError::Device(e.to_string()))?;
                // rodio logs to stderr when the stream is dropped, which would
                // scribble over the terminal UI.
                stream.log_on_drop(false);
                stream
            }
        };
        Ok(self.stream.insert(stream))
    }
}

impl Output for RodioOutput {
    type Session = RodioSession;

    fn open(&mut self, track: &TrackRef) -> Result<RodioSession, SessionError> {
        let path = track.locator();
        let file = File::open(path).map_err(|source| SessionError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|e| SessionError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let duration = source
            .total_duration()
            .or_else(|| probe_duration(path))
            .unwrap_or_default();

        let stream = self.stream()?;
        let sink = Sink::connect_new(stream.mixer());
        sink.pause();
        sink.append(source);

        Ok(RodioSession {
            sink,
            duration,
            completed: false,
        })
    }
}

pub struct RodioSession {
    sink: Sink,
    duration: Duration,
    completed: bool,
}

impl Session for RodioSession {
    fn start(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn is_playing(&self) -> bool {
        !self.sink.is_paused() && !self.sink.empty()
    }

    fn seek(&mut self, position_ms: u64) -> Result<(), SessionError> {
        self.sink
            .try_seek(Duration::from_millis(position_ms))
            .map_err(|e| SessionError::Seek(e.to_string()))
    }

    fn duration_ms(&self) -> u64 {
        millis(self.duration)
    }

    fn position_ms(&self) -> u64 {
        millis(self.sink.get_pos())
    }

    fn take_completion(&mut self) -> bool {
        if !self.completed && self.sink.empty() {
            self.completed = true;
            return true;
        }
        false
    }
}

impl Drop for RodioSession {
    fn drop(&mut self) {
        self.sink.stop();
    }
}
