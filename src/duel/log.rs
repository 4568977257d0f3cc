//! Player-facing event log
//!
//! The full log is append-only and authoritative. The visible window is
//! always read off its tail, so the two cannot drift apart.

use serde::{Deserialize, Serialize};

/// Frame used when no animation frames are configured
const FALLBACK_FRAME: &str = "•";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLog {
    lines: Vec<String>,
    window: usize,
    frames: Vec<String>,
    next_frame: usize,
}

impl EventLog {
    pub fn new(window: usize, frames: Vec<String>) -> Self {
        Self {
            lines: Vec::new(),
            window: window.max(1),
            frames,
            next_frame: 0,
        }
    }

    /// Append a line prefixed with the next animation frame
    pub fn push(&mut self, line: impl AsRef<str>) {
        let frame = self.advance_frame();
        self.lines.push(format!("{} {}", frame, line.as_ref()));
    }

    /// Append a line as-is
    pub fn push_raw(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn advance_frame(&mut self) -> String {
        if self.frames.is_empty() {
            return FALLBACK_FRAME.to_string();
        }
        let frame = self.frames[self.next_frame % self.frames.len()].clone();
        self.next_frame = (self.next_frame + 1) % self.frames.len();
        frame
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The most recent `window` lines
    pub fn window(&self) -> &[String] {
        let start = self.lines.len().saturating_sub(self.window);
        &self.lines[start..]
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// True if any line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}
