//! Terminal-style log readout.
//!
//! A bounded line sink the rest of the app writes human-readable events to.
//! Callers never wait on it; the sink owns truncation.

use std::collections::VecDeque;

pub const MAX_LINES: usize = 120;

pub struct TerminalLog {
    lines: VecDeque<String>,
}

impl Default for TerminalLog {
    fn default() -> Self {
        Self { lines: VecDeque::with_capacity(MAX_LINES) }
    }
}

impl TerminalLog {
    pub fn append_line(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::info!("{}", line);
        self.lines.push_back(line);
        while self.lines.len() > MAX_LINES {
            self.lines.pop_front();
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
