//! Bounded console log shown on the dashboard.
//!
//! Entries are kept in insertion order; once the buffer is full the oldest
//! entry is evicted on every append.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 101;

/// Lines the console holds when a session starts.
pub const BOOT_LINES: [&str; 5] = [
    "Initializing Sovereign Node Core v1.2...",
    "Connecting to Dragon Net manifold...",
    "144Hz Global Resonance Locked.",
    "Lattice Phase-Lock: 100% Coherence.",
    "Chaos Proximity Stabilized: 0.00005.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Command,
    Error,
    Info,
}

impl LineKind {
    pub fn classify(text: &str) -> Self {
        if text.starts_with('>') {
            LineKind::Command
        } else if text.contains("ERROR") {
            LineKind::Error
        } else {
            LineKind::Info
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub at: DateTime<Local>,
    pub text: String,
}

impl LogEntry {
    pub fn kind(&self) -> LineKind {
        LineKind::classify(&self.text)
    }

    /// `HH:MM:SS` stamp in 24-hour local time.
    pub fn clock(&self) -> String {
        self.at.format("%H:%M:%S").to_string()
    }
}

#[derive(Debug, Clone)]
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn with_boot_lines(capacity: usize) -> Self {
        let mut buf = Self::new(capacity);
        for line in BOOT_LINES {
            buf.append(line);
        }
        buf
    }

    /// Append a line stamped with the current time. Returns how many old
    /// entries were evicted.
    pub fn append(&mut self, text: impl Into<String>) -> usize {
        self.entries.push_back(LogEntry {
            at: Local::now(),
            text: text.into(),
        });
        let mut evicted = 0;
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            evicted += 1;
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::with_boot_lines(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_grows_until_capacity() {
        let mut buf = LogBuffer::new(DEFAULT_CAPACITY);
        for i in 0..DEFAULT_CAPACITY {
            let before = buf.len();
            assert_eq!(buf.append(format!("line {}", i)), 0);
            assert_eq!(buf.len(), before + 1);
        }
        assert_eq!(buf.len(), 101);
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut buf = LogBuffer::new(DEFAULT_CAPACITY);
        for i in 0..150 {
            buf.append(format!("line {}", i));
            assert!(buf.len() <= 101);
        }
        assert_eq!(buf.len(), 101);
        assert_eq!(buf.iter().next().unwrap().text, "line 49");
        assert_eq!(buf.iter().last().unwrap().text, "line 149");
    }

    #[test]
    fn test_full_buffer_drops_exactly_one() {
        let mut buf = LogBuffer::new(3);
        buf.append("a");
        buf.append("b");
        buf.append("c");
        assert_eq!(buf.append("d"), 1);
        let texts: Vec<_> = buf.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_boot_lines_in_order() {
        let buf = LogBuffer::default();
        let texts: Vec<_> = buf.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, BOOT_LINES.to_vec());
        assert_eq!(buf.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_line_kind() {
        assert_eq!(LineKind::classify("> LOAD FACTOR: 20%"), LineKind::Command);
        assert_eq!(LineKind::classify("ERROR: Entropic noise"), LineKind::Error);
        assert_eq!(LineKind::classify("144Hz Global Resonance Locked."), LineKind::Info);
    }

    #[test]
    fn test_clock_format() {
        let mut buf = LogBuffer::new(1);
        buf.append("x");
        let clock = buf.iter().next().unwrap().clock();
        assert_eq!(clock.len(), 8);
        assert_eq!(clock.matches(':').count(), 2);
    }
}
