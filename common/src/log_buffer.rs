//! Bounded, levelled log owned by the watchface context.
//!
//! Handlers write through the crate-internal `log_info!`, `log_warn!` and
//! `log_debug!` macros; the host drains the lines after each pass (the
//! simulator prints them). Entries are stamped with the event time handed in
//! by the host, so the core stays clock-free.
//!
//! With the `defmt` feature each line is also emitted through `defmt` at the
//! same level, as the device firmware does.

use core::fmt;

use heapless::{Deque, String};

/// Lines kept before the oldest is overwritten.
pub const LOG_ENTRIES: usize = 32;

/// Byte capacity of one line.
pub const LOG_MSG_LEN: usize = 48;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Fixed-width tag used when printing.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Trace => "TRC",
            Self::Debug => "DBG",
            Self::Info => "INF",
            Self::Warn => "WRN",
            Self::Error => "ERR",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String<LOG_MSG_LEN>,
    pub at_ms: u64,
}

impl LogEntry {
    /// Build an entry, cutting `message` at the last char boundary that fits.
    pub fn new(
        level: LogLevel,
        message: &str,
        at_ms: u64,
    ) -> Self {
        let mut end = message.len().min(LOG_MSG_LEN);
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        let mut text = String::new();
        // Cannot fail: `end` bytes fit by construction
        text.push_str(&message[..end]).ok();
        Self { level, message: text, at_ms }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:>7} ms {} {}", self.at_ms, self.level.tag(), self.message)
    }
}

/// Ring of the most recent [`LOG_ENTRIES`] lines.
#[derive(Debug, Default)]
pub struct LogBuffer {
    lines: Deque<LogEntry, LOG_ENTRIES>,
    overwritten: u32,
}

impl LogBuffer {
    pub const fn new() -> Self {
        Self {
            lines: Deque::new(),
            overwritten: 0,
        }
    }

    /// Append a line, evicting the oldest when full.
    pub fn push(
        &mut self,
        entry: LogEntry,
    ) {
        if self.lines.is_full() {
            self.lines.pop_front();
            self.overwritten = self.overwritten.saturating_add(1);
        }
        // Room was made above
        self.lines.push_back(entry).ok();
    }

    /// Record `message` at `level` (and forward it to `defmt` when enabled).
    pub fn record(
        &mut self,
        level: LogLevel,
        at_ms: u64,
        message: &str,
    ) {
        #[cfg(feature = "defmt")]
        match level {
            LogLevel::Trace => defmt::trace!("[{=u64}] {=str}", at_ms, message),
            LogLevel::Debug => defmt::debug!("[{=u64}] {=str}", at_ms, message),
            LogLevel::Info => defmt::info!("[{=u64}] {=str}", at_ms, message),
            LogLevel::Warn => defmt::warn!("[{=u64}] {=str}", at_ms, message),
            LogLevel::Error => defmt::error!("[{=u64}] {=str}", at_ms, message),
        }
        self.push(LogEntry::new(level, message, at_ms));
    }

    #[inline]
    pub fn len(&self) -> usize { self.lines.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.lines.is_empty() }

    /// Lines evicted before anyone drained them.
    #[inline]
    pub const fn dropped(&self) -> u32 { self.overwritten }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> { self.lines.iter() }

    /// Hand every line to `sink`, oldest first, leaving the buffer empty.
    pub fn drain(
        &mut self,
        mut sink: impl FnMut(&LogEntry),
    ) {
        while let Some(entry) = self.lines.pop_front() {
            sink(&entry);
        }
    }

    pub fn clear(&mut self) { self.lines.clear(); }
}

// =============================================================================
// Macros
// =============================================================================

macro_rules! log_at {
    ($level:expr, $log:expr, $at_ms:expr, $($arg:tt)*) => {{
        use core::fmt::Write as _;
        let mut line: heapless::String<{ $crate::log_buffer::LOG_MSG_LEN }> = heapless::String::new();
        // Overlong lines are cut short rather than dropped
        write!(line, $($arg)*).ok();
        $log.record($level, $at_ms, line.as_str());
    }};
}

macro_rules! log_info {
    ($log:expr, $at_ms:expr, $($arg:tt)*) => {
        log_at!($crate::log_buffer::LogLevel::Info, $log, $at_ms, $($arg)*)
    };
}

macro_rules! log_warn {
    ($log:expr, $at_ms:expr, $($arg:tt)*) => {
        log_at!($crate::log_buffer::LogLevel::Warn, $log, $at_ms, $($arg)*)
    };
}

macro_rules! log_debug {
    ($log:expr, $at_ms:expr, $($arg:tt)*) => {
        log_at!($crate::log_buffer::LogLevel::Debug, $log, $at_ms, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_arrival_order() {
        let mut log = LogBuffer::new();
        log.record(LogLevel::Info, 1, "loaded");
        log.record(LogLevel::Warn, 2, "late event");
        let messages: Vec<&str> = log.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["loaded", "late event"]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_full_ring_evicts_oldest() {
        let mut log = LogBuffer::new();
        for at_ms in 0..(LOG_ENTRIES as u64 + 3) {
            log.record(LogLevel::Debug, at_ms, "tick");
        }
        assert_eq!(log.len(), LOG_ENTRIES);
        assert_eq!(log.dropped(), 3);
        assert_eq!(log.iter().next().map(|e| e.at_ms), Some(3), "first three lines should be gone");
        assert_eq!(log.iter().last().map(|e| e.at_ms), Some(LOG_ENTRIES as u64 + 2));
    }

    #[test]
    fn test_cut_respects_char_boundaries() {
        let entry = LogEntry::new(LogLevel::Error, &"y".repeat(LOG_MSG_LEN + 10), 0);
        assert_eq!(entry.message.len(), LOG_MSG_LEN);

        // 'é' is two bytes, so after one ASCII byte the limit falls inside a char
        let accented = format!("a{}", "é".repeat(LOG_MSG_LEN));
        let entry = LogEntry::new(LogLevel::Info, &accented, 0);
        assert_eq!(entry.message.len(), LOG_MSG_LEN - 1);
        assert!(entry.message.chars().skip(1).all(|c| c == 'é'));
    }

    #[test]
    fn test_macros_format_and_drain() {
        let mut log = LogBuffer::new();
        log_info!(log, 40, "focus {}", true);
        log_warn!(log, 41, "rejected {} entries", 2);
        log_debug!(log, 1500, "frame");

        let mut lines = Vec::new();
        log.drain(|entry| lines.push(entry.to_string()));
        assert_eq!(lines, ["     40 ms INF focus true", "     41 ms WRN rejected 2 entries", "   1500 ms DBG frame"]);
        assert!(log.is_empty(), "drain should empty the buffer");
    }
}
