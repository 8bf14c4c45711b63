use chrono::Local;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::config::LoggingConfig;

/// A log entry with timestamp and message
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: Level, target: &str, message: String) -> Self {
        Self {
            timestamp: Local::now().format("%H:%M:%S.%3f").to_string(),
            level: level.to_string().to_uppercase(),
            target: target.to_string(),
            message,
        }
    }

    pub fn format_for_display(&self) -> String {
        format!(
            "[{}] {} [{}] {}",
            self.timestamp, self.level, self.target, self.message
        )
    }
}

/// Thread-safe bounded buffer of recent log entries
#[derive(Clone)]
pub struct LogRingBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl LogRingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        // entries stay consistent across a poisoned lock
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn push(&self, entry: LogEntry) {
        let mut entries = self.lock();
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    pub fn get_recent(&self, count: usize) -> Vec<LogEntry> {
        let entries = self.lock();
        let skip = entries.len().saturating_sub(count);
        entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// Writer that parses compact fmt output into ring buffer entries
#[derive(Clone)]
pub struct RingBufferWriter {
    buffer: LogRingBuffer,
}

impl RingBufferWriter {
    pub fn new(buffer: LogRingBuffer) -> Self {
        Self { buffer }
    }
}

impl std::io::Write for RingBufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(message) = std::str::from_utf8(buf) {
            let message = message.trim();
            if !message.is_empty() {
                self.buffer.push(parse_compact_line(message));
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for RingBufferWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Split a compact-format line "LEVEL target: message"
fn parse_compact_line(line: &str) -> LogEntry {
    let levels = [
        ("TRACE ", Level::TRACE),
        ("DEBUG ", Level::DEBUG),
        ("INFO ", Level::INFO),
        ("WARN ", Level::WARN),
        ("ERROR ", Level::ERROR),
    ];

    let Some((level, rest)) = levels
        .iter()
        .find_map(|(prefix, level)| {
            line.strip_prefix(*prefix)
                .map(|rest| (*level, rest.trim_start()))
        })
    else {
        return LogEntry::new(Level::INFO, "general", line.to_string());
    };

    match rest.split_once(": ") {
        // targets never contain spaces
        Some((target, msg)) if !target.contains(' ') => {
            LogEntry::new(level, target, msg.trim().to_string())
        }
        _ => LogEntry::new(level, "general", rest.to_string()),
    }
}

/// Process-wide buffer; repeated `init_tracing` calls share it
static LOG_BUFFER: OnceLock<LogRingBuffer> = OnceLock::new();

/// Initialize tracing: entries go to the in-memory ring buffer, warnings
/// and errors are echoed to stderr.
pub fn init_tracing(config: &LoggingConfig) -> LogRingBuffer {
    use tracing_subscriber::{
        filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
    };

    let buffer = LOG_BUFFER
        .get_or_init(|| LogRingBuffer::new(config.max_entries))
        .clone();

    let buffer_layer = fmt::layer()
        .with_writer(RingBufferWriter::new(buffer.clone()))
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .without_time() // We add our own timestamps
        .compact();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(LevelFilter::WARN);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    // A second init (tests, embedding hosts) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(buffer_layer)
        .with(stderr_layer)
        .try_init();

    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let buffer = LogRingBuffer::new(2);
        for i in 0..3 {
            buffer.push(LogEntry::new(Level::INFO, "test", format!("m{}", i)));
        }

        let recent = buffer.get_recent(10);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message, "m1");
        assert_eq!(recent[1].message, "m2");
        assert_eq!(buffer.get_recent(1)[0].message, "m2");
    }

    #[test]
    fn test_parse_compact_line() {
        let entry = parse_compact_line("DEBUG tabular_export::ui::table_visual: Update 1 rejected");
        assert_eq!(entry.level, "DEBUG");
        assert_eq!(entry.target, "tabular_export::ui::table_visual");
        assert_eq!(entry.message, "Update 1 rejected");

        let entry = parse_compact_line("plain text");
        assert_eq!(entry.level, "INFO");
        assert_eq!(entry.target, "general");
    }

    #[test]
    fn test_writer_pushes_entries() {
        use std::io::Write;

        let buffer = LogRingBuffer::new(10);
        let mut writer = RingBufferWriter::new(buffer.clone());
        writer.write_all(b"WARN app: careful\n").unwrap();
        writer.write_all(b"   \n").unwrap();

        assert_eq!(buffer.len(), 1);
        let line = buffer.get_recent(1)[0].format_for_display();
        assert_eq!(line.split_once(' ').unwrap().1, "WARN [app] careful");
    }
}
