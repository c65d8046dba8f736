#![warn(missing_docs)]
//! Deterministic testing surfaces: the JSONL event stream written by headless
//! runs and the golden-snapshot harness used by micro-worldtests.

mod micro_worldtest;
mod snapshot;

use anyhow::{Context, Result};
use byldr_core::SimTick;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

pub use micro_worldtest::*;
pub use snapshot::*;

/// One line of the event log.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a, P: Serialize + ?Sized> {
    /// Simulation tick when the event occurred.
    pub tick: SimTick,
    /// Kind label (`placed`, `removed`, `undone`, `redone`).
    pub kind: &'a str,
    /// Event-specific payload.
    pub payload: &'a P,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    writer: BufWriter<File>,
    lines: usize,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent directories if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("Failed to create event log {}", path.display()))?;
        debug!(path = %path.display(), "event log opened");
        Ok(Self {
            writer: BufWriter::new(file),
            lines: 0,
        })
    }

    /// Append an event to the log.
    pub fn write<P: Serialize + ?Sized>(&mut self, event: &EventRecord<'_, P>) -> Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flush buffered records to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl Drop for JsonlSink {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[derive(Serialize)]
    struct Placed {
        id: u64,
    }

    #[test]
    fn jsonl_sink_writes_one_line_per_event() {
        let path = std::env::temp_dir()
            .join(format!(
                "byldr-events-{}",
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap()
                    .as_nanos()
            ))
            .join("events.jsonl");
        let mut sink = JsonlSink::create(&path).expect("sink create");
        sink.write(&EventRecord {
            tick: SimTick(3),
            kind: "commit",
            payload: &Placed { id: 0 },
        })
        .expect("write succeeds");
        sink.write(&EventRecord {
            tick: SimTick(4),
            kind: "undo",
            payload: "nothing",
        })
        .expect("write succeeds");
        assert_eq!(sink.lines(), 2);
        sink.flush().expect("flush");

        let contents = fs::read_to_string(&path).expect("file readable");
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"tick":3,"kind":"commit","payload":{"id":0}}"#);
        assert_eq!(lines[1], r#"{"tick":4,"kind":"undo","payload":"nothing"}"#);
    }
}
