use serde::{Deserialize, Serialize};

use crate::hand::Hand;
use crate::settlement::Points;

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Line-oriented sink for the human-readable account of each round.
///
/// Nothing in the engine depends on lines being kept; [`NullNarrative`] is a
/// complete implementation.
pub trait Narrative {
    fn line(&mut self, text: &str);

    /// Lets callers skip formatting when lines are discarded anyway.
    fn enabled(&self) -> bool {
        true
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullNarrative;

impl Narrative for NullNarrative {
    fn line(&mut self, _text: &str) {}

    fn enabled(&self) -> bool {
        false
    }
}

/// Keeps every line in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryNarrative {
    lines: Vec<String>,
}

impl MemoryNarrative {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }

}

impl Narrative for MemoryNarrative {
    fn line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}

/// Appends lines to a text file. A failed write is reported once and the
/// sink goes quiet for the rest of the session.
pub struct FileNarrative {
    writer: Option<BufWriter<File>>,
}

impl FileNarrative {
    /// Open `path` for appending, creating it and its parent directory.
    /// With `truncate` any previous content is dropped first.
    pub fn open<P: AsRef<Path>>(path: P, truncate: bool) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = OpenOptions::new()
            .create(true)
            .append(!truncate)
            .write(true)
            .truncate(truncate)
            .open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
        })
    }
}

impl Narrative for FileNarrative {
    fn line(&mut self, text: &str) {
        let Some(w) = self.writer.as_mut() else {
            return;
        };
        let res = w
            .write_all(text.as_bytes())
            .and_then(|_| w.write_all(b"\n"))
            .and_then(|_| w.flush());
        if let Err(e) = res {
            tracing::warn!(error = %e, "narrative log disabled after write failure");
            self.writer = None;
        }
    }

    fn enabled(&self) -> bool {
        self.writer.is_some()
    }
}

/// Fans a line out to two sinks, e.g. the screen and `log.txt`.
pub struct Tee<'a> {
    first: &'a mut dyn Narrative,
    second: &'a mut dyn Narrative,
}

impl<'a> Tee<'a> {
    pub fn new(first: &'a mut dyn Narrative, second: &'a mut dyn Narrative) -> Self {
        Self { first, second }
    }
}

impl Narrative for Tee<'_> {
    fn line(&mut self, text: &str) {
        self.first.line(text);
        self.second.line(text);
    }

    fn enabled(&self) -> bool {
        self.first.enabled() || self.second.enabled()
    }
}

/// Structured record of one settled round.
/// Serialized to JSONL for later analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based round number within the session
    pub round: u64,
    /// Shoe number within the session, starting at 1
    pub shoe: u64,
    /// Final player hands with their move histories
    pub player_hands: Vec<Hand>,
    /// Final dealer hand
    pub dealer_hand: Hand,
    /// Settlement key, e.g. "1.5"
    pub outcome: Points,
    /// Count weights of every card dealt this round
    pub count_delta: i32,
    /// Running count after settlement
    pub running_count: i32,
    /// True count in effect when the opening decision was made
    pub true_count: f64,
    /// RFC3339 timestamp, filled in when written if missing
    #[serde(default)]
    pub ts: Option<String>,
}

pub struct RoundLogger {
    writer: Option<BufWriter<File>>,
}

impl RoundLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
        })
    }

    /// A logger that accepts records and writes nothing.
    pub fn discard() -> Self {
        Self { writer: None }
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        let Some(w) = &mut self.writer else {
            return Ok(());
        };
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(w) = &mut self.writer {
            w.flush()?;
        }
        Ok(())
    }
}
