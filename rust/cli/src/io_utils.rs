//! File helpers for the export sink and other command outputs.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use hilo_engine::settlement::Points;

/// Ensure parent directory exists for given path, creating if needed.
///
/// ```rust,no_run
/// use std::path::Path;
/// # use hilo_cli::io_utils::ensure_parent_dir;
///
/// ensure_parent_dir(Path::new("out/runs/export.txt")).unwrap();
/// ```
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Batch-mode outcome file: truncated when opened, then one settlement key
/// per line (`1.5`, `-1`, ...).
pub struct ExportSink {
    writer: BufWriter<File>,
    written: u64,
}

impl ExportSink {
    pub fn create(path: &Path) -> std::io::Result<Self> {
        ensure_parent_dir(path)?;
        let f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        Ok(Self {
            writer: BufWriter::new(f),
            written: 0,
        })
    }

    pub fn append(&mut self, key: Points) -> std::io::Result<()> {
        writeln!(self.writer, "{}", key)?;
        self.written += 1;
        Ok(())
    }

    pub fn finish(mut self) -> std::io::Result<u64> {
        self.writer.flush()?;
        Ok(self.written)
    }
}
