//! JSONL file writer for evaluation results.
//!
//! Each [`EvaluationResult`] is serialized as a single JSON line and
//! appended to the file via a buffered writer.

use async_trait::async_trait;
use srom_application::{OutputSink, SinkError};
use srom_domain::EvaluationResult;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Append-only JSONL result log.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every write and
/// on `Drop`.
pub struct JsonlOutput {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlOutput {
    /// Open the file for appending, creating it and its parent directories
    /// if they don't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        debug!("Appending results to {}", path.display());

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the output file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl OutputSink for JsonlOutput {
    async fn write(&self, result: &EvaluationResult) -> Result<(), SinkError> {
        let line = serde_json::to_string(result)
            .map_err(|e| SinkError::Serialization(e.to_string()))?;

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| SinkError::Other("result writer poisoned".to_string()))?;
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }
}

impl Drop for JsonlOutput {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
