use crate::domain::model::FactorLine;
use crate::domain::ports::FactorSink;
use crate::utils::error::{FixtureError, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Truncating file writer that flushes after every line.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
    lines: u64,
}

impl FileSink {
    /// Opens `path` for writing, truncating any previous content. Parent
    /// directories are not created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|source| FixtureError::OpenOutput {
                path: path.display().to_string(),
                source,
            })?;

        tracing::debug!("Opened output file: {}", path.display());

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            lines: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines_written(&self) -> u64 {
        self.lines
    }
}

impl FactorSink for FileSink {
    fn write_line(&mut self, line: &FactorLine) -> Result<()> {
        writeln!(self.writer, "{}", line).map_err(|source| FixtureError::Write { source })?;
        // 每行都立即寫出，讓外部觀察者能即時看到
        self.writer
            .flush()
            .map_err(|source| FixtureError::Write { source })?;
        self.lines += 1;
        Ok(())
    }

    fn finish(mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|source| FixtureError::Write { source })?;
        tracing::debug!(
            "Closed output file {} after {} lines",
            self.path.display(),
            self.lines
        );
        Ok(())
    }
}
