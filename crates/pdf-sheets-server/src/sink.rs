//! Where successful conversions are persisted besides the HTTP response

use std::path::{Path, PathBuf};

/// Receives a copy of every successfully converted PDF.
///
/// Called from a blocking task after the conversion finished; a failure is
/// logged and never fails the request.
pub trait OutputSink: Send + Sync {
    fn persist(&self, pdf: &[u8]) -> std::io::Result<()>;
}

/// Writes each conversion to one fixed path, replacing the previous one
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for FileSink {
    fn persist(&self, pdf: &[u8]) -> std::io::Result<()> {
        std::fs::write(&self.path, pdf)?;
        log::info!("Wrote debug PDF to disk at \"{}\"", self.path.display());
        Ok(())
    }
}

/// Discards conversions
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl OutputSink for NoopSink {
    fn persist(&self, _pdf: &[u8]) -> std::io::Result<()> {
        Ok(())
    }
}
