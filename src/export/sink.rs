//! Where finished downloads go.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Receives a finished download.
pub trait DownloadSink {
    /// Save `bytes` under `filename` and return where they ended up.
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf, SinkError>;
}

/// Writes downloads into a directory, creating it if needed.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf, SinkError> {
        let path = self.dir.join(filename);
        fs::create_dir_all(&self.dir)
            .and_then(|()| fs::write(&path, bytes))
            .map_err(|source| SinkError::Write {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}
