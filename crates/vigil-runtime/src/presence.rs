use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Trait contract for `PresenceProbe` behavior.
pub trait PresenceProbe: Send + Sync {
    /// Samples the occupancy marker. Synchronous and side-effect-free; the
    /// polling loop treats an error as "absent" after logging it.
    fn marker_present(&self) -> Result<bool>;
}

#[derive(Debug, Clone)]
/// Probe that reports presence while a sentinel marker exists on disk.
pub struct FileMarkerProbe {
    marker_path: PathBuf,
}

impl FileMarkerProbe {
    pub fn new(marker_path: PathBuf) -> Self {
        Self { marker_path }
    }

    pub fn marker_path(&self) -> &Path {
        self.marker_path.as_path()
    }
}

impl PresenceProbe for FileMarkerProbe {
    fn marker_present(&self) -> Result<bool> {
        match std::fs::metadata(&self.marker_path) {
            Ok(_) => Ok(true),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(false),
            Err(error) => Err(error)
                .with_context(|| format!("failed to stat marker {}", self.marker_path.display())),
        }
    }
}
