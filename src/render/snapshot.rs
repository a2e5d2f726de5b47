use std::path::{Path, PathBuf};

use crate::foundation::error::{CatfaceError, CatfaceResult};

/// Saves composited frames as numbered JPEG stills (`headswap_000.jpg`, `headswap_001.jpg`, ...).
#[derive(Clone, Debug)]
pub struct SnapshotWriter {
    dir: PathBuf,
    next: u32,
}

impl SnapshotWriter {
    /// Write into `dir`, created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            next: 0,
        }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of frames saved so far.
    pub fn saved(&self) -> u32 {
        self.next
    }

    /// Path the next save will use.
    pub fn next_path(&self) -> PathBuf {
        self.dir.join(format!("headswap_{:03}.jpg", self.next))
    }

    /// Encode `frame` to the next numbered file and return its path.
    pub fn save(&mut self, frame: &image::RgbImage) -> CatfaceResult<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            CatfaceError::output(format!("create output dir '{}': {e}", self.dir.display()))
        })?;
        let path = self.next_path();
        frame
            .save_with_format(&path, image::ImageFormat::Jpeg)
            .map_err(|e| CatfaceError::output(format!("write '{}': {e}", path.display())))?;
        self.next += 1;
        tracing::info!(path = %path.display(), "snapshot saved");
        Ok(path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/snapshot.rs"]
mod tests;
