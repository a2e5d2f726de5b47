use std::path::{Path, PathBuf};

use crate::foundation::{
    core::FaceRect,
    error::{CatfaceError, CatfaceResult},
};

/// File name of the default frontal face model.
pub const DEFAULT_CASCADE_NAME: &str = "haarcascade_frontalface_default.xml";

/// Face detection backend.
///
/// Implementations may keep state between frames, hence `&mut self`. Output order is whatever
/// the backend produces; it is preserved downstream and drives sprite assignment. A failure is
/// reported as [`CatfaceError::Capture`] and costs only the current frame.
pub trait FaceDetector {
    /// Detect faces in an RGB frame.
    fn detect(&mut self, frame: &image::RgbImage) -> CatfaceResult<Vec<FaceRect>>;
}

/// Source of camera frames.
pub trait FrameSource {
    /// Next frame, `Ok(None)` at end of stream, or [`CatfaceError::Capture`] for a failed grab.
    fn next_frame(&mut self) -> CatfaceResult<Option<image::RgbImage>>;
}

/// Detector replaying precomputed rectangles, one list per call.
///
/// Once the script is exhausted the last list repeats; an empty script detects nothing.
#[derive(Clone, Debug, Default)]
pub struct StaticDetector {
    script: Vec<Vec<FaceRect>>,
    cursor: usize,
}

impl StaticDetector {
    /// Same faces on every frame.
    pub fn fixed(faces: Vec<FaceRect>) -> Self {
        Self {
            script: vec![faces],
            cursor: 0,
        }
    }

    /// One face list per frame.
    pub fn scripted(script: Vec<Vec<FaceRect>>) -> Self {
        Self { script, cursor: 0 }
    }
}

impl FaceDetector for StaticDetector {
    fn detect(&mut self, _frame: &image::RgbImage) -> CatfaceResult<Vec<FaceRect>> {
        let Some(last) = self.script.len().checked_sub(1) else {
            return Ok(Vec::new());
        };
        let faces = self.script[self.cursor.min(last)].clone();
        self.cursor = self.cursor.saturating_add(1);
        Ok(faces)
    }
}

/// Frames held in memory, yielded in order.
#[derive(Debug, Default)]
pub struct MemoryFrameSource {
    frames: std::collections::VecDeque<CatfaceResult<image::RgbImage>>,
}

impl MemoryFrameSource {
    /// Yield `frames` then end.
    pub fn new(frames: impl IntoIterator<Item = image::RgbImage>) -> Self {
        Self {
            frames: frames.into_iter().map(Ok).collect(),
        }
    }

    /// Queue a failed grab at the current end of the stream.
    pub fn push_failure(&mut self, msg: impl Into<String>) {
        self.frames.push_back(Err(CatfaceError::capture(msg)));
    }

    /// Queue a frame at the current end of the stream.
    pub fn push_frame(&mut self, frame: image::RgbImage) {
        self.frames.push_back(Ok(frame));
    }
}

impl FrameSource for MemoryFrameSource {
    fn next_frame(&mut self) -> CatfaceResult<Option<image::RgbImage>> {
        self.frames.pop_front().transpose()
    }
}

/// Usual install locations of the detector model, most specific first.
pub fn default_cascade_search_paths(name: &str) -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("/usr/share/opencv4/haarcascades").join(name),
        PathBuf::from("/usr/share/opencv/haarcascades").join(name),
        PathBuf::from("/usr/local/share/opencv4/haarcascades").join(name),
        PathBuf::from("/usr/local/share/opencv/haarcascades").join(name),
        PathBuf::from(name),
    ];
    if let Some(home) = std::env::var_os("HOME") {
        paths.push(PathBuf::from(home).join(name));
    }
    paths
}

/// Resolve the detector model file.
///
/// An explicit path is used as-is when it exists; otherwise `search` is tried in order. Fails
/// with [`CatfaceError::CascadeUnavailable`], listing every location tried.
pub fn locate_cascade(explicit: Option<&Path>, search: &[PathBuf]) -> CatfaceResult<PathBuf> {
    let mut tried = Vec::with_capacity(search.len() + 1);
    let candidates = explicit.map(Path::to_path_buf).into_iter().chain(search.iter().cloned());
    for path in candidates {
        if path.is_file() {
            tracing::info!(path = %path.display(), "found face detector model");
            return Ok(path);
        }
        tried.push(path);
    }
    let name = explicit
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_CASCADE_NAME.to_string());
    Err(CatfaceError::CascadeUnavailable { name, tried })
}

#[cfg(test)]
#[path = "../../tests/unit/detect/mod.rs"]
mod tests;
