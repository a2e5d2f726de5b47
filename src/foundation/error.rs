use std::path::PathBuf;

/// Convenience result type used across catface.
pub type CatfaceResult<T> = Result<T, CatfaceError>;

/// Where the face detector model can be downloaded from.
pub const CASCADE_DOWNLOAD_URL: &str = "https://github.com/opencv/opencv/raw/master/data/haarcascades/haarcascade_frontalface_default.xml";

/// Top-level error taxonomy used by engine APIs.
///
/// Per-face problems (degenerate geometry, sprites that would overflow the frame) are not
/// represented here; they are reported as [`crate::SkipReason`] and
/// [`crate::PasteOutcome::ClipRejected`] so that one bad face never fails a frame.
#[derive(thiserror::Error, Debug)]
pub enum CatfaceError {
    /// The sprite sheet is missing, unreadable or undecodable. Fatal at startup.
    #[error("asset load error: {0}")]
    AssetLoad(String),

    /// The face detector model resource could not be found. Fatal at startup.
    #[error(
        "face detector model '{name}' not found\n\
         download it from {url}\n\
         and place it next to the executable, or install it with `sudo apt-get install opencv-data`\n\
         searched:\n{}",
        format_tried(.tried),
        url = CASCADE_DOWNLOAD_URL
    )]
    CascadeUnavailable {
        /// File name that was looked up.
        name: String,
        /// Every location that was searched, in order.
        tried: Vec<PathBuf>,
    },

    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// A scale request fell outside the accepted range; the previous scale is kept.
    #[error("scale {requested} out of range ({min}-{max})")]
    ScaleRejected {
        /// The rejected value.
        requested: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },

    /// Camera or detector failure for a single frame.
    #[error("capture error: {0}")]
    Capture(String),

    /// Writing a composited frame failed.
    #[error("output error: {0}")]
    Output(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CatfaceError {
    /// Build a [`CatfaceError::AssetLoad`] value.
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build a [`CatfaceError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CatfaceError::Capture`] value.
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Build a [`CatfaceError::Output`] value.
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }

    /// `true` for errors that only affect the current frame.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Capture(_) | Self::ScaleRejected { .. })
    }
}

fn format_tried(tried: &[PathBuf]) -> String {
    tried
        .iter()
        .map(|p| format!("  {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
