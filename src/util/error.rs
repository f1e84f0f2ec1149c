//! Error types for visauto.

use crate::geometry::{Pad, Rect};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result alias for visauto operations.
pub type VisautoResult<T> = std::result::Result<T, VisautoError>;

/// Errors that can occur while capturing, searching or acting on regions.
#[derive(Debug, Error)]
pub enum VisautoError {
    /// Image dimensions are zero or overflow.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer is shorter than the view requires.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A single search attempt did not reach the similarity threshold.
    #[error("{target} not found in {region}")]
    NotFound {
        target: String,
        region: Rect,
        /// Best score seen, `None` when the template did not fit the region.
        best: Option<f32>,
    },
    /// `wait` ran out of time without a qualifying match.
    #[error("{target} not found after waiting {waited:?}")]
    TimeoutNotFound { target: String, waited: Duration },
    /// `wait_vanish` ran out of time while the target was still present.
    #[error("{target} still present after waiting {waited:?}")]
    TimeoutStillPresent { target: String, waited: Duration },
    /// A template asset could not be read or decoded.
    #[error("failed to load asset {}: {reason}", path.display())]
    AssetLoad { path: PathBuf, reason: String },
    /// Invalid construction arguments.
    #[error("configuration error: {0}")]
    Configuration(&'static str),
    /// Click padding collapses the clickable range.
    #[error("padding {pad:?} leaves no clickable area")]
    InvalidPadding { pad: Pad },
    /// The text recognition tool could not be located.
    #[error(
        "text recognizer {} is not installed or not in PATH; set Settings::tesseract_cmd",
        program.display()
    )]
    RecognizerUnavailable { program: PathBuf },
    /// The text recognition tool ran but failed.
    #[error("text recognition failed: {reason}")]
    Recognizer { reason: String },
    /// The capture backend failed.
    #[error("capture failed: {reason}")]
    Capture { reason: String },
    /// The pointer backend failed.
    #[error("actuation failed: {reason}")]
    Actuation { reason: String },
    /// Image encoding or decoding failed.
    #[error("image i/o: {reason}")]
    ImageIo { reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl VisautoError {
    /// Returns true for a single-attempt `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, VisautoError::NotFound { .. })
    }
}
