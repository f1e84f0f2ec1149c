//! External collaborators: screen capture, pointer actuation and OCR.
//!
//! The core only talks to these traits. In-memory implementations cover
//! fixtures and dry runs; live backends sit behind the `xcap` and `autogui`
//! features.

use crate::geometry::Rect;
use crate::util::VisautoResult;
use image::RgbaImage;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

mod record;
mod screen;
mod tesseract;

#[cfg(feature = "autogui")]
mod autogui;
#[cfg(feature = "xcap")]
mod xcap;

pub use record::{PointerAction, RecordingActuator};
pub use screen::StaticScreen;
pub use tesseract::TesseractRecognizer;

#[cfg(feature = "autogui")]
pub use self::autogui::AutoGuiActuator;
#[cfg(feature = "xcap")]
pub use self::xcap::XcapScreen;

/// Source of screen pixels.
pub trait CaptureProvider: Send + Sync {
    /// Captures `rect`; the returned image is exactly `rect.w()` x `rect.h()`.
    fn capture(&self, rect: Rect) -> VisautoResult<RgbaImage>;

    /// Size of the capturable surface, used for full-screen regions.
    fn display_size(&self) -> VisautoResult<(u32, u32)>;
}

/// Pointer movement and clicks.
pub trait Actuator: Send + Sync {
    /// Moves the pointer to `(x, y)` over `duration`.
    fn move_to(&self, x: i32, y: i32, duration: Duration) -> VisautoResult<()>;

    /// Clicks the primary button at the current pointer position.
    fn click(&self) -> VisautoResult<()>;
}

/// Options forwarded to a text recognizer.
#[derive(Clone, Copy, Debug)]
pub struct OcrRequest<'a> {
    /// Recognition language(s), e.g. `eng` or `eng+jpn`.
    pub lang: &'a str,
    /// Extra command-line configuration, split on whitespace.
    pub config: &'a str,
    /// Recognizer executable.
    pub program: &'a Path,
}

/// Optical character recognition over a captured image.
pub trait TextRecognizer: Send + Sync {
    /// Returns the recognized text; an image without text yields an empty
    /// string, a missing tool yields `RecognizerUnavailable`.
    fn recognize(&self, image: &RgbaImage, request: &OcrRequest<'_>) -> VisautoResult<String>;
}

impl<T: CaptureProvider + ?Sized> CaptureProvider for Arc<T> {
    fn capture(&self, rect: Rect) -> VisautoResult<RgbaImage> {
        (**self).capture(rect)
    }

    fn display_size(&self) -> VisautoResult<(u32, u32)> {
        (**self).display_size()
    }
}

impl<T: Actuator + ?Sized> Actuator for Arc<T> {
    fn move_to(&self, x: i32, y: i32, duration: Duration) -> VisautoResult<()> {
        (**self).move_to(x, y, duration)
    }

    fn click(&self) -> VisautoResult<()> {
        (**self).click()
    }
}

impl<T: TextRecognizer + ?Sized> TextRecognizer for Arc<T> {
    fn recognize(&self, image: &RgbaImage, request: &OcrRequest<'_>) -> VisautoResult<String> {
        (**self).recognize(image, request)
    }
}
