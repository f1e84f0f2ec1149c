use crate::backend::CaptureProvider;
use crate::geometry::Rect;
use crate::util::{VisautoError, VisautoResult};
use image::RgbaImage;

/// Live capture of the primary monitor through `xcap`.
///
/// Coordinates are relative to the primary monitor's top-left corner. Each
/// capture grabs the whole monitor and crops it.
#[derive(Clone, Copy, Debug, Default)]
pub struct XcapScreen;

impl XcapScreen {
    pub fn new() -> Self {
        Self
    }

    fn primary() -> VisautoResult<xcap::Monitor> {
        let monitors = xcap::Monitor::all().map_err(|err| VisautoError::Capture {
            reason: format!("failed to enumerate monitors: {err}"),
        })?;
        let mut fallback = None;
        for monitor in monitors {
            if monitor.is_primary() {
                return Ok(monitor);
            }
            fallback.get_or_insert(monitor);
        }
        fallback.ok_or_else(|| VisautoError::Capture {
            reason: "no monitors found".to_owned(),
        })
    }
}

impl CaptureProvider for XcapScreen {
    fn capture(&self, rect: Rect) -> VisautoResult<RgbaImage> {
        let shot = Self::primary()?
            .capture_image()
            .map_err(|err| VisautoError::Capture {
                reason: err.to_string(),
            })?;
        let (width, height) = (shot.width(), shot.height());
        let frame = RgbaImage::from_raw(width, height, shot.into_raw()).ok_or_else(|| {
            VisautoError::Capture {
                reason: "monitor returned a truncated frame".to_owned(),
            }
        })?;

        let fits = rect.x() >= 0
            && rect.y() >= 0
            && rect.x() as u64 + u64::from(rect.w()) <= u64::from(width)
            && rect.y() as u64 + u64::from(rect.h()) <= u64::from(height);
        if !fits {
            return Err(VisautoError::Capture {
                reason: format!("{rect} outside {width}x{height} monitor"),
            });
        }
        Ok(image::imageops::crop_imm(&frame, rect.x() as u32, rect.y() as u32, rect.w(), rect.h())
            .to_image())
    }

    fn display_size(&self) -> VisautoResult<(u32, u32)> {
        let monitor = Self::primary()?;
        Ok((monitor.width(), monitor.height()))
    }
}
