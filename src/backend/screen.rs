use crate::backend::CaptureProvider;
use crate::geometry::Rect;
use crate::util::{VisautoError, VisautoResult};
use image::RgbaImage;
use std::sync::RwLock;

/// In-memory screen that serves captures by cropping a stored frame.
///
/// The frame's top-left pixel sits at `origin`. Replacing the frame with
/// [`StaticScreen::set_frame`] is seen by the next capture, which is how
/// fixtures model targets appearing and vanishing.
#[derive(Debug)]
pub struct StaticScreen {
    origin: (i32, i32),
    frame: RwLock<RgbaImage>,
}

impl StaticScreen {
    /// Screen whose frame starts at `(0, 0)`.
    pub fn new(frame: RgbaImage) -> Self {
        Self::with_origin(frame, 0, 0)
    }

    pub fn with_origin(frame: RgbaImage, x: i32, y: i32) -> Self {
        Self {
            origin: (x, y),
            frame: RwLock::new(frame),
        }
    }

    /// Loads a saved screenshot as the frame.
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> VisautoResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|err| VisautoError::AssetLoad {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        Ok(Self::new(img.to_rgba8()))
    }

    /// Replaces the frame.
    pub fn set_frame(&self, frame: RgbaImage) {
        let mut guard = self.frame.write().unwrap_or_else(|p| p.into_inner());
        *guard = frame;
    }
}

impl CaptureProvider for StaticScreen {
    fn capture(&self, rect: Rect) -> VisautoResult<RgbaImage> {
        let frame = self.frame.read().unwrap_or_else(|p| p.into_inner());
        let local_x = i64::from(rect.x()) - i64::from(self.origin.0);
        let local_y = i64::from(rect.y()) - i64::from(self.origin.1);
        let fits = local_x >= 0
            && local_y >= 0
            && local_x + i64::from(rect.w()) <= i64::from(frame.width())
            && local_y + i64::from(rect.h()) <= i64::from(frame.height());
        if !fits {
            return Err(VisautoError::Capture {
                reason: format!(
                    "{rect} outside {}x{} screen at {:?}",
                    frame.width(),
                    frame.height(),
                    self.origin
                ),
            });
        }
        let crop = image::imageops::crop_imm(
            &*frame,
            local_x as u32,
            local_y as u32,
            rect.w(),
            rect.h(),
        );
        Ok(crop.to_image())
    }

    fn display_size(&self) -> VisautoResult<(u32, u32)> {
        let frame = self.frame.read().unwrap_or_else(|p| p.into_inner());
        Ok(frame.dimensions())
    }
}

#[cfg(test)]
mod tests {
    use super::StaticScreen;
    use crate::backend::CaptureProvider;
    use crate::geometry::Rect;
    use crate::VisautoError;
    use image::{Rgba, RgbaImage};

    fn frame() -> RgbaImage {
        RgbaImage::from_fn(8, 6, |x, y| Rgba([x as u8, y as u8, 0, 255]))
    }

    #[test]
    fn capture_crops_relative_to_origin() {
        let screen = StaticScreen::with_origin(frame(), 100, 50);
        let shot = screen.capture(Rect::new(102, 53, 3, 2).unwrap()).unwrap();
        assert_eq!(shot.dimensions(), (3, 2));
        assert_eq!(shot.get_pixel(0, 0), &Rgba([2, 3, 0, 255]));
        assert_eq!(screen.display_size().unwrap(), (8, 6));
    }

    #[test]
    fn capture_outside_frame_fails() {
        let screen = StaticScreen::new(frame());
        let err = screen.capture(Rect::new(6, 0, 3, 2).unwrap()).unwrap_err();
        assert!(matches!(err, VisautoError::Capture { .. }));
    }

    #[test]
    fn set_frame_is_seen_by_next_capture() {
        let screen = StaticScreen::new(frame());
        screen.set_frame(RgbaImage::from_pixel(8, 6, Rgba([9, 9, 9, 255])));
        let shot = screen.capture(Rect::new(0, 0, 1, 1).unwrap()).unwrap();
        assert_eq!(shot.get_pixel(0, 0), &Rgba([9, 9, 9, 255]));
    }
}
