//! Conversions between `image` crate buffers and grayscale buffers, plus
//! template loading and screenshot saving.

use crate::image::OwnedImage;
use crate::util::{VisautoError, VisautoResult};
use image::{DynamicImage, GrayImage, ImageError, RgbaImage};
use std::path::Path;

/// Creates an owned image from a grayscale image buffer.
pub fn owned_from_gray_image(img: GrayImage) -> VisautoResult<OwnedImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    OwnedImage::new(img.into_raw(), width, height)
}

/// Converts an RGBA capture to luma.
///
/// Templates loaded from disk go through the same conversion so capture and
/// template intensities are comparable.
pub fn gray_from_rgba(img: &RgbaImage) -> VisautoResult<OwnedImage> {
    owned_from_gray_image(image::imageops::grayscale(img))
}

/// Creates an owned grayscale image from a dynamic image.
pub fn owned_from_dynamic_image(img: &DynamicImage) -> VisautoResult<OwnedImage> {
    owned_from_gray_image(img.to_luma8())
}

/// Loads an image from disk and converts it to grayscale.
///
/// Missing or undecodable files yield `AssetLoad`.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> VisautoResult<OwnedImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|err| VisautoError::AssetLoad {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    gray_from_rgba(&img.to_rgba8())
}

/// Writes an RGBA capture to `path`; the format follows the extension.
pub fn save_rgba<P: AsRef<Path>>(img: &RgbaImage, path: P) -> VisautoResult<()> {
    img.save(path).map_err(from_image_error)
}

pub(crate) fn from_image_error(err: ImageError) -> VisautoError {
    match err {
        ImageError::IoError(io) => VisautoError::Io(io),
        other => VisautoError::ImageIo {
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{gray_from_rgba, load_gray_image, save_rgba};
    use crate::VisautoError;
    use image::{Rgba, RgbaImage};

    #[test]
    fn missing_asset_is_asset_load_error() {
        let err = load_gray_image("definitely/not/here.png").unwrap_err();
        assert!(matches!(err, VisautoError::AssetLoad { .. }));
    }

    #[test]
    fn saved_capture_loads_back_as_same_luma() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        let img = RgbaImage::from_fn(5, 4, |x, y| {
            Rgba([(x * 40) as u8, (y * 50) as u8, ((x + y) * 20) as u8, 255])
        });
        save_rgba(&img, &path).unwrap();

        let loaded = load_gray_image(&path).unwrap();
        let expected = gray_from_rgba(&img).unwrap();
        assert_eq!(loaded, expected);
    }

    #[test]
    fn saving_to_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("shot.png");
        let img = RgbaImage::new(2, 2);
        assert!(matches!(
            save_rgba(&img, &path).unwrap_err(),
            VisautoError::Io(_)
        ));
    }
}
