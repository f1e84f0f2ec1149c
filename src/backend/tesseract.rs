use crate::backend::{OcrRequest, TextRecognizer};
use crate::image::io::from_image_error;
use crate::trace::trace_event;
use crate::util::{VisautoError, VisautoResult};
use image::RgbaImage;
use std::io::ErrorKind;
use std::process::Command;

/// Runs the `tesseract` executable on a temporary PNG of the capture.
#[derive(Clone, Copy, Debug, Default)]
pub struct TesseractRecognizer;

impl TesseractRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &RgbaImage, request: &OcrRequest<'_>) -> VisautoResult<String> {
        let input = tempfile::Builder::new()
            .prefix("visauto-ocr-")
            .suffix(".png")
            .tempfile()?;
        image
            .save_with_format(input.path(), image::ImageFormat::Png)
            .map_err(from_image_error)?;

        let mut cmd = Command::new(request.program);
        cmd.arg(input.path()).arg("stdout");
        if !request.lang.is_empty() {
            cmd.arg("-l").arg(request.lang);
        }
        cmd.args(request.config.split_whitespace());

        let output = cmd.output().map_err(|err| match err.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                VisautoError::RecognizerUnavailable {
                    program: request.program.to_path_buf(),
                }
            }
            _ => VisautoError::Io(err),
        })?;
        if !output.status.success() {
            return Err(VisautoError::Recognizer {
                reason: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout);
        let text = text.trim_end_matches(['\n', '\r', '\x0c', ' ']).to_owned();
        trace_event!("ocr_text", chars = text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::TesseractRecognizer;
    use crate::backend::{OcrRequest, TextRecognizer};
    use crate::VisautoError;
    use image::RgbaImage;
    use std::path::Path;

    #[test]
    fn missing_program_is_recognizer_unavailable() {
        let request = OcrRequest {
            lang: "eng",
            config: "--psm 7",
            program: Path::new("/nonexistent/visauto/tesseract"),
        };
        let err = TesseractRecognizer
            .recognize(&RgbaImage::new(4, 4), &request)
            .unwrap_err();
        assert!(matches!(err, VisautoError::RecognizerUnavailable { .. }));
    }
}
