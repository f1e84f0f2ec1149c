//! Grayscale image views and owned buffers.
//!
//! Captures and templates are both reduced to 8-bit luma before correlation.
//! [`ImageView`] borrows such a buffer row by row; rows may be padded, in
//! which case `stride` (bytes between row starts) exceeds `width`.
//! [`OwnedImage`] is the contiguous form the capture cache and templates keep.

use crate::util::{VisautoError, VisautoResult};

pub mod io;

/// Borrowed 8-bit grayscale image.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> ImageView<'a> {
    /// View over tightly packed rows.
    pub fn from_slice(data: &'a [u8], width: usize, height: usize) -> VisautoResult<Self> {
        Self::new(data, width, height, width)
    }

    /// View over rows starting every `stride` bytes.
    pub fn new(data: &'a [u8], width: usize, height: usize, stride: usize) -> VisautoResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(VisautoError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Backing bytes, row padding included.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Luma at `(x, y)`, or `None` outside the image.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.row(y).map(|row| row[x])
    }

    /// The `width` pixels of row `y`.
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        self.data.get(start..start.checked_add(self.width)?)
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> VisautoResult<usize> {
    if width == 0 || height == 0 {
        return Err(VisautoError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(VisautoError::InvalidStride { width, stride });
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(VisautoError::InvalidDimensions { width, height })?;
    Ok(needed)
}

/// Owned contiguous grayscale image buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl OwnedImage {
    /// Wraps a row-major buffer of exactly `width * height` bytes.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> VisautoResult<Self> {
        if width == 0 || height == 0 {
            return Err(VisautoError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(VisautoError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(VisautoError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(VisautoError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Copies a (possibly strided) view into a contiguous buffer.
    pub fn from_view(view: ImageView<'_>) -> VisautoResult<Self> {
        let width = view.width();
        let height = view.height();
        let mut data = Vec::with_capacity(width.saturating_mul(height));
        for y in 0..height {
            let row = view.row(y).ok_or(VisautoError::BufferTooSmall {
                needed: (y + 1).saturating_mul(view.stride()),
                got: view.as_slice().len(),
            })?;
            data.extend_from_slice(row);
        }
        Self::new(data, width, height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major pixel buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }
}
