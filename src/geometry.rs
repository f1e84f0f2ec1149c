//! Screen-space rectangles and click padding.

use crate::util::{VisautoError, VisautoResult};
use std::fmt;

/// Axis-aligned rectangle in absolute screen pixels, upper-left origin.
///
/// Width and height are always positive; the origin may be negative on
/// multi-monitor layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RectParts"))]
pub struct Rect {
    x: i32,
    y: i32,
    w: u32,
    h: u32,
}

impl Rect {
    /// Creates a rectangle, rejecting zero width or height.
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> VisautoResult<Self> {
        if w == 0 || h == 0 {
            return Err(VisautoError::InvalidDimensions {
                width: w as usize,
                height: h as usize,
            });
        }
        Ok(Self { x, y, w, h })
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn w(&self) -> u32 {
        self.w
    }

    pub fn h(&self) -> u32 {
        self.h
    }

    /// Returns the same rectangle moved to a new origin.
    pub fn with_origin(self, x: i32, y: i32) -> Self {
        Self { x, y, ..self }
    }

    /// Returns a rectangle of `w`x`h` at `(dx, dy)` relative to this origin.
    pub(crate) fn offset(&self, dx: usize, dy: usize, w: usize, h: usize) -> Self {
        Self {
            x: self.x.saturating_add(dx as i32),
            y: self.y.saturating_add(dy as i32),
            w: w as u32,
            h: h as u32,
        }
    }

    /// Returns the integer center point.
    pub fn center(&self) -> (i32, i32) {
        (
            self.x.saturating_add((self.w / 2) as i32),
            self.y.saturating_add((self.h / 2) as i32),
        )
    }

    /// Inclusive x and y sampling ranges after applying `pad`.
    ///
    /// The far edge (`x + w`, `y + h`) is part of the range.
    pub(crate) fn padded_ranges(&self, pad: Pad) -> VisautoResult<((i32, i32), (i32, i32))> {
        let x0 = self.x as i64 - pad.left as i64;
        let x1 = self.x as i64 + self.w as i64 + pad.right as i64;
        let y0 = self.y as i64 - pad.top as i64;
        let y1 = self.y as i64 + self.h as i64 + pad.bottom as i64;
        if x0 > x1 || y0 > y1 {
            return Err(VisautoError::InvalidPadding { pad });
        }
        let clamp = |v: i64| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        Ok(((clamp(x0), clamp(x1)), (clamp(y0), clamp(y1))))
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RectParts {
    x: i32,
    y: i32,
    w: u32,
    h: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RectParts> for Rect {
    type Error = VisautoError;

    fn try_from(parts: RectParts) -> VisautoResult<Self> {
        Rect::new(parts.x, parts.y, parts.w, parts.h)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ X:{}, Y:{}, W:{}, H:{} ]", self.x, self.y, self.w, self.h)
    }
}

/// Click-area adjustment in CSS order: top, right, bottom, left.
///
/// Positive values grow the clickable area beyond the rectangle, negative
/// values shrink it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pad {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Pad {
    pub fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same offset on all four sides.
    pub fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }
}

impl From<(i32, i32, i32, i32)> for Pad {
    fn from((top, right, bottom, left): (i32, i32, i32, i32)) -> Self {
        Self::new(top, right, bottom, left)
    }
}
