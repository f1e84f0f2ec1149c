//! Regions and the matches found inside them.

use crate::desktop::{ActionTarget, Desktop};
use crate::geometry::Rect;
use crate::image::OwnedImage;
use crate::search::ImageMatch;
use crate::util::{VisautoError, VisautoResult};
use std::fmt;
use std::sync::Arc;

/// A rectangular screen area used as search and action scope.
///
/// The grayscale capture taken by the last search is cached. The cache is
/// only replaced by uncached searches or dropped by
/// [`ImageMatch::invalidate_cache`]; moving the region with
/// [`Region::shift_region`] keeps it.
#[derive(Clone)]
pub struct Region {
    rect: Rect,
    desktop: Arc<Desktop>,
    captured: Option<OwnedImage>,
}

impl Region {
    /// Region with explicit bounds.
    pub fn new(desktop: &Arc<Desktop>, x: i32, y: i32, w: u32, h: u32) -> VisautoResult<Self> {
        Ok(Self::from_rect(desktop, Rect::new(x, y, w, h)?))
    }

    /// Region over an already validated rectangle.
    pub fn from_rect(desktop: &Arc<Desktop>, rect: Rect) -> Self {
        Self {
            rect,
            desktop: desktop.clone(),
            captured: None,
        }
    }

    /// Region covering the whole capturable surface.
    pub fn full_screen(desktop: &Arc<Desktop>) -> VisautoResult<Self> {
        let (w, h) = desktop.display_size()?;
        Self::new(desktop, 0, 0, w, h)
    }

    /// All-or-nothing construction: no bounds gives the full screen, all four
    /// give an explicit region, anything else is a configuration error.
    pub fn from_parts(
        desktop: &Arc<Desktop>,
        x: Option<i32>,
        y: Option<i32>,
        w: Option<u32>,
        h: Option<u32>,
    ) -> VisautoResult<Self> {
        match (x, y, w, h) {
            (None, None, None, None) => Self::full_screen(desktop),
            (Some(x), Some(y), Some(w), Some(h)) => Self::new(desktop, x, y, w, h),
            _ => Err(VisautoError::Configuration(
                "region bounds must be all or nothing",
            )),
        }
    }

    /// Moves the region's origin. The cached capture is kept.
    pub fn shift_region(&mut self, x: i32, y: i32) {
        self.rect = self.rect.with_origin(x, y);
    }

    /// Returns true when a search has left a capture behind.
    pub fn has_cache(&self) -> bool {
        self.captured.is_some()
    }
}

impl ImageMatch for Region {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn desktop(&self) -> &Arc<Desktop> {
        &self.desktop
    }

    fn cached_capture(&self) -> Option<&OwnedImage> {
        self.captured.as_ref()
    }

    fn cache_slot(&mut self) -> &mut Option<OwnedImage> {
        &mut self.captured
    }

    fn action_target(&self) -> ActionTarget<'_> {
        ActionTarget {
            rect: self.rect,
            name: None,
            similarity: None,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.rect, f)
    }
}

impl fmt::Debug for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("rect", &self.rect)
            .field("cached", &self.captured.is_some())
            .finish()
    }
}

/// A located occurrence of a template.
///
/// Only produced by searches. Name, rectangle and similarity are fixed; the
/// match supports every [`ImageMatch`] operation scoped to its own
/// rectangle, with a capture cache of its own.
#[derive(Clone)]
pub struct Match {
    name: String,
    rect: Rect,
    similarity: f32,
    desktop: Arc<Desktop>,
    captured: Option<OwnedImage>,
}

impl Match {
    pub(crate) fn new(desktop: Arc<Desktop>, name: String, rect: Rect, similarity: f32) -> Self {
        Self {
            name,
            rect,
            similarity,
            desktop,
            captured: None,
        }
    }

    /// Asset that produced the match.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Correlation score, at least the threshold of the search that
    /// produced it.
    pub fn similarity(&self) -> f32 {
        self.similarity
    }

    /// Returns the left edge in screen pixels.
    pub fn x(&self) -> i32 {
        self.rect.x()
    }

    /// Returns the top edge in screen pixels.
    pub fn y(&self) -> i32 {
        self.rect.y()
    }

    /// Returns the width in pixels.
    pub fn w(&self) -> u32 {
        self.rect.w()
    }

    /// Returns the height in pixels.
    pub fn h(&self) -> u32 {
        self.rect.h()
    }
}

impl ImageMatch for Match {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn desktop(&self) -> &Arc<Desktop> {
        &self.desktop
    }

    fn cached_capture(&self) -> Option<&OwnedImage> {
        self.captured.as_ref()
    }

    fn cache_slot(&mut self) -> &mut Option<OwnedImage> {
        &mut self.captured
    }

    fn action_target(&self) -> ActionTarget<'_> {
        ActionTarget {
            rect: self.rect,
            name: Some(&self.name),
            similarity: Some(self.similarity),
        }
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ {}: X:{}, Y:{}, W:{}, H:{}, {:.5} ]",
            self.name,
            self.rect.x(),
            self.rect.y(),
            self.rect.w(),
            self.rect.h(),
            self.similarity
        )
    }
}

impl fmt::Debug for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("name", &self.name)
            .field("rect", &self.rect)
            .field("similarity", &self.similarity)
            .finish()
    }
}
