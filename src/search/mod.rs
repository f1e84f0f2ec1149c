//! Search, actuation and OCR operations shared by regions and matches.
//!
//! [`ImageMatch`] is implemented by [`Region`](crate::Region) and
//! [`Match`](crate::Match). Implementors supply their rectangle, desktop and
//! capture cache; every operation is provided on top of those.

mod poll;

use crate::backend::OcrRequest;
use crate::desktop::{ActionTarget, Desktop};
use crate::geometry::{Pad, Rect};
use crate::image::io::{gray_from_rgba, save_rgba};
use crate::image::OwnedImage;
use crate::kernel;
use crate::region::Match;
use crate::score::ScoreMap;
use crate::template::{Target, Template};
use crate::trace::{trace_event, trace_span};
use crate::util::{VisautoError, VisautoResult};
use image::RgbaImage;
use rand::Rng;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Operations valid on any region-like value.
///
/// Search methods take `&mut self` because they refresh the capture cache.
/// A single value is therefore never searched from two threads at once;
/// separate regions sharing one desktop may be used concurrently.
pub trait ImageMatch {
    /// Rectangle searched and acted on.
    fn rect(&self) -> Rect;

    /// Desktop providing capture, actuation, OCR, clock and settings.
    fn desktop(&self) -> &Arc<Desktop>;

    /// Last grayscale capture taken by a search.
    fn cached_capture(&self) -> Option<&OwnedImage>;

    /// Slot the grayscale capture cache lives in.
    fn cache_slot(&mut self) -> &mut Option<OwnedImage>;

    /// Description handed to hooks and callbacks.
    fn action_target(&self) -> ActionTarget<'_>;

    /// Drops the cached capture; the next search captures fresh pixels.
    fn invalidate_cache(&mut self) {
        *self.cache_slot() = None;
    }

    /// Fresh RGBA capture of the rectangle. Never touches the cache.
    fn capture(&self) -> VisautoResult<RgbaImage> {
        self.desktop().capture_provider().capture(self.rect())
    }

    /// Best match of `target` in the rectangle.
    ///
    /// With `cached` set, an existing cached capture is reused; otherwise
    /// fresh pixels are captured and stored as the new cache.
    fn find<'t>(
        &mut self,
        target: impl Into<Target<'t>>,
        similarity: f32,
        cached: bool,
    ) -> VisautoResult<Match> {
        let target = target.into();
        let name = target.name();
        let _span = trace_span!("find", asset = name.as_str(), similarity = similarity).entered();

        let template = target.load()?;
        let map = score_map(self, &template, cached)?;
        let rect = self.rect();
        let best = map.max_loc();
        trace_event!("find_best", score = best.map_or(f32::NAN, |p| p.score));
        match best {
            Some(peak) if peak.score >= similarity => Ok(Match::new(
                self.desktop().clone(),
                name,
                rect.offset(peak.x, peak.y, template.width(), template.height()),
                peak.score,
            )),
            _ => Err(VisautoError::NotFound {
                target: name,
                region: rect,
                best: best.map(|p| p.score),
            }),
        }
    }

    /// Every placement of `target` scoring at least `similarity`.
    ///
    /// Results come in row-major scan order. Overlapping placements around one
    /// object are all returned.
    fn find_all<'t>(
        &mut self,
        target: impl Into<Target<'t>>,
        similarity: f32,
        cached: bool,
    ) -> VisautoResult<Vec<Match>> {
        let target = target.into();
        let name = target.name();
        let _span =
            trace_span!("find_all", asset = name.as_str(), similarity = similarity).entered();

        let template = target.load()?;
        let map = score_map(self, &template, cached)?;
        let rect = self.rect();
        let matches: Vec<Match> = map
            .peaks_at_least(similarity)
            .into_iter()
            .map(|peak| {
                Match::new(
                    self.desktop().clone(),
                    name.clone(),
                    rect.offset(peak.x, peak.y, template.width(), template.height()),
                    peak.score,
                )
            })
            .collect();
        trace_event!("find_all_count", count = matches.len());
        Ok(matches)
    }

    /// Whether `target` is present; `false` exactly when `find` would fail
    /// with `NotFound`. Other errors propagate.
    fn exists<'t>(
        &mut self,
        target: impl Into<Target<'t>>,
        similarity: f32,
        cached: bool,
    ) -> VisautoResult<bool> {
        match self.find(target, similarity, cached) {
            Ok(_) => Ok(true),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Polls uncached `find` every scan interval until it succeeds or
    /// `timeout` elapses (`TimeoutNotFound`). At least one attempt is made.
    fn wait<'t>(
        &mut self,
        target: impl Into<Target<'t>>,
        timeout: Duration,
        similarity: f32,
    ) -> VisautoResult<Match> {
        poll::wait(self, target.into(), timeout, similarity)
    }

    /// Polls uncached `exists` until the target is gone, returning `true`,
    /// or fails with `TimeoutStillPresent` once `timeout` elapses.
    fn wait_vanish<'t>(
        &mut self,
        target: impl Into<Target<'t>>,
        timeout: Duration,
        similarity: f32,
    ) -> VisautoResult<bool> {
        poll::wait_vanish(self, target.into(), timeout, similarity)
    }

    /// Moves the pointer to a random point of the rectangle, far edges
    /// included. Returns the chosen point.
    fn hover(&self) -> VisautoResult<(i32, i32)> {
        let ((x0, x1), (y0, y1)) = self.rect().padded_ranges(Pad::default())?;
        let mut rng = rand::rng();
        let x = rng.random_range(x0..=x1);
        let y = rng.random_range(y0..=y1);

        let desktop = self.desktop();
        let settings = desktop.settings();
        let target = self.action_target();
        trace_event!("hover", x = x, y = y);
        match &settings.override_hover {
            Some(hook) => hook(&target, x, y)?,
            None => desktop
                .actuator()
                .move_to(x, y, settings.mouse_move_speed)?,
        }
        if let Some(callback) = &settings.hover_callback {
            callback(&target, x, y);
        }
        Ok((x, y))
    }

    /// Clicks a random point of the rectangle grown (or shrunk) by `pad`.
    /// Returns the chosen point.
    fn click(&self, pad: Pad) -> VisautoResult<(i32, i32)> {
        let ((x0, x1), (y0, y1)) = self.rect().padded_ranges(pad)?;
        let mut rng = rand::rng();
        let x = rng.random_range(x0..=x1);
        let y = rng.random_range(y0..=y1);

        let desktop = self.desktop();
        let settings = desktop.settings();
        let target = self.action_target();
        trace_event!("click", x = x, y = y);
        match &settings.override_click {
            Some(hook) => hook(&target, x, y, pad)?,
            None => {
                desktop
                    .actuator()
                    .move_to(x, y, settings.mouse_move_speed)?;
                desktop.actuator().click()?;
            }
        }
        if let Some(callback) = &settings.click_callback {
            callback(&target, x, y);
        }
        Ok((x, y))
    }

    /// Recognizes text in a fresh capture of the rectangle.
    fn ocr(&self, lang: &str, config: &str) -> VisautoResult<String> {
        let capture = self.capture()?;
        let desktop = self.desktop();
        let settings = desktop.settings();
        let request = OcrRequest {
            lang,
            config,
            program: &settings.tesseract_cmd,
        };
        desktop.recognizer().recognize(&capture, &request)
    }

    /// Writes a fresh capture of the rectangle to `path`.
    fn save_screenshot<P: AsRef<Path>>(&self, path: P) -> VisautoResult<()> {
        save_rgba(&self.capture()?, path)
    }
}

/// Correlates `template` against the current (or cached) grayscale capture.
fn score_map<S: ImageMatch + ?Sized>(
    region: &mut S,
    template: &Template,
    cached: bool,
) -> VisautoResult<ScoreMap> {
    if !cached || region.cached_capture().is_none() {
        let fresh = gray_from_rgba(&region.capture()?)?;
        *region.cache_slot() = Some(fresh);
    }
    let parallel = region.desktop().settings().parallel;
    Ok(match region.cached_capture() {
        Some(capture) => kernel::correlate(capture.view(), template.plan(), parallel),
        None => ScoreMap::empty(),
    })
}
