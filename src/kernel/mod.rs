//! Correlation kernel implementations.
//!
//! Kernels compute `TM_CCOEFF_NORMED`-style scores (zero-mean normalized
//! cross-correlation) for every placement of a template inside a source image.
//! Placements where either the template or the source window is flat score
//! `0.0`. Window sums come from summed-area tables built once per call; only
//! the template dot product is evaluated per pixel.

use crate::score::ScoreMap;
use crate::template::TemplatePlan;
use crate::trace::trace_span;
use crate::ImageView;

/// Kernel trait for scoring and full scans.
pub trait Kernel {
    /// Computes the score at a single placement (top-left coordinates).
    ///
    /// Returns `None` when the placement does not fit inside `image`.
    fn score_at(image: ImageView<'_>, plan: &TemplatePlan, x: usize, y: usize)
        -> Option<f32>;

    /// Scores every valid placement.
    ///
    /// Returns an empty map when the template exceeds the image in either
    /// dimension.
    fn correlate(image: ImageView<'_>, plan: &TemplatePlan) -> ScoreMap;
}

mod integral;
pub mod scalar;

#[cfg(feature = "rayon")]
pub mod rayon;

/// Runs the scalar kernel, or the row-parallel one when `parallel` is set and
/// the `rayon` feature is enabled.
pub fn correlate(image: ImageView<'_>, plan: &TemplatePlan, parallel: bool) -> ScoreMap {
    let _span = trace_span!(
        "correlate",
        width = image.width(),
        height = image.height(),
        tpl_width = plan.width(),
        tpl_height = plan.height()
    )
    .entered();

    #[cfg(feature = "rayon")]
    {
        if parallel {
            return <self::rayon::ZnccRayon as Kernel>::correlate(image, plan);
        }
    }
    #[cfg(not(feature = "rayon"))]
    let _ = parallel;

    <scalar::ZnccScalar as Kernel>::correlate(image, plan)
}

/// Placement grid size, or `None` when the template does not fit.
pub(crate) fn placement_dims(image: ImageView<'_>, plan: &TemplatePlan) -> Option<(usize, usize)> {
    if image.width() < plan.width() || image.height() < plan.height() {
        return None;
    }
    Some((
        image.width() - plan.width() + 1,
        image.height() - plan.height() + 1,
    ))
}
