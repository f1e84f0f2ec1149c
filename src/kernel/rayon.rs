//! Rayon-parallel kernel (feature-gated).
//!
//! Parallelizes over placement rows; each worker fills one row of the score
//! map, so results are identical to the scalar kernel.

use crate::kernel::integral::IntegralImage;
use crate::kernel::scalar::{score_row, ZnccScalar};
use crate::kernel::{placement_dims, Kernel};
use crate::score::ScoreMap;
use crate::template::TemplatePlan;
use crate::ImageView;
use rayon::prelude::*;

/// Row-parallel ZNCC kernel.
pub struct ZnccRayon;

impl Kernel for ZnccRayon {
    fn score_at(image: ImageView<'_>, plan: &TemplatePlan, x: usize, y: usize) -> Option<f32> {
        ZnccScalar::score_at(image, plan, x, y)
    }

    fn correlate(image: ImageView<'_>, plan: &TemplatePlan) -> ScoreMap {
        let Some((cols, rows)) = placement_dims(image, plan) else {
            return ScoreMap::empty();
        };
        if plan.is_flat() {
            return ScoreMap::from_vec(vec![0.0; cols * rows], cols, rows);
        }

        let sums = IntegralImage::new(image);
        let mut scores = vec![0.0f32; cols * rows];
        scores
            .par_chunks_mut(cols)
            .enumerate()
            .for_each(|(y, row)| score_row(image, plan, &sums, y, row));
        ScoreMap::from_vec(scores, cols, rows)
    }
}
