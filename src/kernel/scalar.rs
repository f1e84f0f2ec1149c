//! Scalar reference kernel.

use crate::kernel::integral::IntegralImage;
use crate::kernel::{placement_dims, Kernel};
use crate::score::ScoreMap;
use crate::template::TemplatePlan;
use crate::ImageView;

/// Scalar ZNCC kernel.
pub struct ZnccScalar;

/// Dot product of the zero-mean template with the window at `(x, y)`.
#[inline]
pub(crate) fn window_dot(image: ImageView<'_>, plan: &TemplatePlan, x: usize, y: usize) -> f64 {
    let tpl_width = plan.width();
    let mut dot = 0.0f64;
    for (ty, t_row) in plan.t_prime().chunks_exact(tpl_width).enumerate() {
        let Some(img_row) = image.row(y + ty) else {
            return 0.0;
        };
        let window = &img_row[x..x + tpl_width];
        dot += t_row
            .iter()
            .zip(window)
            .map(|(&t, &v)| t * f64::from(v))
            .sum::<f64>();
    }
    dot
}

/// Turns a window dot product and its integer sums into a score.
///
/// Window variance comes from exact integer sums, so flat windows are
/// detected without an epsilon.
#[inline]
pub(crate) fn zncc_score(plan: &TemplatePlan, dot: f64, sum_i: u64, sum_i2: u64) -> f32 {
    if plan.is_flat() {
        return 0.0;
    }
    let n = (plan.width() * plan.height()) as u128;
    let scaled_var_i = n * u128::from(sum_i2) - u128::from(sum_i) * u128::from(sum_i);
    if scaled_var_i == 0 {
        return 0.0;
    }
    let var_i = scaled_var_i as f64 / n as f64;

    let score = dot / (plan.var_t() * var_i).sqrt();
    if score.is_finite() {
        score.clamp(-1.0, 1.0) as f32
    } else {
        0.0
    }
}

/// Scores one row of placements using precomputed window sums.
pub(crate) fn score_row(
    image: ImageView<'_>,
    plan: &TemplatePlan,
    sums: &IntegralImage,
    y: usize,
    row: &mut [f32],
) {
    for (x, slot) in row.iter_mut().enumerate() {
        let (sum_i, sum_i2) = sums.window(x, y, plan.width(), plan.height());
        *slot = zncc_score(plan, window_dot(image, plan, x, y), sum_i, sum_i2);
    }
}

impl Kernel for ZnccScalar {
    fn score_at(image: ImageView<'_>, plan: &TemplatePlan, x: usize, y: usize) -> Option<f32> {
        let (cols, rows) = placement_dims(image, plan)?;
        if x >= cols || y >= rows {
            return None;
        }
        let mut sum_i = 0u64;
        let mut sum_i2 = 0u64;
        for ty in 0..plan.height() {
            let row = image.row(y + ty)?;
            for &value in &row[x..x + plan.width()] {
                let v = u64::from(value);
                sum_i += v;
                sum_i2 += v * v;
            }
        }
        Some(zncc_score(plan, window_dot(image, plan, x, y), sum_i, sum_i2))
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
        for (y, row) in scores.chunks_mut(cols).enumerate() {
            score_row(image, plan, &sums, y, row);
        }
        ScoreMap::from_vec(scores, cols, rows)
    }
}
