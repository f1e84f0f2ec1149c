//! Summed-area tables of a grayscale capture.
//!
//! Built once per correlation so the window sum and sum of squares of any
//! placement cost four lookups each.

use crate::ImageView;

/// Integral images of pixel values and squared pixel values.
///
/// Both tables have one extra leading row and column of zeros, so entry
/// `(x, y)` holds the sum over `[0, x) x [0, y)`.
pub(crate) struct IntegralImage {
    stride: usize,
    sum: Vec<u64>,
    sum_sq: Vec<u64>,
}

impl IntegralImage {
    pub(crate) fn new(image: ImageView<'_>) -> Self {
        let width = image.width();
        let height = image.height();
        let stride = width + 1;
        let mut sum = vec![0u64; stride * (height + 1)];
        let mut sum_sq = vec![0u64; stride * (height + 1)];

        for y in 0..height {
            let Some(row) = image.row(y) else {
                break;
            };
            let above = y * stride;
            let here = (y + 1) * stride;
            let mut run = 0u64;
            let mut run_sq = 0u64;
            for (x, &value) in row.iter().enumerate() {
                let v = u64::from(value);
                run += v;
                run_sq += v * v;
                sum[here + x + 1] = sum[above + x + 1] + run;
                sum_sq[here + x + 1] = sum_sq[above + x + 1] + run_sq;
            }
        }

        Self {
            stride,
            sum,
            sum_sq,
        }
    }

    /// Sum and sum of squares over the `w` x `h` window at `(x, y)`.
    ///
    /// The caller guarantees the window lies inside the image.
    #[inline]
    pub(crate) fn window(&self, x: usize, y: usize, w: usize, h: usize) -> (u64, u64) {
        let top = y * self.stride;
        let bottom = (y + h) * self.stride;
        let area = |table: &[u64]| {
            table[bottom + x + w] + table[top + x] - table[top + x + w] - table[bottom + x]
        };
        (area(&self.sum), area(&self.sum_sq))
    }
}
