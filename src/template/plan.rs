//! Template plan precomputation for ZNCC.

use crate::image::ImageView;
use crate::util::{VisautoError, VisautoResult};

/// Precomputed statistics and zero-mean buffer for template matching.
///
/// Variance is derived from exact integer sums, so a flat template reports
/// exactly zero variance instead of a rounding residue.
#[derive(Clone, Debug)]
pub struct TemplatePlan {
    width: usize,
    height: usize,
    mean: f64,
    var_t: f64,
    t_prime: Vec<f64>,
}

impl TemplatePlan {
    /// Builds a plan from a template view.
    pub fn from_view(tpl: ImageView<'_>) -> VisautoResult<Self> {
        let width = tpl.width();
        let height = tpl.height();
        let count = width
            .checked_mul(height)
            .ok_or(VisautoError::InvalidDimensions { width, height })?;

        let mut sum = 0u64;
        let mut sum_sq = 0u64;
        for y in 0..height {
            let row = row_or_err(tpl, y)?;
            for &value in row {
                let v = u64::from(value);
                sum += v;
                sum_sq += v * v;
            }
        }

        let n = count as u128;
        let scaled_var = n * u128::from(sum_sq) - u128::from(sum) * u128::from(sum);
        let mean = sum as f64 / count as f64;
        let var_t = scaled_var as f64 / count as f64;

        let mut t_prime = Vec::with_capacity(count);
        for y in 0..height {
            let row = row_or_err(tpl, y)?;
            t_prime.extend(row.iter().map(|&value| f64::from(value) - mean));
        }

        Ok(Self {
            width,
            height,
            mean,
            var_t,
            t_prime,
        })
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the mean intensity of the template.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Returns the sum of squared deviations from the mean.
    pub fn var_t(&self) -> f64 {
        self.var_t
    }

    /// Returns true when every template pixel has the same value.
    pub fn is_flat(&self) -> bool {
        self.var_t <= 0.0
    }

    /// Returns the zero-mean template buffer in row-major order.
    pub fn t_prime(&self) -> &[f64] {
        &self.t_prime
    }
}

fn row_or_err(tpl: ImageView<'_>, y: usize) -> VisautoResult<&[u8]> {
    tpl.row(y).ok_or_else(|| VisautoError::BufferTooSmall {
        needed: (y + 1)
            .checked_mul(tpl.stride())
            .unwrap_or(usize::MAX),
        got: tpl.as_slice().len(),
    })
}
