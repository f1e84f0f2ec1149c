//! Dense correlation score maps.
//!
//! A map holds one score per template placement, row-major, with shape
//! `(source_h - tpl_h + 1) x (source_w - tpl_w + 1)`. A template larger than
//! the source yields an empty map rather than an error.

/// Score at a single placement, in local (source image) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    /// X coordinate (column) of the placement.
    pub x: usize,
    /// Y coordinate (row) of the placement.
    pub y: usize,
    /// ZNCC score at the placement.
    pub score: f32,
}

/// Row-major matrix of placement scores.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoreMap {
    width: usize,
    height: usize,
    scores: Vec<f32>,
}

impl ScoreMap {
    /// Map with no placements.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_vec(scores: Vec<f32>, width: usize, height: usize) -> Self {
        debug_assert_eq!(scores.len(), width * height);
        Self {
            width,
            height,
            scores,
        }
    }

    /// Number of placement columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of placement rows.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Returns the score at placement `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.scores.get(y * self.width + x).copied()
    }

    /// Row-major score buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.scores
    }

    /// Global maximum and its location.
    ///
    /// Ties resolve to the first cell in row-major order. Returns `None` for
    /// an empty map.
    pub fn max_loc(&self) -> Option<Peak> {
        let mut best: Option<Peak> = None;
        for (idx, &score) in self.scores.iter().enumerate() {
            if let Some(b) = best {
                if score <= b.score {
                    continue;
                }
            }
            best = Some(Peak {
                x: idx % self.width,
                y: idx / self.width,
                score,
            });
        }
        best
    }

    /// Every placement scoring at least `threshold`, in row-major order.
    ///
    /// Neighbouring placements around one object are all returned; nothing is
    /// suppressed.
    pub fn peaks_at_least(&self, threshold: f32) -> Vec<Peak> {
        self.scores
            .iter()
            .enumerate()
            .filter(|(_, &score)| score >= threshold)
            .map(|(idx, &score)| Peak {
                x: idx % self.width,
                y: idx / self.width,
                score,
            })
            .collect()
    }
}
