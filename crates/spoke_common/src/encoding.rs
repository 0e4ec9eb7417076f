//! Dense feature matrices and sinusoidal positional encoding.
//!
//! Observation vectors for both the device (one row per coordinate) and the
//! compute graph (one row per node) are built by encoding small integer
//! positions with interleaved sine/cosine features.

use serde::{Deserialize, Serialize};

/// Frequency base used for every positional encoding in the workspace.
pub const ENCODING_BASE: f64 = 1000.0;

/// A dense row-major matrix of `f64` features.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl FeatureMatrix {
    /// Creates a zero-filled matrix of the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns (the feature width).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns row `r` as a slice.
    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Returns row `r` as a mutable slice.
    pub fn row_mut(&mut self, r: usize) -> &mut [f64] {
        &mut self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Returns the value at `(r, c)`.
    pub fn get(&self, r: usize, c: usize) -> f64 {
        self.data[r * self.cols + c]
    }

    /// Returns a new matrix with the columns of `other` appended to `self`.
    ///
    /// # Panics
    ///
    /// Panics if the two matrices have a different number of rows.
    pub fn hconcat(&self, other: &FeatureMatrix) -> FeatureMatrix {
        assert_eq!(self.rows, other.rows, "row counts must match to concatenate");
        let mut out = FeatureMatrix::zeros(self.rows, self.cols + other.cols);
        for r in 0..self.rows {
            let row = out.row_mut(r);
            row[..self.cols].copy_from_slice(self.row(r));
            row[self.cols..].copy_from_slice(other.row(r));
        }
        out
    }

    /// Returns the underlying row-major buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Encodes each point's coordinates with `width` sinusoidal features per axis.
///
/// Every point must have the same number of axes `d`; the result has one row
/// per point and `d * width` columns, laid out axis by axis. Feature `i` of an
/// axis value `p` is `sin(p / base^(i / width))` for even `i` and
/// `cos(p / base^((i - 1) / width))` for odd `i`.
pub fn positional_encoding(points: &[Vec<f64>], width: usize, base: f64) -> FeatureMatrix {
    let axes = points.first().map_or(0, Vec::len);
    let mut out = FeatureMatrix::zeros(points.len(), axes * width);
    for (r, point) in points.iter().enumerate() {
        debug_assert_eq!(point.len(), axes);
        let row = out.row_mut(r);
        for (axis, &p) in point.iter().enumerate() {
            let block = &mut row[axis * width..(axis + 1) * width];
            for (i, slot) in block.iter_mut().enumerate() {
                let even = i - i % 2;
                let angle = p / base.powf(even as f64 / width as f64);
                *slot = if i % 2 == 0 { angle.sin() } else { angle.cos() };
            }
        }
    }
    out
}
