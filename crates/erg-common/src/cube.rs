//! Time-indexed image cubes.

use crate::error::{ErgError, Result};

/// A stack of equally sized 2D frames.
///
/// Values are stored frame-major, then row-major within a frame:
/// `data[(k * rows + r) * cols + c]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube<T> {
    data: Vec<T>,
    frames: usize,
    rows: usize,
    cols: usize,
}

/// Raw sensor images (16-bit counts).
pub type ImageCube = Cube<u16>;

/// Images resampled onto a geographic grid, or derived products.
pub type GeoCube = Cube<f64>;

impl<T> Cube<T> {
    /// Wrap flat data, checking it matches `frames × rows × cols`.
    pub fn new(data: Vec<T>, frames: usize, rows: usize, cols: usize) -> Result<Self> {
        let expected = frames * rows * cols;
        if data.len() != expected {
            return Err(ErgError::shape_mismatch(format!(
                "cube data has {} values, expected {}x{}x{} = {}",
                data.len(),
                frames,
                rows,
                cols,
                expected
            )));
        }
        Ok(Self {
            data,
            frames,
            rows,
            cols,
        })
    }

    /// Build a cube from nested `[frame][row][col]` vectors.
    pub fn from_frames(frames: Vec<Vec<Vec<T>>>) -> Result<Self> {
        let n = frames.len();
        let rows = frames.first().map_or(0, |f| f.len());
        let cols = frames
            .first()
            .and_then(|f| f.first())
            .map_or(0, |r| r.len());

        let mut data = Vec::with_capacity(n * rows * cols);
        for (k, frame) in frames.into_iter().enumerate() {
            if frame.len() != rows {
                return Err(ErgError::shape_mismatch(format!(
                    "frame {} has {} rows, expected {}",
                    k,
                    frame.len(),
                    rows
                )));
            }
            for (r, row) in frame.into_iter().enumerate() {
                if row.len() != cols {
                    return Err(ErgError::shape_mismatch(format!(
                        "frame {} row {} has {} columns, expected {}",
                        k,
                        r,
                        row.len(),
                        cols
                    )));
                }
                data.extend(row);
            }
        }
        Self::new(data, n, rows, cols)
    }

    /// (frames, rows, cols)
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.frames, self.rows, self.cols)
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of values in one frame.
    pub fn frame_len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Borrow frame `k` as a flat row-major slice.
    pub fn frame(&self, k: usize) -> Option<&[T]> {
        if k >= self.frames {
            return None;
        }
        let len = self.frame_len();
        Some(&self.data[k * len..(k + 1) * len])
    }

    /// Iterate over frames in time order.
    ///
    /// Always yields `frames()` slices, empty ones when a frame has no pixels.
    pub fn iter_frames(&self) -> impl Iterator<Item = &[T]> {
        let len = self.frame_len();
        (0..self.frames).map(move |k| &self.data[k * len..(k + 1) * len])
    }

    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }
}

impl<T: Copy> Cube<T> {
    /// Value at frame `k`, row `r`, column `c`.
    pub fn get(&self, k: usize, r: usize, c: usize) -> Option<T> {
        if k >= self.frames || r >= self.rows || c >= self.cols {
            return None;
        }
        self.data.get((k * self.rows + r) * self.cols + c).copied()
    }
}

impl<T: Clone + Default> Cube<T> {
    /// A cube filled with `T::default()`.
    pub fn zeros(frames: usize, rows: usize, cols: usize) -> Self {
        Self {
            data: vec![T::default(); frames * rows * cols],
            frames,
            rows,
            cols,
        }
    }
}
