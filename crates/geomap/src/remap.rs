//! Remap image cubes onto the geographic grid of a map table.
//!
//! The map table addresses a canonical sensor frame: the raw frame with its
//! rows flipped (sensor readout is top row first) and then transposed. Rather
//! than building that frame for every image, [`SensorLut`] folds both steps
//! into one flat source index per output pixel:
//!
//! ```text
//! canon[r][c] = raw[H - 1 - c][r]   =>   src = (H - 1 - col) * W + row
//! ```
//!
//! The LUT is built once per (table, sensor shape) and each frame is then a
//! plain gather, so the per-frame cost is `O(S²)` regardless of `H x W`.

use rayon::prelude::*;

use erg_common::cube::{GeoCube, ImageCube};
use erg_common::error::{ErgError, Result};

use crate::map_table::MapTable;

/// Pre-computed raw-frame offsets for every output pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorLut {
    /// `indices[u * size + v]` = offset into a row-major `height x width` frame
    pub indices: Vec<usize>,
    pub size: usize,
    pub height: usize,
    pub width: usize,
}

impl SensorLut {
    /// Resolve a map table against a raw sensor of `height x width`.
    ///
    /// The canonical frame is `width x height`, so rows must be `< width`
    /// and columns `< height`.
    pub fn new(table: &MapTable, height: usize, width: usize) -> Result<Self> {
        let mut indices = Vec::with_capacity(table.rows().len());
        for (pixel, (&row, &col)) in table.rows().iter().zip(table.cols()).enumerate() {
            if row >= width || col >= height {
                return Err(ErgError::shape_mismatch(format!(
                    "map index ({}, {}) at output pixel ({}, {}) outside canonical sensor frame {}x{}",
                    row,
                    col,
                    pixel / table.size(),
                    pixel % table.size(),
                    width,
                    height
                )));
            }
            indices.push((height - 1 - col) * width + row);
        }
        Ok(Self {
            indices,
            size: table.size(),
            height,
            width,
        })
    }

    /// Gather one raw frame into an output frame of `size * size` values.
    #[inline]
    pub fn apply(&self, frame: &[u16], out: &mut [f64]) {
        for (dst, &src) in out.iter_mut().zip(&self.indices) {
            *dst = f64::from(frame[src]);
        }
    }
}

/// Flip a row-major `height x width` frame vertically, then transpose it.
///
/// Returns the canonical `width x height` frame the map table indexes.
pub fn canonicalize_frame<T: Copy>(frame: &[T], height: usize, width: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(height * width);
    for r in 0..width {
        for c in 0..height {
            out.push(frame[(height - 1 - c) * width + r]);
        }
    }
    out
}

/// Resample every frame of `images` onto the map table's geographic grid.
///
/// Output is `N x S x S` doubles. An empty series yields a `0 x S x S` cube.
/// Fails with `ShapeMismatch` if any map index lies outside the sensor.
pub fn remap(images: &ImageCube, table: &MapTable) -> Result<GeoCube> {
    let (frames, height, width) = images.shape();
    let size = table.size();
    let lut = SensorLut::new(table, height, width)?;

    let out_len = size * size;
    let mut output = vec![0.0f64; frames * out_len];

    if frames > 0 && out_len > 0 {
        output
            .par_chunks_mut(out_len)
            .zip(images.data().par_chunks(height * width))
            .for_each(|(out, frame)| lut.apply(frame, out));
    }

    tracing::debug!(
        frames,
        sensor_height = height,
        sensor_width = width,
        size,
        altitude_km = table.altitude_km(),
        "remapped image cube"
    );

    GeoCube::new(output, frames, size, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map_table::GeoPosition;

    fn table(size: usize, rows: Vec<usize>, cols: Vec<usize>) -> MapTable {
        let positions = vec![GeoPosition { lat: 0.0, lon: 0.0 }; size * size];
        MapTable::new(size, rows, cols, positions, "Counts", 110).unwrap()
    }

    #[test]
    fn test_canonicalize_square() {
        // [[1,2],[3,4]] -> flip -> [[3,4],[1,2]] -> transpose -> [[3,1],[4,2]]
        assert_eq!(canonicalize_frame(&[1, 2, 3, 4], 2, 2), vec![3, 1, 4, 2]);
    }

    #[test]
    fn test_canonicalize_rectangular() {
        // 2 x 3 frame [[1,2,3],[4,5,6]] -> flip [[4,5,6],[1,2,3]] -> 3 x 2 [[4,1],[5,2],[6,3]]
        assert_eq!(
            canonicalize_frame(&[1, 2, 3, 4, 5, 6], 2, 3),
            vec![4, 1, 5, 2, 6, 3]
        );
    }

    #[test]
    fn test_lut_matches_canonical_frame() {
        let (h, w) = (3usize, 4usize);
        let frame: Vec<u16> = (0..(h * w) as u16).collect();
        let canon = canonicalize_frame(&frame, h, w);

        let rows: Vec<usize> = (0..4).map(|i| i % w).collect();
        let cols: Vec<usize> = (0..4).map(|i| (i * 2) % h).collect();
        let t = table(2, rows.clone(), cols.clone());
        let lut = SensorLut::new(&t, h, w).unwrap();

        for (p, &src) in lut.indices.iter().enumerate() {
            assert_eq!(frame[src], canon[rows[p] * h + cols[p]]);
        }
    }

    #[test]
    fn test_out_of_bounds_index() {
        // canonical frame of a 2 x 3 sensor is 3 x 2: row 3 is outside
        let t = table(1, vec![3], vec![0]);
        let err = SensorLut::new(&t, 2, 3).unwrap_err();
        assert!(matches!(err, ErgError::ShapeMismatch(_)));

        let t = table(1, vec![0], vec![2]);
        assert!(SensorLut::new(&t, 2, 3).is_err());
    }

    #[test]
    fn test_remap_empty_series() {
        let images = ImageCube::zeros(0, 2, 2);
        let t = table(3, vec![0; 9], vec![0; 9]);
        let out = remap(&images, &t).unwrap();
        assert_eq!(out.shape(), (0, 3, 3));
    }
}
