//! Test data generators for synthetic imager and vector data.
//!
//! These generators create predictable, verifiable patterns that can be used
//! across the test suite.

use erg_common::cube::{GeoCube, ImageCube};
use erg_common::time::TimeGrid;
use nalgebra::Vector3;
use serde_json::{json, Value};

/// Creates an image cube with predictable values.
///
/// Each pixel value is `k * 1000 + r * 10 + c` (clamped to u16), so a test
/// can tell which frame, row and column a sample came from as long as the
/// frame is at most 10 columns wide.
///
/// # Example
///
/// ```
/// use test_utils::create_test_image_cube;
///
/// let cube = create_test_image_cube(2, 3, 4);
/// assert_eq!(cube.shape(), (2, 3, 4));
/// assert_eq!(cube.get(1, 2, 3), Some(1023));
/// ```
pub fn create_test_image_cube(frames: usize, height: usize, width: usize) -> ImageCube {
    let mut data = Vec::with_capacity(frames * height * width);
    for k in 0..frames {
        for r in 0..height {
            for c in 0..width {
                data.push((k * 1000 + r * 10 + c).min(u16::MAX as usize) as u16);
            }
        }
    }
    ImageCube::new(data, frames, height, width).expect("generator shape is consistent")
}

/// Creates an image cube where every pixel of frame `k` equals `values[k]`.
pub fn create_constant_image_cube(values: &[u16], height: usize, width: usize) -> ImageCube {
    let data = values
        .iter()
        .flat_map(|&v| std::iter::repeat(v).take(height * width))
        .collect();
    ImageCube::new(data, values.len(), height, width).expect("generator shape is consistent")
}

/// Creates a floating point cube where every pixel of frame `k` equals `values[k]`.
pub fn create_constant_geo_cube(values: &[f64], size: usize) -> GeoCube {
    let data = values
        .iter()
        .flat_map(|&v| std::iter::repeat(v).take(size * size))
        .collect();
    GeoCube::new(data, values.len(), size, size).expect("generator shape is consistent")
}

/// Creates a floating point cube with a spatial gradient plus a per-frame offset.
///
/// Pixel value: `base[k] + r + 0.5 * c`.
pub fn create_gradient_geo_cube(base: &[f64], size: usize) -> GeoCube {
    let mut data = Vec::with_capacity(base.len() * size * size);
    for &b in base {
        for r in 0..size {
            for c in 0..size {
                data.push(b + r as f64 + 0.5 * c as f64);
            }
        }
    }
    GeoCube::new(data, base.len(), size, size).expect("generator shape is consistent")
}

/// Uniformly spaced time grid starting at `start` with `step` seconds.
pub fn create_time_grid(start: f64, step: f64, n: usize) -> TimeGrid {
    TimeGrid::new((0..n).map(|i| start + step * i as f64).collect())
        .expect("positive step yields an increasing grid")
}

/// Builds a map-table record from nested index arrays.
///
/// Positions are a regular 1° lat/lon lattice anchored at (35°N, 136°E).
pub fn create_map_record(rows: Vec<Vec<i64>>, cols: Vec<Vec<i64>>, z_title: &str) -> Value {
    let size = rows.len();
    let pos: Vec<Vec<[f64; 2]>> = (0..size)
        .map(|u| {
            (0..size)
                .map(|v| [35.0 - u as f64, 136.0 + v as f64])
                .collect()
        })
        .collect();
    json!({
        "pos": pos,
        "map": {"row": rows, "col": cols},
        "z_title": z_title,
    })
}

/// Map record whose output pixel `(u, v)` samples canonical pixel `(u, v)`.
pub fn create_identity_map_record(size: usize) -> Value {
    let rows = (0..size).map(|u| vec![u as i64; size]).collect();
    let cols = (0..size).map(|_| (0..size as i64).collect()).collect();
    create_map_record(rows, cols, "Counts")
}

/// Map record whose indices are scattered across a `height x width` sensor.
///
/// Indices stay inside the canonical `width x height` frame.
pub fn create_scattered_map_record(size: usize, height: usize, width: usize) -> Value {
    let mut rows = Vec::with_capacity(size);
    let mut cols = Vec::with_capacity(size);
    for u in 0..size {
        rows.push((0..size).map(|v| ((u * 7 + v * 3) % width) as i64).collect());
        cols.push((0..size).map(|v| ((u * 5 + v * 11) % height) as i64).collect());
    }
    create_map_record(rows, cols, "Counts")
}

/// Deterministic pseudo-random vectors in `[-scale, scale)^3`.
///
/// Uses a fixed LCG so results are reproducible without a rand dependency.
pub fn create_vector_batch(n: usize, seed: u64, scale: f64) -> Vec<Vector3<f64>> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
    };
    (0..n)
        .map(|_| Vector3::new(next() * scale, next() * scale, next() * scale))
        .collect()
}
