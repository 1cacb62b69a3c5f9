//! Temporal deviation filter.
//!
//! For each frame `k` the pixelwise mean over all frames within
//! `[t_k - window/2, t_k + window/2]` (inclusive) is removed and the residual
//! normalised by that mean:
//!
//! ```text
//! avg  = mean_{j in W_k} I[j]
//! den  = avg, with 0 replaced by 1
//! D[k] = (I[k] - avg) / den
//! D[k] -= nanmean(D[k])
//! ```
//!
//! The centred window adds no phase lag. Frames with an empty window stay
//! zero. NaN pixels propagate through the residual and are skipped by the
//! recentring mean.

use rayon::prelude::*;

use erg_common::cube::{Cube, GeoCube};
use erg_common::error::{ErgError, Result};
use erg_common::time::TimeGrid;

/// Default averaging window: one hour.
pub const DEFAULT_WINDOW_SEC: f64 = 3600.0;

/// Compute the deviation cube of `cube` sampled at `times`.
///
/// Accepts raw counts or floating point cubes; output is always `f64`
/// with the input's shape.
pub fn deviation<T>(times: &TimeGrid, cube: &Cube<T>, window_sec: f64) -> Result<GeoCube>
where
    T: Copy + Into<f64> + Sync,
{
    let (frames, rows, cols) = cube.shape();
    if times.len() != frames {
        return Err(ErgError::shape_mismatch(format!(
            "{} time samples for {} frames",
            times.len(),
            frames
        )));
    }

    let frame_len = rows * cols;
    let mut output = vec![0.0f64; frames * frame_len];
    if frame_len == 0 {
        return GeoCube::new(output, frames, rows, cols);
    }

    let t = times.as_slice();
    let half = window_sec / 2.0;
    let data = cube.data();

    output
        .par_chunks_mut(frame_len)
        .enumerate()
        .for_each(|(k, out)| {
            let window = times.window_indices(t[k] - half, t[k] + half);
            if window.is_empty() {
                return;
            }
            let count = window.len() as f64;

            // window sum accumulated into the output frame
            for j in window {
                let frame = &data[j * frame_len..(j + 1) * frame_len];
                for (acc, &v) in out.iter_mut().zip(frame) {
                    *acc += v.into();
                }
            }

            let current = &data[k * frame_len..(k + 1) * frame_len];
            for (d, &v) in out.iter_mut().zip(current) {
                let avg = *d / count;
                let den = if avg == 0.0 { 1.0 } else { avg };
                *d = (v.into() - avg) / den;
            }

            recenter(out);
        });

    tracing::debug!(frames, rows, cols, window_sec, "computed deviation cube");

    GeoCube::new(output, frames, rows, cols)
}

/// Subtract the NaN-ignoring mean from every pixel.
fn recenter(frame: &mut [f64]) {
    let (sum, n) = frame
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), &v| (s + v, n + 1));
    if n == 0 {
        return;
    }
    let mean = sum / n as f64;
    for v in frame.iter_mut() {
        *v -= mean;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(times: &[f64]) -> TimeGrid {
        TimeGrid::new(times.to_vec()).unwrap()
    }

    #[test]
    fn test_frame_count_must_match_times() {
        let cube = GeoCube::zeros(3, 2, 2);
        let err = deviation(&grid(&[0.0, 1.0]), &cube, 60.0).unwrap_err();
        assert!(matches!(err, ErgError::ShapeMismatch(_)));
    }

    #[test]
    fn test_empty_series() {
        let cube = GeoCube::zeros(0, 4, 4);
        let out = deviation(&TimeGrid::empty(), &cube, DEFAULT_WINDOW_SEC).unwrap();
        assert_eq!(out.shape(), (0, 4, 4));
    }

    #[test]
    fn test_negative_window_leaves_zero() {
        let cube = GeoCube::new(vec![1.0, 2.0, 3.0, 4.0], 1, 2, 2).unwrap();
        let out = deviation(&grid(&[0.0]), &cube, -10.0).unwrap();
        assert!(out.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_single_frame_residual_before_recentre() {
        // one frame: avg equals the frame, residual is zero everywhere
        let cube = GeoCube::new(vec![1.0, 0.0, 3.0, 4.0], 1, 2, 2).unwrap();
        let out = deviation(&grid(&[0.0]), &cube, 60.0).unwrap();
        assert!(out.data().iter().all(|&v| v.abs() < 1e-15));
    }

    #[test]
    fn test_zero_average_uses_unit_denominator() {
        // pixel 0: frames 0 and 2 over window {0,1}: avg = (0 + 2)/2 = 1
        // pixel 1: always 0 -> avg 0 -> den 1 -> residual 0
        let cube = GeoCube::new(vec![0.0, 0.0, 2.0, 0.0], 2, 1, 2).unwrap();
        let out = deviation(&grid(&[0.0, 10.0]), &cube, 100.0).unwrap();

        // frame 0 raw: [-1, 0] -> mean -0.5 -> [-0.5, 0.5]
        assert_eq!(out.frame(0).unwrap(), &[-0.5, 0.5]);
        // frame 1 raw: [1, 0] -> mean 0.5 -> [0.5, -0.5]
        assert_eq!(out.frame(1).unwrap(), &[0.5, -0.5]);
    }

    #[test]
    fn test_nan_ignored_by_recentre() {
        let cube = GeoCube::new(vec![f64::NAN, 2.0, 4.0], 1, 1, 3).unwrap();
        let out = deviation(&grid(&[0.0]), &cube, 60.0).unwrap();
        let frame = out.frame(0).unwrap();
        assert!(frame[0].is_nan());
        assert_eq!(&frame[1..], &[0.0, 0.0]);
    }

    #[test]
    fn test_recenter_all_nan() {
        let mut frame = [f64::NAN, f64::NAN];
        recenter(&mut frame);
        assert!(frame.iter().all(|v| v.is_nan()));
    }
}
