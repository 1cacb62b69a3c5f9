//! Exposure-time normalisation of raw imager counts.

use rayon::prelude::*;

use erg_common::cube::{GeoCube, ImageCube};
use erg_common::error::{ErgError, Result};

/// Divide every frame by its exposure time (seconds).
///
/// Frames whose exposure is zero, negative or non-finite become NaN.
pub fn counts_per_second(images: &ImageCube, exposure_sec: &[f64]) -> Result<GeoCube> {
    let (frames, rows, cols) = images.shape();
    if exposure_sec.len() != frames {
        return Err(ErgError::shape_mismatch(format!(
            "{} exposure times for {} frames",
            exposure_sec.len(),
            frames
        )));
    }

    let frame_len = rows * cols;
    let mut output = vec![0.0f64; frames * frame_len];
    if frame_len > 0 {
        output
            .par_chunks_mut(frame_len)
            .zip(images.data().par_chunks(frame_len))
            .zip(exposure_sec.par_iter())
            .for_each(|((out, frame), &exp)| {
                let valid = exp.is_finite() && exp > 0.0;
                for (o, &v) in out.iter_mut().zip(frame) {
                    *o = if valid { f64::from(v) / exp } else { f64::NAN };
                }
            });
    }

    let invalid = exposure_sec
        .iter()
        .filter(|e| !(e.is_finite() && **e > 0.0))
        .count();
    if invalid > 0 {
        tracing::warn!(invalid, frames, "frames with unusable exposure time set to NaN");
    }

    GeoCube::new(output, frames, rows, cols)
}
