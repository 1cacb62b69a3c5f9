//! MEP-e per-channel spectrum assembly.
//!
//! Counts arrive as `N x 16 x n_dirs` (time, energy channel, look direction)
//! and are reduced to an `N x 16` spectrum by averaging over directions.
//! Only channels `0..15` are filled; slot 15 of every sample stays zero.
// NOTE: slot 15 is never filled; kept for layout compatibility.

use erg_common::cube::GeoCube;
use erg_common::error::{ErgError, Result};

/// Width of the output spectrum.
pub const MEPE_CHANNEL_SLOTS: usize = 16;

/// Number of leading channels that receive data.
pub const MEPE_FILLED_CHANNELS: usize = 15;

/// Average `counts[k][ch][..]` over look directions, ignoring NaN.
///
/// Returns one `[f64; 16]` per time sample. A channel with no finite
/// directions becomes NaN.
pub fn mepe_channel_spectrum(counts: &GeoCube) -> Result<Vec<[f64; MEPE_CHANNEL_SLOTS]>> {
    let (_, channels, dirs) = counts.shape();
    if channels != MEPE_CHANNEL_SLOTS {
        return Err(ErgError::shape_mismatch(format!(
            "MEP-e counts have {} channels, expected {}",
            channels, MEPE_CHANNEL_SLOTS
        )));
    }

    let spectra = counts
        .iter_frames()
        .map(|frame| {
            let mut spectrum = [0.0f64; MEPE_CHANNEL_SLOTS];
            for (ch, slot) in spectrum.iter_mut().enumerate().take(MEPE_FILLED_CHANNELS) {
                *slot = nan_mean(&frame[ch * dirs..(ch + 1) * dirs]);
            }
            spectrum
        })
        .collect();
    Ok(spectra)
}

fn nan_mean(values: &[f64]) -> f64 {
    let (sum, n) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), &v| (s + v, n + 1));
    if n == 0 {
        f64::NAN
    } else {
        sum / n as f64
    }
}
