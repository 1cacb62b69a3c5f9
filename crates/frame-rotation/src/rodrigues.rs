//! Rodrigues rotation of vector batches.
//!
//! For a unit axis `a = (x, y, z)` and angle `θ`:
//!
//! ```text
//! R = cosθ·I + (1 − cosθ)·a·aᵀ + sinθ·[a]×
//! ```
//!
//! Reference: Goldstein, Classical Mechanics, §4.7.

use nalgebra::{Matrix3, Vector3};
use num_traits::Float;

use erg_common::error::{ErgError, Result};

/// Rotation matrix for a unit `axis` and an angle in radians.
///
/// The axis is assumed normalised.
pub fn rodrigues_matrix<T: Float + nalgebra::Scalar>(axis: &Vector3<T>, theta: T) -> Matrix3<T> {
    let (s, c) = theta.sin_cos();
    let t = T::one() - c;
    let (x, y, z) = (axis[0], axis[1], axis[2]);

    Matrix3::new(
        c + x * x * t,
        x * y * t - z * s,
        x * z * t + y * s,
        y * x * t + z * s,
        c + y * y * t,
        y * z * t - x * s,
        z * x * t - y * s,
        z * y * t + x * s,
        c + z * z * t,
    )
}

/// Normalise an axis, rejecting (numerically) zero vectors.
fn unit_axis(axis: &Vector3<f64>, index: usize) -> Result<Vector3<f64>> {
    let norm = axis.norm();
    if !(norm >= f64::EPSILON) {
        return Err(ErgError::ZeroAxis { index });
    }
    Ok(axis / norm)
}

/// Rotation matrix about an arbitrary (non-zero) axis by `angle_deg` degrees.
pub fn rotation_matrix(axis: &Vector3<f64>, angle_deg: f64) -> Result<Matrix3<f64>> {
    let unit = unit_axis(axis, 0)?;
    Ok(rodrigues_matrix(&unit, angle_deg.to_radians()))
}

/// Rotate a single vector about `axis` by `angle_deg` degrees.
pub fn rotate_one(vector: &Vector3<f64>, axis: &Vector3<f64>, angle_deg: f64) -> Result<Vector3<f64>> {
    Ok(rotation_matrix(axis, angle_deg)? * vector)
}

/// Rotate each `vectors[k]` about `axes[k]` by the shared angle `angle_deg`.
///
/// `axes` holds either one axis per vector, or exactly one axis applied to
/// the whole batch. Any zero-length axis rejects the batch with `ZeroAxis`.
pub fn rotate(
    vectors: &[Vector3<f64>],
    axes: &[Vector3<f64>],
    angle_deg: f64,
) -> Result<Vec<Vector3<f64>>> {
    let theta = angle_deg.to_radians();

    if axes.len() != vectors.len() && axes.len() != 1 {
        return Err(ErgError::shape_mismatch(format!(
            "{} rotation axes for {} vectors",
            axes.len(),
            vectors.len()
        )));
    }

    let units = axes
        .iter()
        .enumerate()
        .map(|(i, a)| unit_axis(a, i))
        .collect::<Result<Vec<_>>>()?;

    let rotated = if units.len() == 1 && vectors.len() != 1 {
        let r = rodrigues_matrix(&units[0], theta);
        vectors.iter().map(|v| r * v).collect()
    } else {
        vectors
            .iter()
            .zip(&units)
            .map(|(v, a)| rodrigues_matrix(a, theta) * v)
            .collect()
    };

    tracing::trace!(samples = vectors.len(), angle_deg, "rotated vector batch");
    Ok(rotated)
}
