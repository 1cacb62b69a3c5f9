//! Assembly of per-sample coordinate-frame matrices.
//!
//! No orthogonality check is made; callers supply basis vectors that are
//! already orthogonal (e.g. from ephemeris-derived spin and sun directions).

use nalgebra::{Matrix3, Vector3};

use erg_common::error::{ErgError, Result};

fn normalized(v: &Vector3<f64>, index: usize) -> Result<Vector3<f64>> {
    let norm = v.norm();
    if !(norm >= f64::EPSILON) {
        return Err(ErgError::ZeroAxis { index });
    }
    Ok(v / norm)
}

/// Stack normalised `x[k]`, `y[k]`, `z[k]` as the rows of `M[k]`.
///
/// `M[k] · v` expresses a vector given in the parent frame in the frame
/// spanned by the three basis vectors.
pub fn cart_trans_matrix_make(
    x: &[Vector3<f64>],
    y: &[Vector3<f64>],
    z: &[Vector3<f64>],
) -> Result<Vec<Matrix3<f64>>> {
    if x.len() != y.len() || x.len() != z.len() {
        return Err(ErgError::shape_mismatch(format!(
            "basis series lengths differ: x={}, y={}, z={}",
            x.len(),
            y.len(),
            z.len()
        )));
    }

    x.iter()
        .zip(y)
        .zip(z)
        .enumerate()
        .map(|(k, ((xk, yk), zk))| {
            let rows = [
                normalized(xk, k)?.transpose(),
                normalized(yk, k)?.transpose(),
                normalized(zk, k)?.transpose(),
            ];
            Ok(Matrix3::from_rows(&rows))
        })
        .collect()
}

/// Single-sample form: normalised `x`, `y`, `z` as the columns of one matrix.
///
/// This is the transpose of the batch layout, so it maps frame coordinates
/// back into the parent frame.
pub fn cart_trans_matrix_single(
    x: &Vector3<f64>,
    y: &Vector3<f64>,
    z: &Vector3<f64>,
) -> Result<Matrix3<f64>> {
    Ok(Matrix3::from_columns(&[
        normalized(x, 0)?,
        normalized(y, 0)?,
        normalized(z, 0)?,
    ]))
}

/// Apply `matrices[k]` to `vectors[k]`; a single matrix is applied to all samples.
pub fn transform_vectors(
    matrices: &[Matrix3<f64>],
    vectors: &[Vector3<f64>],
) -> Result<Vec<Vector3<f64>>> {
    match matrices {
        [m] => Ok(vectors.iter().map(|v| m * v).collect()),
        _ if matrices.len() == vectors.len() => {
            Ok(matrices.iter().zip(vectors).map(|(m, v)| m * v).collect())
        }
        _ => Err(ErgError::shape_mismatch(format!(
            "{} frame matrices for {} vectors",
            matrices.len(),
            vectors.len()
        ))),
    }
}
