//! Property tests for the Rodrigues rotator and frame matrices.

use erg_common::error::ErgError;
use frame_rotation::{cart_trans_matrix_make, rotate, transform_vectors};
use nalgebra::Vector3;
use test_utils::{assert_approx_eq, assert_vec3_approx_eq, create_vector_batch, fixtures::tolerance};

const N: usize = 64;

fn batch() -> (Vec<Vector3<f64>>, Vec<Vector3<f64>>) {
    (
        create_vector_batch(N, 7, 1.0e4),
        create_vector_batch(N, 11, 3.0),
    )
}

#[test]
fn test_rotation_about_z_by_90() {
    let out = rotate(&[Vector3::new(1.0, 0.0, 0.0)], &[Vector3::new(0.0, 0.0, 1.0)], 90.0).unwrap();
    assert_vec3_approx_eq!(out[0], Vector3::new(0.0, 1.0, 0.0), tolerance::ROTATION);
}

#[test]
fn test_rotation_preserves_length() {
    let (vectors, axes) = batch();
    let out = rotate(&vectors, &axes, 123.4).unwrap();
    for (v, w) in vectors.iter().zip(&out) {
        let rel = (w.norm() - v.norm()).abs() / v.norm();
        assert!(rel < tolerance::ROTATION, "relative length change {}", rel);
    }
}

#[test]
fn test_zero_and_full_turn_identity() {
    let (vectors, axes) = batch();

    let zero = rotate(&vectors, &axes, 0.0).unwrap();
    assert_eq!(zero, vectors);

    let full = rotate(&vectors, &axes, 360.0).unwrap();
    for (v, w) in vectors.iter().zip(&full) {
        assert!((v - w).norm() / v.norm() < tolerance::ROTATION);
    }
}

#[test]
fn test_composition() {
    let (vectors, axes) = batch();
    let twice = rotate(&rotate(&vectors, &axes, 25.0).unwrap(), &axes, 40.0).unwrap();
    let once = rotate(&vectors, &axes, 65.0).unwrap();
    for (a, b) in twice.iter().zip(&once) {
        assert!((a - b).norm() / b.norm() < tolerance::ROTATION);
    }
}

#[test]
fn test_inverse_rotation() {
    let (vectors, axes) = batch();
    let back = rotate(&rotate(&vectors, &axes, 73.0).unwrap(), &axes, -73.0).unwrap();
    for (v, w) in vectors.iter().zip(&back) {
        assert!((v - w).norm() / v.norm() < tolerance::ROTATION);
    }
}

#[test]
fn test_zero_axis_rejected() {
    let err = rotate(&[Vector3::new(1.0, 2.0, 3.0)], &[Vector3::zeros()], 30.0).unwrap_err();
    assert!(matches!(err, ErgError::ZeroAxis { index: 0 }));
}

#[test]
fn test_sub_epsilon_axis_rejected() {
    let v = [Vector3::x(), Vector3::y()];
    let axes = [Vector3::z(), Vector3::new(1e-17, 0.0, 0.0)];
    let err = rotate(&v, &axes, 30.0).unwrap_err();
    assert!(matches!(err, ErgError::ZeroAxis { index: 1 }));

    // just above machine epsilon the axis is still usable
    let out = rotate(&[Vector3::y()], &[Vector3::new(1e-15, 0.0, 0.0)], 90.0).unwrap();
    assert_vec3_approx_eq!(out[0], Vector3::<f64>::z(), tolerance::ROTATION);
}

#[test]
fn test_axis_scale_is_irrelevant() {
    let v = [Vector3::new(0.3, -1.2, 2.0)];
    let a = rotate(&v, &[Vector3::new(1.0, 1.0, 0.0)], 50.0).unwrap();
    let b = rotate(&v, &[Vector3::new(1e-3, 1e-3, 0.0)], 50.0).unwrap();
    assert_vec3_approx_eq!(a[0], b[0], tolerance::ROTATION);
}

#[test]
fn test_frame_matrix_rows_unit_norm() {
    let x = create_vector_batch(N, 1, 50.0);
    let y = create_vector_batch(N, 2, 0.1);
    let z = create_vector_batch(N, 3, 7.0);
    let matrices = cart_trans_matrix_make(&x, &y, &z).unwrap();
    assert_eq!(matrices.len(), N);
    for m in &matrices {
        for r in 0..3 {
            assert_approx_eq!(m.row(r).norm(), 1.0, 1e-14);
        }
    }
}

#[test]
fn test_frame_transform_roundtrip_with_rotation() {
    // A frame rotated by θ about z: expressing a vector in it equals rotating by −θ.
    let theta = 30.0;
    let basis = |v: Vector3<f64>| rotate(&[v], &[Vector3::z()], theta).unwrap()[0];
    let m = cart_trans_matrix_make(
        &[basis(Vector3::x())],
        &[basis(Vector3::y())],
        &[basis(Vector3::z())],
    )
    .unwrap();

    let v = Vector3::new(2.0, -1.0, 0.5);
    let in_frame = transform_vectors(&m, &[v]).unwrap()[0];
    let expected = rotate(&[v], &[Vector3::z()], -theta).unwrap()[0];
    assert_vec3_approx_eq!(in_frame, expected, tolerance::ROTATION);
}
