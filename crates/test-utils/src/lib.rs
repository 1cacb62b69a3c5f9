//! Shared test utilities for the ERG/OMTI analysis workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic image cubes, map table records and vector batches
//! - Fixtures for the documented remap/deviation/rotation scenarios
//! - Approximate-equality assertion macros
//! - Optional tracing output for tests
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your integration tests:
//!
//! ```ignore
//! use test_utils::{create_test_image_cube, fixtures};
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::*;
pub use generators::*;

use std::sync::Once;

static LOGGING: Once = Once::new();

/// Install a fmt subscriber honouring `RUST_LOG`, once per test binary.
///
/// Output goes through the test writer so it is captured unless `--nocapture`.
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if !(diff <= epsilon) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Component-wise approximate equality of two 3-vectors.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_vec3_approx_eq;
///
/// assert_vec3_approx_eq!(Vector3::new(0.0, 1.0, 0.0), Vector3::new(1e-17, 1.0, 0.0), 1e-12);
/// ```
#[macro_export]
macro_rules! assert_vec3_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let l = $left;
        let r = $right;
        for i in 0..3 {
            $crate::assert_approx_eq!(l[i], r[i], $epsilon);
        }
    }};
}

#[cfg(test)]
mod tests {
    use nalgebra::Vector3;

    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(1.0001, 1.0, 0.001);
        assert_approx_eq!(0.0, 0.0, 0.0001);
        assert_approx_eq!(-5.5, -5.500001, 0.0001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.1, 1.0, 0.001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_nan_fails() {
        assert_approx_eq!(f64::NAN, 1.0, 0.001);
    }

    #[test]
    fn test_assert_vec3_approx_eq_passes() {
        assert_vec3_approx_eq!(
            Vector3::new(1.0001, 2.0, -3.0),
            Vector3::new(1.0, 2.0, -3.0),
            0.001
        );
    }

    #[test]
    fn test_init_logging_twice() {
        super::init_test_logging();
        super::init_test_logging();
    }
}
