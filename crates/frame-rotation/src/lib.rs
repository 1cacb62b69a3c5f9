//! Vector rotation and reference-frame helpers.
//!
//! [`rotate`] applies Rodrigues' axis-angle rotation sample by sample to a
//! batch of vectors. [`cart_trans_matrix_make`] stacks per-sample basis
//! vectors into transform matrices which [`transform_vectors`] then applies,
//! e.g. to move spacecraft-frame vectors into a sky-fixed frame.

pub mod basis;
pub mod rodrigues;

pub use basis::{cart_trans_matrix_make, cart_trans_matrix_single, transform_vectors};
pub use rodrigues::{rotate, rotate_one, rotation_matrix};
