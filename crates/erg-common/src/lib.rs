//! Common types and utilities shared across the ERG/OMTI analysis crates.

pub mod config;
pub mod cube;
pub mod error;
pub mod naming;
pub mod store;
pub mod time;

pub use config::ErgConfig;
pub use cube::{Cube, GeoCube, ImageCube};
pub use error::{ErgError, Result};
pub use naming::{AsiVariable, DEV_SUFFIX, GMAP_SUFFIX};
pub use store::{Attributes, MemoryStore, Values, Variable, VariableStore};
pub use time::TimeGrid;
