//! Geographic remapping of all-sky imager frames.
//!
//! A [`MapTable`] is computed once per site and emission altitude. It tells,
//! for every pixel of a square geographic output grid, which sensor pixel to
//! sample. [`remap`] turns that table into a flat source-index LUT and then
//! gathers every frame of an image cube through it.
//!
//! ```text
//! raw frame (H x W, top row first)
//!      │
//!      ├─► flip rows, transpose        (canonical sensor frame, W x H)
//!      │
//!      └─► out[u,v] = canon[row[u,v], col[u,v]]   (nearest neighbour)
//! ```

pub mod map_table;
pub mod remap;

pub use map_table::{GeoPosition, MapTable, MapTableRecord, PixelMapRecord};
pub use remap::{canonicalize_frame, remap, SensorLut};
