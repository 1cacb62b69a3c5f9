//! Processing of OMTI all-sky imager cubes and ERG particle spectra.
//!
//! Kernels are pure functions over in-memory cubes:
//!
//! - [`deviation()`]: sliding-window temporal deviation with per-frame recentring
//! - [`counts_per_second`]: exposure-time normalisation of raw counts
//! - [`mepe_channel_spectrum`]: per-channel direction averages for MEP-e counts
//!
//! The [`pipeline`] module binds kernels to a [`VariableStore`](erg_common::VariableStore):
//! it fetches inputs by name, reports missing ones and stores outputs under
//! the conventional derived names.
//!
//! ```text
//! omti_asi_sta_5577_image_raw ──┐
//!                               ├─► omti_asi_gmap ──► ..._image_raw_gmap_110
//! omti_asi_..._map_table_110 ───┘                          │
//!                                                          ▼
//!                                          omti_asi_dev ──► ..._gmap_110_dev
//! ```

pub mod config;
pub mod deviation;
pub mod exposure;
pub mod mepe;
pub mod pipeline;

pub use config::ProcessorConfig;
pub use deviation::{deviation, DEFAULT_WINDOW_SEC};
pub use exposure::counts_per_second;
pub use mepe::{mepe_channel_spectrum, MEPE_CHANNEL_SLOTS, MEPE_FILLED_CHANNELS};
pub use pipeline::{omti_asi_counts_per_second, omti_asi_dev, omti_asi_gmap};
