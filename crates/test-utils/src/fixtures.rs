//! Common test fixtures for ERG/OMTI analysis tests.
//!
//! Small hand-checked inputs whose expected outputs are worked out by hand.

/// Common variable names for testing.
pub mod names {
    /// Site code used throughout the tests (Shigaraki)
    pub const SITE: &str = "sta";

    /// Green line wavelength label
    pub const WAVELENGTH: &str = "5577";

    /// Raw image variable for SITE/WAVELENGTH
    pub const IMAGE_RAW: &str = "omti_asi_sta_5577_image_raw";

    /// Exposure time variable for SITE/WAVELENGTH
    pub const EXPOSURE_TIME: &str = "omti_asi_sta_5577_exposure_time";

    /// Map table variable at 110 km (altitude at segment 6)
    pub const MAP_TABLE_110: &str = "omti_asi_sta_5577_map_table_110";

    /// Remapped output name for IMAGE_RAW at 110 km
    pub const IMAGE_GMAP_110: &str = "omti_asi_sta_5577_image_raw_gmap_110";
}

/// 2 x 2 remap scenario.
pub mod remap_2x2 {
    /// Single raw frame, top row first.
    pub const FRAME: [[u16; 2]; 2] = [[1, 2], [3, 4]];

    /// Canonical frame after flip + transpose.
    pub const CANONICAL: [[u16; 2]; 2] = [[3, 1], [4, 2]];

    pub const MAP_ROW: [[i64; 2]; 2] = [[1, 1], [0, 0]];
    pub const MAP_COL: [[i64; 2]; 2] = [[0, 1], [0, 1]];

    /// Expected remapped frame.
    pub const EXPECTED: [[f64; 2]; 2] = [[4.0, 2.0], [3.0, 1.0]];
}

/// Deviation filter scenarios.
pub mod deviation {
    /// Three frames, one minute apart.
    pub const CONSTANT_TIMES: [f64; 3] = [0.0, 60.0, 120.0];
    pub const CONSTANT_VALUE: f64 = 5.0;

    /// Half-hour cadence, one hour window.
    pub const WINDOW_TIMES: [f64; 4] = [0.0, 1800.0, 3600.0, 5400.0];
    pub const WINDOW_VALUES: [f64; 4] = [10.0, 10.0, 20.0, 10.0];
    pub const WINDOW_SEC: f64 = 3600.0;

    /// Normalised residual of frame 2 before zero-mean recentring.
    pub const FRAME2_RAW_RESIDUAL: f64 = 0.5;
}

/// Tolerances used by numeric tests.
pub mod tolerance {
    pub const ROTATION: f64 = 1e-12;
    pub const DEVIATION: f64 = 1e-12;
}
