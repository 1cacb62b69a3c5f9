//! Variable naming conventions for OMTI all-sky imager products.
//!
//! Raw inputs follow `omti_asi_<site>_<wavelength>_<product>`; derived outputs
//! append a suffix to the source name (`_gmap_<altitude_km>`, `_dev`).

use std::fmt;

use crate::error::{ErgError, Result};

/// Suffix marker for geographically remapped cubes.
pub const GMAP_SUFFIX: &str = "gmap";

/// Suffix for temporal-deviation cubes.
pub const DEV_SUFFIX: &str = "dev";

/// Segment index (split on `_`) carrying the altitude in a map-table name.
pub const MAP_ALTITUDE_SEGMENT: usize = 6;

/// Identifies one imager channel: site code plus emission wavelength.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AsiVariable {
    /// Three-letter site code (e.g. "sta", "ath", "rsb")
    pub site: String,
    /// Wavelength label in 0.1 nm (e.g. "5577", "6300")
    pub wavelength: String,
}

impl AsiVariable {
    pub fn new(site: impl Into<String>, wavelength: impl Into<String>) -> Self {
        Self {
            site: site.into().to_lowercase(),
            wavelength: wavelength.into(),
        }
    }

    /// Name of the raw image variable.
    pub fn image_raw(&self) -> String {
        format!("{}_image_raw", self.prefix())
    }

    /// Name of the exposure time variable.
    pub fn exposure_time(&self) -> String {
        format!("{}_exposure_time", self.prefix())
    }

    /// Name of the exposure-normalised image variable.
    pub fn image_cps(&self) -> String {
        format!("{}_image_cps", self.prefix())
    }

    fn prefix(&self) -> String {
        format!("omti_asi_{}_{}", self.site, self.wavelength)
    }

    /// Parse the site and wavelength out of any `omti_asi_<site>_<wl>_...` name.
    pub fn parse(name: &str) -> Result<Self> {
        let mut parts = name.split('_');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some("omti"), Some("asi"), Some(site), Some(wl)) if !site.is_empty() && !wl.is_empty() => {
                Ok(Self::new(site, wl))
            }
            _ => Err(ErgError::InvalidName(name.to_string())),
        }
    }
}

impl fmt::Display for AsiVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// Altitude in km encoded at segment 6 of a map-table variable name.
pub fn map_altitude_km(map_name: &str) -> Result<u32> {
    map_name
        .split('_')
        .nth(MAP_ALTITUDE_SEGMENT)
        .and_then(|seg| seg.parse().ok())
        .ok_or_else(|| ErgError::InvalidName(map_name.to_string()))
}

/// Output name for a remapped cube: `<source>_gmap_<altitude_km>`.
pub fn gmap_name(source: &str, altitude_km: u32) -> String {
    format!("{}_{}_{}", source, GMAP_SUFFIX, altitude_km)
}

/// Output name for a deviation cube: `<source>_dev`.
pub fn dev_name(source: &str) -> String {
    format!("{}_{}", source, DEV_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asi_names() {
        let var = AsiVariable::new("STA", "5577");
        assert_eq!(var.image_raw(), "omti_asi_sta_5577_image_raw");
        assert_eq!(var.exposure_time(), "omti_asi_sta_5577_exposure_time");
        assert_eq!(var.to_string(), "omti_asi_sta_5577");
    }

    #[test]
    fn test_parse_roundtrip() {
        let var = AsiVariable::parse("omti_asi_rsb_6300_image_raw").unwrap();
        assert_eq!(var.site, "rsb");
        assert_eq!(var.wavelength, "6300");
        assert!(AsiVariable::parse("themis_asi_fsmi").is_err());
    }

    #[test]
    fn test_map_altitude() {
        assert_eq!(map_altitude_km("omti_asi_sta_5577_map_table_110").unwrap(), 110);
        assert_eq!(map_altitude_km("omti_asi_sta_6300_map_table_250_v2").unwrap(), 250);
        assert!(map_altitude_km("omti_asi_sta_5577_map").is_err());
        assert!(map_altitude_km("omti_asi_sta_5577_map_table_high").is_err());
    }

    #[test]
    fn test_output_names() {
        assert_eq!(
            gmap_name("omti_asi_sta_5577_image_raw", 110),
            "omti_asi_sta_5577_image_raw_gmap_110"
        );
        assert_eq!(
            dev_name("omti_asi_sta_5577_image_raw_gmap_110"),
            "omti_asi_sta_5577_image_raw_gmap_110_dev"
        );
    }
}
