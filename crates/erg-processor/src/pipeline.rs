//! Store-bound processing operations.
//!
//! Each operation fetches its inputs from a [`VariableStore`], runs a kernel
//! and stores the result under a derived name, which it returns. A missing
//! input is logged and turns the call into a no-op (`Ok(None)`); any other
//! failure is returned to the caller.

use serde_json::Value;
use tracing::{info, warn};

use erg_common::error::{ErgError, Result};
use erg_common::naming::{self, AsiVariable};
use erg_common::store::{Attributes, Values, Variable, VariableStore};
use erg_common::time::TimeGrid;
use geomap::{remap, MapTable};

use crate::deviation::deviation;
use crate::exposure::counts_per_second;

/// Fetch a variable, logging and returning None when it is absent.
fn fetch_or_report<'a, S: VariableStore>(store: &'a S, name: &str) -> Result<Option<&'a Variable>> {
    match store.fetch(name) {
        Ok(var) => Ok(Some(var)),
        Err(e) if e.is_missing_input() => {
            warn!(variable = name, error = %e, "input not available, skipping");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// First and last sample time as RFC 3339 strings, empty for an empty grid.
fn time_span(times: &TimeGrid) -> (String, String) {
    times
        .span()
        .map(|(start, end)| (start.to_rfc3339(), end.to_rfc3339()))
        .unwrap_or_default()
}

/// Remap a raw image variable onto the geographic grid of a map table.
///
/// The altitude is read from segment 6 of `map_name`; the output is stored
/// as `<image_name>_gmap_<altitude_km>` with `pos` and `z_title` attributes
/// taken from the map table.
pub fn omti_asi_gmap<S: VariableStore>(
    store: &mut S,
    image_name: &str,
    map_name: &str,
) -> Result<Option<String>> {
    let Some(image) = fetch_or_report(store, image_name)? else {
        return Ok(None);
    };
    let Some(map_var) = fetch_or_report(store, map_name)? else {
        return Ok(None);
    };

    let altitude_km = naming::map_altitude_km(map_name)?;
    let table = MapTable::from_value(map_var.as_record(map_name)?, altitude_km)?;
    let cube = remap(image.as_image(image_name)?, &table)?;
    let times = image.times.clone();

    let mut attrs = Attributes::new();
    attrs.insert("pos".to_string(), table.positions_value());
    attrs.insert("z_title".to_string(), Value::String(table.z_title().to_string()));

    let out_name = naming::gmap_name(image_name, altitude_km);
    let (start, end) = time_span(&times);
    info!(
        output = %out_name,
        frames = cube.frames(),
        %start,
        %end,
        size = table.size(),
        altitude_km,
        "stored geographic map"
    );
    store.store(&out_name, Variable::new(times, Values::Grid(cube)).with_attrs(attrs));

    Ok(Some(out_name))
}

/// Compute the temporal deviation of a cube variable, stored as `<name>_dev`.
///
/// Works on raw image cubes and on remapped grids. Source attributes are
/// carried over unchanged.
pub fn omti_asi_dev<S: VariableStore>(
    store: &mut S,
    name: &str,
    window_sec: f64,
) -> Result<Option<String>> {
    let Some(var) = fetch_or_report(store, name)? else {
        return Ok(None);
    };

    let cube = match &var.values {
        Values::Image(cube) => deviation(&var.times, cube, window_sec)?,
        Values::Grid(cube) => deviation(&var.times, cube, window_sec)?,
        _ => {
            return Err(ErgError::TypeMismatch {
                name: name.to_string(),
                expected: "a cube",
            })
        }
    };
    let times = var.times.clone();
    let attrs = var.attrs.clone();

    let out_name = naming::dev_name(name);
    let (start, end) = time_span(&times);
    info!(
        output = %out_name,
        frames = cube.frames(),
        %start,
        %end,
        window_sec,
        "stored deviation cube"
    );
    store.store(&out_name, Variable::new(times, Values::Grid(cube)).with_attrs(attrs));

    Ok(Some(out_name))
}

/// Normalise raw counts by exposure time for one site/wavelength.
///
/// Reads `omti_asi_<site>_<wl>_image_raw` and `..._exposure_time`, stores
/// `..._image_cps`.
pub fn omti_asi_counts_per_second<S: VariableStore>(
    store: &mut S,
    site: &str,
    wavelength: &str,
) -> Result<Option<String>> {
    let asi = AsiVariable::new(site, wavelength);
    let image_name = asi.image_raw();
    let exposure_name = asi.exposure_time();

    let Some(image) = fetch_or_report(store, &image_name)? else {
        return Ok(None);
    };
    let Some(exposure) = fetch_or_report(store, &exposure_name)? else {
        return Ok(None);
    };

    let cube = counts_per_second(image.as_image(&image_name)?, exposure.as_series(&exposure_name)?)?;
    let times = image.times.clone();
    let mut attrs = image.attrs.clone();
    attrs.insert("z_title".to_string(), Value::String("Counts/s".to_string()));

    let out_name = asi.image_cps();
    let (start, end) = time_span(&times);
    info!(
        output = %out_name,
        frames = cube.frames(),
        %start,
        %end,
        "stored exposure-normalised images"
    );
    store.store(&out_name, Variable::new(times, Values::Grid(cube)).with_attrs(attrs));

    Ok(Some(out_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_span_formats_ends() {
        let times = TimeGrid::new(vec![1_490_875_200.0, 1_490_878_800.0]).unwrap();
        let (start, end) = time_span(&times);
        assert_eq!(start, "2017-03-30T12:00:00+00:00");
        assert_eq!(end, "2017-03-30T13:00:00+00:00");
        assert_eq!(time_span(&TimeGrid::empty()), (String::new(), String::new()));
    }
}
