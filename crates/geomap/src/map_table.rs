//! Map tables relating sensor pixels to a geographic grid.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use erg_common::error::{ErgError, Result};

/// Latitude/longitude of an output pixel at the mapping altitude (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub lat: f64,
    pub lon: f64,
}

/// Sensor coordinates for each output pixel, as stored in the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelMapRecord {
    pub row: Vec<Vec<i64>>,
    pub col: Vec<Vec<i64>>,
}

/// Map table payload as held by the variable store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapTableRecord {
    /// `[lat, lon]` per output pixel, `S x S`.
    pub pos: Vec<Vec<[f64; 2]>>,
    pub map: PixelMapRecord,
    /// Unit label carried over to remapped outputs.
    pub z_title: String,
}

/// A validated map table for a square output grid of side `size`.
///
/// Indices address the canonical sensor frame (rows flipped, then
/// transposed). They are non-negative here; the upper bound depends on the
/// sensor shape and is checked when the table is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct MapTable {
    size: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    positions: Vec<GeoPosition>,
    z_title: String,
    altitude_km: u32,
}

impl MapTable {
    /// Build a table from flat row-major index arrays of length `size * size`.
    pub fn new(
        size: usize,
        rows: Vec<usize>,
        cols: Vec<usize>,
        positions: Vec<GeoPosition>,
        z_title: impl Into<String>,
        altitude_km: u32,
    ) -> Result<Self> {
        let n = size * size;
        if rows.len() != n || cols.len() != n {
            return Err(ErgError::shape_mismatch(format!(
                "map indices have {}/{} entries, expected {}x{}",
                rows.len(),
                cols.len(),
                size,
                size
            )));
        }
        if positions.len() != n {
            return Err(ErgError::shape_mismatch(format!(
                "map positions have {} entries, expected {}x{}",
                positions.len(),
                size,
                size
            )));
        }
        Ok(Self {
            size,
            rows,
            cols,
            positions,
            z_title: z_title.into(),
            altitude_km,
        })
    }

    /// Validate a store record. The altitude comes from the variable name.
    pub fn from_record(record: MapTableRecord, altitude_km: u32) -> Result<Self> {
        let size = record.map.row.len();
        let rows = flatten_indices(record.map.row, size, "row")?;
        let cols = flatten_indices(record.map.col, size, "col")?;

        if record.pos.len() != size {
            return Err(ErgError::shape_mismatch(format!(
                "map positions have {} rows, expected {}",
                record.pos.len(),
                size
            )));
        }
        let mut positions = Vec::with_capacity(size * size);
        for line in record.pos {
            if line.len() != size {
                return Err(ErgError::shape_mismatch(format!(
                    "map position row has {} entries, expected {}",
                    line.len(),
                    size
                )));
            }
            positions.extend(line.into_iter().map(|[lat, lon]| GeoPosition { lat, lon }));
        }

        Self::new(size, rows, cols, positions, record.z_title, altitude_km)
    }

    /// Decode a JSON record payload.
    pub fn from_value(value: &Value, altitude_km: u32) -> Result<Self> {
        let record: MapTableRecord = serde_json::from_value(value.clone())?;
        Self::from_record(record, altitude_km)
    }

    /// Side length `S` of the output grid.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn altitude_km(&self) -> u32 {
        self.altitude_km
    }

    pub fn z_title(&self) -> &str {
        &self.z_title
    }

    /// Canonical-frame row index for output pixel `(u, v)`.
    pub fn row(&self, u: usize, v: usize) -> Option<usize> {
        self.rows.get(self.offset(u, v)?).copied()
    }

    /// Canonical-frame column index for output pixel `(u, v)`.
    pub fn col(&self, u: usize, v: usize) -> Option<usize> {
        self.cols.get(self.offset(u, v)?).copied()
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn cols(&self) -> &[usize] {
        &self.cols
    }

    /// `pos` attribute as it is attached to remapped outputs.
    pub fn positions_value(&self) -> Value {
        // [f64; 2] rows serialize infallibly, NaN becomes null
        Value::Array(
            self.positions
                .chunks(self.size.max(1))
                .map(|line| {
                    Value::Array(
                        line.iter()
                            .map(|p| serde_json::json!([p.lat, p.lon]))
                            .collect(),
                    )
                })
                .collect(),
        )
    }

    fn offset(&self, u: usize, v: usize) -> Option<usize> {
        if u >= self.size || v >= self.size {
            return None;
        }
        Some(u * self.size + v)
    }
}

fn flatten_indices(grid: Vec<Vec<i64>>, size: usize, which: &str) -> Result<Vec<usize>> {
    if grid.len() != size {
        return Err(ErgError::shape_mismatch(format!(
            "map.{} has {} rows, expected {}",
            which,
            grid.len(),
            size
        )));
    }
    let mut flat = Vec::with_capacity(size * size);
    for (u, line) in grid.into_iter().enumerate() {
        if line.len() != size {
            return Err(ErgError::shape_mismatch(format!(
                "map.{} row {} has {} entries, expected {}",
                which,
                u,
                line.len(),
                size
            )));
        }
        for (v, idx) in line.into_iter().enumerate() {
            let idx = usize::try_from(idx).map_err(|_| {
                ErgError::shape_mismatch(format!(
                    "map.{}[{}][{}] = {} is negative",
                    which, u, v, idx
                ))
            })?;
            flat.push(idx);
        }
    }
    Ok(flat)
}
