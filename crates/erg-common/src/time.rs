//! Time handling for uniformly sampled observation series.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ErgError, Result};

/// Strictly increasing sequence of epoch seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct TimeGrid(Vec<f64>);

impl TimeGrid {
    /// Build a grid, rejecting non-finite or non-increasing samples.
    pub fn new(times: Vec<f64>) -> Result<Self> {
        for (i, t) in times.iter().enumerate() {
            if !t.is_finite() {
                return Err(ErgError::UnorderedTimes { index: i });
            }
            if i > 0 && *t <= times[i - 1] {
                return Err(ErgError::UnorderedTimes { index: i });
            }
        }
        Ok(Self(times))
    }

    /// An empty grid, used for time-independent variables such as map tables.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Sample `k` as a UTC datetime.
    pub fn datetime(&self, k: usize) -> Option<DateTime<Utc>> {
        let t = *self.0.get(k)?;
        let secs = t.floor();
        let nanos = (((t - secs) * 1e9).round() as u32).min(999_999_999);
        Utc.timestamp_opt(secs as i64, nanos).single()
    }

    /// First and last sample as UTC datetimes, if any.
    pub fn span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let last = self.0.len().checked_sub(1)?;
        Some((self.datetime(0)?, self.datetime(last)?))
    }

    /// Index range `[lo, hi)` of samples within `[start, end]` (inclusive bounds).
    pub fn window_indices(&self, start: f64, end: f64) -> std::ops::Range<usize> {
        let lo = self.0.partition_point(|&t| t < start);
        let hi = self.0.partition_point(|&t| t <= end);
        lo..hi.max(lo)
    }
}

impl TryFrom<Vec<f64>> for TimeGrid {
    type Error = ErgError;

    fn try_from(times: Vec<f64>) -> Result<Self> {
        Self::new(times)
    }
}

impl From<TimeGrid> for Vec<f64> {
    fn from(grid: TimeGrid) -> Self {
        grid.0
    }
}
