//! Named-variable store abstraction.
//!
//! The analysis kernels never touch a store; pipeline operations take an
//! explicit `&mut impl VariableStore` handle, fetch their inputs by name and
//! write their outputs back under conventional names.

use std::collections::HashMap;

use serde_json::Value;

use crate::cube::{GeoCube, ImageCube};
use crate::error::{ErgError, Result};
use crate::time::TimeGrid;

/// Free-form variable attributes (units, titles, positions, ...).
pub type Attributes = serde_json::Map<String, Value>;

/// Payload of a stored variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    /// Raw 16-bit image frames.
    Image(ImageCube),
    /// Floating point frames (remapped or derived products).
    Grid(GeoCube),
    /// One scalar per time sample.
    Series(Vec<f64>),
    /// Structured payload, e.g. a map table record.
    Record(Value),
}

impl Values {
    /// Kind label used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Values::Image(_) => "image cube",
            Values::Grid(_) => "grid cube",
            Values::Series(_) => "series",
            Values::Record(_) => "record",
        }
    }
}

/// A time-indexed variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub times: TimeGrid,
    pub values: Values,
    pub attrs: Attributes,
}

impl Variable {
    pub fn new(times: TimeGrid, values: Values) -> Self {
        Self {
            times,
            values,
            attrs: Attributes::new(),
        }
    }

    pub fn with_attrs(mut self, attrs: Attributes) -> Self {
        self.attrs = attrs;
        self
    }

    /// Borrow the payload as a raw image cube.
    pub fn as_image(&self, name: &str) -> Result<&ImageCube> {
        match &self.values {
            Values::Image(cube) => Ok(cube),
            _ => Err(type_mismatch(name, "an image cube")),
        }
    }

    /// Borrow the payload as a floating point cube.
    pub fn as_grid(&self, name: &str) -> Result<&GeoCube> {
        match &self.values {
            Values::Grid(cube) => Ok(cube),
            _ => Err(type_mismatch(name, "a grid cube")),
        }
    }

    pub fn as_series(&self, name: &str) -> Result<&[f64]> {
        match &self.values {
            Values::Series(v) => Ok(v),
            _ => Err(type_mismatch(name, "a series")),
        }
    }

    pub fn as_record(&self, name: &str) -> Result<&Value> {
        match &self.values {
            Values::Record(v) => Ok(v),
            _ => Err(type_mismatch(name, "a record")),
        }
    }
}

fn type_mismatch(name: &str, expected: &'static str) -> ErgError {
    ErgError::TypeMismatch {
        name: name.to_string(),
        expected,
    }
}

/// Access to named time-series variables supplied by the host framework.
pub trait VariableStore {
    fn has(&self, name: &str) -> bool;

    /// Fetch a variable, or `MissingInput` if absent.
    fn fetch(&self, name: &str) -> Result<&Variable>;

    /// Fetch only the attributes of a variable.
    fn fetch_metadata(&self, name: &str) -> Result<&Attributes> {
        self.fetch(name).map(|v| &v.attrs)
    }

    /// Insert or replace a variable.
    fn store(&mut self, name: &str, variable: Variable);
}

/// Simple in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    variables: HashMap<String, Variable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Variable names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.variables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn remove(&mut self, name: &str) -> Option<Variable> {
        self.variables.remove(name)
    }
}

impl VariableStore for MemoryStore {
    fn has(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    fn fetch(&self, name: &str) -> Result<&Variable> {
        self.variables
            .get(name)
            .ok_or_else(|| ErgError::missing_input(name))
    }

    fn store(&mut self, name: &str, variable: Variable) {
        tracing::trace!(name, kind = variable.values.kind(), "storing variable");
        self.variables.insert(name.to_string(), variable);
    }
}
