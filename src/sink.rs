//! Measurement sink
//!
//! The gatherer hands every measurement to a [`Sink`]. The sink is assumed
//! to accept everything it is given.

use serde::Serialize;

use crate::transformer::{FieldSet, TagSet};

/// Receiver of `(measurement, fields, tags)` triples
pub trait Sink {
    /// Accept one measurement
    fn add_fields(&mut self, measurement: &str, fields: FieldSet, tags: TagSet);
}

/// A measurement as received by a sink
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    /// Measurement name
    pub name: String,
    /// Tags
    pub tags: TagSet,
    /// Fields
    pub fields: FieldSet,
}

/// Sink that keeps every measurement in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    measurements: Vec<Measurement>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Measurements received so far, in arrival order
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Take ownership of the received measurements
    pub fn into_measurements(self) -> Vec<Measurement> {
        self.measurements
    }
}

impl Sink for MemorySink {
    fn add_fields(&mut self, measurement: &str, fields: FieldSet, tags: TagSet) {
        self.measurements.push(Measurement {
            name: measurement.to_string(),
            tags,
            fields,
        });
    }
}
