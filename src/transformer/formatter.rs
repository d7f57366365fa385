//! Measurement output formats
//!
//! This module renders sink measurements either as InfluxDB line protocol
//! or as one JSON object per line.
//!
//! # Line Protocol
//!
//! ```text
//! <measurement>[,<tag_key>=<tag_value>...] <field_key>=<field_value>[,...]
//! ```

use crate::sink::Measurement;

use super::field::FieldValue;

/// Line protocol formatter
///
/// # Example
///
/// ```ignore
/// use rjolokia_input::transformer::LineProtocolFormatter;
///
/// let formatter = LineProtocolFormatter::new();
/// let output = formatter.format(sink.measurements());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LineProtocolFormatter {
    /// Timestamp in nanoseconds appended to every line
    timestamp: Option<i64>,
}

impl LineProtocolFormatter {
    /// Create a new formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a timestamp (nanoseconds since the Unix epoch) to every line
    pub fn with_timestamp(mut self, timestamp_ns: i64) -> Self {
        self.timestamp = Some(timestamp_ns);
        self
    }

    /// Format measurements, one line each
    ///
    /// # Notes
    ///
    /// - Tags and fields are written in key order
    /// - Null and array fields have no line protocol representation and are
    ///   left out; a measurement left without fields produces no line
    /// - Non-finite floats are left out as well
    pub fn format(&self, measurements: &[Measurement]) -> String {
        let mut output = String::with_capacity(measurements.len() * 100);

        for measurement in measurements {
            if let Some(line) = self.format_line(measurement) {
                output.push_str(&line);
                output.push('\n');
            }
        }

        output
    }

    /// Format a single measurement
    pub fn format_line(&self, measurement: &Measurement) -> Option<String> {
        let fields: Vec<String> = measurement
            .fields
            .iter()
            .filter_map(|(key, value)| {
                Self::format_field_value(value)
                    .map(|v| format!("{}={}", Self::escape_key(key), v))
            })
            .collect();

        if fields.is_empty() {
            tracing::debug!(
                measurement = %measurement.name,
                "Skipping measurement without representable fields"
            );
            return None;
        }

        let mut line = Self::escape_measurement(&measurement.name);

        for (key, value) in &measurement.tags {
            if key.is_empty() || value.is_empty() {
                continue;
            }
            line.push(',');
            line.push_str(&Self::escape_key(key));
            line.push('=');
            line.push_str(&Self::escape_key(value));
        }

        line.push(' ');
        line.push_str(&fields.join(","));

        if let Some(ts) = self.timestamp {
            line.push(' ');
            line.push_str(&ts.to_string());
        }

        Some(line)
    }

    fn format_field_value(value: &FieldValue) -> Option<String> {
        match value {
            FieldValue::Integer(i) => Some(format!("{}i", i)),
            FieldValue::Float(f) if f.is_finite() => Some(format!("{}", f)),
            FieldValue::Float(_) => None,
            FieldValue::String(s) => Some(format!("\"{}\"", Self::escape_string(s))),
            FieldValue::Boolean(b) => Some(b.to_string()),
            FieldValue::Null | FieldValue::Array(_) => None,
        }
    }

    /// Escape measurement names (commas and spaces)
    fn escape_measurement(s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                ',' | ' ' => {
                    result.push('\\');
                    result.push(c);
                }
                _ => result.push(c),
            }
        }
        result
    }

    /// Escape tag keys, tag values and field keys (commas, equals signs and spaces)
    fn escape_key(s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                ',' | '=' | ' ' => {
                    result.push('\\');
                    result.push(c);
                }
                _ => result.push(c),
            }
        }
        result
    }

    /// Escape string field values (backslashes and double quotes)
    fn escape_string(s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '\\' => result.push_str("\\\\"),
                '"' => result.push_str("\\\""),
                _ => result.push(c),
            }
        }
        result
    }
}

/// Format measurements as JSON lines
pub fn format_json_lines(measurements: &[Measurement]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for measurement in measurements {
        output.push_str(&serde_json::to_string(measurement)?);
        output.push('\n');
    }
    Ok(output)
}
