//! MBean ObjectName parsing
//!
//! A canonical name has the form `domain:key1=val1,key2=val2`. Property
//! order is kept as it appears in the name because the grouping engine
//! derives its group key from it.

use std::fmt;

use crate::error::CollectorError;

/// Property holding the per-entity measurement name
pub const NAME_PROPERTY: &str = "name";

/// Parsed MBean ObjectName
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectName {
    /// Domain (e.g. "java.lang")
    pub domain: String,
    /// Key/value properties in input order
    pub properties: Vec<(String, String)>,
}

impl ObjectName {
    /// Parse an ObjectName string
    ///
    /// Spaces are replaced with underscores before parsing, so
    /// `name=G1 Young Generation` becomes `name=G1_Young_Generation`.
    ///
    /// # Errors
    /// `CollectorError::InvalidObjectName` when the `:` separator is missing
    /// or a property segment has no `=`.
    ///
    /// # Limitations
    /// - Quoted values containing `,` or `=` are NOT supported
    pub fn parse(name: &str) -> Result<Self, CollectorError> {
        let normalized = name.replace(' ', "_");

        let (domain, property_list) =
            normalized
                .split_once(':')
                .ok_or_else(|| CollectorError::InvalidObjectName {
                    name: name.to_string(),
                    reason: "missing ':' separator".to_string(),
                })?;

        let properties = property_list
            .split(',')
            .map(|segment| {
                segment
                    .split_once('=')
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .ok_or_else(|| CollectorError::InvalidObjectName {
                        name: name.to_string(),
                        reason: format!("property '{}' has no '='", segment),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            domain: domain.to_string(),
            properties,
        })
    }

    /// Value of the first property with the given key
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.domain)?;
        for (i, (key, value)) in self.properties.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}
