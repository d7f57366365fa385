//! Multi-MBean grouping
//!
//! A wildcard read such as `java.lang:type=GarbageCollector,name=*` returns
//! one attribute map per matching MBean. Each MBean's properties become tags,
//! except `name`, which prefixes the MBean's fields instead. MBeans whose
//! remaining properties carry the same values end up in the same
//! measurement.
//!
//! ```text
//! java.lang:type=GarbageCollector,name=G1_Young  {CollectionCount: 4}
//! java.lang:type=GarbageCollector,name=G1_Old    {CollectionCount: 1}
//!   => tags {type=GarbageCollector}
//!      fields {G1_Young_CollectionCount: 4, G1_Old_CollectionCount: 1}
//! ```

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::field::{FieldSet, TagSet};
use super::flatten::flatten_into;
use super::object_name::{ObjectName, NAME_PROPERTY};
use crate::error::CollectorError;

/// One measurement produced from a multi-MBean response
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementGroup {
    /// Concatenated values of the non-`name` properties
    pub key: String,
    /// Base tags plus the non-`name` properties
    pub tags: TagSet,
    /// Fields from every MBean merged into this group
    pub fields: FieldSet,
}

/// Result of grouping a multi-MBean response
#[derive(Debug, Default)]
pub struct GroupingOutcome {
    /// Groups ordered by key
    pub groups: Vec<MeasurementGroup>,
    /// MBeans that could not be processed, with the reason
    pub errors: Vec<(String, CollectorError)>,
}

/// Partition `entities` (MBean name -> attributes) into measurement groups
///
/// A malformed MBean name is recorded in [`GroupingOutcome::errors`] and
/// skipped; the other MBeans are still grouped.
pub fn group_mbeans(entities: &Map<String, Value>, base_tags: &TagSet) -> GroupingOutcome {
    let mut groups: BTreeMap<String, MeasurementGroup> = BTreeMap::new();
    let mut errors = Vec::new();

    for (bean_name, attributes) in entities {
        let object_name = match ObjectName::parse(bean_name) {
            Ok(name) => name,
            Err(e) => {
                warn!(mbean = %bean_name, error = %e, "Skipping MBean with malformed name");
                errors.push((bean_name.clone(), e));
                continue;
            }
        };

        let mut measurement_name: &str = "";
        let mut key = String::new();
        let mut tags = base_tags.clone();

        for (prop_key, prop_value) in &object_name.properties {
            if prop_key == NAME_PROPERTY {
                measurement_name = prop_value.as_str();
                continue;
            }
            key.push_str(prop_value);
            tags.insert(prop_key.clone(), prop_value.clone());
        }

        debug!(mbean = %object_name, group = %key, "Grouping MBean");

        let mut fields = FieldSet::new();
        flatten_into(attributes, measurement_name, &mut fields);
        if fields.is_empty() {
            debug!(mbean = %object_name, "MBean has no attributes");
            continue;
        }

        let group = groups
            .entry(key.clone())
            .or_insert_with(|| MeasurementGroup {
                key,
                tags: TagSet::new(),
                fields: FieldSet::new(),
            });
        group.fields.extend(fields);
        group.tags = tags;
    }

    GroupingOutcome {
        groups: groups.into_values().collect(),
        errors,
    }
}
