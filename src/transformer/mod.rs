//! Response-to-measurement transformation
//!
//! This module turns Jolokia `value` payloads into flat field sets:
//! - `flatten`: nested JSON -> `{"Usage_used": 123, ...}`
//! - `object_name`: `domain:key=value,...` -> ordered properties
//! - `grouping`: multi-MBean responses -> one measurement per property set
//! - `formatter`: line protocol / JSON lines output

mod field;
mod flatten;
mod formatter;
mod grouping;
mod object_name;

pub use field::{FieldSet, FieldValue, TagSet};
pub use flatten::{flatten, flatten_into, BARE_VALUE_FIELD};
pub use formatter::{format_json_lines, LineProtocolFormatter};
pub use grouping::{group_mbeans, GroupingOutcome, MeasurementGroup};
pub use object_name::{ObjectName, NAME_PROPERTY};
