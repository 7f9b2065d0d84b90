use super::normalize_key;
use crate::warp_data::{WarpData, WarpPoint};
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde_json::{Map, Value};
use tracing::warn;

/// `{ <name>: <point> }`
pub fn try_fix(fields: &Map<String, Value>) -> Option<WarpData> {
    let mut warps = IndexMap::with_capacity(fields.len());
    for (name, value) in fields {
        let point: WarpPoint = serde_json::from_value(value.clone()).ok()?;
        match warps.entry(normalize_key(name)) {
            Entry::Vacant(entry) => {
                entry.insert(point);
            }
            Entry::Occupied(_) => {
                warn!(
                    "Dropping warp '{}' while converting, the name is already taken",
                    name
                );
            }
        }
    }
    Some(WarpData { warps })
}
