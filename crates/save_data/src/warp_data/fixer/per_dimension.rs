use super::normalize_key;
use crate::dimension::DimensionId;
use crate::warp_data::{WarpData, WarpPoint};
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

#[derive(Deserialize)]
struct LegacyPoint {
    #[serde(alias = "dim")]
    dimension: Option<DimensionId>,
    x: f64,
    y: f64,
    z: f64,
    yaw: f32,
    pitch: f32,
}

/// `{ <dimension>: { <name>: <point> } }`
pub fn try_fix(fields: &Map<String, Value>) -> Option<WarpData> {
    let mut warps = IndexMap::new();
    for (dimension, names) in fields {
        let dimension = DimensionId::parse(dimension).ok()?;
        let Value::Object(names) = names else {
            return None;
        };

        for (name, value) in names {
            let legacy: LegacyPoint = serde_json::from_value(value.clone()).ok()?;
            let point = WarpPoint::new(
                legacy.dimension.unwrap_or_else(|| dimension.clone()),
                legacy.x,
                legacy.y,
                legacy.z,
                legacy.yaw,
                legacy.pitch,
            );

            match warps.entry(normalize_key(name)) {
                Entry::Vacant(entry) => {
                    entry.insert(point);
                }
                Entry::Occupied(_) => {
                    warn!(
                        "Dropping warp '{}' from {} while converting, the name is already taken",
                        name, dimension
                    );
                }
            }
        }
    }
    Some(WarpData { warps })
}
