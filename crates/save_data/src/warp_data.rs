mod fixer;

use self::fixer::FixInfo;
use crate::dimension::DimensionId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;
use thiserror::Error;

pub use self::fixer::make_backup;

/// Version History:
/// 0: Unversioned documents, either keyed by warp name or by dimension then warp name
/// 1: `{ "version": 1, "warps": { <name>: <point> } }`, one flat namespace
pub const VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum WarpLoadError {
    #[error("warp data deserialization error")]
    Deserialize(#[from] serde_json::Error),

    #[error("warp data root is not a json object")]
    NotAnObject,

    #[error("warp data has an invalid version field")]
    InvalidVersion,

    #[error("warp data version {0} too new to be loaded")]
    TooNew(u32),

    #[error("unversioned warp data has an unrecognized layout")]
    UnknownLayout,

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("conversion from warp data version {0} is unavailable")]
    ConversionUnavailable(u32),
}

impl From<WarpSaveError> for WarpLoadError {
    fn from(e: WarpSaveError) -> Self {
        match e {
            WarpSaveError::Serialize(err) => err.into(),
            WarpSaveError::Io(err) => err.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum WarpSaveError {
    #[error("warp data serialization error")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A saved location: dimension, position and facing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarpPoint {
    #[serde(alias = "dim")]
    dimension: DimensionId,
    x: f64,
    y: f64,
    z: f64,
    yaw: f32,
    pitch: f32,
}

impl WarpPoint {
    pub fn new(dimension: DimensionId, x: f64, y: f64, z: f64, yaw: f32, pitch: f32) -> Self {
        Self {
            dimension,
            x,
            y,
            z,
            yaw,
            pitch,
        }
    }

    pub fn dimension(&self) -> &DimensionId {
        &self.dimension
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    version: u32,
    warps: &'a IndexMap<String, WarpPoint>,
}

#[derive(Deserialize)]
struct Document {
    #[allow(dead_code)]
    version: u32,
    warps: IndexMap<String, WarpPoint>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct WarpData {
    pub warps: IndexMap<String, WarpPoint>,
}

impl WarpData {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<WarpData, WarpLoadError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let root: Value = serde_json::from_reader(BufReader::new(file))?;

        let Value::Object(fields) = &root else {
            return Err(WarpLoadError::NotAnObject);
        };

        // Legacy documents may contain a warp called "version", but never as a number
        let version = match fields.get("version") {
            Some(Value::Number(number)) => number
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or(WarpLoadError::InvalidVersion)?,
            _ => {
                return fixer::try_fix(path, root, FixInfo::Unversioned)?
                    .ok_or(WarpLoadError::UnknownLayout);
            }
        };

        if version < VERSION {
            return fixer::try_fix(path, root, FixInfo::OldVersion { version })?
                .ok_or(WarpLoadError::ConversionUnavailable(version));
        }
        if version > VERSION {
            return Err(WarpLoadError::TooNew(version));
        }

        let document: Document = serde_json::from_value(root)?;
        Ok(WarpData {
            warps: document.warps,
        })
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), WarpSaveError> {
        let document = DocumentRef {
            version: VERSION,
            warps: &self.warps,
        };
        let data = serde_json::to_vec_pretty(&document)?;

        let mut file = File::create(path)?;
        file.write_all(&data)?;
        file.write_all(b"\n")?;
        file.sync_data()?;
        Ok(())
    }
}
