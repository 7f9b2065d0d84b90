//! Converts warp documents written by older releases into the current format.
//!
//! Older releases never wrote a version field and disagreed on how warps were
//! scoped: some kept one flat map of names, others nested names under the
//! dimension they were created in. Both shapes are recognized here and folded
//! into the flat, versioned document. The old file is kept as a backup.

use super::{VERSION, WarpData, WarpLoadError};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

mod flat;
mod per_dimension;

#[derive(Debug)]
pub enum FixInfo {
    Unversioned,
    OldVersion { version: u32 },
}

/// Moves `path` aside to `<path>.bak`, or `<path>.bak.N` if that is taken.
pub fn make_backup(path: impl AsRef<Path>) -> io::Result<PathBuf> {
    let path = path.as_ref();
    let mut backup_path = path.with_extension("bak");
    let mut num = 1;
    while backup_path.exists() {
        backup_path = path.with_extension(format!("bak.{}", num));
        num += 1;
    }
    fs::rename(path, &backup_path)?;
    Ok(backup_path)
}

fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Writes `data` next to `path`, moves `path` to a backup and puts the
/// converted document in its place. `path` is untouched if writing fails.
fn replace_with_backup(path: &Path, data: &WarpData) -> Result<PathBuf, WarpLoadError> {
    let converted = path.with_extension("converted");
    if let Err(err) = data.save_to_file(&converted) {
        let _ = fs::remove_file(&converted);
        return Err(err.into());
    }

    let backup = match make_backup(path) {
        Ok(backup) => backup,
        Err(err) => {
            let _ = fs::remove_file(&converted);
            return Err(err.into());
        }
    };
    if let Err(err) = fs::rename(&converted, path) {
        warn!("Failed to move converted warps into place, restoring {}", backup.display());
        fs::rename(&backup, path)?;
        return Err(err.into());
    }
    Ok(backup)
}

pub fn try_fix(
    path: impl AsRef<Path>,
    root: Value,
    info: FixInfo,
) -> Result<Option<WarpData>, WarpLoadError> {
    debug!("Trying to fix warp data with {:?}", info);
    let result = match (info, root) {
        (FixInfo::Unversioned, Value::Object(fields)) => {
            flat::try_fix(&fields).or_else(|| per_dimension::try_fix(&fields))
        }
        _ => None,
    };

    Ok(match result {
        Some(data) => {
            let backup = replace_with_backup(path.as_ref(), &data)?;
            info!(
                "Converted {} legacy warps to version {} (backup at {})",
                data.warps.len(),
                VERSION,
                backup.display()
            );
            Some(data)
        }
        None => None,
    })
}
