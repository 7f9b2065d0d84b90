use crate::registry::{WarpError, WarpRegistry};
use indexmap::IndexMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use warps_save_data::warp_data::make_backup;
use warps_save_data::{WarpData, WarpLoadError, WarpPoint, WarpSaveError};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("warp store has not been loaded yet, there is no file to save to")]
    NotLoaded,

    #[error("could not load warps")]
    Load(#[from] WarpLoadError),

    #[error("could not save warps")]
    Save(#[from] WarpSaveError),

    #[error("could not prepare the warp file")]
    Io(#[from] io::Error),
}

#[derive(Default)]
struct StoreState {
    registry: WarpRegistry,
    path: Option<PathBuf>,
}

impl StoreState {
    fn save(&self) -> Result<(), StoreError> {
        let path = self.path.as_ref().ok_or(StoreError::NotLoaded)?;
        let data = WarpData {
            warps: self.registry.list_warps(),
        };
        data.save_to_file(path)?;
        debug!("Saved {} warps to {}", self.registry.len(), path.display());
        Ok(())
    }
}

/// Owns the warp registry and the file it is persisted to.
///
/// Reads share a lock. Every mutation holds the write lock while the registry
/// is changed and, when `flush_on_mutation` is set, while the whole document is
/// written back out.
pub struct WarpStore {
    state: RwLock<StoreState>,
    flush_on_mutation: bool,
}

impl Default for WarpStore {
    fn default() -> Self {
        WarpStore::new(true)
    }
}

impl WarpStore {
    pub fn new(flush_on_mutation: bool) -> WarpStore {
        WarpStore {
            state: RwLock::new(StoreState::default()),
            flush_on_mutation,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Binds the store to `path` and replaces the registry with its contents.
    ///
    /// A missing file is created as an empty document. If the file can not be
    /// read the previous registry is kept. A malformed file is moved aside and
    /// the store stays bound to `path`; any other failure (a newer format, an
    /// unreadable file) leaves the store unbound so the file is never
    /// overwritten. Returns the number of warps loaded.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<usize, StoreError> {
        let path = path.as_ref();
        let mut state = self.write();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            state.registry = WarpRegistry::new();
            state.path = Some(path.to_path_buf());
            state.save()?;
            info!("Created empty warp file at {}", path.display());
            return Ok(0);
        }

        match WarpData::load_from_file(path) {
            Ok(data) => {
                state.registry = WarpRegistry::from_warps(data.warps);
                state.path = Some(path.to_path_buf());
                Ok(state.registry.len())
            }
            Err(err) => {
                if matches!(
                    err,
                    WarpLoadError::Deserialize(_)
                        | WarpLoadError::NotAnObject
                        | WarpLoadError::InvalidVersion
                        | WarpLoadError::UnknownLayout
                ) {
                    let backup = make_backup(path)?;
                    state.path = Some(path.to_path_buf());
                    warn!(
                        "Moved unreadable warp file {} to {}",
                        path.display(),
                        backup.display()
                    );
                }
                Err(err.into())
            }
        }
    }

    pub fn save(&self) -> Result<(), StoreError> {
        self.read().save()
    }

    fn flush(&self, state: &StoreState) {
        if !self.flush_on_mutation {
            return;
        }
        if let Err(err) = state.save() {
            error!("Failed to flush warps: {:?}", err);
        }
    }

    pub fn set_warp(&self, name: &str, point: WarpPoint) {
        let mut state = self.write();
        state.registry.set_warp(name, point);
        self.flush(&state);
    }

    pub fn get_warp(&self, name: &str) -> Result<WarpPoint, WarpError> {
        self.read().registry.get_warp(name).cloned()
    }

    pub fn del_warp(&self, name: &str) -> bool {
        let mut state = self.write();
        let removed = state.registry.del_warp(name);
        if removed {
            self.flush(&state);
        }
        removed
    }

    pub fn rename_warp(&self, old_name: &str, new_name: &str) -> Result<(), WarpError> {
        let mut state = self.write();
        state.registry.rename_warp(old_name, new_name)?;
        self.flush(&state);
        Ok(())
    }

    pub fn list_warps(&self) -> IndexMap<String, WarpPoint> {
        self.read().registry.list_warps()
    }

    pub fn len(&self) -> usize {
        self.read().registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().registry.is_empty()
    }
}
