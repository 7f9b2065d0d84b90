use indexmap::map::Entry;
use indexmap::IndexMap;
use thiserror::Error;
use tracing::warn;
use warps_save_data::WarpPoint;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WarpError {
    #[error("Warp not found: {name}")]
    NotFound { name: String },
    #[error("Invalid warp name: '{name}'")]
    InvalidName { name: String },
}

/// Trims and lower-cases a user supplied warp name.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+')
}

/// Normalizes `name` and checks that it can be typed as a single command word
/// and used as a permission node segment.
pub fn validate_name(name: &str) -> Result<String, WarpError> {
    let normalized = normalize_name(name);
    if normalized.is_empty() || !normalized.chars().all(is_name_char) {
        return Err(WarpError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(normalized)
}

/// Turns a stored key into a name commands can address, replacing every
/// character `validate_name` rejects with `_`.
fn addressable_name(name: &str) -> String {
    normalize_name(name)
        .chars()
        .map(|c| if is_name_char(c) { c } else { '_' })
        .collect()
}

/// Every warp known to the server, keyed by normalized name.
///
/// Listing order is insertion order. Overwriting a warp keeps its position,
/// renaming moves it to the end.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WarpRegistry {
    warps: IndexMap<String, WarpPoint>,
}

impl WarpRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    /// Builds a registry from stored warps. Keys that can't be typed in a
    /// command are rewritten, and when two keys end up with the same name
    /// the first one is kept.
    pub fn from_warps(warps: IndexMap<String, WarpPoint>) -> Self {
        let mut registry = WarpRegistry::new();
        for (name, point) in warps {
            let key = match validate_name(&name) {
                Ok(key) => key,
                Err(_) => {
                    let key = addressable_name(&name);
                    if key.is_empty() {
                        warn!("Dropping warp with an empty name");
                        continue;
                    }
                    warn!("Warp '{}' can't be used in commands, loading it as '{}'", name, key);
                    key
                }
            };
            match registry.warps.entry(key) {
                Entry::Vacant(entry) => {
                    entry.insert(point);
                }
                Entry::Occupied(entry) => {
                    warn!("Dropping warp '{}', the name '{}' is already taken", name, entry.key());
                }
            }
        }
        registry
    }

    pub fn set_warp(&mut self, name: &str, point: WarpPoint) {
        self.warps.insert(normalize_name(name), point);
    }

    pub fn get_warp(&self, name: &str) -> Result<&WarpPoint, WarpError> {
        let normalized = normalize_name(name);
        self.warps
            .get(&normalized)
            .ok_or(WarpError::NotFound { name: normalized })
    }

    pub fn del_warp(&mut self, name: &str) -> bool {
        self.warps.shift_remove(&normalize_name(name)).is_some()
    }

    pub fn rename_warp(&mut self, old_name: &str, new_name: &str) -> Result<(), WarpError> {
        let old_name = normalize_name(old_name);
        let point = self
            .warps
            .shift_remove(&old_name)
            .ok_or(WarpError::NotFound { name: old_name })?;
        let new_name = normalize_name(new_name);
        self.warps.shift_remove(&new_name);
        self.warps.insert(new_name, point);
        Ok(())
    }

    pub fn list_warps(&self) -> IndexMap<String, WarpPoint> {
        self.warps.clone()
    }

    pub fn len(&self) -> usize {
        self.warps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warps.is_empty()
    }
}
