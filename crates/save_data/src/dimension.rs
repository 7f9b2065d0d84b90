use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_NAMESPACE: &str = "minecraft";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid dimension id: {id}")]
pub struct InvalidDimension {
    pub id: String,
}

/// A namespaced world identifier such as `minecraft:overworld`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DimensionId {
    id: String,
    separator: usize,
}

fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.')
}

fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

impl DimensionId {
    /// Parses an identifier. A bare path gets the `minecraft` namespace.
    pub fn parse(input: &str) -> Result<DimensionId, InvalidDimension> {
        let invalid = || InvalidDimension {
            id: input.to_string(),
        };

        let (namespace, path) = match input.split_once(':') {
            Some((namespace, path)) => (namespace, path),
            None => (DEFAULT_NAMESPACE, input),
        };

        if namespace.is_empty() || !namespace.chars().all(is_namespace_char) {
            return Err(invalid());
        }
        if path.is_empty() || !path.chars().all(is_path_char) {
            return Err(invalid());
        }

        Ok(DimensionId {
            id: format!("{}:{}", namespace, path),
            separator: namespace.len(),
        })
    }

    pub fn overworld() -> DimensionId {
        DimensionId {
            id: "minecraft:overworld".to_string(),
            separator: DEFAULT_NAMESPACE.len(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.id[..self.separator]
    }

    pub fn path(&self) -> &str {
        &self.id[self.separator + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl FromStr for DimensionId {
    type Err = InvalidDimension;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DimensionId::parse(s)
    }
}

impl TryFrom<String> for DimensionId {
    type Error = InvalidDimension;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DimensionId::parse(&value)
    }
}

impl From<DimensionId> for String {
    fn from(value: DimensionId) -> Self {
        value.id
    }
}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
