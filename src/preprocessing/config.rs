//! Serializable configuration for the adapters.
//!
//! Only configuration is persisted here; fitted state never is. Both
//! configurations can be read from JSON, and turned into bytes through
//! [`SerializableParams`].
//!
//! ```rust
//! use column_adapters::preprocessing::{ConfigFile, SubsetSelectorConfig};
//!
//! let config = SubsetSelectorConfig::from_json_str(
//!     r#"{ "selection": { "columns": ["age", "fare"], "include_dtypes": ["numeric"] } }"#,
//! )
//! .unwrap();
//! assert!(config.copy);
//! ```

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::per_column::TransformerArgs;
use crate::preprocessing::subset::ColumnSelection;
use crate::serialization::SerializableParams;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration of a [`SubsetSelector`](crate::preprocessing::SubsetSelector).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubsetSelectorConfig {
    pub selection: ColumnSelection,
    /// Work on a duplicate of the input table.
    pub copy: bool,
}

impl Default for SubsetSelectorConfig {
    fn default() -> Self {
        Self {
            selection: ColumnSelection::all(),
            copy: true,
        }
    }
}

/// Configuration of a [`PerColumnTransformer`](crate::preprocessing::PerColumnTransformer).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerColumnConfig {
    /// Arguments passed to the factory for every column.
    pub transformer_args: TransformerArgs,
    /// Work on a duplicate of the input table.
    pub copy: bool,
}

impl Default for PerColumnConfig {
    fn default() -> Self {
        Self {
            transformer_args: TransformerArgs::default(),
            copy: true,
        }
    }
}

/// JSON loading and saving for configuration types.
pub trait ConfigFile: Serialize + DeserializeOwned {
    fn from_json_str(json: &str) -> Result<Self, PreprocessingError> {
        Ok(serde_json::from_str(json)?)
    }

    fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, PreprocessingError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    fn to_json_string(&self) -> Result<String, PreprocessingError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl ConfigFile for SubsetSelectorConfig {}

impl ConfigFile for PerColumnConfig {}

impl SerializableParams for SubsetSelectorConfig {
    type Error = PreprocessingError;

    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error> {
        Ok(bincode::serialize(self)?)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error> {
        Ok(bincode::deserialize(bytes)?)
    }
}

// bincode cannot decode free-form `serde_json::Value`s, so the arguments are
// stored as JSON bytes.
impl SerializableParams for PerColumnConfig {
    type Error = PreprocessingError;

    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error> {
        Ok(serde_json::to_vec(self)?)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
