//! Build configuration, stored as JSON
//!
//! Every field is optional in the file; missing fields fall back to the
//! built-in defaults, so an empty `{}` describes the stock build.

use crate::error::{Error, Result};
use crate::ids::IdentifierTable;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default name of the index source file
pub const DEFAULT_INDEX_FILE: &str = "Warhammer-Fantasy-6th-edition.local.xml";

/// Default name of the index archive inside the publish directory
pub const DEFAULT_INDEX_OUTPUT: &str = "Warhammer-Fantasy-6th-edition.local.bsi";

/// Default publish directory
pub const DEFAULT_PUBLISH_DIR: &str = "public";

/// Settings for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Directory holding the `.cat`, `.gst` and index sources
    pub source_dir: PathBuf,
    /// Directory the archives are written to (created if absent)
    pub publish_dir: PathBuf,
    /// Index source file name, relative to `source_dir`
    pub index_file: String,
    /// Index archive file name, relative to `publish_dir`
    pub index_output: String,
    /// Identifiers to inject
    pub ids: IdentifierTable,
    /// Parent of the per-file scratch directories; the system temp dir when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_root: Option<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            publish_dir: PathBuf::from(DEFAULT_PUBLISH_DIR),
            index_file: DEFAULT_INDEX_FILE.to_string(),
            index_output: DEFAULT_INDEX_OUTPUT.to_string(),
            ids: IdentifierTable::default(),
            temp_root: None,
        }
    }
}

impl BuildConfig {
    /// Load a config file from JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| Error::FileRead {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Save the config file to JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), content).map_err(|e| Error::FileWrite {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// Path of the index source file
    pub fn index_input_path(&self) -> PathBuf {
        self.source_dir.join(&self.index_file)
    }

    /// Path of the index archive
    pub fn index_output_path(&self) -> PathBuf {
        self.publish_dir.join(&self.index_output)
    }
}
