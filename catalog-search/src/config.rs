// SPDX-License-Identifier: GPL-3.0-only

//! Resolver configuration
//!
//! ```toml
//! catalog_root = "/var/lib/catalogs"
//!
//! [sources]
//! drive_id = "driveId"
//! virtual_disks = "megaraid-virtual-disks"
//! controllers = "megaraid-controllers"
//! physical_drives = "megaraid-physical-drives"
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use catalog_types::SourceNames;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Root of a [`JsonDirCatalogStore`](crate::store::JsonDirCatalogStore)
    pub catalog_root: Option<PathBuf>,

    /// Source names the catalog producers record under
    pub sources: SourceNames,
}

impl ResolverConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|error| ConfigError::Parse {
            reason: error.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|error| ConfigError::Read {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;

        Self::from_toml_str(&raw)
    }

    /// Catalog directory to read, preferring `override_root` over `catalog_root`.
    pub fn resolve_root(&self, override_root: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        override_root
            .or_else(|| self.catalog_root.clone())
            .ok_or(ConfigError::NoCatalogRoot)
    }
}
