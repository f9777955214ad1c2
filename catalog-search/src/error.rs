// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use catalog_contracts::CatalogError;
use thiserror::Error;

/// Error types for catalog resolution
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Could not find {catalog} catalog data for node {node}: {reason}")]
    CatalogMissing {
        node: String,
        catalog: String,
        reason: String,
    },

    #[error("Failed to fetch {catalog} catalog for node {node}: {error}")]
    Store {
        node: String,
        catalog: String,
        #[source]
        error: CatalogError,
    },
}

impl SearchError {
    pub(crate) fn missing(node: &str, catalog: &str, reason: impl Into<String>) -> Self {
        Self::CatalogMissing {
            node: node.to_string(),
            catalog: catalog.to_string(),
            reason: reason.into(),
        }
    }

    /// Catalog source the failure relates to.
    pub fn catalog(&self) -> &str {
        match self {
            Self::CatalogMissing { catalog, .. } | Self::Store { catalog, .. } => catalog,
        }
    }
}

/// Error types for resolver configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config io error for {path:?}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("invalid config: {reason}")]
    Parse { reason: String },

    #[error("no catalog directory: pass --root or set catalog_root in the config")]
    NoCatalogRoot,
}

/// Result type alias for resolution operations
pub type Result<T> = std::result::Result<T, SearchError>;
