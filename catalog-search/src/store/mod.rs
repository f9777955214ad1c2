// SPDX-License-Identifier: GPL-3.0-only

//! Reference [`CatalogStore`](catalog_contracts::CatalogStore) implementations

pub mod json_dir;
pub mod memory;

pub use json_dir::JsonDirCatalogStore;
pub use memory::MemoryCatalogStore;
