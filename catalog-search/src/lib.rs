// SPDX-License-Identifier: GPL-3.0-only

//! Catalog cross-reference resolution
//!
//! Joins the drive-identity catalog of a node against its RAID controller,
//! virtual-disk and physical-drive catalogs and returns one
//! [`ExtendedDriveRecord`](catalog_types::ExtendedDriveRecord) per drive:
//! - drives behind a virtual disk are joined by virtual disk path
//! - JBOD drives are joined by the device id in their SCSI address
//! - controller vendors are attached by controller id
//!
//! Secondary catalogs are only fetched when at least one drive needs them.

pub mod config;
pub mod engine;
pub mod error;
pub mod megaraid;
pub mod outcome;
pub mod path;
pub mod physical_drive;
pub mod store;
pub mod vendor;
pub mod virtual_disk;
pub mod wwid;

pub use config::ResolverConfig;
pub use engine::CatalogSearchEngine;
pub use error::{ConfigError, Result, SearchError};
pub use megaraid::{ControllerBlock, MegaRaidCatalog, MegaRaidDrive, drive_descriptors};
pub use outcome::{DegradeReason, JoinOutcome};
pub use path::{KeyPath, resolve};
pub use physical_drive::{ScsiAddress, SlotAddress, join_physical_drive};
pub use store::{JsonDirCatalogStore, MemoryCatalogStore};
pub use vendor::build_vendor_index;
pub use virtual_disk::{VirtualDiskRef, join_virtual_disk};
pub use wwid::find_drive_wwid_by_index;
