// SPDX-License-Identifier: GPL-3.0-only

//! Canonical domain models for drive catalog resolution
//!
//! This crate defines the single source of truth for the types that flow
//! through the resolver stack:
//!
//! - **catalog-contracts**: `CatalogStore` implementations return [`Catalog`] snapshots
//! - **catalog-search**: decodes snapshots and produces [`ExtendedDriveRecord`]s
//! - **callers**: consume the extended records for provisioning decisions
//!
//! ## Architecture
//!
//! - `DriveIdentityEntry` → one row of the drive-identity catalog
//! - `ExtendedDriveRecord` → identity plus size/type/physical composition
//! - `PhysicalDiskDescriptor` → one member disk behind a record
//!
//! Vendor payloads stay opaque (`serde_json::Value`) inside [`Catalog`] until
//! the search layer decodes them at the fetch boundary.

pub mod catalog;
pub mod common;
pub mod drive;
pub mod filter;
pub mod vendor;

pub use catalog::{Catalog, SourceNames};
pub use drive::{DriveIdentityEntry, ExtendedDriveRecord, PhysicalDiskDescriptor};
pub use filter::DriveFilter;
pub use vendor::ControllerVendorMap;
