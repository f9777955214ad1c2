// SPDX-License-Identifier: GPL-3.0-only

use catalog_types::ControllerVendorMap;
use catalog_types::common::value_as_string;

use crate::megaraid::MegaRaidCatalog;

/// Locations of the controller OEM id, in lookup order. Which one is
/// populated depends on the storcli command the catalog producer ran.
pub const VENDOR_PATHS: &[&str] = &[
    "[Response Data][Scheduled Tasks].OEMID",
    "[Response Data][Basics].OEMID",
    "[Command Status].OEMID",
];

/// Build the controller id → vendor map from a controller catalog.
///
/// Blocks without a controller id or a vendor field are skipped.
pub fn build_vendor_index(catalog: &MegaRaidCatalog) -> ControllerVendorMap {
    let mut vendors = ControllerVendorMap::new();

    for block in &catalog.controllers {
        let Some(controller_id) = block.controller_id else {
            tracing::debug!("Skipping controller block without a controller id");
            continue;
        };

        let vendor = VENDOR_PATHS
            .iter()
            .find_map(|path| block.get(*path).and_then(value_as_string));

        match vendor {
            Some(vendor) => vendors.insert(controller_id, &vendor),
            None => tracing::debug!("No vendor recorded for controller {}", controller_id),
        }
    }

    vendors
}
