use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Controller id → lower-cased controller vendor, built once per resolution call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControllerVendorMap {
    vendors: BTreeMap<u32, String>,
}

impl ControllerVendorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the vendor for a controller. The vendor is stored lower-cased.
    pub fn insert(&mut self, controller_id: u32, vendor: &str) {
        self.vendors.insert(controller_id, vendor.to_lowercase());
    }

    pub fn get(&self, controller_id: u32) -> Option<&str> {
        self.vendors.get(&controller_id).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.vendors.len()
    }
}
