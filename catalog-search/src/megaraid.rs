// SPDX-License-Identifier: GPL-3.0-only

//! Typed views over MegaRAID storcli catalogs
//!
//! The controller, virtual-disk and physical-drive catalogs share one shape:
//!
//! ```text
//! "Controllers": [
//!   {
//!     "Command Status": { "Controller": 0, "Status": "Success", ... },
//!     "Response Data": {
//!       "Drive /c0/e252/s0": [ { "DID": 0, "EID:Slt": "252:0", "Size": "1.091 TB", ... } ],
//!       "/c0/v0": [ { "DG/VD": "0/0", "TYPE": "RAID1", "Size": "1.090 TB", ... } ],
//!       "PDs for VD 0": [ { "DID": 0, "EID:Slt": "252:0", ... } ],
//!       ...
//!     }
//!   }
//! ]
//! ```
//!
//! `Response Data` is keyed by labels that embed controller/enclosure/slot
//! numbers, so it stays a JSON map and is read through [`crate::path`].

use catalog_types::PhysicalDiskDescriptor;
use catalog_types::common::{lenient_opt_string, lenient_u64, value_as_u32};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::path::{KeyPath, resolve};

pub const CONTROLLERS: &str = "Controllers";
pub const COMMAND_STATUS: &str = "Command Status";
pub const RESPONSE_DATA: &str = "Response Data";

/// One entry of a catalog's `Controllers` list
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerBlock {
    /// `Command Status.Controller`, when present and numeric
    pub controller_id: Option<u32>,
    fields: Map<String, Value>,
}

impl ControllerBlock {
    /// Decode a controller block. Returns `None` for non-object entries.
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(fields) = value else {
            return None;
        };
        let controller_id = fields
            .get(COMMAND_STATUS)
            .and_then(|status| status.get("Controller"))
            .and_then(value_as_u32);

        Some(Self {
            controller_id,
            fields,
        })
    }

    /// Read a value below this block, e.g. `[Response Data][Scheduled Tasks].OEMID`.
    pub fn get(&self, path: impl Into<KeyPath>) -> Option<&Value> {
        let path = path.into();
        let (first, rest) = path.segments().split_first()?;
        resolve(self.fields.get(first)?, rest.to_vec())
    }

    pub fn response_data(&self) -> Option<&Map<String, Value>> {
        self.fields.get(RESPONSE_DATA)?.as_object()
    }

    /// The list stored under a `Response Data` label.
    pub fn response_list(&self, label: &str) -> Option<&[Value]> {
        self.response_data()?
            .get(label)?
            .as_array()
            .map(Vec::as_slice)
    }
}

/// A decoded `{ "Controllers": [...] }` catalog payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MegaRaidCatalog {
    pub controllers: Vec<ControllerBlock>,
}

impl MegaRaidCatalog {
    /// Decode a catalog payload.
    ///
    /// Returns `None` when the payload has no `Controllers` list. Entries of
    /// the list that are not objects are dropped.
    pub fn decode(data: Value) -> Option<Self> {
        let Value::Object(mut root) = data else {
            return None;
        };
        let Some(Value::Array(entries)) = root.remove(CONTROLLERS) else {
            return None;
        };

        Some(Self {
            controllers: entries
                .into_iter()
                .filter_map(ControllerBlock::from_value)
                .collect(),
        })
    }

    /// First block whose `Command Status.Controller` equals `controller_id`.
    pub fn controller(&self, controller_id: u32) -> Option<&ControllerBlock> {
        self.controllers
            .iter()
            .find(|block| block.controller_id == Some(controller_id))
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

/// Per-drive descriptors inside a `Response Data` map.
///
/// storcli mixes scalar status fields and per-drive sections in one object.
/// Only the per-drive sections are lists; the first element of each list is
/// the drive's base information. Returns `(label, base info)` pairs.
pub fn drive_descriptors(response: &Map<String, Value>) -> Vec<(&str, &Value)> {
    response
        .iter()
        .filter_map(|(label, value)| {
            let first = value.as_array()?.first()?;
            Some((label.as_str(), first))
        })
        .collect()
}

/// Base information of one physical drive
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MegaRaidDrive {
    #[serde(rename = "DID", deserialize_with = "lenient_u64")]
    pub device_id: u64,

    /// "enclosure:slot", e.g. "252:0"
    #[serde(rename = "EID:Slt", default, deserialize_with = "lenient_opt_string")]
    pub enclosure_slot: Option<String>,

    #[serde(rename = "Size", default, deserialize_with = "lenient_opt_string")]
    pub size: Option<String>,

    #[serde(rename = "Intf", default, deserialize_with = "lenient_opt_string")]
    pub interface: Option<String>,

    #[serde(rename = "Med", default, deserialize_with = "lenient_opt_string")]
    pub media: Option<String>,

    #[serde(rename = "Model", default, deserialize_with = "lenient_opt_string")]
    pub model: Option<String>,

    #[serde(rename = "State", default, deserialize_with = "lenient_opt_string")]
    pub state: Option<String>,
}

impl MegaRaidDrive {
    /// Decode drive base information; `None` when `DID` is missing or not numeric.
    pub fn from_value(value: &Value) -> Option<Self> {
        Self::deserialize(value).ok()
    }

    /// Split `EID:Slt` into enclosure and slot.
    ///
    /// Direct-attached drives have no enclosure (`" :4"`); their enclosure
    /// is returned empty. A slot is always required.
    pub fn enclosure_and_slot(&self) -> Option<(String, String)> {
        let (enclosure, slot) = self.enclosure_slot.as_deref()?.split_once(':')?;
        let (enclosure, slot) = (enclosure.trim(), slot.trim());
        if slot.is_empty() {
            return None;
        }
        Some((enclosure.to_string(), slot.to_string()))
    }

    pub fn descriptor(&self, enclosure_id: String, slot_id: String) -> PhysicalDiskDescriptor {
        PhysicalDiskDescriptor {
            device_id: self.device_id,
            enclosure_id,
            slot_id,
            size: self.size.clone(),
            protocol: self.interface.clone(),
            media_type: self.media.clone(),
            model: self.model.clone(),
        }
    }
}

/// Base information of one virtual disk (`/cX/vY` section)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VirtualDiskDescriptor {
    #[serde(rename = "Size", default, deserialize_with = "lenient_opt_string")]
    pub size: Option<String>,

    /// RAID level, e.g. "RAID1"
    #[serde(rename = "TYPE", default, deserialize_with = "lenient_opt_string")]
    pub raid_type: Option<String>,
}

impl VirtualDiskDescriptor {
    pub fn from_value(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }
}
