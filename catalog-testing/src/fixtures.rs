// SPDX-License-Identifier: GPL-3.0-only

//! Builders for MegaRAID-shaped catalog payloads

use std::sync::Arc;

use catalog_search::MemoryCatalogStore;
use catalog_types::SourceNames;
use serde_json::{Map, Value, json};

pub const NODE: &str = "node-1";

/// One drive-identity entry.
pub fn drive(identifier: u64, dev_name: &str, scsi_id: &str, virtual_disk: &str) -> Value {
    json!({
        "identifier": identifier,
        "devName": dev_name,
        "scsiId": scsi_id,
        "virtualDisk": virtual_disk,
    })
}

/// Drive-identity entry carrying both WWID formats.
pub fn drive_with_wwids(identifier: u64, dev_name: &str, esxi: &str, linux: &str) -> Value {
    json!({
        "identifier": identifier,
        "devName": dev_name,
        "scsiId": "",
        "virtualDisk": "",
        "esxiWwid": esxi,
        "linuxWwid": linux,
    })
}

fn controller_block(controller: u32, response: Map<String, Value>) -> Value {
    json!({
        "Command Status": { "Controller": controller, "Status": "Success" },
        "Response Data": response,
    })
}

/// Controller catalog with one block per `(controller id, OEM id)`.
pub fn controller_catalog(controllers: &[(u32, &str)]) -> Value {
    let blocks: Vec<Value> = controllers
        .iter()
        .map(|(controller, vendor)| {
            let mut response = Map::new();
            response.insert(
                "Scheduled Tasks".to_string(),
                json!({ "OEMID": vendor, "Patrol Read Reoccurrence": "168 hrs" }),
            );
            controller_block(*controller, response)
        })
        .collect();
    json!({ "Controllers": blocks })
}

/// A virtual disk with its member drives as `(DID, "EID:Slt")`.
#[derive(Debug, Clone)]
pub struct VirtualDiskFixture {
    pub controller: u32,
    pub index: u32,
    pub raid_type: String,
    pub size: String,
    pub members: Vec<(u64, String)>,
}

impl VirtualDiskFixture {
    pub fn new(controller: u32, index: u32, raid_type: &str, size: &str) -> Self {
        Self {
            controller,
            index,
            raid_type: raid_type.to_string(),
            size: size.to_string(),
            members: Vec::new(),
        }
    }

    pub fn member(mut self, device_id: u64, enclosure_slot: &str) -> Self {
        self.members.push((device_id, enclosure_slot.to_string()));
        self
    }

    pub fn path(&self) -> String {
        format!("/c{}/v{}", self.controller, self.index)
    }
}

/// Virtual-disk catalog; virtual disks on the same controller share a block.
pub fn virtual_disk_catalog(disks: &[VirtualDiskFixture]) -> Value {
    let mut blocks: Vec<(u32, Map<String, Value>)> = Vec::new();

    for disk in disks {
        let position = match blocks.iter().position(|(id, _)| *id == disk.controller) {
            Some(position) => position,
            None => {
                blocks.push((disk.controller, Map::new()));
                blocks.len() - 1
            }
        };
        let response = &mut blocks[position].1;

        response.insert(
            disk.path(),
            json!([{
                "DG/VD": format!("0/{}", disk.index),
                "TYPE": disk.raid_type,
                "State": "Optl",
                "Size": disk.size,
            }]),
        );
        let members: Vec<Value> = disk
            .members
            .iter()
            .map(|(device_id, enclosure_slot)| {
                json!({
                    "EID:Slt": enclosure_slot,
                    "DID": device_id,
                    "State": "Onln",
                    "Size": "558.406 GB",
                    "Intf": "SAS",
                    "Med": "HDD",
                    "Model": "ST600MM0088     ",
                })
            })
            .collect();
        response.insert(format!("PDs for VD {}", disk.index), Value::Array(members));
    }

    let blocks: Vec<Value> = blocks
        .into_iter()
        .map(|(controller, response)| controller_block(controller, response))
        .collect();
    json!({ "Controllers": blocks })
}

/// Physical-drive catalog for one controller; drives as
/// `(enclosure, slot, DID, state)`.
pub fn physical_drive_catalog(controller: u32, drives: &[(u32, u32, u64, &str)]) -> Value {
    let mut response = Map::new();
    for (enclosure, slot, device_id, state) in drives {
        response.insert(
            format!("Drive /c{controller}/e{enclosure}/s{slot}"),
            json!([{
                "EID:Slt": format!("{enclosure}:{slot}"),
                "DID": device_id,
                "State": state,
                "Size": "1.818 TB",
                "Intf": "SATA",
                "Med": "HDD",
                "Model": "ST2000NM0055",
            }]),
        );
        response.insert(
            format!("Drive /c{controller}/e{enclosure}/s{slot} - Detailed Information"),
            json!({ "Drive Temperature": "30C (86.00 F)" }),
        );
    }
    json!({ "Controllers": [controller_block(controller, response)] })
}

/// Store holding the given catalogs for [`NODE`] under the default source names.
pub struct NodeCatalogs {
    pub drives: Vec<Value>,
    pub virtual_disks: Option<Value>,
    pub controllers: Option<Value>,
    pub physical_drives: Option<Value>,
}

impl NodeCatalogs {
    pub fn new(drives: Vec<Value>) -> Self {
        Self {
            drives,
            virtual_disks: None,
            controllers: None,
            physical_drives: None,
        }
    }

    pub fn virtual_disks(mut self, data: Value) -> Self {
        self.virtual_disks = Some(data);
        self
    }

    pub fn controllers(mut self, data: Value) -> Self {
        self.controllers = Some(data);
        self
    }

    pub fn physical_drives(mut self, data: Value) -> Self {
        self.physical_drives = Some(data);
        self
    }

    pub fn into_store(self) -> Arc<MemoryCatalogStore> {
        let sources = SourceNames::default();
        let store = Arc::new(MemoryCatalogStore::new());

        store.record(NODE, &sources.drive_id, Value::Array(self.drives));
        if let Some(data) = self.virtual_disks {
            store.record(NODE, &sources.virtual_disks, data);
        }
        if let Some(data) = self.controllers {
            store.record(NODE, &sources.controllers, data);
        }
        if let Some(data) = self.physical_drives {
            store.record(NODE, &sources.physical_drives, data);
        }
        store
    }
}
