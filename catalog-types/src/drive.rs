//! Drive identity and extended drive models
//!
//! `DriveIdentityEntry` is what the drive-identity catalog producer records for
//! every logical drive the OS sees. `ExtendedDriveRecord` is the resolver output:
//! the same identity plus the RAID/JBOD composition behind it.

use serde::{Deserialize, Serialize};

use crate::common::{lenient_opt_string, lenient_string, lenient_u64};

/// One row of the drive-identity catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DriveIdentityEntry {
    /// Drive index assigned by the collector
    #[serde(deserialize_with = "lenient_u64")]
    pub identifier: u64,

    /// OS device name (e.g., "sda")
    #[serde(default, deserialize_with = "lenient_string")]
    pub dev_name: String,

    /// SCSI address, "controller:bus:device"
    #[serde(default, deserialize_with = "lenient_string")]
    pub scsi_id: String,

    /// Virtual disk path (e.g., "/c0/v1"), empty for JBOD drives
    #[serde(default, deserialize_with = "lenient_string")]
    pub virtual_disk: String,

    /// WWID in the format ESXi reports
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub esxi_wwid: Option<String>,

    /// WWID in the format Linux reports
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub linux_wwid: Option<String>,
}

impl DriveIdentityEntry {
    /// Whether the drive sits behind a RAID virtual disk.
    pub fn has_virtual_disk(&self) -> bool {
        !self.virtual_disk.is_empty()
    }
}

/// Member disk of a virtual disk, or the disk behind a JBOD drive
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalDiskDescriptor {
    /// Controller-local device id (MegaRAID "DID")
    pub device_id: u64,

    /// Enclosure id (MegaRAID "EID")
    pub enclosure_id: String,

    /// Slot number within the enclosure
    pub slot_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Interface, e.g. "SAS" or "SATA"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    /// Media type, e.g. "HDD" or "SSD"
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl PhysicalDiskDescriptor {
    /// Composite slot path used by downstream tooling, e.g. "/c0/e252/s10".
    pub fn slot_path(&self, controller_id: &str) -> String {
        format!(
            "/c{}/e{}/s{}",
            controller_id, self.enclosure_id, self.slot_id
        )
    }
}

/// Drive identity enriched with controller and physical disk information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedDriveRecord {
    #[serde(flatten)]
    pub identity: DriveIdentityEntry,

    /// Capacity as reported by the controller (e.g., "1.091 TB")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// RAID level for virtual disks, drive state for JBOD drives
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub drive_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller_id: Option<String>,

    /// Lower-cased controller OEM (e.g., "lsi", "dell")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller_vendor: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub physical_disks: Vec<PhysicalDiskDescriptor>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub device_ids: Vec<u64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slot_ids: Vec<String>,
}

impl From<DriveIdentityEntry> for ExtendedDriveRecord {
    fn from(identity: DriveIdentityEntry) -> Self {
        Self {
            identity,
            size: None,
            drive_type: None,
            controller_id: None,
            controller_vendor: None,
            physical_disks: Vec::new(),
            device_ids: Vec::new(),
            slot_ids: Vec::new(),
        }
    }
}

impl ExtendedDriveRecord {
    /// Whether any controller information was attached.
    pub fn is_extended(&self) -> bool {
        self.controller_id.is_some()
    }

    /// Attach the physical disks behind this drive.
    ///
    /// `device_ids` and `slot_ids` are rebuilt from `disks` so all three lists
    /// stay index-aligned.
    pub fn set_physical_disks(&mut self, controller_id: &str, disks: Vec<PhysicalDiskDescriptor>) {
        self.device_ids = disks.iter().map(|disk| disk.device_id).collect();
        self.slot_ids = disks
            .iter()
            .map(|disk| disk.slot_path(controller_id))
            .collect();
        self.physical_disks = disks;
        self.controller_id = Some(controller_id.to_string());
    }
}
