// SPDX-License-Identifier: GPL-3.0-only

//! JBOD drive correlation
//!
//! The device id in the OS SCSI address is matched against the MegaRAID `DID`.
//! This is only reliable on nodes with a single RAID controller: the SCSI host
//! number is not guaranteed to equal the storcli controller index. A
//! multi-controller node needs a different key (for example the WWID matched
//! against the "OS Device Name" of a SMART catalog), which is not done here.

use catalog_types::{ControllerVendorMap, DriveIdentityEntry, ExtendedDriveRecord};

use crate::megaraid::{MegaRaidCatalog, MegaRaidDrive, drive_descriptors};
use crate::outcome::{DegradeReason, JoinOutcome};

/// `controller:bus:device[:lun]` address from the drive-identity catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScsiAddress {
    pub controller: u32,
    pub bus: u32,
    pub device: u64,
}

impl ScsiAddress {
    pub fn parse(scsi_id: &str) -> Option<Self> {
        let mut parts = scsi_id.split(':').map(str::trim);
        let controller = parts.next()?.parse().ok()?;
        let bus = parts.next()?.parse().ok()?;
        let device = parts.next()?.parse().ok()?;
        Some(Self {
            controller,
            bus,
            device,
        })
    }
}

/// Controller, enclosure and slot parsed from a drive label such as
/// `"Drive /c0/e252/s10"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotAddress {
    pub controller: String,
    pub enclosure: String,
    pub slot: String,
}

impl SlotAddress {
    /// Parse the last `/c<n>/e<n>/s<n>` occurrence in `label`.
    pub fn parse(label: &str) -> Option<Self> {
        label
            .rmatch_indices("/c")
            .find_map(|(start, _)| Self::parse_at(&label[start..]))
    }

    fn parse_at(text: &str) -> Option<Self> {
        let (controller, rest) = digits(text.strip_prefix("/c")?)?;
        let (enclosure, rest) = digits(rest.strip_prefix("/e")?)?;
        let (slot, _) = digits(rest.strip_prefix("/s")?)?;
        Some(Self {
            controller: controller.to_string(),
            enclosure: enclosure.to_string(),
            slot: slot.to_string(),
        })
    }
}

fn digits(text: &str) -> Option<(&str, &str)> {
    let end = text
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(text.len());
    if end == 0 {
        return None;
    }
    Some(text.split_at(end))
}

/// Whether resolving `entry` needs the physical-drive catalog at all.
pub fn needs_physical_catalog(entry: &DriveIdentityEntry) -> bool {
    !entry.has_virtual_disk() && ScsiAddress::parse(&entry.scsi_id).is_some()
}

/// Extend a JBOD drive from the physical-drive catalog.
pub fn join_physical_drive(
    entry: DriveIdentityEntry,
    catalog: &MegaRaidCatalog,
    vendors: &ControllerVendorMap,
) -> JoinOutcome {
    let Some(address) = ScsiAddress::parse(&entry.scsi_id) else {
        return JoinOutcome::degraded(entry, DegradeReason::UnparseableScsiId);
    };

    let Some(response) = catalog
        .controller(address.controller)
        .and_then(|block| block.response_data())
    else {
        return JoinOutcome::degraded(entry, DegradeReason::ControllerNotFound);
    };

    let matched = drive_descriptors(response)
        .into_iter()
        .find_map(|(label, base)| {
            let drive = MegaRaidDrive::from_value(base)?;
            if drive.device_id != address.device {
                return None;
            }
            Some((drive, SlotAddress::parse(label)?))
        });

    let Some((drive, slot)) = matched else {
        return JoinOutcome::degraded(entry, DegradeReason::PhysicalDriveNotFound);
    };

    // Slot paths follow the catalog label, not the SCSI host number.
    let mut record = ExtendedDriveRecord::from(entry);
    record.size = drive.size.clone();
    record.drive_type = drive.state.clone();
    record.set_physical_disks(
        &slot.controller,
        vec![drive.descriptor(slot.enclosure, slot.slot)],
    );
    record.controller_vendor = vendors.get(address.controller).map(str::to_string);

    JoinOutcome::Extended(record)
}
