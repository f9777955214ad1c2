// SPDX-License-Identifier: GPL-3.0-only

use catalog_types::{ControllerVendorMap, DriveIdentityEntry, ExtendedDriveRecord};

use crate::megaraid::{MegaRaidCatalog, MegaRaidDrive, VirtualDiskDescriptor};
use crate::outcome::{DegradeReason, JoinOutcome};

/// Controller and virtual disk index parsed from a `/cN/vM` path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualDiskRef {
    pub controller: u32,
    pub index: u32,
}

impl VirtualDiskRef {
    /// Parse the `/c<digits>/v<digits>` prefix of a virtual disk path.
    pub fn parse(path: &str) -> Option<Self> {
        let (controller, rest) = leading_number(path.strip_prefix("/c")?)?;
        let (index, _) = leading_number(rest.strip_prefix("/v")?)?;
        Some(Self { controller, index })
    }

    /// `Response Data` label listing the member drives of this virtual disk.
    pub fn members_label(&self) -> String {
        format!("PDs for VD {}", self.index)
    }
}

fn leading_number(text: &str) -> Option<(u32, &str)> {
    let end = text
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(text.len());
    if end == 0 {
        return None;
    }
    Some((text[..end].parse().ok()?, &text[end..]))
}

/// Extend a drive that sits behind a RAID virtual disk.
///
/// The virtual disk section is looked up by the drive's full `virtualDisk`
/// label in every controller block. An unmatched reference clears
/// `virtualDisk` so the drive is no longer treated as RAID-backed.
pub fn join_virtual_disk(
    entry: DriveIdentityEntry,
    catalog: &MegaRaidCatalog,
    vendors: &ControllerVendorMap,
) -> JoinOutcome {
    let Some(vd_ref) = VirtualDiskRef::parse(&entry.virtual_disk) else {
        return JoinOutcome::degraded(entry, DegradeReason::UnparseableVirtualDisk);
    };

    let matched = catalog.controllers.iter().find_map(|block| {
        let descriptor = block.response_list(&entry.virtual_disk)?.first()?;
        Some((block, descriptor))
    });

    let Some((block, descriptor)) = matched else {
        let mut record = ExtendedDriveRecord::from(entry);
        record.identity.virtual_disk.clear();
        return JoinOutcome::degraded(record, DegradeReason::VirtualDiskNotFound);
    };

    let info = VirtualDiskDescriptor::from_value(descriptor);
    let members = block
        .response_list(&vd_ref.members_label())
        .unwrap_or_default()
        .iter()
        .filter_map(|member| {
            let drive = MegaRaidDrive::from_value(member)?;
            let (enclosure, slot) = drive.enclosure_and_slot()?;
            Some(drive.descriptor(enclosure, slot))
        })
        .collect();

    let mut record = ExtendedDriveRecord::from(entry);
    record.size = info.size;
    record.drive_type = info.raid_type;
    record.set_physical_disks(&vd_ref.controller.to_string(), members);
    record.controller_vendor = vendors.get(vd_ref.controller).map(str::to_string);

    JoinOutcome::Extended(record)
}
