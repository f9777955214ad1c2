// SPDX-License-Identifier: GPL-3.0-only

use catalog_types::DriveIdentityEntry;

/// WWID of the drive with `identifier == drive_index`.
///
/// Returns the ESXi formatted WWID when `use_esxi_format` is set, otherwise the
/// Linux one. `None` when no entry matches or the requested WWID is absent.
pub fn find_drive_wwid_by_index(
    entries: &[DriveIdentityEntry],
    use_esxi_format: bool,
    drive_index: u64,
) -> Option<&str> {
    let entry = entries
        .iter()
        .find(|entry| entry.identifier == drive_index)?;

    if use_esxi_format {
        entry.esxi_wwid.as_deref()
    } else {
        entry.linux_wwid.as_deref()
    }
}
