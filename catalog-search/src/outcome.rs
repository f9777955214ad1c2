// SPDX-License-Identifier: GPL-3.0-only

use std::fmt;

use catalog_types::ExtendedDriveRecord;

/// Why a drive entry could not be extended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradeReason {
    /// `virtualDisk` is not of the form `/cN/vM`
    UnparseableVirtualDisk,
    /// No controller lists the referenced virtual disk; `virtualDisk` was cleared
    VirtualDiskNotFound,
    /// `scsiId` is not a numeric `controller:bus:device` address
    UnparseableScsiId,
    /// The physical-drive catalog has no block for the SCSI controller
    ControllerNotFound,
    /// No drive on the controller carries the SCSI device id
    PhysicalDriveNotFound,
}

impl fmt::Display for DegradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::UnparseableVirtualDisk => "virtual disk path is not /cN/vM",
            Self::VirtualDiskNotFound => "virtual disk not found in catalog",
            Self::UnparseableScsiId => "SCSI id is not controller:bus:device",
            Self::ControllerNotFound => "controller not found in physical drive catalog",
            Self::PhysicalDriveNotFound => "no physical drive with matching device id",
        };
        f.write_str(text)
    }
}

/// Result of joining one drive entry against a secondary catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    Extended(ExtendedDriveRecord),
    /// The record carries identity fields only
    Degraded {
        record: ExtendedDriveRecord,
        reason: DegradeReason,
    },
}

impl JoinOutcome {
    pub fn degraded(record: impl Into<ExtendedDriveRecord>, reason: DegradeReason) -> Self {
        Self::Degraded {
            record: record.into(),
            reason,
        }
    }

    pub fn record(&self) -> &ExtendedDriveRecord {
        match self {
            Self::Extended(record) | Self::Degraded { record, .. } => record,
        }
    }

    pub fn into_record(self) -> ExtendedDriveRecord {
        match self {
            Self::Extended(record) | Self::Degraded { record, .. } => record,
        }
    }

    pub fn degrade_reason(&self) -> Option<DegradeReason> {
        match self {
            Self::Extended(_) => None,
            Self::Degraded { reason, .. } => Some(*reason),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degrade_reason().is_some()
    }
}
