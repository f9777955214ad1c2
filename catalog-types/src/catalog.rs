//! Catalog snapshots and catalog source naming

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A recorded snapshot of one catalog source for one node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub id: Uuid,

    /// Node the catalog was collected from
    pub node: String,

    /// Producer name (e.g., "driveId", "megaraid-controllers")
    pub source: String,

    pub created_at: DateTime<Utc>,

    /// Vendor payload, decoded by the consumer
    pub data: Value,
}

impl Catalog {
    /// Create a snapshot stamped with the current time.
    pub fn new(node: impl Into<String>, source: impl Into<String>, data: Value) -> Self {
        Self::recorded_at(node, source, data, Utc::now())
    }

    pub fn recorded_at(
        node: impl Into<String>,
        source: impl Into<String>,
        data: Value,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            node: node.into(),
            source: source.into(),
            created_at,
            data,
        }
    }
}

/// Source names under which the catalog producers record their output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceNames {
    pub drive_id: String,
    pub virtual_disks: String,
    pub controllers: String,
    pub physical_drives: String,
}

impl Default for SourceNames {
    fn default() -> Self {
        Self {
            drive_id: "driveId".to_string(),
            virtual_disks: "megaraid-virtual-disks".to_string(),
            controllers: "megaraid-controllers".to_string(),
            physical_drives: "megaraid-physical-drives".to_string(),
        }
    }
}
