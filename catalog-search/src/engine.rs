// SPDX-License-Identifier: GPL-3.0-only

use std::sync::Arc;

use catalog_contracts::CatalogStore;
use catalog_types::{
    Catalog, ControllerVendorMap, DriveFilter, DriveIdentityEntry, ExtendedDriveRecord,
    SourceNames,
};
use serde_json::Value;
use tokio::sync::OnceCell;

use crate::error::{Result, SearchError};
use crate::megaraid::MegaRaidCatalog;
use crate::outcome::JoinOutcome;
use crate::physical_drive::{join_physical_drive, needs_physical_catalog};
use crate::vendor::build_vendor_index;
use crate::virtual_disk::join_virtual_disk;

/// Resolves a node's drive-identity catalog into extended drive records
#[derive(Clone)]
pub struct CatalogSearchEngine {
    store: Arc<dyn CatalogStore>,
    sources: SourceNames,
}

impl CatalogSearchEngine {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            sources: SourceNames::default(),
        }
    }

    pub fn with_sources(mut self, sources: SourceNames) -> Self {
        self.sources = sources;
        self
    }

    pub fn sources(&self) -> &SourceNames {
        &self.sources
    }

    /// Extended records for the drives of `node_id` accepted by `filter`.
    ///
    /// The virtual-disk and controller catalogs are only fetched when a
    /// filtered drive references a virtual disk, and the physical-drive
    /// catalog only when a JBOD drive has a usable SCSI address. Entries that
    /// cannot be joined are returned with identity fields only.
    pub async fn get_extended_catalog(
        &self,
        node_id: &str,
        filter: Option<&DriveFilter>,
    ) -> Result<Vec<ExtendedDriveRecord>> {
        let entries = self.drive_identity_entries(node_id).await?;
        let total = entries.len();

        let entries: Vec<DriveIdentityEntry> = match filter {
            Some(filter) => entries
                .into_iter()
                .filter(|entry| filter.accepts(entry))
                .collect(),
            None => entries,
        };

        let (virtual_disks, vendors) =
            if entries.iter().any(DriveIdentityEntry::has_virtual_disk) {
                let (virtual_disks, controllers) = tokio::try_join!(
                    self.virtual_disk_catalog(node_id),
                    self.controller_catalog(node_id)
                )?;
                (virtual_disks, build_vendor_index(&controllers))
            } else {
                tracing::debug!(
                    "No virtual disks referenced on node {}; skipping RAID catalogs",
                    node_id
                );
                (MegaRaidCatalog::default(), ControllerVendorMap::new())
            };

        let physical_drives = OnceCell::new();
        let mut records = Vec::with_capacity(entries.len());
        let mut degraded = 0;

        for entry in entries {
            let outcome = if entry.has_virtual_disk() {
                join_virtual_disk(entry, &virtual_disks, &vendors)
            } else if needs_physical_catalog(&entry) {
                let catalog = physical_drives
                    .get_or_try_init(|| self.physical_drive_catalog(node_id))
                    .await?;
                join_physical_drive(entry, catalog, &vendors)
            } else {
                join_physical_drive(entry, &MegaRaidCatalog::default(), &vendors)
            };

            if let JoinOutcome::Degraded { record, reason } = &outcome {
                degraded += 1;
                tracing::warn!(
                    "Drive {} ({}) on node {} not extended: {}",
                    record.identity.identifier,
                    record.identity.dev_name,
                    node_id,
                    reason
                );
            }
            records.push(outcome.into_record());
        }

        tracing::info!(
            "Resolved {} of {} drive catalog entries for node {} ({} degraded)",
            records.len(),
            total,
            node_id,
            degraded
        );

        Ok(records)
    }

    async fn fetch(&self, node_id: &str, source: &str) -> Result<Option<Catalog>> {
        tracing::debug!("Fetching {} catalog for node {}", source, node_id);
        self.store
            .find_most_recent(node_id, source)
            .await
            .map_err(|error| SearchError::Store {
                node: node_id.to_string(),
                catalog: source.to_string(),
                error,
            })
    }

    async fn fetch_required(&self, node_id: &str, source: &str) -> Result<Value> {
        self.fetch(node_id, source)
            .await?
            .map(|catalog| catalog.data)
            .ok_or_else(|| SearchError::missing(node_id, source, "no catalog recorded"))
    }

    /// Decoded drive-identity catalog; fails when absent or empty.
    pub async fn drive_identity_entries(&self, node_id: &str) -> Result<Vec<DriveIdentityEntry>> {
        let source = self.sources.drive_id.as_str();
        let data = self.fetch_required(node_id, source).await?;

        let Value::Array(rows) = data else {
            return Err(SearchError::missing(node_id, source, "catalog data is not a list"));
        };
        if rows.is_empty() {
            return Err(SearchError::missing(node_id, source, "catalog data is empty"));
        }

        rows.into_iter()
            .enumerate()
            .map(|(index, row)| {
                serde_json::from_value(row).map_err(|error| {
                    SearchError::missing(node_id, source, format!("entry {index}: {error}"))
                })
            })
            .collect()
    }

    async fn virtual_disk_catalog(&self, node_id: &str) -> Result<MegaRaidCatalog> {
        let source = self.sources.virtual_disks.as_str();
        let catalog = MegaRaidCatalog::decode(self.fetch_required(node_id, source).await?)
            .ok_or_else(|| SearchError::missing(node_id, source, "no Controllers collection"))?;

        if catalog.is_empty() {
            return Err(SearchError::missing(node_id, source, "no controller entries"));
        }
        Ok(catalog)
    }

    async fn controller_catalog(&self, node_id: &str) -> Result<MegaRaidCatalog> {
        let source = self.sources.controllers.as_str();
        MegaRaidCatalog::decode(self.fetch_required(node_id, source).await?)
            .ok_or_else(|| SearchError::missing(node_id, source, "no Controllers collection"))
    }

    async fn physical_drive_catalog(&self, node_id: &str) -> Result<MegaRaidCatalog> {
        let source = self.sources.physical_drives.as_str();
        let data = self.fetch_required(node_id, source).await?;

        Ok(MegaRaidCatalog::decode(data).unwrap_or_else(|| {
            tracing::debug!(
                "{} catalog for node {} has no Controllers collection",
                source,
                node_id
            );
            MegaRaidCatalog::default()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCatalogStore;
    use catalog_contracts::{CatalogError, CatalogErrorKind};
    use serde_json::json;

    struct FailingStore;

    #[async_trait::async_trait]
    impl CatalogStore for FailingStore {
        async fn find_most_recent(
            &self,
            _node_id: &str,
            _source: &str,
        ) -> std::result::Result<Option<Catalog>, CatalogError> {
            Err(CatalogError::new(CatalogErrorKind::Unavailable, "database offline"))
        }
    }

    fn jbod_store() -> Arc<MemoryCatalogStore> {
        let store = Arc::new(MemoryCatalogStore::new());
        store.record(
            "node-1",
            "driveId",
            json!([
                { "identifier": 0, "devName": "sda", "scsiId": "0:2:5:0", "virtualDisk": "" },
                { "identifier": 1, "devName": "sdb", "scsiId": "", "virtualDisk": "" }
            ]),
        );
        store.record(
            "node-1",
            "megaraid-physical-drives",
            json!({
                "Controllers": [{
                    "Command Status": { "Controller": 0 },
                    "Response Data": {
                        "Drive /c0/e3/s5": [{ "DID": 5, "EID:Slt": "3:5", "State": "JBOD" }]
                    }
                }]
            }),
        );
        store
    }

    #[tokio::test]
    async fn resolves_jbod_only_node_without_raid_catalogs() {
        let engine = CatalogSearchEngine::new(jbod_store());
        let records = engine.get_extended_catalog("node-1", None).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].slot_ids, vec!["/c0/e3/s5"]);
        assert_eq!(records[0].controller_vendor, None);
        assert!(!records[1].is_extended());
    }

    #[tokio::test]
    async fn null_virtual_disk_takes_the_jbod_path() {
        let store = jbod_store();
        store.record(
            "node-2",
            "driveId",
            json!([
                { "identifier": 0, "devName": "sda", "scsiId": "", "virtualDisk": "" },
                { "identifier": 1, "devName": null, "scsiId": "0:2:5:0", "virtualDisk": null }
            ]),
        );
        store.record(
            "node-2",
            "megaraid-physical-drives",
            json!({
                "Controllers": [{
                    "Command Status": { "Controller": 0 },
                    "Response Data": {
                        "Drive /c0/e3/s5": [{ "DID": 5, "EID:Slt": "3:5", "State": "JBOD" }]
                    }
                }]
            }),
        );
        let engine = CatalogSearchEngine::new(store);

        let records = engine.get_extended_catalog("node-2", None).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].identity.virtual_disk, "");
        assert_eq!(records[1].slot_ids, vec!["/c0/e3/s5"]);
    }

    #[tokio::test]
    async fn missing_drive_catalog_is_catalog_missing() {
        let engine = CatalogSearchEngine::new(Arc::new(MemoryCatalogStore::new()));
        let error = engine.get_extended_catalog("node-1", None).await.unwrap_err();

        assert!(matches!(error, SearchError::CatalogMissing { .. }));
        assert_eq!(error.catalog(), "driveId");
        assert!(error.to_string().contains("node-1"));
    }

    #[tokio::test]
    async fn empty_or_non_list_drive_catalog_is_catalog_missing() {
        let store = Arc::new(MemoryCatalogStore::new());
        store.record("empty", "driveId", json!([]));
        store.record("object", "driveId", json!({ "identifier": 0 }));
        let engine = CatalogSearchEngine::new(store);

        for node in ["empty", "object"] {
            let error = engine.get_extended_catalog(node, None).await.unwrap_err();
            assert!(matches!(error, SearchError::CatalogMissing { .. }), "{node}");
        }
    }

    #[tokio::test]
    async fn store_failures_are_terminal() {
        let engine = CatalogSearchEngine::new(Arc::new(FailingStore));
        let error = engine.get_extended_catalog("node-1", None).await.unwrap_err();

        match error {
            SearchError::Store { node, catalog, error } => {
                assert_eq!(node, "node-1");
                assert_eq!(catalog, "driveId");
                assert_eq!(error.kind, CatalogErrorKind::Unavailable);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn custom_source_names_are_used() {
        let store = Arc::new(MemoryCatalogStore::new());
        store.record(
            "node-1",
            "drive-ids",
            json!([{ "identifier": 0, "devName": "sda", "scsiId": "", "virtualDisk": "" }]),
        );
        let engine = CatalogSearchEngine::new(store).with_sources(SourceNames {
            drive_id: "drive-ids".to_string(),
            ..SourceNames::default()
        });

        let records = engine.get_extended_catalog("node-1", None).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(engine.sources().drive_id, "drive-ids");
    }

    #[tokio::test]
    async fn missing_physical_drive_catalog_fails_the_call() {
        let store = Arc::new(MemoryCatalogStore::new());
        store.record(
            "node-1",
            "driveId",
            json!([{ "identifier": 0, "devName": "sda", "scsiId": "0:2:5", "virtualDisk": "" }]),
        );
        let engine = CatalogSearchEngine::new(store);

        let error = engine.get_extended_catalog("node-1", None).await.unwrap_err();
        assert_eq!(error.catalog(), "megaraid-physical-drives");
    }
}
