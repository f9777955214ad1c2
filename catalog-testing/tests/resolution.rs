// SPDX-License-Identifier: GPL-3.0-only

use std::sync::Arc;

use catalog_contracts::{CatalogError, CatalogErrorKind};
use catalog_search::{CatalogSearchEngine, MemoryCatalogStore, SearchError};
use catalog_testing::RecordingStore;
use catalog_testing::fixtures::{
    NODE, NodeCatalogs, VirtualDiskFixture, controller_catalog, drive, physical_drive_catalog,
    virtual_disk_catalog,
};
use catalog_types::{DriveFilter, SourceNames};

fn engine(store: Arc<RecordingStore<Arc<MemoryCatalogStore>>>) -> CatalogSearchEngine {
    CatalogSearchEngine::new(store)
}

fn recording(catalogs: NodeCatalogs) -> Arc<RecordingStore<Arc<MemoryCatalogStore>>> {
    Arc::new(RecordingStore::new(catalogs.into_store()))
}

fn mixed_node() -> NodeCatalogs {
    NodeCatalogs::new(vec![
        drive(0, "sda", "0:2:0:0", "/c0/v0"),
        drive(1, "sdb", "0:2:5:0", ""),
        drive(2, "sdc", "", ""),
    ])
    .virtual_disks(virtual_disk_catalog(&[
        VirtualDiskFixture::new(0, 0, "RAID0", "100GB").member(0, "252:0")
    ]))
    .controllers(controller_catalog(&[(0, "LSI")]))
    .physical_drives(physical_drive_catalog(0, &[(3, 5, 5, "JBOD"), (3, 6, 6, "Onln")]))
}

#[tokio::test]
async fn returns_one_record_per_entry_in_order() {
    let store = recording(mixed_node());
    let records = engine(store).get_extended_catalog(NODE, None).await.unwrap();

    let names: Vec<&str> = records.iter().map(|r| r.identity.dev_name.as_str()).collect();
    assert_eq!(names, ["sda", "sdb", "sdc"]);
}

#[tokio::test]
async fn extends_raid_backed_drive() {
    let store = recording(mixed_node());
    let records = engine(store).get_extended_catalog(NODE, None).await.unwrap();
    let raid = &records[0];

    assert_eq!(raid.size.as_deref(), Some("100GB"));
    assert_eq!(raid.drive_type.as_deref(), Some("RAID0"));
    assert_eq!(raid.controller_id.as_deref(), Some("0"));
    assert_eq!(raid.controller_vendor.as_deref(), Some("lsi"));
    assert_eq!(raid.device_ids, vec![0]);
    assert_eq!(raid.slot_ids, vec!["/c0/e252/s0"]);
    assert_eq!(raid.physical_disks[0].media_type.as_deref(), Some("HDD"));
    assert_eq!(raid.identity.virtual_disk, "/c0/v0");
}

#[tokio::test]
async fn extends_jbod_drive() {
    let store = recording(mixed_node());
    let records = engine(store).get_extended_catalog(NODE, None).await.unwrap();
    let jbod = &records[1];

    assert_eq!(jbod.size.as_deref(), Some("1.818 TB"));
    assert_eq!(jbod.drive_type.as_deref(), Some("JBOD"));
    assert_eq!(jbod.device_ids, vec![5]);
    assert_eq!(jbod.slot_ids, vec!["/c0/e3/s5"]);
    assert_eq!(jbod.controller_vendor.as_deref(), Some("lsi"));
    assert_eq!(jbod.physical_disks.len(), 1);
}

#[tokio::test]
async fn entry_without_scsi_id_keeps_identity_only() {
    let store = recording(mixed_node());
    let records = engine(store).get_extended_catalog(NODE, None).await.unwrap();
    let bare = &records[2];

    assert!(!bare.is_extended());
    assert_eq!(bare.identity.identifier, 2);
    assert!(bare.slot_ids.is_empty());
}

#[tokio::test]
async fn filter_selects_by_identifier_or_device_name() {
    let store = recording(mixed_node());
    let filter: DriveFilter = ["2", "sdb"].into_iter().collect();

    let records = engine(store)
        .get_extended_catalog(NODE, Some(&filter))
        .await
        .unwrap();

    let ids: Vec<u64> = records.iter().map(|r| r.identity.identifier).collect();
    assert_eq!(ids, [1, 2]);
}

#[tokio::test]
async fn empty_filter_accepts_everything() {
    let store = recording(mixed_node());
    let records = engine(store)
        .get_extended_catalog(NODE, Some(&DriveFilter::new()))
        .await
        .unwrap();
    assert_eq!(records.len(), 3);
}

#[tokio::test]
async fn filter_matching_nothing_yields_empty_result() {
    let store = recording(mixed_node());
    let filter: DriveFilter = ["sdz"].into_iter().collect();

    let records = engine(store.clone())
        .get_extended_catalog(NODE, Some(&filter))
        .await
        .unwrap();

    assert!(records.is_empty());
    assert_eq!(store.sources_looked_up(), ["driveId"]);
}

#[tokio::test]
async fn missing_drive_catalog_stops_before_other_fetches() {
    let store = Arc::new(RecordingStore::new(Arc::new(MemoryCatalogStore::new())));
    let error = engine(store.clone())
        .get_extended_catalog(NODE, None)
        .await
        .unwrap_err();

    assert!(matches!(error, SearchError::CatalogMissing { .. }));
    assert_eq!(store.lookups().len(), 1);
}

#[tokio::test]
async fn raid_catalogs_skipped_without_virtual_disk_references() {
    let store = recording(
        NodeCatalogs::new(vec![drive(0, "sda", "0:2:5:0", ""), drive(1, "sdb", "", "")])
            .physical_drives(physical_drive_catalog(0, &[(3, 5, 5, "JBOD")])),
    );
    let sources = SourceNames::default();

    engine(store.clone()).get_extended_catalog(NODE, None).await.unwrap();

    assert_eq!(store.lookup_count(&sources.virtual_disks), 0);
    assert_eq!(store.lookup_count(&sources.controllers), 0);
}

#[tokio::test]
async fn raid_catalogs_skipped_when_filter_excludes_raid_drives() {
    let store = recording(mixed_node());
    let filter: DriveFilter = ["sdb"].into_iter().collect();
    let sources = SourceNames::default();

    let records = engine(store.clone())
        .get_extended_catalog(NODE, Some(&filter))
        .await
        .unwrap();

    assert_eq!(records[0].controller_vendor, None);
    assert_eq!(store.lookup_count(&sources.virtual_disks), 0);
    assert_eq!(store.lookup_count(&sources.controllers), 0);
}

#[tokio::test]
async fn physical_drive_catalog_fetched_at_most_once() {
    let store = recording(
        NodeCatalogs::new(vec![
            drive(0, "sda", "0:2:5:0", ""),
            drive(1, "sdb", "0:2:6:0", ""),
            drive(2, "sdc", "0:2:7:0", ""),
        ])
        .physical_drives(physical_drive_catalog(0, &[(3, 5, 5, "JBOD"), (3, 6, 6, "JBOD")])),
    );

    let records = engine(store.clone()).get_extended_catalog(NODE, None).await.unwrap();

    assert_eq!(store.lookup_count("megaraid-physical-drives"), 1);
    assert_eq!(records[1].slot_ids, vec!["/c0/e3/s6"]);
    assert!(!records[2].is_extended());
}

#[tokio::test]
async fn unparseable_scsi_id_never_fetches_physical_drives() {
    let store = recording(NodeCatalogs::new(vec![
        drive(0, "sda", "", ""),
        drive(1, "sdb", "host0", ""),
    ]));

    let records = engine(store.clone()).get_extended_catalog(NODE, None).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(store.lookup_count("megaraid-physical-drives"), 0);
}

#[tokio::test]
async fn missing_virtual_disk_catalog_is_catalog_missing() {
    let store = recording(
        NodeCatalogs::new(vec![drive(0, "sda", "0:2:0:0", "/c0/v0")])
            .controllers(controller_catalog(&[(0, "LSI")])),
    );

    let error = engine(store).get_extended_catalog(NODE, None).await.unwrap_err();
    assert!(matches!(error, SearchError::CatalogMissing { .. }));
    assert_eq!(error.catalog(), "megaraid-virtual-disks");
}

#[tokio::test]
async fn missing_controller_catalog_is_catalog_missing() {
    let store = recording(
        NodeCatalogs::new(vec![drive(0, "sda", "0:2:0:0", "/c0/v0")]).virtual_disks(
            virtual_disk_catalog(&[VirtualDiskFixture::new(0, 0, "RAID1", "1TB").member(0, "8:0")]),
        ),
    );

    let error = engine(store).get_extended_catalog(NODE, None).await.unwrap_err();
    assert_eq!(error.catalog(), "megaraid-controllers");
}

#[tokio::test]
async fn virtual_disk_catalog_without_controllers_is_catalog_missing() {
    let store = recording(
        NodeCatalogs::new(vec![drive(0, "sda", "0:2:0:0", "/c0/v0")])
            .virtual_disks(serde_json::json!({ "Controllers": [] }))
            .controllers(controller_catalog(&[(0, "LSI")])),
    );

    let error = engine(store).get_extended_catalog(NODE, None).await.unwrap_err();
    assert_eq!(error.catalog(), "megaraid-virtual-disks");
}

#[tokio::test]
async fn store_failure_on_secondary_catalog_is_terminal() {
    let store = recording(mixed_node());
    store.fail_source(
        "megaraid-controllers",
        CatalogError::new(CatalogErrorKind::Timeout, "query timed out"),
    );

    let error = engine(store).get_extended_catalog(NODE, None).await.unwrap_err();
    match error {
        SearchError::Store { catalog, error, .. } => {
            assert_eq!(catalog, "megaraid-controllers");
            assert!(error.kind.is_transient());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unmatched_virtual_disk_is_cleared_and_stable() {
    let store = recording(
        NodeCatalogs::new(vec![drive(0, "sda", "0:2:0:0", "/c0/v9")])
            .virtual_disks(virtual_disk_catalog(&[
                VirtualDiskFixture::new(0, 0, "RAID0", "100GB").member(0, "252:0")
            ]))
            .controllers(controller_catalog(&[(0, "LSI")])),
    );
    let engine = engine(store);

    let first = engine.get_extended_catalog(NODE, None).await.unwrap();
    let second = engine.get_extended_catalog(NODE, None).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first[0].identity.virtual_disk, "");
    assert!(!first[0].is_extended());
}

#[tokio::test]
async fn vendors_attach_per_controller() {
    let store = recording(
        NodeCatalogs::new(vec![
            drive(0, "sda", "0:2:0:0", "/c0/v0"),
            drive(1, "sdb", "1:2:1:0", "/c1/v1"),
        ])
        .virtual_disks(virtual_disk_catalog(&[
            VirtualDiskFixture::new(0, 0, "RAID0", "100GB").member(0, "252:0"),
            VirtualDiskFixture::new(1, 1, "RAID1", "2TB")
                .member(4, "8:4")
                .member(5, "8:5"),
        ]))
        .controllers(controller_catalog(&[(0, "LSI"), (1, "Dell")])),
    );

    let records = engine(store).get_extended_catalog(NODE, None).await.unwrap();

    assert_eq!(records[0].controller_vendor.as_deref(), Some("lsi"));
    assert_eq!(records[1].controller_vendor.as_deref(), Some("dell"));
    assert_eq!(records[1].controller_id.as_deref(), Some("1"));
    assert_eq!(records[1].slot_ids, vec!["/c1/e8/s4", "/c1/e8/s5"]);
}

#[tokio::test]
async fn records_serialize_with_catalog_field_names() {
    let store = recording(mixed_node());
    let records = engine(store).get_extended_catalog(NODE, None).await.unwrap();
    let value = serde_json::to_value(&records[0]).unwrap();

    assert_eq!(value["devName"], "sda");
    assert_eq!(value["type"], "RAID0");
    assert_eq!(value["slotIds"][0], "/c0/e252/s0");
    assert_eq!(value["physicalDisks"][0]["deviceId"], 0);
}
