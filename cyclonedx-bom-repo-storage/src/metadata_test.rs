use std::time::Duration;

use cyclonedx_bom_repo::format::SerializationFormat;
use cyclonedx_bom_repo::models::bom::{SpecVersion, UrnUuid};
use pretty_assertions::assert_eq;

use crate::metadata::MetadataService;
use crate::retention::RetentionPolicy;
use crate::test_utils::get_test_repository;

const XML_DOCUMENT: &[u8] = br#"<?xml version="1.0" encoding="utf-8"?>
<bom xmlns="http://cyclonedx.org/schema/bom/1.4" version="1" />"#;

#[tokio::test]
async fn snapshots_reflect_stored_entries() {
    let (repository, _dir) = get_test_repository();
    let service = MetadataService::start(
        repository.clone(),
        RetentionPolicy::default(),
        Duration::from_secs(60 * 60),
    );

    let serial_number = UrnUuid::generate();
    let entry = repository
        .store(&serial_number, None, SerializationFormat::Xml, XML_DOCUMENT)
        .unwrap();
    repository
        .store(&serial_number, None, SerializationFormat::Xml, XML_DOCUMENT)
        .unwrap();
    service.observe_stored(&entry, SpecVersion::V1_4);

    let snapshot = service.snapshot().unwrap();
    assert_eq!(snapshot.serial_count, 1);
    assert_eq!(snapshot.entry_count, 2);
    assert_eq!(
        snapshot.last_seen_spec_versions.get("xml"),
        Some(&"1.4".to_string())
    );

    service.shutdown().await;
}

#[tokio::test]
async fn the_sweeper_enforces_the_policy_in_the_background() {
    let (repository, _dir) = get_test_repository();
    let serial_number = UrnUuid::generate();
    for _ in 0..3 {
        repository
            .store(&serial_number, None, SerializationFormat::Xml, XML_DOCUMENT)
            .unwrap();
    }

    let service = MetadataService::start(
        repository.clone(),
        RetentionPolicy {
            max_versions: Some(1),
            max_age: None,
        },
        Duration::from_millis(20),
    );

    // Give the sweeper a few intervals to run.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(repository.list(&serial_number).unwrap(), vec![3]);

    service.shutdown().await;
}
