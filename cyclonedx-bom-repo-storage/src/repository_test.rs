use std::time::Duration;

use cyclonedx_bom_repo::format::SerializationFormat;
use cyclonedx_bom_repo::models::bom::UrnUuid;
use pretty_assertions::assert_eq;

use crate::test_utils::get_test_repository;
use crate::StorageError;

const XML_DOCUMENT: &[u8] = br#"<?xml version="1.0" encoding="utf-8"?>
<bom xmlns="http://cyclonedx.org/schema/bom/1.4" serialNumber="urn:uuid:3e671687-395b-41f5-a30f-a58921a69b79" version="1">
  <components>
    <component type="library">
      <name>name</name>
      <version>version</version>
    </component>
  </components>
</bom>"#;

fn test_serial_number() -> UrnUuid {
    UrnUuid::new("urn:uuid:3e671687-395b-41f5-a30f-a58921a69b79".to_string()).unwrap()
}

#[test]
fn stored_original_bytes_are_returned_unchanged() {
    let (repository, _dir) = get_test_repository();
    let serial_number = test_serial_number();

    // Non-canonical whitespace that a re-encoder would normalize away.
    let document = b"<bom    xmlns=\"http://cyclonedx.org/schema/bom/1.4\"\n\n   version=\"1\"></bom>";
    repository
        .store(&serial_number, None, SerializationFormat::Xml, document)
        .unwrap();

    let (original, format) = repository.retrieve_original(&serial_number, 1).unwrap();
    assert_eq!(original, document);
    assert_eq!(format, SerializationFormat::Xml);
}

#[test]
fn versions_are_assigned_in_order_when_absent() {
    let (repository, _dir) = get_test_repository();
    let serial_number = test_serial_number();

    for expected in 1..=3 {
        let entry = repository
            .store(&serial_number, None, SerializationFormat::Xml, XML_DOCUMENT)
            .unwrap();
        assert_eq!(entry.version, expected);
    }

    assert_eq!(repository.list(&serial_number).unwrap(), vec![1, 2, 3]);
}

#[test]
fn storing_the_same_version_twice_fails_with_already_exists() {
    let (repository, _dir) = get_test_repository();
    let serial_number = test_serial_number();

    repository
        .store(
            &serial_number,
            Some(1),
            SerializationFormat::Xml,
            XML_DOCUMENT,
        )
        .unwrap();
    let second = repository.store(
        &serial_number,
        Some(1),
        SerializationFormat::Json,
        b"{\"bomFormat\":\"CycloneDX\",\"specVersion\":\"1.4\",\"version\":1}",
    );

    assert!(matches!(
        second,
        Err(StorageError::AlreadyExists { version: 1, .. })
    ));
    // The loser must not have replaced the original entry.
    let (original, format) = repository.retrieve_original(&serial_number, 1).unwrap();
    assert_eq!(original, XML_DOCUMENT);
    assert_eq!(format, SerializationFormat::Xml);
    assert_eq!(repository.list(&serial_number).unwrap(), vec![1]);
}

#[test]
fn version_zero_is_rejected() {
    let (repository, _dir) = get_test_repository();
    let serial_number = test_serial_number();

    let result = repository.store(
        &serial_number,
        Some(0),
        SerializationFormat::Xml,
        XML_DOCUMENT,
    );
    assert!(matches!(result, Err(StorageError::InvalidVersion(_))));
}

#[test]
fn retrieval_parses_the_stored_document() {
    let (repository, _dir) = get_test_repository();
    let serial_number = test_serial_number();

    repository
        .store(&serial_number, None, SerializationFormat::Xml, XML_DOCUMENT)
        .unwrap();

    let bom = repository.retrieve(&serial_number, 1).unwrap();
    assert_eq!(
        bom.serial_number.as_ref().map(|serial| serial.to_string()),
        Some(serial_number.to_string())
    );
    assert_eq!(bom.components.map(|components| components.0.len()), Some(1));
}

#[test]
fn listing_tolerates_version_gaps() {
    let (repository, _dir) = get_test_repository();
    let serial_number = test_serial_number();

    for _ in 0..3 {
        repository
            .store(&serial_number, None, SerializationFormat::Xml, XML_DOCUMENT)
            .unwrap();
    }
    repository.delete(&serial_number, 2).unwrap();

    assert_eq!(repository.list(&serial_number).unwrap(), vec![1, 3]);
    // A later store continues above the highest surviving version.
    let entry = repository
        .store(&serial_number, None, SerializationFormat::Xml, XML_DOCUMENT)
        .unwrap();
    assert_eq!(entry.version, 4);
}

#[test]
fn retrieving_the_latest_version_follows_the_highest_number() {
    let (repository, _dir) = get_test_repository();
    let serial_number = test_serial_number();

    for _ in 0..3 {
        repository
            .store(&serial_number, None, SerializationFormat::Xml, XML_DOCUMENT)
            .unwrap();
    }

    let (version, _bom) = repository.retrieve_latest(&serial_number).unwrap();
    assert_eq!(version, 3);

    let missing = repository.retrieve_latest(&UrnUuid::generate());
    assert!(matches!(missing, Err(StorageError::NotFound { .. })));
}

#[test]
fn listing_an_unknown_serial_yields_an_empty_list() {
    let (repository, _dir) = get_test_repository();
    assert_eq!(repository.list(&test_serial_number()).unwrap(), Vec::<u32>::new());
}

#[test]
fn deleting_the_last_version_removes_the_serial() {
    let (repository, _dir) = get_test_repository();
    let serial_number = test_serial_number();

    repository
        .store(&serial_number, None, SerializationFormat::Xml, XML_DOCUMENT)
        .unwrap();
    assert_eq!(repository.list_all().unwrap().len(), 1);

    repository.delete(&serial_number, 1).unwrap();
    assert!(repository.list_all().unwrap().is_empty());
    assert!(!repository.exists(&serial_number, 1));
}

#[test]
fn deleting_a_missing_version_is_not_found() {
    let (repository, _dir) = get_test_repository();
    let result = repository.delete(&test_serial_number(), 7);
    assert!(matches!(result, Err(StorageError::NotFound { .. })));
}

#[test]
fn deleting_all_versions_is_idempotent() {
    let (repository, _dir) = get_test_repository();
    let serial_number = test_serial_number();

    for _ in 0..2 {
        repository
            .store(&serial_number, None, SerializationFormat::Xml, XML_DOCUMENT)
            .unwrap();
    }
    repository.delete_all(&serial_number).unwrap();
    assert!(repository.list(&serial_number).unwrap().is_empty());

    // A second pass over a now-unknown serial succeeds as well.
    repository.delete_all(&serial_number).unwrap();
}

#[test]
fn entries_record_format_and_storage_time() {
    let (repository, _dir) = get_test_repository();
    let serial_number = test_serial_number();

    let stored = repository
        .store(
            &serial_number,
            None,
            SerializationFormat::Json,
            b"{\"bomFormat\":\"CycloneDX\",\"specVersion\":\"1.4\",\"version\":1}",
        )
        .unwrap();

    let entry = repository.entry(&serial_number, 1).unwrap();
    assert_eq!(entry.format, SerializationFormat::Json);
    assert_eq!(entry.version, 1);
    // The sidecar file preserves the storage timestamp to at least second
    // precision.
    assert!((entry.stored_at - stored.stored_at).whole_seconds().abs() < 1);
}

#[test]
fn concurrent_writers_to_the_same_entry_serialize_by_rename() {
    let (repository, _dir) = get_test_repository();
    let serial_number = test_serial_number();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let repository = repository.clone();
        let serial_number = serial_number.clone();
        handles.push(std::thread::spawn(move || {
            repository.store(
                &serial_number,
                Some(1),
                SerializationFormat::Xml,
                XML_DOCUMENT,
            )
        }));
    }

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    let successes = results.iter().filter(|result| result.is_ok()).count();
    assert_eq!(successes, 1);
    for result in results {
        if let Err(error) = result {
            assert!(matches!(error, StorageError::AlreadyExists { .. }));
        }
    }
    assert_eq!(repository.list(&serial_number).unwrap(), vec![1]);
}

#[test]
fn stale_staging_directories_are_cleaned_up() {
    let (repository, dir) = get_test_repository();

    let abandoned = dir.path().join(".tmp").join("deadbeefdeadbeef");
    std::fs::create_dir(&abandoned).unwrap();

    // A generous threshold keeps the fresh directory alive.
    let removed = repository
        .clean_stale_tmp(Duration::from_secs(15 * 60))
        .unwrap();
    assert_eq!(removed, 0);
    assert!(abandoned.is_dir());

    // A zero threshold reclaims anything not currently being committed.
    let removed = repository.clean_stale_tmp(Duration::ZERO).unwrap();
    assert_eq!(removed, 1);
    assert!(!abandoned.exists());
}
