use std::time::Duration;

use cyclonedx_bom_repo::format::SerializationFormat;
use cyclonedx_bom_repo::models::bom::UrnUuid;
use pretty_assertions::assert_eq;

use crate::retention::{sweep, RetentionPolicy};
use crate::test_utils::get_test_repository;

const XML_DOCUMENT: &[u8] = br#"<?xml version="1.0" encoding="utf-8"?>
<bom xmlns="http://cyclonedx.org/schema/bom/1.4" version="1" />"#;

fn store_versions(repository: &crate::Repository, serial_number: &UrnUuid, count: u32) {
    for _ in 0..count {
        repository
            .store(serial_number, None, SerializationFormat::Xml, XML_DOCUMENT)
            .unwrap();
    }
}

#[test]
fn an_unlimited_policy_deletes_nothing() {
    let (repository, _dir) = get_test_repository();
    let serial_number = UrnUuid::generate();
    store_versions(&repository, &serial_number, 3);

    let stats = sweep(&repository, &RetentionPolicy::default()).unwrap();

    assert_eq!(stats.deleted_entries, 0);
    assert_eq!(repository.list(&serial_number).unwrap(), vec![1, 2, 3]);
}

#[test]
fn max_versions_keeps_only_the_highest_versions() {
    let (repository, _dir) = get_test_repository();
    let serial_number = UrnUuid::generate();
    store_versions(&repository, &serial_number, 5);

    let policy = RetentionPolicy {
        max_versions: Some(2),
        max_age: None,
    };
    let stats = sweep(&repository, &policy).unwrap();

    assert_eq!(stats.deleted_entries, 3);
    assert_eq!(repository.list(&serial_number).unwrap(), vec![4, 5]);
}

#[test]
fn max_age_expires_old_entries_but_retains_the_newest() {
    let (repository, _dir) = get_test_repository();
    let serial_number = UrnUuid::generate();
    store_versions(&repository, &serial_number, 3);

    // Everything stored above is already older than a zero-length window,
    // yet the newest version must survive.
    std::thread::sleep(Duration::from_millis(10));
    let policy = RetentionPolicy {
        max_versions: None,
        max_age: Some(Duration::ZERO),
    };
    let stats = sweep(&repository, &policy).unwrap();

    assert_eq!(stats.deleted_entries, 2);
    assert_eq!(repository.list(&serial_number).unwrap(), vec![3]);
}

#[test]
fn limits_combine_as_a_union() {
    let (repository, _dir) = get_test_repository();
    let serial_number = UrnUuid::generate();
    store_versions(&repository, &serial_number, 4);

    // The age limit deletes nothing within a day, but the version cap still
    // applies.
    let policy = RetentionPolicy {
        max_versions: Some(3),
        max_age: Some(Duration::from_secs(24 * 60 * 60)),
    };
    let stats = sweep(&repository, &policy).unwrap();

    assert_eq!(stats.deleted_entries, 1);
    assert_eq!(repository.list(&serial_number).unwrap(), vec![2, 3, 4]);
}

#[test]
fn every_serial_is_swept() {
    let (repository, _dir) = get_test_repository();
    let first = UrnUuid::generate();
    let second = UrnUuid::generate();
    store_versions(&repository, &first, 2);
    store_versions(&repository, &second, 2);

    let policy = RetentionPolicy {
        max_versions: Some(1),
        max_age: None,
    };
    sweep(&repository, &policy).unwrap();

    assert_eq!(repository.list(&first).unwrap(), vec![2]);
    assert_eq!(repository.list(&second).unwrap(), vec![2]);
}
