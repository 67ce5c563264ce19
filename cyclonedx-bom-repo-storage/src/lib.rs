#![warn(missing_docs)]

//! A filesystem storage implementation for a CycloneDX BOM repository server.
//!
//! This crate persists BOM documents in a content-addressed directory layout
//! keyed by `(serial number, version)` and enables any number of concurrent
//! readers alongside concurrent writers. Writers never take locks: every
//! write is staged in a private temporary directory and published with one
//! atomic rename, so readers observe either the previous state or the
//! complete entry, never a torn one.
//!
//! # Quick Start
//!
//! Open a repository by calling [`Repository::open`], then store and
//! retrieve documents through the returned handle. The handle is cheap to
//! clone and safe to share across threads.
//!
//! ```
//! use cyclonedx_bom_repo::format::SerializationFormat;
//! use cyclonedx_bom_repo::models::bom::UrnUuid;
//! use cyclonedx_bom_repo_storage::{Repository, RepositoryConfig};
//!
//! # let dir = tempfile::tempdir().unwrap();
//! let repository = Repository::open(RepositoryConfig {
//!     directory: dir.path().to_path_buf(),
//! })?;
//!
//! let serial_number =
//!     UrnUuid::new("urn:uuid:3e671687-395b-41f5-a30f-a58921a69b79".to_string()).unwrap();
//! let document = br#"<?xml version="1.0" encoding="utf-8"?>
//! <bom xmlns="http://cyclonedx.org/schema/bom/1.4" version="1" />"#;
//!
//! let entry = repository.store(&serial_number, None, SerializationFormat::Xml, document)?;
//! assert_eq!(entry.version, 1);
//!
//! let (original, format) = repository.retrieve_original(&serial_number, 1)?;
//! assert_eq!(original, document);
//! assert_eq!(format, SerializationFormat::Xml);
//! # Ok::<(), cyclonedx_bom_repo_storage::StorageError>(())
//! ```

pub mod metadata;
pub mod repository;
pub mod retention;

#[cfg(any(feature = "testing", test))]
pub mod test_utils;

use std::path::PathBuf;

use cyclonedx_bom_repo::errors::{BomError, UrnUuidError};

pub use crate::metadata::{MetadataService, RepositoryMetadata};
pub use crate::repository::{BomEntry, Repository, RepositoryConfig};
pub use crate::retention::{RetentionPolicy, SweepStats};

/// Errors returned by the storage layer.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StorageError {
    /// The requested `(serial number, version)` entry does not exist.
    #[error("BOM {serial_number} version {version} was not found")]
    NotFound {
        /// The serial number that was requested.
        serial_number: String,
        /// The version that was requested.
        version: u32,
    },

    /// An entry for this `(serial number, version)` pair has already been
    /// published.
    #[error("BOM {serial_number} version {version} already exists")]
    AlreadyExists {
        /// The serial number that collided.
        serial_number: String,
        /// The version that collided.
        version: u32,
    },

    /// The serial number does not match the canonical `urn:uuid:` form.
    #[error("Invalid serial number: {0}")]
    InvalidSerialNumber(#[from] UrnUuidError),

    /// The version is outside of the valid range.
    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    /// A stored document could not be decoded.
    #[error("Failed to decode a stored document: {0}")]
    CorruptDocument(#[from] BomError),

    /// A stored entry is missing a file or holds data that cannot be parsed.
    #[error("Corrupt repository entry at {path}: {message}")]
    CorruptEntry {
        /// The path of the damaged entry.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },

    /// The underlying filesystem operation failed.
    #[error("Storage failure: {0}")]
    StorageFailure(#[from] std::io::Error),
}

/// A result with [`StorageError`] as the error variant.
pub type StorageResult<V> = std::result::Result<V, StorageError>;
