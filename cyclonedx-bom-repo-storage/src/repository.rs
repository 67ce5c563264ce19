//! The content-addressed BOM store.
//!
//! # Directory Structure
//!
//! Under the configured root directory, one directory per serial number and
//! one per version, with the serial number percent-encoded so that URN
//! colons stay filesystem-safe:
//!
//! ```text
//! <root>/
//!   .tmp/
//!     <32 hex chars>/           (staging area for in-flight writes)
//!   urn%3Auuid%3A<uuid>/
//!     1/
//!       bom.xml | bom.json | bom.cdx
//!       stored-at              (ISO-8601 storage timestamp)
//!     2/
//!       ...
//! ```
//!
//! Every entry holds exactly one document file, byte-identical to the
//! original submission, plus the `stored-at` sidecar. The atomic rename of
//! the staged version directory into its final place is the commit point:
//! whichever writer's rename lands first owns the entry, and the loser
//! reports [`StorageError::AlreadyExists`].

#[cfg(test)]
#[path = "repository_test.rs"]
mod repository_test;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use cyclonedx_bom_repo::format::SerializationFormat;
use cyclonedx_bom_repo::models::bom::{Bom, UrnUuid};
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use rand::RngCore;
use time::format_description::well_known::Iso8601;
use time::OffsetDateTime;
use tracing::debug;

use crate::{StorageError, StorageResult};

const TMP_DIR: &str = ".tmp";
const STORED_AT_FILE: &str = "stored-at";
const BOM_FILE_STEM: &str = "bom";

/// Configuration of a [`Repository`].
#[derive(Clone, Debug)]
pub struct RepositoryConfig {
    /// Root directory for storage. Created if it does not exist.
    pub directory: PathBuf,
}

/// A stored `(serial number, version)` entry.
#[derive(Clone, Debug, PartialEq)]
pub struct BomEntry {
    /// The serial number of the stored BOM.
    pub serial_number: UrnUuid,
    /// The version of the stored BOM.
    pub version: u32,
    /// The format the original submission arrived in.
    pub format: SerializationFormat,
    /// When this version was stored in the repository.
    pub stored_at: OffsetDateTime,
}

/// A handle on a BOM repository rooted at one directory.
///
/// The handle is cheap to clone; all clones operate on the same store.
/// Methods take `&self` and are safe to call from any number of threads.
#[derive(Clone, Debug)]
pub struct Repository {
    root: Arc<PathBuf>,
}

impl Repository {
    /// Open the repository, creating the root and its staging area if they
    /// are missing. The staging area must live on the same filesystem as the
    /// published entries for the commit rename to be atomic.
    pub fn open(config: RepositoryConfig) -> StorageResult<Self> {
        fs::create_dir_all(&config.directory)?;
        fs::create_dir_all(config.directory.join(TMP_DIR))?;
        Ok(Self {
            root: Arc::new(config.directory),
        })
    }

    /// Store the original bytes of a submission as a new entry.
    ///
    /// With `version` absent, the next version for the serial is assigned
    /// (one higher than the current maximum, or 1). With `version` given, a
    /// collision with an existing entry fails with
    /// [`StorageError::AlreadyExists`]; racing writers are serialized by the
    /// commit rename, so at most one of them succeeds.
    pub fn store(
        &self,
        serial_number: &UrnUuid,
        version: Option<u32>,
        format: SerializationFormat,
        original: &[u8],
    ) -> StorageResult<BomEntry> {
        let version = match version {
            Some(0) => {
                return Err(StorageError::InvalidVersion(
                    "version must be 1 or greater".to_string(),
                ))
            }
            Some(version) => version,
            None => self.latest_version(serial_number)?.map_or(1, |v| v + 1),
        };

        let stored_at = OffsetDateTime::now_utc();
        let stored_at_contents = stored_at
            .format(&Iso8601::DEFAULT)
            .map_err(|error| StorageError::CorruptEntry {
                path: self.root.as_ref().clone(),
                message: format!("Failed to format the storage timestamp: {}", error),
            })?;

        let tmp_dir = self.root.join(TMP_DIR).join(random_tmp_name());
        fs::create_dir(&tmp_dir)?;

        let write_entry = || -> StorageResult<()> {
            fs::write(
                tmp_dir.join(format!("{}.{}", BOM_FILE_STEM, format.extension())),
                original,
            )?;
            fs::write(tmp_dir.join(STORED_AT_FILE), &stored_at_contents)?;
            Ok(())
        };
        if let Err(error) = write_entry() {
            let _ = fs::remove_dir_all(&tmp_dir);
            return Err(error);
        }

        let version_dir = self.version_dir(serial_number, version);
        if let Some(serial_dir) = version_dir.parent() {
            fs::create_dir_all(serial_dir)?;
        }

        // The rename is the commit point. Renaming onto a non-empty
        // directory fails on every supported platform, which is what turns
        // a lost race into AlreadyExists instead of an overwrite.
        if let Err(error) = fs::rename(&tmp_dir, &version_dir) {
            let _ = fs::remove_dir_all(&tmp_dir);
            return if version_dir.exists() {
                Err(StorageError::AlreadyExists {
                    serial_number: serial_number.to_string(),
                    version,
                })
            } else {
                Err(error.into())
            };
        }

        debug!(
            serial_number = %serial_number,
            version,
            format = %format,
            "Stored a new BOM entry."
        );

        Ok(BomEntry {
            serial_number: serial_number.clone(),
            version,
            format,
            stored_at,
        })
    }

    /// Retrieve the parsed document of an entry.
    pub fn retrieve(&self, serial_number: &UrnUuid, version: u32) -> StorageResult<Bom> {
        let (original, format) = self.retrieve_original(serial_number, version)?;
        Ok(Bom::parse_any(&original, format)?)
    }

    /// Retrieve the exact bytes of the original submission, together with
    /// the format they were submitted in.
    pub fn retrieve_original(
        &self,
        serial_number: &UrnUuid,
        version: u32,
    ) -> StorageResult<(Vec<u8>, SerializationFormat)> {
        let version_dir = self.version_dir(serial_number, version);
        for format in [
            SerializationFormat::Xml,
            SerializationFormat::Json,
            SerializationFormat::Protobuf,
        ] {
            let path = version_dir.join(format!("{}.{}", BOM_FILE_STEM, format.extension()));
            match fs::read(&path) {
                Ok(contents) => return Ok((contents, format)),
                Err(error) if error.kind() == ErrorKind::NotFound => continue,
                Err(error) => return Err(error.into()),
            }
        }
        if version_dir.exists() {
            return Err(StorageError::CorruptEntry {
                path: version_dir,
                message: "entry directory holds no document file".to_string(),
            });
        }
        Err(StorageError::NotFound {
            serial_number: serial_number.to_string(),
            version,
        })
    }

    /// Retrieve the highest stored version of a serial, if any.
    pub fn retrieve_latest(&self, serial_number: &UrnUuid) -> StorageResult<(u32, Bom)> {
        let version = self
            .latest_version(serial_number)?
            .ok_or_else(|| StorageError::NotFound {
                serial_number: serial_number.to_string(),
                version: 0,
            })?;
        Ok((version, self.retrieve(serial_number, version)?))
    }

    /// Full entry metadata for a stored `(serial number, version)` pair.
    pub fn entry(&self, serial_number: &UrnUuid, version: u32) -> StorageResult<BomEntry> {
        let version_dir = self.version_dir(serial_number, version);
        let (_, format) = self.retrieve_original(serial_number, version)?;
        let stored_at_path = version_dir.join(STORED_AT_FILE);
        let contents = fs::read_to_string(&stored_at_path)?;
        let stored_at = OffsetDateTime::parse(contents.trim(), &Iso8601::DEFAULT).map_err(
            |error| StorageError::CorruptEntry {
                path: stored_at_path,
                message: format!("Failed to parse the storage timestamp: {}", error),
            },
        )?;
        Ok(BomEntry {
            serial_number: serial_number.clone(),
            version,
            format,
            stored_at,
        })
    }

    /// All stored versions of a serial, ascending. Unknown serials produce
    /// an empty list rather than an error.
    pub fn list(&self, serial_number: &UrnUuid) -> StorageResult<Vec<u32>> {
        let serial_dir = self.serial_dir(serial_number);
        let entries = match fs::read_dir(&serial_dir) {
            Ok(entries) => entries,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error.into()),
        };

        let mut versions = Vec::new();
        for entry in entries {
            let entry = entry?;
            if let Some(version) = entry
                .file_name()
                .to_str()
                .and_then(|name| name.parse::<u32>().ok())
            {
                versions.push(version);
            }
        }
        versions.sort_unstable();
        Ok(versions)
    }

    /// The highest stored version of a serial, if any.
    pub fn latest_version(&self, serial_number: &UrnUuid) -> StorageResult<Option<u32>> {
        Ok(self.list(serial_number)?.last().copied())
    }

    /// All serial numbers present in the repository, in no particular order.
    pub fn list_all(&self) -> StorageResult<Vec<UrnUuid>> {
        let mut serials = Vec::new();
        for entry in fs::read_dir(self.root.as_ref())? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name == TMP_DIR {
                continue;
            }
            let Ok(decoded) = percent_decode_str(name).decode_utf8() else {
                continue;
            };
            if let Ok(serial_number) = UrnUuid::new(decoded.into_owned()) {
                serials.push(serial_number);
            }
        }
        Ok(serials)
    }

    /// Whether an entry exists for `(serial number, version)`.
    pub fn exists(&self, serial_number: &UrnUuid, version: u32) -> bool {
        self.version_dir(serial_number, version).is_dir()
    }

    /// Delete one version. Deleting the last remaining version removes the
    /// serial from the repository entirely.
    pub fn delete(&self, serial_number: &UrnUuid, version: u32) -> StorageResult<()> {
        let version_dir = self.version_dir(serial_number, version);
        match fs::remove_dir_all(&version_dir) {
            Ok(()) => (),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound {
                    serial_number: serial_number.to_string(),
                    version,
                })
            }
            Err(error) => return Err(error.into()),
        }

        let serial_dir = self.serial_dir(serial_number);
        if self.list(serial_number)?.is_empty() {
            // Racing writers may publish a new version between the check and
            // the removal; the non-empty directory makes remove_dir fail and
            // the new entry survives.
            let _ = fs::remove_dir(&serial_dir);
        }

        debug!(serial_number = %serial_number, version, "Deleted a BOM entry.");
        Ok(())
    }

    /// Delete every version of a serial. Succeeds without complaint when the
    /// serial is unknown, so the operation is idempotent.
    pub fn delete_all(&self, serial_number: &UrnUuid) -> StorageResult<()> {
        let serial_dir = self.serial_dir(serial_number);
        match fs::remove_dir_all(&serial_dir) {
            Ok(()) => {
                debug!(serial_number = %serial_number, "Deleted all versions of a serial.");
                Ok(())
            }
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }

    /// Remove staging directories older than `older_than`, left behind by
    /// writers that crashed before their commit rename.
    pub fn clean_stale_tmp(&self, older_than: Duration) -> StorageResult<usize> {
        let mut removed = 0;
        let now = std::time::SystemTime::now();
        for entry in fs::read_dir(self.root.join(TMP_DIR))? {
            let entry = entry?;
            let modified = entry.metadata()?.modified()?;
            let age = now.duration_since(modified).unwrap_or_default();
            if age >= older_than {
                match fs::remove_dir_all(entry.path()) {
                    Ok(()) => removed += 1,
                    // A concurrent writer can commit (and thereby remove)
                    // the directory while the sweep walks it.
                    Err(error) if error.kind() == ErrorKind::NotFound => (),
                    Err(error) => return Err(error.into()),
                }
            }
        }
        if removed > 0 {
            debug!(removed, "Removed abandoned staging directories.");
        }
        Ok(removed)
    }

    fn serial_dir(&self, serial_number: &UrnUuid) -> PathBuf {
        self.root.join(escape_serial_number(serial_number))
    }

    fn version_dir(&self, serial_number: &UrnUuid, version: u32) -> PathBuf {
        self.serial_dir(serial_number).join(version.to_string())
    }

    /// The root directory this repository was opened at.
    pub fn directory(&self) -> &Path {
        self.root.as_ref()
    }
}

fn escape_serial_number(serial_number: &UrnUuid) -> String {
    utf8_percent_encode(serial_number.as_ref(), NON_ALPHANUMERIC).to_string()
}

fn random_tmp_name() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|byte| format!("{:02x}", byte)).collect()
}
