//! A long-lived service owning repository-wide concerns.
//!
//! The service spawns the retention sweeper when it starts and tracks
//! metadata about the repository as a whole: when this instance started,
//! how much it holds, and the schema version most recently seen per wire
//! format. The snapshot is what the server's health endpoint reports.

#[cfg(test)]
#[path = "metadata_test.rs"]
mod metadata_test;

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use cyclonedx_bom_repo::models::bom::SpecVersion;
use serde::Serialize;
use time::format_description::well_known::Iso8601;
use time::OffsetDateTime;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::repository::{BomEntry, Repository};
use crate::retention::{spawn_retention_sweeper, RetentionPolicy};
use crate::StorageResult;

/// A point-in-time view of repository-wide metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryMetadata {
    /// When this service instance started, ISO-8601.
    pub started_at: String,
    /// Number of serial numbers currently present.
    pub serial_count: usize,
    /// Number of `(serial, version)` entries currently present.
    pub entry_count: usize,
    /// The schema version most recently stored, per wire format.
    pub last_seen_spec_versions: BTreeMap<String, String>,
}

/// Owns the retention sweeper and tracks repository-wide metadata.
pub struct MetadataService {
    repository: Repository,
    started_at: String,
    last_seen: Arc<RwLock<BTreeMap<String, String>>>,
    shutdown: watch::Sender<bool>,
    sweeper: JoinHandle<()>,
}

impl MetadataService {
    /// Start the service, which spawns the retention sweeper on the given
    /// interval. Must be called within a tokio runtime.
    pub fn start(
        repository: Repository,
        policy: RetentionPolicy,
        sweep_interval: Duration,
    ) -> Self {
        let (shutdown, shutdown_rx) = watch::channel(false);
        let sweeper =
            spawn_retention_sweeper(repository.clone(), policy.clone(), sweep_interval, shutdown_rx);
        info!(
            directory = %repository.directory().display(),
            max_versions = policy.max_versions,
            max_age_secs = policy.max_age.map(|age| age.as_secs()),
            sweep_interval_secs = sweep_interval.as_secs(),
            "Started the repository metadata service."
        );
        let started_at = OffsetDateTime::now_utc()
            .format(&Iso8601::DEFAULT)
            .unwrap_or_default();
        Self {
            repository,
            started_at,
            last_seen: Arc::new(RwLock::new(BTreeMap::new())),
            shutdown,
            sweeper,
        }
    }

    /// Record a successful store so the snapshot reflects the schema
    /// versions clients are actually submitting.
    pub fn observe_stored(&self, entry: &BomEntry, spec_version: SpecVersion) {
        let mut last_seen = match self.last_seen.write() {
            Ok(last_seen) => last_seen,
            Err(poisoned) => poisoned.into_inner(),
        };
        last_seen.insert(entry.format.to_string(), spec_version.to_string());
    }

    /// Produce a current snapshot by enumerating the repository.
    pub fn snapshot(&self) -> StorageResult<RepositoryMetadata> {
        let serials = self.repository.list_all()?;
        let mut entry_count = 0;
        for serial_number in &serials {
            entry_count += self.repository.list(serial_number)?.len();
        }
        let last_seen_spec_versions = match self.last_seen.read() {
            Ok(last_seen) => last_seen.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        Ok(RepositoryMetadata {
            started_at: self.started_at.clone(),
            serial_count: serials.len(),
            entry_count,
            last_seen_spec_versions,
        })
    }

    /// The repository this service watches.
    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// Stop the retention sweeper and wait for it to exit.
    pub async fn shutdown(self) {
        if self.shutdown.send(true).is_err() {
            warn!("Retention sweeper already exited.");
        }
        let _ = self.sweeper.await;
    }

    /// Which formats clients most recently stored, for callers that only
    /// need the map and not a full repository scan.
    pub fn last_seen_spec_versions(&self) -> BTreeMap<String, String> {
        match self.last_seen.read() {
            Ok(last_seen) => last_seen.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
