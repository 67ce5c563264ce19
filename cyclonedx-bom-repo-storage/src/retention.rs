//! Retention policy enforcement and background cleanup.
//!
//! A sweep walks every serial in the repository and deletes entries that
//! violate the configured policy. The two limits combine as a union: an
//! entry is deleted when it breaks either one, but the highest version of a
//! serial is always retained so that a serial never silently vanishes from
//! the repository. Each sweep also reclaims staging directories abandoned
//! by writers that crashed mid-commit.

#[cfg(test)]
#[path = "retention_test.rs"]
mod retention_test;

use std::time::Duration;

use time::OffsetDateTime;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::repository::Repository;
use crate::StorageResult;

/// Staging directories older than this are considered abandoned.
const TMP_MAX_AGE: Duration = Duration::from_secs(15 * 60);

/// Limits on how long BOM versions are retained.
#[derive(Clone, Debug, Default)]
pub struct RetentionPolicy {
    /// Keep only the N highest versions per serial. Unset means unlimited.
    pub max_versions: Option<u32>,
    /// Delete entries stored longer ago than this. Unset means unlimited.
    pub max_age: Option<Duration>,
}

impl RetentionPolicy {
    /// Whether the policy can ever delete anything.
    pub fn is_unlimited(&self) -> bool {
        self.max_versions.is_none() && self.max_age.is_none()
    }
}

/// What a single sweep accomplished.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Entries deleted for violating the retention policy.
    pub deleted_entries: usize,
    /// Abandoned staging directories that were reclaimed.
    pub removed_tmp_dirs: usize,
}

/// Run one sweep over the whole repository.
pub fn sweep(repository: &Repository, policy: &RetentionPolicy) -> StorageResult<SweepStats> {
    let mut stats = SweepStats::default();
    let now = OffsetDateTime::now_utc();

    if !policy.is_unlimited() {
        for serial_number in repository.list_all()? {
            let versions = repository.list(&serial_number)?;
            let Some(&newest) = versions.last() else {
                continue;
            };

            let count_cutoff = policy
                .max_versions
                .map(|max_versions| versions.len().saturating_sub(max_versions as usize));

            for (index, &version) in versions.iter().enumerate() {
                if version == newest {
                    continue;
                }

                let over_count = count_cutoff.is_some_and(|cutoff| index < cutoff);
                let over_age = match policy.max_age {
                    Some(max_age) => {
                        let entry = repository.entry(&serial_number, version)?;
                        now - entry.stored_at > max_age
                    }
                    None => false,
                };

                if over_count || over_age {
                    repository.delete(&serial_number, version)?;
                    stats.deleted_entries += 1;
                }
            }
        }
    }

    stats.removed_tmp_dirs = repository.clean_stale_tmp(TMP_MAX_AGE)?;
    Ok(stats)
}

/// Spawn the periodic sweeper. The task runs one sweep per interval until a
/// value is sent on the shutdown channel.
pub fn spawn_retention_sweeper(
    repository: Repository,
    policy: RetentionPolicy,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => match sweep(&repository, &policy) {
                    Ok(stats) => {
                        debug!(
                            deleted_entries = stats.deleted_entries,
                            removed_tmp_dirs = stats.removed_tmp_dirs,
                            "Finished a retention sweep."
                        );
                    }
                    Err(error) => {
                        error!(%error, "Retention sweep failed.");
                    }
                },
                _ = shutdown.changed() => {
                    debug!("Retention sweeper shutting down.");
                    return;
                }
            }
        }
    })
}
