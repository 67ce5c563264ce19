//! Operator-facing configuration.
//!
//! Every option is settable both as a command line flag and as an
//! environment variable; the variable names follow the double-underscore
//! convention of the original deployment (`REPO__DIRECTORY`,
//! `ALLOWEDMETHODS__POST`, ...).

use std::path::PathBuf;
use std::time::Duration;

use cyclonedx_bom_repo_storage::RetentionPolicy;

/// Repository server for CycloneDX Software Bill of Materials documents.
#[derive(Clone, Debug, clap::Parser)]
#[command(name = "cyclonedx-bom-repo-server", version)]
pub struct ServerConfig {
    /// Root directory for BOM storage.
    #[clap(long, env = "REPO__DIRECTORY")]
    pub directory: PathBuf,

    /// Permit GET requests on /bom.
    #[clap(
        long,
        env = "ALLOWEDMETHODS__GET",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub allow_get: bool,

    /// Permit POST requests on /bom.
    #[clap(
        long,
        env = "ALLOWEDMETHODS__POST",
        default_value_t = false,
        action = clap::ArgAction::Set
    )]
    pub allow_post: bool,

    /// Permit DELETE requests on /bom.
    #[clap(
        long,
        env = "ALLOWEDMETHODS__DELETE",
        default_value_t = false,
        action = clap::ArgAction::Set
    )]
    pub allow_delete: bool,

    /// Keep only the N highest versions per serial number.
    #[clap(
        long,
        env = "RETENTION__MAXVERSIONS",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub retention_max_versions: Option<u32>,

    /// Delete entries stored more than this many days ago.
    #[clap(
        long,
        env = "RETENTION__MAXAGEDAYS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub retention_max_age_days: Option<u64>,

    /// Seconds between retention sweeps.
    #[clap(long, env = "RETENTION__SWEEPINTERVALSECONDS", default_value_t = 3600)]
    pub sweep_interval_seconds: u64,

    /// HTTP bind port.
    #[clap(long, env = "LISTEN__PORT", default_value_t = 8080)]
    pub port: u16,
}

impl ServerConfig {
    /// The retention policy this configuration describes.
    pub fn retention_policy(&self) -> RetentionPolicy {
        RetentionPolicy {
            max_versions: self.retention_max_versions,
            max_age: self
                .retention_max_age_days
                .map(|days| Duration::from_secs(days * 24 * 60 * 60)),
        }
    }

    /// Which of the /bom verbs are enabled.
    pub fn allowed_methods(&self) -> AllowedMethods {
        AllowedMethods {
            get: self.allow_get,
            post: self.allow_post,
            delete: self.allow_delete,
        }
    }
}

/// Per-verb gating of the /bom endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllowedMethods {
    /// Whether GET is permitted.
    pub get: bool,
    /// Whether POST is permitted.
    pub post: bool,
    /// Whether DELETE is permitted.
    pub delete: bool,
}

impl AllowedMethods {
    /// The value of the `Allow` header: the enabled methods, comma
    /// separated.
    pub fn allow_header(&self) -> String {
        let mut methods = Vec::new();
        if self.get {
            methods.push("GET");
        }
        if self.post {
            methods.push("POST");
        }
        if self.delete {
            methods.push("DELETE");
        }
        methods.join(", ")
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn the_allow_header_lists_only_enabled_methods() {
        let methods = AllowedMethods {
            get: true,
            post: false,
            delete: true,
        };
        assert_eq!(methods.allow_header(), "GET, DELETE");
    }

    #[test]
    fn retention_ages_convert_to_durations() {
        use clap::Parser;

        let config = ServerConfig::parse_from([
            "cyclonedx-bom-repo-server",
            "--directory",
            "/tmp/repo",
            "--retention-max-age-days",
            "2",
        ]);
        let policy = config.retention_policy();
        assert_eq!(policy.max_age, Some(Duration::from_secs(2 * 24 * 60 * 60)));
        assert_eq!(policy.max_versions, None);
    }
}
