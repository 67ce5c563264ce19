/*
 * This file is part of the CycloneDX BOM Repository Server.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 * SPDX-License-Identifier: Apache-2.0
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::UrnUuidError;
use crate::models::component::Components;
use crate::models::composition::Compositions;
use crate::models::dependency::Dependencies;
use crate::models::external_reference::ExternalReferences;
use crate::models::metadata::Metadata;
use crate::models::property::Properties;
use crate::models::service::Services;
use crate::models::vulnerability::Vulnerabilities;

/// A CycloneDX schema revision.
///
/// Versions are ordered, so `SpecVersion::V1_2 < SpecVersion::V1_4` holds and
/// can be used to decide whether a field exists at a given revision.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Serialize,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
)]
pub enum SpecVersion {
    #[strum(serialize = "1.0")]
    #[serde(rename = "1.0")]
    V1_0,
    #[strum(serialize = "1.1")]
    #[serde(rename = "1.1")]
    V1_1,
    #[strum(serialize = "1.2")]
    #[serde(rename = "1.2")]
    V1_2,
    #[strum(serialize = "1.3")]
    #[serde(rename = "1.3")]
    V1_3,
    #[strum(serialize = "1.4")]
    #[serde(rename = "1.4")]
    V1_4,
}

impl SpecVersion {
    /// The newest schema revision this library understands.
    pub fn latest() -> Self {
        SpecVersion::V1_4
    }

    /// The XML namespace documents at this revision are written in.
    pub fn xml_namespace(&self) -> &'static str {
        match self {
            SpecVersion::V1_0 => "http://cyclonedx.org/schema/bom/1.0",
            SpecVersion::V1_1 => "http://cyclonedx.org/schema/bom/1.1",
            SpecVersion::V1_2 => "http://cyclonedx.org/schema/bom/1.2",
            SpecVersion::V1_3 => "http://cyclonedx.org/schema/bom/1.3",
            SpecVersion::V1_4 => "http://cyclonedx.org/schema/bom/1.4",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bom {
    /// The BOM's own version. Absent on submissions that leave the version
    /// assignment to the repository.
    pub version: Option<u32>,
    pub serial_number: Option<UrnUuid>,
    /// The schema revision this BOM was decoded from, or the revision it was
    /// last projected to.
    pub spec_version: SpecVersion,
    pub metadata: Option<Metadata>,
    pub components: Option<Components>,
    pub services: Option<Services>,
    pub external_references: Option<ExternalReferences>,
    pub dependencies: Option<Dependencies>,
    pub compositions: Option<Compositions>,
    pub properties: Option<Properties>,
    pub vulnerabilities: Option<Vulnerabilities>,
}

impl Default for Bom {
    fn default() -> Self {
        Self {
            version: Some(1),
            serial_number: Some(UrnUuid::generate()),
            spec_version: SpecVersion::latest(),
            metadata: None,
            components: None,
            services: None,
            external_references: None,
            dependencies: None,
            compositions: None,
            properties: None,
            vulnerabilities: None,
        }
    }
}

impl Bom {
    /// Project the BOM down to what `version` can express.
    ///
    /// Fields introduced after the target schema revision are dropped, so the
    /// result always serializes to a valid document at that revision.
    /// Projecting to a newer revision leaves the newer fields absent.
    pub fn project_to(mut self, version: SpecVersion) -> Self {
        if version < SpecVersion::V1_4 {
            self.vulnerabilities = None;
        }
        if version < SpecVersion::V1_3 {
            self.compositions = None;
            self.properties = None;
        }
        if version < SpecVersion::V1_2 {
            self.metadata = None;
            self.services = None;
            self.dependencies = None;
        }
        if version < SpecVersion::V1_1 {
            self.external_references = None;
        }
        self.metadata = self.metadata.map(|m| m.project_to(version));
        self.components = self
            .components
            .map(|components| components.project_to(version));
        self.spec_version = version;
        self
    }
}

/// A BOM serial number in the canonical `urn:uuid:` form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UrnUuid(pub(crate) String);

impl UrnUuid {
    pub fn new(value: String) -> Result<Self, UrnUuidError> {
        match matches_urn_uuid_regex(&value) {
            true => Ok(Self(value)),
            false => Err(UrnUuidError::InvalidUrnUuid(value)),
        }
    }

    /// Allow for the existence of invalid inputs from other data sources
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    pub fn generate() -> Self {
        Self::from(uuid::Uuid::new_v4())
    }
}

impl From<uuid::Uuid> for UrnUuid {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(format!("urn:uuid:{}", uuid))
    }
}

impl std::fmt::Display for UrnUuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UrnUuid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn matches_urn_uuid_regex(value: &str) -> bool {
    static URN_UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^urn:uuid:[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
            .expect("Failed to compile regex.")
    });
    URN_UUID_REGEX.is_match(value)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::models::property::{Properties, Property};
    use crate::models::vulnerability::{Vulnerabilities, Vulnerability};

    #[test]
    fn it_should_order_spec_versions() {
        assert!(SpecVersion::V1_0 < SpecVersion::V1_1);
        assert!(SpecVersion::V1_3 < SpecVersion::V1_4);
        assert_eq!(SpecVersion::latest(), SpecVersion::V1_4);
    }

    #[test]
    fn it_should_parse_and_format_spec_versions() {
        use std::str::FromStr;

        assert_eq!(SpecVersion::V1_2.to_string(), "1.2");
        assert_eq!(SpecVersion::from_str("1.4"), Ok(SpecVersion::V1_4));
        assert!(SpecVersion::from_str("2.0").is_err());
    }

    #[test]
    fn valid_urn_uuids_should_pass_validation() {
        let validation_result =
            UrnUuid::new("urn:uuid:3e671687-395b-41f5-a30f-a58921a69b79".to_string());
        assert!(validation_result.is_ok());
    }

    #[test]
    fn invalid_urn_uuids_should_fail_validation() {
        for invalid in [
            "",
            "not a uuid",
            // truncated
            "urn:uuid:3e671687-395b-41f5-a30f-a58921a69b7",
            // leading whitespace
            " urn:uuid:3e671687-395b-41f5-a30f-a58921a69b79",
            // trailing whitespace
            "urn:uuid:3e671687-395b-41f5-a30f-a58921a69b79 ",
            // brace-form GUID
            "urn:uuid:{3e671687-395b-41f5-a30f-a58921a69b79}",
            // uppercase hex digits
            "urn:uuid:3E671687-395B-41F5-A30F-A58921A69B79",
        ] {
            assert_eq!(
                UrnUuid::new(invalid.to_string()),
                Err(UrnUuidError::InvalidUrnUuid(invalid.to_string())),
                "{} should have been rejected",
                invalid
            );
        }
    }

    #[test]
    fn generated_serial_numbers_should_pass_validation() {
        let serial_number = UrnUuid::generate();
        assert!(UrnUuid::new(serial_number.to_string()).is_ok());
    }

    #[test]
    fn it_should_project_away_newer_fields() {
        let bom = Bom {
            properties: Some(Properties(vec![Property {
                name: "name".to_string(),
                value: crate::external_models::normalized_string::NormalizedString::new("value"),
            }])),
            vulnerabilities: Some(Vulnerabilities(vec![Vulnerability {
                id: crate::external_models::normalized_string::NormalizedString::new(
                    "CVE-2024-0001",
                ),
                ..Vulnerability::default()
            }])),
            ..Bom::default()
        };

        let projected = bom.clone().project_to(SpecVersion::V1_3);
        assert_eq!(projected.spec_version, SpecVersion::V1_3);
        assert!(projected.vulnerabilities.is_none());
        assert!(projected.properties.is_some());

        let projected = bom.project_to(SpecVersion::V1_2);
        assert!(projected.properties.is_none());
        assert!(projected.compositions.is_none());
    }
}
