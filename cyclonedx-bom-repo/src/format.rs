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

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::bom::SpecVersion;

/// Serialization format of a CycloneDX BOM document.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, Hash, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SerializationFormat {
    Xml,
    Json,
    Protobuf,
}

impl SerializationFormat {
    /// The file extension used for documents persisted in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            SerializationFormat::Xml => "xml",
            SerializationFormat::Json => "json",
            SerializationFormat::Protobuf => "cdx",
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "xml" => Some(SerializationFormat::Xml),
            "json" => Some(SerializationFormat::Json),
            "cdx" => Some(SerializationFormat::Protobuf),
            _ => None,
        }
    }

    /// The canonical CycloneDX media type for this format.
    pub fn media_type(&self) -> &'static str {
        match self {
            SerializationFormat::Xml => "application/vnd.cyclonedx+xml",
            SerializationFormat::Json => "application/vnd.cyclonedx+json",
            SerializationFormat::Protobuf => "application/x.vnd.cyclonedx+protobuf",
        }
    }

    /// The oldest schema version expressible in this format.
    ///
    /// XML goes back to the first CycloneDX release, JSON was introduced with
    /// 1.2 and the protobuf encoding with 1.3.
    pub fn min_spec_version(&self) -> SpecVersion {
        match self {
            SerializationFormat::Xml => SpecVersion::V1_0,
            SerializationFormat::Json => SpecVersion::V1_2,
            SerializationFormat::Protobuf => SpecVersion::V1_3,
        }
    }

    /// The newest schema version expressible in this format.
    pub fn max_spec_version(&self) -> SpecVersion {
        SpecVersion::V1_4
    }

    /// Whether `(self, version)` is a supported cell of the format matrix.
    pub fn supports(&self, version: SpecVersion) -> bool {
        self.min_spec_version() <= version && version <= self.max_spec_version()
    }
}

impl fmt::Display for SerializationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializationFormat::Xml => "xml".fmt(f),
            SerializationFormat::Json => "json".fmt(f),
            SerializationFormat::Protobuf => "protobuf".fmt(f),
        }
    }
}

impl FromStr for SerializationFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xml" => Ok(Self::Xml),
            "json" => Ok(Self::Json),
            "protobuf" => Ok(Self::Protobuf),
            _ => Err(format!("Expected xml, json or protobuf, got `{}`", s)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_should_map_extensions_both_ways() {
        for format in [
            SerializationFormat::Xml,
            SerializationFormat::Json,
            SerializationFormat::Protobuf,
        ] {
            assert_eq!(
                SerializationFormat::from_extension(format.extension()),
                Some(format)
            );
        }
        assert_eq!(SerializationFormat::from_extension("txt"), None);
    }

    #[test]
    fn it_should_know_the_supported_matrix() {
        let xml = SerializationFormat::Xml;
        let json = SerializationFormat::Json;
        let protobuf = SerializationFormat::Protobuf;

        assert!(xml.supports(SpecVersion::V1_0));
        assert!(xml.supports(SpecVersion::V1_4));
        assert!(!json.supports(SpecVersion::V1_1));
        assert!(json.supports(SpecVersion::V1_2));
        assert!(!protobuf.supports(SpecVersion::V1_2));
        assert!(protobuf.supports(SpecVersion::V1_3));
        assert!(protobuf.supports(SpecVersion::V1_4));
    }
}
