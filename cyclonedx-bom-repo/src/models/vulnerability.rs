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

use crate::external_models::date_time::DateTime;
use crate::external_models::normalized_string::NormalizedString;
use crate::external_models::uri::Uri;

/// Vulnerabilities were added to the spec with revision 1.4; projecting a BOM
/// to anything older drops them entirely.
#[derive(Clone, Debug, PartialEq)]
pub struct Vulnerabilities(pub Vec<Vulnerability>);

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Vulnerability {
    pub bom_ref: Option<String>,
    pub id: NormalizedString,
    pub source: Option<VulnerabilitySource>,
    pub ratings: Option<Vec<VulnerabilityRating>>,
    pub cwes: Option<Vec<u32>>,
    pub description: Option<NormalizedString>,
    pub recommendation: Option<NormalizedString>,
    pub published: Option<DateTime>,
    pub updated: Option<DateTime>,
    pub affects: Option<Vec<VulnerabilityTarget>>,
}

/// The authority that published a vulnerability identifier, e.g. the NVD.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct VulnerabilitySource {
    pub name: Option<NormalizedString>,
    pub url: Option<Uri>,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct VulnerabilityRating {
    pub source: Option<VulnerabilitySource>,
    pub score: Option<f64>,
    pub severity: Option<Severity>,
    pub method: Option<NormalizedString>,
    pub vector: Option<NormalizedString>,
}

/// A BOM element affected by a vulnerability, referenced by `bom-ref`.
#[derive(Clone, Debug, PartialEq)]
pub struct VulnerabilityTarget {
    pub dependency_ref: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
    None,
    Unknown,
    #[doc(hidden)]
    UnknownSeverity(String),
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Info => "info",
            Severity::None => "none",
            Severity::Unknown => "unknown",
            Severity::UnknownSeverity(us) => us,
        };
        f.write_str(value)
    }
}

impl Severity {
    pub(crate) fn new_unchecked<A: AsRef<str>>(value: A) -> Self {
        match value.as_ref() {
            "critical" => Self::Critical,
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            "info" => Self::Info,
            "none" => Self::None,
            "unknown" => Self::Unknown,
            unknown => Self::UnknownSeverity(unknown.to_string()),
        }
    }
}
