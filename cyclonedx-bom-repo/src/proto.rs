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

//! The protobuf encoding of BOM documents.
//!
//! Message and enumeration definitions follow the field numbering of the
//! published CycloneDX protobuf schema for the subset of the model this
//! library carries. Timestamps stay ISO-8601 strings so that re-encoding a
//! document never reformats them.

use std::str::FromStr;

use crate::errors::ProtoReadError;
use crate::external_models::date_time::DateTime;
use crate::external_models::normalized_string::NormalizedString;
use crate::external_models::uri::Uri;
use crate::models;
use crate::models::bom::SpecVersion;
use crate::utilities::convert_vec;

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct Bom {
    #[prost(string, tag = "1")]
    pub(crate) spec_version: ::prost::alloc::string::String,
    #[prost(int32, optional, tag = "2")]
    pub(crate) version: ::core::option::Option<i32>,
    #[prost(string, optional, tag = "3")]
    pub(crate) serial_number: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(message, optional, tag = "4")]
    pub(crate) metadata: ::core::option::Option<Metadata>,
    #[prost(message, repeated, tag = "5")]
    pub(crate) components: ::prost::alloc::vec::Vec<Component>,
    #[prost(message, repeated, tag = "6")]
    pub(crate) services: ::prost::alloc::vec::Vec<Service>,
    #[prost(message, repeated, tag = "7")]
    pub(crate) external_references: ::prost::alloc::vec::Vec<ExternalReference>,
    #[prost(message, repeated, tag = "8")]
    pub(crate) dependencies: ::prost::alloc::vec::Vec<Dependency>,
    #[prost(message, repeated, tag = "9")]
    pub(crate) compositions: ::prost::alloc::vec::Vec<Composition>,
    #[prost(message, repeated, tag = "10")]
    pub(crate) vulnerabilities: ::prost::alloc::vec::Vec<Vulnerability>,
    #[prost(message, repeated, tag = "11")]
    pub(crate) properties: ::prost::alloc::vec::Vec<Property>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct Metadata {
    #[prost(string, optional, tag = "1")]
    pub(crate) timestamp: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(message, repeated, tag = "2")]
    pub(crate) tools: ::prost::alloc::vec::Vec<Tool>,
    #[prost(message, repeated, tag = "3")]
    pub(crate) authors: ::prost::alloc::vec::Vec<OrganizationalContact>,
    #[prost(message, optional, boxed, tag = "4")]
    pub(crate) component: ::core::option::Option<::prost::alloc::boxed::Box<Component>>,
    #[prost(message, repeated, tag = "5")]
    pub(crate) properties: ::prost::alloc::vec::Vec<Property>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct Tool {
    #[prost(string, optional, tag = "1")]
    pub(crate) vendor: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "2")]
    pub(crate) name: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "3")]
    pub(crate) version: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(message, repeated, tag = "4")]
    pub(crate) hashes: ::prost::alloc::vec::Vec<Hash>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct OrganizationalContact {
    #[prost(string, optional, tag = "1")]
    pub(crate) name: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "2")]
    pub(crate) email: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "3")]
    pub(crate) phone: ::core::option::Option<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct OrganizationalEntity {
    #[prost(string, optional, tag = "1")]
    pub(crate) name: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, repeated, tag = "2")]
    pub(crate) url: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(message, repeated, tag = "3")]
    pub(crate) contact: ::prost::alloc::vec::Vec<OrganizationalContact>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct Component {
    #[prost(enumeration = "Classification", tag = "1")]
    pub(crate) r#type: i32,
    #[prost(string, optional, tag = "2")]
    pub(crate) mime_type: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "3")]
    pub(crate) bom_ref: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(message, optional, tag = "4")]
    pub(crate) supplier: ::core::option::Option<OrganizationalEntity>,
    #[prost(string, optional, tag = "5")]
    pub(crate) author: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "6")]
    pub(crate) publisher: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "7")]
    pub(crate) group: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, tag = "8")]
    pub(crate) name: ::prost::alloc::string::String,
    #[prost(string, tag = "9")]
    pub(crate) version: ::prost::alloc::string::String,
    #[prost(string, optional, tag = "10")]
    pub(crate) description: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(enumeration = "Scope", optional, tag = "11")]
    pub(crate) scope: ::core::option::Option<i32>,
    #[prost(message, repeated, tag = "12")]
    pub(crate) hashes: ::prost::alloc::vec::Vec<Hash>,
    #[prost(message, repeated, tag = "13")]
    pub(crate) licenses: ::prost::alloc::vec::Vec<LicenseChoice>,
    #[prost(string, optional, tag = "14")]
    pub(crate) copyright: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "15")]
    pub(crate) cpe: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "16")]
    pub(crate) purl: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(message, repeated, tag = "17")]
    pub(crate) external_references: ::prost::alloc::vec::Vec<ExternalReference>,
    #[prost(message, repeated, tag = "18")]
    pub(crate) properties: ::prost::alloc::vec::Vec<Property>,
    #[prost(message, repeated, tag = "19")]
    pub(crate) components: ::prost::alloc::vec::Vec<Component>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct Service {
    #[prost(string, optional, tag = "1")]
    pub(crate) bom_ref: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(message, optional, tag = "2")]
    pub(crate) provider: ::core::option::Option<OrganizationalEntity>,
    #[prost(string, optional, tag = "3")]
    pub(crate) group: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, tag = "4")]
    pub(crate) name: ::prost::alloc::string::String,
    #[prost(string, optional, tag = "5")]
    pub(crate) version: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "6")]
    pub(crate) description: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, repeated, tag = "7")]
    pub(crate) endpoints: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(bool, optional, tag = "8")]
    pub(crate) authenticated: ::core::option::Option<bool>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct ExternalReference {
    #[prost(enumeration = "ExternalReferenceType", tag = "1")]
    pub(crate) r#type: i32,
    #[prost(string, tag = "2")]
    pub(crate) url: ::prost::alloc::string::String,
    #[prost(string, optional, tag = "3")]
    pub(crate) comment: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(message, repeated, tag = "4")]
    pub(crate) hashes: ::prost::alloc::vec::Vec<Hash>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct Dependency {
    #[prost(string, tag = "1")]
    pub(crate) r#ref: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "2")]
    pub(crate) dependencies: ::prost::alloc::vec::Vec<Dependency>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct Composition {
    #[prost(enumeration = "Aggregate", tag = "1")]
    pub(crate) aggregate: i32,
    #[prost(string, repeated, tag = "2")]
    pub(crate) assemblies: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, repeated, tag = "3")]
    pub(crate) dependencies: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct Property {
    #[prost(string, tag = "1")]
    pub(crate) name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub(crate) value: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct Hash {
    #[prost(enumeration = "HashAlg", tag = "1")]
    pub(crate) alg: i32,
    #[prost(string, tag = "2")]
    pub(crate) value: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct LicenseChoice {
    #[prost(oneof = "license_choice::Choice", tags = "1, 2")]
    pub(crate) choice: ::core::option::Option<license_choice::Choice>,
}

pub(crate) mod license_choice {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub(crate) enum Choice {
        #[prost(message, tag = "1")]
        License(super::License),
        #[prost(string, tag = "2")]
        Expression(::prost::alloc::string::String),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct License {
    #[prost(oneof = "license::License", tags = "1, 2")]
    pub(crate) license: ::core::option::Option<license::License>,
    #[prost(string, optional, tag = "4")]
    pub(crate) url: ::core::option::Option<::prost::alloc::string::String>,
}

pub(crate) mod license {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub(crate) enum License {
        #[prost(string, tag = "1")]
        Id(::prost::alloc::string::String),
        #[prost(string, tag = "2")]
        Name(::prost::alloc::string::String),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct Vulnerability {
    #[prost(string, optional, tag = "1")]
    pub(crate) bom_ref: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "2")]
    pub(crate) id: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(message, optional, tag = "3")]
    pub(crate) source: ::core::option::Option<VulnerabilitySource>,
    #[prost(message, repeated, tag = "4")]
    pub(crate) ratings: ::prost::alloc::vec::Vec<VulnerabilityRating>,
    #[prost(uint32, repeated, tag = "5")]
    pub(crate) cwes: ::prost::alloc::vec::Vec<u32>,
    #[prost(string, optional, tag = "6")]
    pub(crate) description: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "8")]
    pub(crate) recommendation: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "11")]
    pub(crate) published: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "12")]
    pub(crate) updated: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(message, repeated, tag = "16")]
    pub(crate) affects: ::prost::alloc::vec::Vec<VulnerabilityAffects>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct VulnerabilitySource {
    #[prost(string, optional, tag = "1")]
    pub(crate) name: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "2")]
    pub(crate) url: ::core::option::Option<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct VulnerabilityRating {
    #[prost(message, optional, tag = "1")]
    pub(crate) source: ::core::option::Option<VulnerabilitySource>,
    #[prost(double, optional, tag = "2")]
    pub(crate) score: ::core::option::Option<f64>,
    #[prost(enumeration = "Severity", optional, tag = "3")]
    pub(crate) severity: ::core::option::Option<i32>,
    #[prost(string, optional, tag = "4")]
    pub(crate) method: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "5")]
    pub(crate) vector: ::core::option::Option<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct VulnerabilityAffects {
    #[prost(string, tag = "1")]
    pub(crate) r#ref: ::prost::alloc::string::String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub(crate) enum Classification {
    Null = 0,
    Application = 1,
    Framework = 2,
    Library = 3,
    Container = 4,
    OperatingSystem = 5,
    Device = 6,
    Firmware = 7,
    File = 8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub(crate) enum Scope {
    Unspecified = 0,
    Required = 1,
    Optional = 2,
    Excluded = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub(crate) enum HashAlg {
    Null = 0,
    Md5 = 1,
    Sha1 = 2,
    Sha256 = 3,
    Sha384 = 4,
    Sha512 = 5,
    Sha3256 = 6,
    Sha3384 = 7,
    Sha3512 = 8,
    Blake2b256 = 9,
    Blake2b384 = 10,
    Blake2b512 = 11,
    Blake3 = 12,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub(crate) enum ExternalReferenceType {
    Other = 0,
    Vcs = 1,
    IssueTracker = 2,
    Website = 3,
    Advisories = 4,
    Bom = 5,
    MailingList = 6,
    Social = 7,
    Chat = 8,
    Documentation = 9,
    Support = 10,
    Distribution = 11,
    License = 12,
    BuildMeta = 13,
    BuildSystem = 14,
    ReleaseNotes = 15,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub(crate) enum Aggregate {
    NotSpecified = 0,
    Complete = 1,
    Incomplete = 2,
    IncompleteFirstPartyOnly = 3,
    IncompleteThirdPartyOnly = 4,
    Unknown = 5,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub(crate) enum Severity {
    Unknown = 0,
    Critical = 1,
    High = 2,
    Medium = 3,
    Low = 4,
    Info = 5,
    None = 6,
}

impl From<models::bom::Bom> for Bom {
    fn from(other: models::bom::Bom) -> Self {
        Self {
            spec_version: other.spec_version.to_string(),
            version: other.version.map(|version| version as i32),
            serial_number: other.serial_number.map(|serial| serial.to_string()),
            metadata: other.metadata.map(std::convert::Into::into),
            components: other
                .components
                .map(|components| convert_vec(components.0))
                .unwrap_or_default(),
            services: other
                .services
                .map(|services| convert_vec(services.0))
                .unwrap_or_default(),
            external_references: other
                .external_references
                .map(|references| convert_vec(references.0))
                .unwrap_or_default(),
            dependencies: other
                .dependencies
                .map(|dependencies| convert_vec(dependencies.0))
                .unwrap_or_default(),
            compositions: other
                .compositions
                .map(|compositions| convert_vec(compositions.0))
                .unwrap_or_default(),
            vulnerabilities: other
                .vulnerabilities
                .map(|vulnerabilities| convert_vec(vulnerabilities.0))
                .unwrap_or_default(),
            properties: other
                .properties
                .map(|properties| convert_vec(properties.0))
                .unwrap_or_default(),
        }
    }
}

impl TryFrom<Bom> for models::bom::Bom {
    type Error = ProtoReadError;

    fn try_from(other: Bom) -> Result<Self, Self::Error> {
        let spec_version = if other.spec_version.is_empty() {
            SpecVersion::latest()
        } else {
            SpecVersion::from_str(&other.spec_version).map_err(|_| {
                ProtoReadError::InvalidParseError {
                    value: other.spec_version.clone(),
                    data_type: "SpecVersion".to_string(),
                    field: "spec_version".to_string(),
                }
            })?
        };
        Ok(Self {
            version: other.version.map(|version| version as u32),
            serial_number: other.serial_number.map(models::bom::UrnUuid::new_unchecked),
            spec_version,
            metadata: other
                .metadata
                .map(std::convert::TryInto::try_into)
                .transpose()?,
            components: empty_to_none(try_convert(other.components)?)
                .map(models::component::Components),
            services: empty_to_none(convert_vec(other.services)).map(models::service::Services),
            external_references: empty_to_none(try_convert(other.external_references)?)
                .map(models::external_reference::ExternalReferences),
            dependencies: empty_to_none(convert_vec(other.dependencies))
                .map(models::dependency::Dependencies),
            compositions: empty_to_none(try_convert(other.compositions)?)
                .map(models::composition::Compositions),
            properties: empty_to_none(convert_vec(other.properties))
                .map(models::property::Properties),
            vulnerabilities: empty_to_none(try_convert(other.vulnerabilities)?)
                .map(models::vulnerability::Vulnerabilities),
        })
    }
}

fn empty_to_none<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

fn try_convert<A, B: TryFrom<A, Error = ProtoReadError>>(
    items: Vec<A>,
) -> Result<Vec<B>, ProtoReadError> {
    items.into_iter().map(B::try_from).collect()
}

impl From<models::metadata::Metadata> for Metadata {
    fn from(other: models::metadata::Metadata) -> Self {
        Self {
            timestamp: other.timestamp.map(|timestamp| timestamp.to_string()),
            tools: other
                .tools
                .map(|tools| convert_vec(tools.0))
                .unwrap_or_default(),
            authors: other.authors.map(convert_vec).unwrap_or_default(),
            component: other
                .component
                .map(|component| Box::new(component.into())),
            properties: other
                .properties
                .map(|properties| convert_vec(properties.0))
                .unwrap_or_default(),
        }
    }
}

impl TryFrom<Metadata> for models::metadata::Metadata {
    type Error = ProtoReadError;

    fn try_from(other: Metadata) -> Result<Self, Self::Error> {
        Ok(Self {
            timestamp: other.timestamp.map(DateTime::new_unchecked),
            tools: empty_to_none(try_convert(other.tools)?).map(models::tool::Tools),
            authors: empty_to_none(convert_vec(other.authors)),
            component: other
                .component
                .map(|component| (*component).try_into())
                .transpose()?,
            properties: empty_to_none(convert_vec(other.properties))
                .map(models::property::Properties),
        })
    }
}

impl From<models::tool::Tool> for Tool {
    fn from(other: models::tool::Tool) -> Self {
        Self {
            vendor: other.vendor.map(|vendor| vendor.to_string()),
            name: other.name.map(|name| name.to_string()),
            version: other.version.map(|version| version.to_string()),
            hashes: other
                .hashes
                .map(|hashes| convert_vec(hashes.0))
                .unwrap_or_default(),
        }
    }
}

impl TryFrom<Tool> for models::tool::Tool {
    type Error = ProtoReadError;

    fn try_from(other: Tool) -> Result<Self, Self::Error> {
        Ok(Self {
            vendor: other.vendor.map(NormalizedString::new_unchecked),
            name: other.name.map(NormalizedString::new_unchecked),
            version: other.version.map(NormalizedString::new_unchecked),
            hashes: empty_to_none(try_convert(other.hashes)?).map(models::hash::Hashes),
        })
    }
}

impl From<models::organization::OrganizationalContact> for OrganizationalContact {
    fn from(other: models::organization::OrganizationalContact) -> Self {
        Self {
            name: other.name.map(|name| name.to_string()),
            email: other.email.map(|email| email.to_string()),
            phone: other.phone.map(|phone| phone.to_string()),
        }
    }
}

impl From<OrganizationalContact> for models::organization::OrganizationalContact {
    fn from(other: OrganizationalContact) -> Self {
        Self {
            name: other.name.map(NormalizedString::new_unchecked),
            email: other.email.map(NormalizedString::new_unchecked),
            phone: other.phone.map(NormalizedString::new_unchecked),
        }
    }
}

impl From<models::organization::OrganizationalEntity> for OrganizationalEntity {
    fn from(other: models::organization::OrganizationalEntity) -> Self {
        Self {
            name: other.name.map(|name| name.to_string()),
            url: other
                .url
                .map(|urls| urls.into_iter().map(|url| url.to_string()).collect())
                .unwrap_or_default(),
            contact: other.contact.map(convert_vec).unwrap_or_default(),
        }
    }
}

impl From<OrganizationalEntity> for models::organization::OrganizationalEntity {
    fn from(other: OrganizationalEntity) -> Self {
        Self {
            name: other.name.map(NormalizedString::new_unchecked),
            url: empty_to_none(other.url.into_iter().map(Uri::new_unchecked).collect()),
            contact: empty_to_none(convert_vec(other.contact)),
        }
    }
}

impl From<models::component::Component> for Component {
    fn from(other: models::component::Component) -> Self {
        Self {
            r#type: Classification::from(other.component_type) as i32,
            mime_type: other.mime_type.map(|mime_type| mime_type.0),
            bom_ref: other.bom_ref,
            supplier: other.supplier.map(std::convert::Into::into),
            author: other.author.map(|author| author.to_string()),
            publisher: other.publisher.map(|publisher| publisher.to_string()),
            group: other.group.map(|group| group.to_string()),
            name: other.name.to_string(),
            version: other.version.to_string(),
            description: other.description.map(|description| description.to_string()),
            scope: other.scope.map(|scope| Scope::from(scope) as i32),
            hashes: other
                .hashes
                .map(|hashes| convert_vec(hashes.0))
                .unwrap_or_default(),
            licenses: other
                .licenses
                .map(|licenses| convert_vec(licenses.0))
                .unwrap_or_default(),
            copyright: other.copyright.map(|copyright| copyright.to_string()),
            cpe: other.cpe.map(|cpe| cpe.0),
            purl: other.purl.map(|purl| purl.to_string()),
            external_references: other
                .external_references
                .map(|references| convert_vec(references.0))
                .unwrap_or_default(),
            properties: other
                .properties
                .map(|properties| convert_vec(properties.0))
                .unwrap_or_default(),
            components: other
                .components
                .map(|components| convert_vec(components.0))
                .unwrap_or_default(),
        }
    }
}

impl TryFrom<Component> for models::component::Component {
    type Error = ProtoReadError;

    fn try_from(other: Component) -> Result<Self, Self::Error> {
        let component_type = Classification::try_from(other.r#type)
            .map_err(|_| ProtoReadError::UnknownEnumValue {
                value: other.r#type,
                field: "component.type".to_string(),
            })?
            .into();
        let scope = other
            .scope
            .map(|scope| {
                Scope::try_from(scope).map_err(|_| ProtoReadError::UnknownEnumValue {
                    value: scope,
                    field: "component.scope".to_string(),
                })
            })
            .transpose()?
            .map(std::convert::Into::into);
        Ok(Self {
            component_type,
            mime_type: other.mime_type.map(models::component::MimeType),
            bom_ref: other.bom_ref,
            supplier: other.supplier.map(std::convert::Into::into),
            author: other.author.map(NormalizedString::new_unchecked),
            publisher: other.publisher.map(NormalizedString::new_unchecked),
            group: other.group.map(NormalizedString::new_unchecked),
            name: NormalizedString::new_unchecked(other.name),
            version: NormalizedString::new_unchecked(other.version),
            description: other.description.map(NormalizedString::new_unchecked),
            scope,
            hashes: empty_to_none(try_convert(other.hashes)?).map(models::hash::Hashes),
            licenses: empty_to_none(convert_vec(other.licenses)).map(models::license::Licenses),
            copyright: other.copyright.map(NormalizedString::new_unchecked),
            cpe: other.cpe.map(models::component::Cpe),
            purl: other.purl.map(Uri::new_unchecked),
            external_references: empty_to_none(try_convert(other.external_references)?)
                .map(models::external_reference::ExternalReferences),
            properties: empty_to_none(convert_vec(other.properties))
                .map(models::property::Properties),
            components: empty_to_none(try_convert(other.components)?)
                .map(models::component::Components),
        })
    }
}

impl From<models::service::Service> for Service {
    fn from(other: models::service::Service) -> Self {
        Self {
            bom_ref: other.bom_ref,
            provider: other.provider.map(std::convert::Into::into),
            group: other.group.map(|group| group.to_string()),
            name: other.name.to_string(),
            version: other.version.map(|version| version.to_string()),
            description: other.description.map(|description| description.to_string()),
            endpoints: other
                .endpoints
                .map(|endpoints| endpoints.into_iter().map(|uri| uri.to_string()).collect())
                .unwrap_or_default(),
            authenticated: other.authenticated,
        }
    }
}

impl From<Service> for models::service::Service {
    fn from(other: Service) -> Self {
        Self {
            bom_ref: other.bom_ref,
            provider: other.provider.map(std::convert::Into::into),
            group: other.group.map(NormalizedString::new_unchecked),
            name: NormalizedString::new_unchecked(other.name),
            version: other.version.map(NormalizedString::new_unchecked),
            description: other.description.map(NormalizedString::new_unchecked),
            endpoints: empty_to_none(
                other.endpoints.into_iter().map(Uri::new_unchecked).collect(),
            ),
            authenticated: other.authenticated,
        }
    }
}

impl From<models::external_reference::ExternalReference> for ExternalReference {
    fn from(other: models::external_reference::ExternalReference) -> Self {
        Self {
            r#type: ExternalReferenceType::from(other.external_reference_type) as i32,
            url: other.url.to_string(),
            comment: other.comment,
            hashes: other
                .hashes
                .map(|hashes| convert_vec(hashes.0))
                .unwrap_or_default(),
        }
    }
}

impl TryFrom<ExternalReference> for models::external_reference::ExternalReference {
    type Error = ProtoReadError;

    fn try_from(other: ExternalReference) -> Result<Self, Self::Error> {
        let external_reference_type = ExternalReferenceType::try_from(other.r#type)
            .map_err(|_| ProtoReadError::UnknownEnumValue {
                value: other.r#type,
                field: "externalReference.type".to_string(),
            })?
            .into();
        Ok(Self {
            external_reference_type,
            url: Uri::new_unchecked(other.url),
            comment: other.comment,
            hashes: empty_to_none(try_convert(other.hashes)?).map(models::hash::Hashes),
        })
    }
}

impl From<models::dependency::Dependency> for Dependency {
    fn from(other: models::dependency::Dependency) -> Self {
        Self {
            r#ref: other.dependency_ref,
            dependencies: convert_vec(other.dependencies),
        }
    }
}

impl From<Dependency> for models::dependency::Dependency {
    fn from(other: Dependency) -> Self {
        Self {
            dependency_ref: other.r#ref,
            dependencies: convert_vec(other.dependencies),
        }
    }
}

impl From<models::composition::Composition> for Composition {
    fn from(other: models::composition::Composition) -> Self {
        Self {
            aggregate: Aggregate::from(other.aggregate) as i32,
            assemblies: other
                .assemblies
                .map(|assemblies| {
                    assemblies
                        .into_iter()
                        .map(|reference| reference.0)
                        .collect()
                })
                .unwrap_or_default(),
            dependencies: other
                .dependencies
                .map(|dependencies| {
                    dependencies
                        .into_iter()
                        .map(|reference| reference.0)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

impl TryFrom<Composition> for models::composition::Composition {
    type Error = ProtoReadError;

    fn try_from(other: Composition) -> Result<Self, Self::Error> {
        let aggregate = Aggregate::try_from(other.aggregate)
            .map_err(|_| ProtoReadError::UnknownEnumValue {
                value: other.aggregate,
                field: "composition.aggregate".to_string(),
            })?
            .into();
        Ok(Self {
            aggregate,
            assemblies: empty_to_none(
                other
                    .assemblies
                    .into_iter()
                    .map(models::composition::BomReference)
                    .collect(),
            ),
            dependencies: empty_to_none(
                other
                    .dependencies
                    .into_iter()
                    .map(models::composition::BomReference)
                    .collect(),
            ),
        })
    }
}

impl From<models::property::Property> for Property {
    fn from(other: models::property::Property) -> Self {
        Self {
            name: other.name,
            value: other.value.to_string(),
        }
    }
}

impl From<Property> for models::property::Property {
    fn from(other: Property) -> Self {
        Self {
            name: other.name,
            value: NormalizedString::new_unchecked(other.value),
        }
    }
}

impl From<models::hash::Hash> for Hash {
    fn from(other: models::hash::Hash) -> Self {
        Self {
            alg: HashAlg::from(other.alg) as i32,
            value: other.content.0,
        }
    }
}

impl TryFrom<Hash> for models::hash::Hash {
    type Error = ProtoReadError;

    fn try_from(other: Hash) -> Result<Self, Self::Error> {
        let alg = HashAlg::try_from(other.alg)
            .map_err(|_| ProtoReadError::UnknownEnumValue {
                value: other.alg,
                field: "hash.alg".to_string(),
            })?
            .into();
        Ok(Self {
            alg,
            content: models::hash::HashValue(other.value),
        })
    }
}

impl From<models::license::LicenseChoice> for LicenseChoice {
    fn from(other: models::license::LicenseChoice) -> Self {
        let choice = match other {
            models::license::LicenseChoice::License(license) => {
                license_choice::Choice::License(license.into())
            }
            models::license::LicenseChoice::Expression(expression) => {
                license_choice::Choice::Expression(expression.to_string())
            }
        };
        Self {
            choice: Some(choice),
        }
    }
}

impl From<LicenseChoice> for models::license::LicenseChoice {
    fn from(other: LicenseChoice) -> Self {
        match other.choice {
            Some(license_choice::Choice::License(license)) => Self::License(license.into()),
            Some(license_choice::Choice::Expression(expression)) => {
                Self::Expression(NormalizedString::new_unchecked(expression))
            }
            None => Self::Expression(NormalizedString::default()),
        }
    }
}

impl From<models::license::License> for License {
    fn from(other: models::license::License) -> Self {
        let license = match other.license_identifier {
            models::license::LicenseIdentifier::SpdxId(id) => {
                license::License::Id(id.to_string())
            }
            models::license::LicenseIdentifier::Name(name) => {
                license::License::Name(name.to_string())
            }
        };
        Self {
            license: Some(license),
            url: other.url.map(|url| url.to_string()),
        }
    }
}

impl From<License> for models::license::License {
    fn from(other: License) -> Self {
        let license_identifier = match other.license {
            Some(license::License::Id(id)) => {
                models::license::LicenseIdentifier::SpdxId(NormalizedString::new_unchecked(id))
            }
            Some(license::License::Name(name)) => {
                models::license::LicenseIdentifier::Name(NormalizedString::new_unchecked(name))
            }
            None => models::license::LicenseIdentifier::Name(NormalizedString::default()),
        };
        Self {
            license_identifier,
            url: other.url.map(Uri::new_unchecked),
        }
    }
}

impl From<models::vulnerability::Vulnerability> for Vulnerability {
    fn from(other: models::vulnerability::Vulnerability) -> Self {
        Self {
            bom_ref: other.bom_ref,
            id: Some(other.id.to_string()),
            source: other.source.map(std::convert::Into::into),
            ratings: other.ratings.map(convert_vec).unwrap_or_default(),
            cwes: other.cwes.unwrap_or_default(),
            description: other.description.map(|description| description.to_string()),
            recommendation: other
                .recommendation
                .map(|recommendation| recommendation.to_string()),
            published: other.published.map(|published| published.to_string()),
            updated: other.updated.map(|updated| updated.to_string()),
            affects: other.affects.map(convert_vec).unwrap_or_default(),
        }
    }
}

impl TryFrom<Vulnerability> for models::vulnerability::Vulnerability {
    type Error = ProtoReadError;

    fn try_from(other: Vulnerability) -> Result<Self, Self::Error> {
        Ok(Self {
            bom_ref: other.bom_ref,
            id: NormalizedString::new_unchecked(other.id.unwrap_or_default()),
            source: other.source.map(std::convert::Into::into),
            ratings: empty_to_none(try_convert(other.ratings)?),
            cwes: empty_to_none(other.cwes),
            description: other.description.map(NormalizedString::new_unchecked),
            recommendation: other.recommendation.map(NormalizedString::new_unchecked),
            published: other.published.map(DateTime::new_unchecked),
            updated: other.updated.map(DateTime::new_unchecked),
            affects: empty_to_none(convert_vec(other.affects)),
        })
    }
}

impl From<models::vulnerability::VulnerabilitySource> for VulnerabilitySource {
    fn from(other: models::vulnerability::VulnerabilitySource) -> Self {
        Self {
            name: other.name.map(|name| name.to_string()),
            url: other.url.map(|url| url.to_string()),
        }
    }
}

impl From<VulnerabilitySource> for models::vulnerability::VulnerabilitySource {
    fn from(other: VulnerabilitySource) -> Self {
        Self {
            name: other.name.map(NormalizedString::new_unchecked),
            url: other.url.map(Uri::new_unchecked),
        }
    }
}

impl From<models::vulnerability::VulnerabilityRating> for VulnerabilityRating {
    fn from(other: models::vulnerability::VulnerabilityRating) -> Self {
        Self {
            source: other.source.map(std::convert::Into::into),
            score: other.score,
            severity: other.severity.map(|severity| Severity::from(severity) as i32),
            method: other.method.map(|method| method.to_string()),
            vector: other.vector.map(|vector| vector.to_string()),
        }
    }
}

impl TryFrom<VulnerabilityRating> for models::vulnerability::VulnerabilityRating {
    type Error = ProtoReadError;

    fn try_from(other: VulnerabilityRating) -> Result<Self, Self::Error> {
        let severity = other
            .severity
            .map(|severity| {
                Severity::try_from(severity).map_err(|_| ProtoReadError::UnknownEnumValue {
                    value: severity,
                    field: "rating.severity".to_string(),
                })
            })
            .transpose()?
            .map(std::convert::Into::into);
        Ok(Self {
            source: other.source.map(std::convert::Into::into),
            score: other.score,
            severity,
            method: other.method.map(NormalizedString::new_unchecked),
            vector: other.vector.map(NormalizedString::new_unchecked),
        })
    }
}

impl From<models::vulnerability::VulnerabilityTarget> for VulnerabilityAffects {
    fn from(other: models::vulnerability::VulnerabilityTarget) -> Self {
        Self {
            r#ref: other.dependency_ref,
        }
    }
}

impl From<VulnerabilityAffects> for models::vulnerability::VulnerabilityTarget {
    fn from(other: VulnerabilityAffects) -> Self {
        Self {
            dependency_ref: other.r#ref,
        }
    }
}

impl From<models::component::Classification> for Classification {
    fn from(other: models::component::Classification) -> Self {
        match other {
            models::component::Classification::Application => Self::Application,
            models::component::Classification::Framework => Self::Framework,
            models::component::Classification::Library => Self::Library,
            models::component::Classification::Container => Self::Container,
            models::component::Classification::OperatingSystem => Self::OperatingSystem,
            models::component::Classification::Device => Self::Device,
            models::component::Classification::Firmware => Self::Firmware,
            models::component::Classification::File => Self::File,
            models::component::Classification::UnknownClassification(_) => Self::Null,
        }
    }
}

impl From<Classification> for models::component::Classification {
    fn from(other: Classification) -> Self {
        match other {
            Classification::Application => Self::Application,
            Classification::Framework => Self::Framework,
            Classification::Library => Self::Library,
            Classification::Container => Self::Container,
            Classification::OperatingSystem => Self::OperatingSystem,
            Classification::Device => Self::Device,
            Classification::Firmware => Self::Firmware,
            Classification::File => Self::File,
            Classification::Null => Self::UnknownClassification("unspecified".to_string()),
        }
    }
}

impl From<models::component::Scope> for Scope {
    fn from(other: models::component::Scope) -> Self {
        match other {
            models::component::Scope::Required => Self::Required,
            models::component::Scope::Optional => Self::Optional,
            models::component::Scope::Excluded => Self::Excluded,
            models::component::Scope::UnknownScope(_) => Self::Unspecified,
        }
    }
}

impl From<Scope> for models::component::Scope {
    fn from(other: Scope) -> Self {
        match other {
            Scope::Required => Self::Required,
            Scope::Optional => Self::Optional,
            Scope::Excluded => Self::Excluded,
            Scope::Unspecified => Self::UnknownScope("unspecified".to_string()),
        }
    }
}

impl From<models::hash::HashAlgorithm> for HashAlg {
    fn from(other: models::hash::HashAlgorithm) -> Self {
        match other {
            models::hash::HashAlgorithm::MD5 => Self::Md5,
            models::hash::HashAlgorithm::SHA1 => Self::Sha1,
            models::hash::HashAlgorithm::SHA256 => Self::Sha256,
            models::hash::HashAlgorithm::SHA384 => Self::Sha384,
            models::hash::HashAlgorithm::SHA512 => Self::Sha512,
            models::hash::HashAlgorithm::SHA3_256 => Self::Sha3256,
            models::hash::HashAlgorithm::SHA3_384 => Self::Sha3384,
            models::hash::HashAlgorithm::SHA3_512 => Self::Sha3512,
            models::hash::HashAlgorithm::BLAKE2b_256 => Self::Blake2b256,
            models::hash::HashAlgorithm::BLAKE2b_384 => Self::Blake2b384,
            models::hash::HashAlgorithm::BLAKE2b_512 => Self::Blake2b512,
            models::hash::HashAlgorithm::BLAKE3 => Self::Blake3,
            models::hash::HashAlgorithm::UnknownHashAlgorithm(_) => Self::Null,
        }
    }
}

impl From<HashAlg> for models::hash::HashAlgorithm {
    fn from(other: HashAlg) -> Self {
        match other {
            HashAlg::Md5 => Self::MD5,
            HashAlg::Sha1 => Self::SHA1,
            HashAlg::Sha256 => Self::SHA256,
            HashAlg::Sha384 => Self::SHA384,
            HashAlg::Sha512 => Self::SHA512,
            HashAlg::Sha3256 => Self::SHA3_256,
            HashAlg::Sha3384 => Self::SHA3_384,
            HashAlg::Sha3512 => Self::SHA3_512,
            HashAlg::Blake2b256 => Self::BLAKE2b_256,
            HashAlg::Blake2b384 => Self::BLAKE2b_384,
            HashAlg::Blake2b512 => Self::BLAKE2b_512,
            HashAlg::Blake3 => Self::BLAKE3,
            HashAlg::Null => Self::UnknownHashAlgorithm("unspecified".to_string()),
        }
    }
}

impl From<models::external_reference::ExternalReferenceType> for ExternalReferenceType {
    fn from(other: models::external_reference::ExternalReferenceType) -> Self {
        match other {
            models::external_reference::ExternalReferenceType::Vcs => Self::Vcs,
            models::external_reference::ExternalReferenceType::IssueTracker => Self::IssueTracker,
            models::external_reference::ExternalReferenceType::Website => Self::Website,
            models::external_reference::ExternalReferenceType::Advisories => Self::Advisories,
            models::external_reference::ExternalReferenceType::Bom => Self::Bom,
            models::external_reference::ExternalReferenceType::MailingList => Self::MailingList,
            models::external_reference::ExternalReferenceType::Social => Self::Social,
            models::external_reference::ExternalReferenceType::Chat => Self::Chat,
            models::external_reference::ExternalReferenceType::Documentation => {
                Self::Documentation
            }
            models::external_reference::ExternalReferenceType::Support => Self::Support,
            models::external_reference::ExternalReferenceType::Distribution => Self::Distribution,
            models::external_reference::ExternalReferenceType::License => Self::License,
            models::external_reference::ExternalReferenceType::BuildMeta => Self::BuildMeta,
            models::external_reference::ExternalReferenceType::BuildSystem => Self::BuildSystem,
            models::external_reference::ExternalReferenceType::ReleaseNotes => Self::ReleaseNotes,
            models::external_reference::ExternalReferenceType::Other => Self::Other,
            models::external_reference::ExternalReferenceType::UnknownExternalReferenceType(_) => {
                Self::Other
            }
        }
    }
}

impl From<ExternalReferenceType> for models::external_reference::ExternalReferenceType {
    fn from(other: ExternalReferenceType) -> Self {
        match other {
            ExternalReferenceType::Vcs => Self::Vcs,
            ExternalReferenceType::IssueTracker => Self::IssueTracker,
            ExternalReferenceType::Website => Self::Website,
            ExternalReferenceType::Advisories => Self::Advisories,
            ExternalReferenceType::Bom => Self::Bom,
            ExternalReferenceType::MailingList => Self::MailingList,
            ExternalReferenceType::Social => Self::Social,
            ExternalReferenceType::Chat => Self::Chat,
            ExternalReferenceType::Documentation => Self::Documentation,
            ExternalReferenceType::Support => Self::Support,
            ExternalReferenceType::Distribution => Self::Distribution,
            ExternalReferenceType::License => Self::License,
            ExternalReferenceType::BuildMeta => Self::BuildMeta,
            ExternalReferenceType::BuildSystem => Self::BuildSystem,
            ExternalReferenceType::ReleaseNotes => Self::ReleaseNotes,
            ExternalReferenceType::Other => Self::Other,
        }
    }
}

impl From<models::composition::AggregateType> for Aggregate {
    fn from(other: models::composition::AggregateType) -> Self {
        match other {
            models::composition::AggregateType::Complete => Self::Complete,
            models::composition::AggregateType::Incomplete => Self::Incomplete,
            models::composition::AggregateType::IncompleteFirstPartyOnly => {
                Self::IncompleteFirstPartyOnly
            }
            models::composition::AggregateType::IncompleteThirdPartyOnly => {
                Self::IncompleteThirdPartyOnly
            }
            models::composition::AggregateType::Unknown => Self::Unknown,
            models::composition::AggregateType::NotSpecified => Self::NotSpecified,
            models::composition::AggregateType::UnknownAggregateType(_) => Self::NotSpecified,
        }
    }
}

impl From<Aggregate> for models::composition::AggregateType {
    fn from(other: Aggregate) -> Self {
        match other {
            Aggregate::Complete => Self::Complete,
            Aggregate::Incomplete => Self::Incomplete,
            Aggregate::IncompleteFirstPartyOnly => Self::IncompleteFirstPartyOnly,
            Aggregate::IncompleteThirdPartyOnly => Self::IncompleteThirdPartyOnly,
            Aggregate::Unknown => Self::Unknown,
            Aggregate::NotSpecified => Self::NotSpecified,
        }
    }
}

impl From<models::vulnerability::Severity> for Severity {
    fn from(other: models::vulnerability::Severity) -> Self {
        match other {
            models::vulnerability::Severity::Critical => Self::Critical,
            models::vulnerability::Severity::High => Self::High,
            models::vulnerability::Severity::Medium => Self::Medium,
            models::vulnerability::Severity::Low => Self::Low,
            models::vulnerability::Severity::Info => Self::Info,
            models::vulnerability::Severity::None => Self::None,
            models::vulnerability::Severity::Unknown => Self::Unknown,
            models::vulnerability::Severity::UnknownSeverity(_) => Self::Unknown,
        }
    }
}

impl From<Severity> for models::vulnerability::Severity {
    fn from(other: Severity) -> Self {
        match other {
            Severity::Critical => Self::Critical,
            Severity::High => Self::High,
            Severity::Medium => Self::Medium,
            Severity::Low => Self::Low,
            Severity::Info => Self::Info,
            Severity::None => Self::None,
            Severity::Unknown => Self::Unknown,
        }
    }
}

#[cfg(test)]
mod test {
    use prost::Message;

    use super::*;

    #[test]
    fn it_should_round_trip_an_encoded_message() {
        let message = Bom {
            spec_version: "1.4".to_string(),
            version: Some(3),
            serial_number: Some("urn:uuid:3e671687-395b-41f5-a30f-a58921a69b79".to_string()),
            components: vec![Component {
                r#type: Classification::Library as i32,
                name: "name".to_string(),
                version: "version".to_string(),
                ..Component::default()
            }],
            ..Bom::default()
        };

        let encoded = message.encode_to_vec();
        let decoded = Bom::decode(encoded.as_slice()).expect("Failed to decode the message");
        assert_eq!(decoded, message);
    }

    #[test]
    fn it_should_convert_dependencies_without_flattening() {
        let model = models::dependency::Dependency {
            dependency_ref: "a".to_string(),
            dependencies: vec![models::dependency::Dependency {
                dependency_ref: "b".to_string(),
                dependencies: Vec::new(),
            }],
        };

        let message: Dependency = model.clone().into();
        assert_eq!(message.r#ref, "a");
        assert_eq!(message.dependencies[0].r#ref, "b");

        let back: models::dependency::Dependency = message.into();
        assert_eq!(back, model);
    }
}
