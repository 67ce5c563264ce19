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

use prost::Message;
use serde::{Deserialize, Serialize};
use xml::writer::{EmitterConfig, EventWriter, XmlEvent};
use xml::{reader, EventReader};

use crate::errors::{BomError, JsonReadError, JsonWriteError, ProtoReadError, XmlReadError};
use crate::format::SerializationFormat;
use crate::models;
use crate::models::bom::SpecVersion;
use crate::spec::component::Components;
use crate::spec::composition::Compositions;
use crate::spec::dependency::Dependencies;
use crate::spec::external_reference::ExternalReferences;
use crate::spec::metadata::Metadata;
use crate::spec::property::Properties;
use crate::spec::service::Services;
use crate::spec::vulnerability::Vulnerabilities;
use crate::utilities::convert_optional;
use crate::xml::{
    expected_namespace_or_error, optional_attribute, read_lax_validation_tag, to_xml_read_error,
    to_xml_write_error, unexpected_element_error, FromXml, FromXmlDocument, FromXmlType,
    ToXml, ToXmlDocument,
};

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Bom {
    bom_format: BomFormat,
    spec_version: SpecVersion,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    serial_number: Option<UrnUuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    components: Option<Components>,
    #[serde(skip_serializing_if = "Option::is_none")]
    services: Option<Services>,
    #[serde(skip_serializing_if = "Option::is_none")]
    external_references: Option<ExternalReferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dependencies: Option<Dependencies>,
    #[serde(skip_serializing_if = "Option::is_none")]
    compositions: Option<Compositions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<Properties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vulnerabilities: Option<Vulnerabilities>,
}

impl From<models::bom::Bom> for Bom {
    fn from(other: models::bom::Bom) -> Self {
        Self {
            bom_format: BomFormat::CycloneDX,
            spec_version: other.spec_version,
            version: other.version,
            serial_number: convert_optional(other.serial_number),
            metadata: convert_optional(other.metadata),
            components: convert_optional(other.components),
            services: convert_optional(other.services),
            external_references: convert_optional(other.external_references),
            dependencies: convert_optional(other.dependencies),
            compositions: convert_optional(other.compositions),
            properties: convert_optional(other.properties),
            vulnerabilities: convert_optional(other.vulnerabilities),
        }
    }
}

impl From<Bom> for models::bom::Bom {
    fn from(other: Bom) -> Self {
        Self {
            version: other.version,
            serial_number: convert_optional(other.serial_number),
            spec_version: other.spec_version,
            metadata: convert_optional(other.metadata),
            components: convert_optional(other.components),
            services: convert_optional(other.services),
            external_references: convert_optional(other.external_references),
            dependencies: convert_optional(other.dependencies),
            compositions: convert_optional(other.compositions),
            properties: convert_optional(other.properties),
            vulnerabilities: convert_optional(other.vulnerabilities),
        }
    }
}

const BOM_TAG: &str = "bom";
const SERIAL_NUMBER_ATTR: &str = "serialNumber";
const VERSION_ATTR: &str = "version";
const METADATA_TAG: &str = "metadata";
const COMPONENTS_TAG: &str = "components";
const SERVICES_TAG: &str = "services";
const EXTERNAL_REFERENCES_TAG: &str = "externalReferences";
const DEPENDENCIES_TAG: &str = "dependencies";
const COMPOSITIONS_TAG: &str = "compositions";
const PROPERTIES_TAG: &str = "properties";
const VULNERABILITIES_TAG: &str = "vulnerabilities";

impl ToXmlDocument for Bom {
    fn write_xml_document<W: std::io::Write>(
        &self,
        writer: &mut EventWriter<W>,
    ) -> Result<(), crate::errors::XmlWriteError> {
        let version = self.version.map(|version| format!("{}", version));
        let mut bom_start_element =
            XmlEvent::start_element(BOM_TAG).default_ns(self.spec_version.xml_namespace());

        if let Some(serial_number) = &self.serial_number {
            bom_start_element = bom_start_element.attr(SERIAL_NUMBER_ATTR, &serial_number.0);
        }

        if let Some(version) = &version {
            bom_start_element = bom_start_element.attr(VERSION_ATTR, version);
        }

        writer
            .write(bom_start_element)
            .map_err(to_xml_write_error(BOM_TAG))?;

        if let Some(metadata) = &self.metadata {
            metadata.write_xml_element(writer)?;
        }

        if let Some(components) = &self.components {
            components.write_xml_element(writer)?;
        }

        if let Some(services) = &self.services {
            services.write_xml_element(writer)?;
        }

        if let Some(external_references) = &self.external_references {
            external_references.write_xml_element(writer)?;
        }

        if let Some(dependencies) = &self.dependencies {
            dependencies.write_xml_element(writer)?;
        }

        if let Some(compositions) = &self.compositions {
            compositions.write_xml_element(writer)?;
        }

        if let Some(properties) = &self.properties {
            properties.write_xml_element(writer)?;
        }

        if let Some(vulnerabilities) = &self.vulnerabilities {
            vulnerabilities.write_xml_element(writer)?;
        }

        writer
            .write(XmlEvent::end_element())
            .map_err(to_xml_write_error(BOM_TAG))?;

        Ok(())
    }
}

impl FromXmlDocument for Bom {
    fn read_xml_document<R: std::io::Read>(
        event_reader: &mut EventReader<R>,
        spec_version: SpecVersion,
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        event_reader
            .next()
            .map_err(to_xml_read_error(BOM_TAG))
            .and_then(|event| match event {
                reader::XmlEvent::StartDocument { .. } => Ok(()),
                unexpected => Err(unexpected_element_error(BOM_TAG, unexpected)),
            })?;

        let (version, serial_number) = event_reader
            .next()
            .map_err(to_xml_read_error(BOM_TAG))
            .and_then(|event| match event {
                reader::XmlEvent::StartElement {
                    name,
                    attributes,
                    namespace,
                } if name.local_name == BOM_TAG => {
                    expected_namespace_or_error(spec_version, &namespace)?;
                    let version = optional_attribute(&attributes, VERSION_ATTR)
                        .map(|version| u32::from_xml_value(VERSION_ATTR, version))
                        .transpose()?;
                    let serial_number =
                        optional_attribute(&attributes, SERIAL_NUMBER_ATTR).map(UrnUuid);
                    Ok((version, serial_number))
                }
                unexpected => Err(unexpected_element_error(BOM_TAG, unexpected)),
            })?;

        let mut metadata: Option<Metadata> = None;
        let mut components: Option<Components> = None;
        let mut services: Option<Services> = None;
        let mut external_references: Option<ExternalReferences> = None;
        let mut dependencies: Option<Dependencies> = None;
        let mut compositions: Option<Compositions> = None;
        let mut properties: Option<Properties> = None;
        let mut vulnerabilities: Option<Vulnerabilities> = None;

        let mut got_end_tag = false;
        while !got_end_tag {
            let next_element = event_reader.next().map_err(to_xml_read_error(BOM_TAG))?;
            match next_element {
                reader::XmlEvent::StartElement {
                    name, attributes, ..
                } if name.local_name == METADATA_TAG => {
                    metadata = Some(Metadata::read_xml_element(
                        event_reader,
                        &name,
                        &attributes,
                    )?)
                }
                reader::XmlEvent::StartElement {
                    name, attributes, ..
                } if name.local_name == COMPONENTS_TAG => {
                    components = Some(Components::read_xml_element(
                        event_reader,
                        &name,
                        &attributes,
                    )?)
                }
                reader::XmlEvent::StartElement {
                    name, attributes, ..
                } if name.local_name == SERVICES_TAG => {
                    services = Some(Services::read_xml_element(
                        event_reader,
                        &name,
                        &attributes,
                    )?)
                }
                reader::XmlEvent::StartElement {
                    name, attributes, ..
                } if name.local_name == EXTERNAL_REFERENCES_TAG => {
                    external_references = Some(ExternalReferences::read_xml_element(
                        event_reader,
                        &name,
                        &attributes,
                    )?)
                }
                reader::XmlEvent::StartElement {
                    name, attributes, ..
                } if name.local_name == DEPENDENCIES_TAG => {
                    dependencies = Some(Dependencies::read_xml_element(
                        event_reader,
                        &name,
                        &attributes,
                    )?)
                }
                reader::XmlEvent::StartElement {
                    name, attributes, ..
                } if name.local_name == COMPOSITIONS_TAG => {
                    compositions = Some(Compositions::read_xml_element(
                        event_reader,
                        &name,
                        &attributes,
                    )?)
                }
                reader::XmlEvent::StartElement {
                    name, attributes, ..
                } if name.local_name == PROPERTIES_TAG => {
                    properties = Some(Properties::read_xml_element(
                        event_reader,
                        &name,
                        &attributes,
                    )?)
                }
                reader::XmlEvent::StartElement {
                    name, attributes, ..
                } if name.local_name == VULNERABILITIES_TAG => {
                    vulnerabilities = Some(Vulnerabilities::read_xml_element(
                        event_reader,
                        &name,
                        &attributes,
                    )?)
                }
                reader::XmlEvent::StartElement { name, .. } => {
                    read_lax_validation_tag(event_reader, &name)?
                }
                reader::XmlEvent::EndElement { name } if name.local_name == BOM_TAG => {
                    got_end_tag = true;
                }
                reader::XmlEvent::Whitespace(_) | reader::XmlEvent::Characters(_) => (),
                unexpected => return Err(unexpected_element_error(BOM_TAG, unexpected)),
            }
        }

        Ok(Self {
            bom_format: BomFormat::CycloneDX,
            spec_version,
            version,
            serial_number,
            metadata,
            components,
            services,
            external_references,
            dependencies,
            compositions,
            properties,
            vulnerabilities,
        })
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
enum BomFormat {
    CycloneDX,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
struct UrnUuid(String);

impl From<models::bom::UrnUuid> for UrnUuid {
    fn from(other: models::bom::UrnUuid) -> Self {
        Self(other.0)
    }
}

impl From<UrnUuid> for models::bom::UrnUuid {
    fn from(other: UrnUuid) -> Self {
        Self(other.0)
    }
}

fn sniff_xml_spec_version(bytes: &[u8]) -> Result<SpecVersion, BomError> {
    let mut event_reader = EventReader::new(bytes);
    loop {
        match event_reader.next().map_err(to_xml_read_error(BOM_TAG))? {
            reader::XmlEvent::StartDocument { .. } => (),
            reader::XmlEvent::StartElement {
                name, namespace, ..
            } if name.local_name == BOM_TAG => {
                let actual = namespace.get("");
                for version in [
                    SpecVersion::V1_0,
                    SpecVersion::V1_1,
                    SpecVersion::V1_2,
                    SpecVersion::V1_3,
                    SpecVersion::V1_4,
                ] {
                    if actual == Some(version.xml_namespace()) {
                        return Ok(version);
                    }
                }
                return Err(XmlReadError::InvalidNamespaceError {
                    expected_namespace: SpecVersion::latest().xml_namespace().to_string(),
                    actual_namespace: actual.map(std::string::ToString::to_string),
                }
                .into());
            }
            unexpected => return Err(unexpected_element_error(BOM_TAG, unexpected).into()),
        }
    }
}

fn supported_or_error(
    format: SerializationFormat,
    version: SpecVersion,
) -> Result<(), BomError> {
    if format.supports(version) {
        Ok(())
    } else {
        Err(BomError::UnsupportedSpecVersion { format, version })
    }
}

impl models::bom::Bom {
    /// Decode a document in any supported `(format, spec version)` pair.
    pub fn parse(
        bytes: &[u8],
        format: SerializationFormat,
        version: SpecVersion,
    ) -> Result<Self, BomError> {
        match format {
            SerializationFormat::Xml => Self::parse_from_xml(bytes, version),
            SerializationFormat::Json => Self::parse_from_json(bytes, version),
            SerializationFormat::Protobuf => Self::parse_from_protobuf(bytes, version),
        }
    }

    /// Encode to any supported `(format, spec version)` pair, projecting the
    /// BOM down first when the target revision is older than the source.
    pub fn output<W: std::io::Write>(
        &self,
        writer: &mut W,
        format: SerializationFormat,
        version: SpecVersion,
    ) -> Result<(), BomError> {
        match format {
            SerializationFormat::Xml => self.output_as_xml(writer, version),
            SerializationFormat::Json => self.output_as_json(writer, version),
            SerializationFormat::Protobuf => self.output_as_protobuf(writer, version),
        }
    }

    /// Decode a document whose schema version is known only from the
    /// document itself: the JSON `specVersion` field, the XML namespace, or
    /// the protobuf `spec_version` field.
    ///
    /// The store uses this to parse entries back out of the repository; the
    /// schema version a client submitted under is not persisted separately.
    pub fn parse_any(bytes: &[u8], format: SerializationFormat) -> Result<Self, BomError> {
        match format {
            SerializationFormat::Xml => {
                let version = sniff_xml_spec_version(bytes)?;
                Self::parse_from_xml(bytes, version)
            }
            SerializationFormat::Json => {
                let bom: Bom = serde_json::from_slice(bytes).map_err(JsonReadError::from)?;
                Ok(bom.into())
            }
            SerializationFormat::Protobuf => {
                let message = crate::proto::Bom::decode(bytes).map_err(ProtoReadError::from)?;
                Ok(Self::try_from(message)?)
            }
        }
    }

    pub fn parse_from_xml(bytes: &[u8], version: SpecVersion) -> Result<Self, BomError> {
        supported_or_error(SerializationFormat::Xml, version)?;
        let mut event_reader = EventReader::new(bytes);
        let bom = Bom::read_xml_document(&mut event_reader, version)?;
        Ok(bom.into())
    }

    pub fn parse_from_json(bytes: &[u8], version: SpecVersion) -> Result<Self, BomError> {
        supported_or_error(SerializationFormat::Json, version)?;
        let bom: Bom = serde_json::from_slice(bytes).map_err(JsonReadError::from)?;
        if bom.spec_version != version {
            return Err(JsonReadError::SpecVersionMismatch {
                document: bom.spec_version.to_string(),
                declared: version.to_string(),
            }
            .into());
        }
        Ok(bom.into())
    }

    pub fn parse_from_protobuf(bytes: &[u8], version: SpecVersion) -> Result<Self, BomError> {
        supported_or_error(SerializationFormat::Protobuf, version)?;
        let message = crate::proto::Bom::decode(bytes).map_err(ProtoReadError::from)?;
        if !message.spec_version.is_empty() && message.spec_version != version.to_string() {
            return Err(ProtoReadError::SpecVersionMismatch {
                document: message.spec_version,
                declared: version.to_string(),
            }
            .into());
        }
        let mut bom = Self::try_from(message)?;
        bom.spec_version = version;
        Ok(bom)
    }

    pub fn output_as_xml<W: std::io::Write>(
        &self,
        writer: &mut W,
        version: SpecVersion,
    ) -> Result<(), BomError> {
        supported_or_error(SerializationFormat::Xml, version)?;
        let bom: Bom = self.clone().project_to(version).into();
        let mut event_writer =
            EventWriter::new_with_config(writer, EmitterConfig::default().perform_indent(true));
        bom.write_xml_document(&mut event_writer)?;
        Ok(())
    }

    pub fn output_as_json<W: std::io::Write>(
        &self,
        writer: &mut W,
        version: SpecVersion,
    ) -> Result<(), BomError> {
        supported_or_error(SerializationFormat::Json, version)?;
        let bom: Bom = self.clone().project_to(version).into();
        serde_json::to_writer_pretty(writer, &bom).map_err(JsonWriteError::from)?;
        Ok(())
    }

    pub fn output_as_protobuf<W: std::io::Write>(
        &self,
        writer: &mut W,
        version: SpecVersion,
    ) -> Result<(), BomError> {
        supported_or_error(SerializationFormat::Protobuf, version)?;
        let message: crate::proto::Bom = self.clone().project_to(version).into();
        writer.write_all(&message.encode_to_vec())?;
        Ok(())
    }
}
