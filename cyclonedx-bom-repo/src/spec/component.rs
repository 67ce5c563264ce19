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

use serde::{Deserialize, Serialize};
use xml::reader;
use xml::writer::XmlEvent;

use crate::errors::{XmlReadError, XmlWriteError};
use crate::external_models::normalized_string::NormalizedString;
use crate::external_models::uri::Uri;
use crate::models;
use crate::spec::external_reference::ExternalReferences;
use crate::spec::hash::Hashes;
use crate::spec::license::Licenses;
use crate::spec::organization::OrganizationalEntity;
use crate::spec::property::Properties;
use crate::utilities::convert_optional;
use crate::xml::{
    attribute_or_error, optional_attribute, read_lax_validation_list_tag, read_lax_validation_tag,
    read_simple_tag, to_xml_read_error, to_xml_write_error, unexpected_element_error,
    write_close_tag, write_simple_tag, FromXml, ToInnerXml, ToXml,
};

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Components(pub(crate) Vec<Component>);

impl From<models::component::Components> for Components {
    fn from(other: models::component::Components) -> Self {
        Self(other.0.into_iter().map(std::convert::Into::into).collect())
    }
}

impl From<Components> for models::component::Components {
    fn from(other: Components) -> Self {
        Self(other.0.into_iter().map(std::convert::Into::into).collect())
    }
}

const COMPONENTS_TAG: &str = "components";

impl ToXml for Components {
    fn write_xml_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
    ) -> Result<(), XmlWriteError> {
        writer
            .write(XmlEvent::start_element(COMPONENTS_TAG))
            .map_err(to_xml_write_error(COMPONENTS_TAG))?;

        for component in &self.0 {
            component.write_xml_element(writer)?;
        }

        write_close_tag(writer, COMPONENTS_TAG)?;

        Ok(())
    }
}

impl FromXml for Components {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        _attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        read_lax_validation_list_tag(event_reader, element_name, COMPONENT_TAG).map(Components)
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Component {
    #[serde(rename = "type")]
    pub(crate) component_type: String,
    #[serde(rename = "mime-type", skip_serializing_if = "Option::is_none")]
    pub(crate) mime_type: Option<String>,
    #[serde(rename = "bom-ref", skip_serializing_if = "Option::is_none")]
    pub(crate) bom_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) supplier: Option<OrganizationalEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) group: Option<String>,
    pub(crate) name: String,
    pub(crate) version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) hashes: Option<Hashes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) licenses: Option<Licenses>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) copyright: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) cpe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) purl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) external_references: Option<ExternalReferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) properties: Option<Properties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) components: Option<Components>,
}

impl From<models::component::Component> for Component {
    fn from(other: models::component::Component) -> Self {
        Self {
            component_type: other.component_type.to_string(),
            mime_type: other.mime_type.map(|mime_type| mime_type.0),
            bom_ref: other.bom_ref,
            supplier: convert_optional(other.supplier),
            author: other.author.map(|author| author.to_string()),
            publisher: other.publisher.map(|publisher| publisher.to_string()),
            group: other.group.map(|group| group.to_string()),
            name: other.name.to_string(),
            version: other.version.to_string(),
            description: other.description.map(|description| description.to_string()),
            scope: other.scope.map(|scope| scope.to_string()),
            hashes: convert_optional(other.hashes),
            licenses: convert_optional(other.licenses),
            copyright: other.copyright.map(|copyright| copyright.to_string()),
            cpe: other.cpe.map(|cpe| cpe.0),
            purl: other.purl.map(|purl| purl.to_string()),
            external_references: convert_optional(other.external_references),
            properties: convert_optional(other.properties),
            components: convert_optional(other.components),
        }
    }
}

impl From<Component> for models::component::Component {
    fn from(other: Component) -> Self {
        Self {
            component_type: models::component::Classification::new_unchecked(other.component_type),
            mime_type: other.mime_type.map(models::component::MimeType),
            bom_ref: other.bom_ref,
            supplier: convert_optional(other.supplier),
            author: other.author.map(NormalizedString::new_unchecked),
            publisher: other.publisher.map(NormalizedString::new_unchecked),
            group: other.group.map(NormalizedString::new_unchecked),
            name: NormalizedString::new_unchecked(other.name),
            version: NormalizedString::new_unchecked(other.version),
            description: other.description.map(NormalizedString::new_unchecked),
            scope: other.scope.map(models::component::Scope::new_unchecked),
            hashes: convert_optional(other.hashes),
            licenses: convert_optional(other.licenses),
            copyright: other.copyright.map(NormalizedString::new_unchecked),
            cpe: other.cpe.map(models::component::Cpe),
            purl: other.purl.map(Uri::new_unchecked),
            external_references: convert_optional(other.external_references),
            properties: convert_optional(other.properties),
            components: convert_optional(other.components),
        }
    }
}

const COMPONENT_TAG: &str = "component";
const TYPE_ATTR: &str = "type";
const MIME_TYPE_ATTR: &str = "mime-type";
const BOM_REF_ATTR: &str = "bom-ref";
const SUPPLIER_TAG: &str = "supplier";
const AUTHOR_TAG: &str = "author";
const PUBLISHER_TAG: &str = "publisher";
const GROUP_TAG: &str = "group";
const NAME_TAG: &str = "name";
const VERSION_TAG: &str = "version";
const DESCRIPTION_TAG: &str = "description";
const SCOPE_TAG: &str = "scope";
const HASHES_TAG: &str = "hashes";
const LICENSES_TAG: &str = "licenses";
const COPYRIGHT_TAG: &str = "copyright";
const CPE_TAG: &str = "cpe";
const PURL_TAG: &str = "purl";
const EXTERNAL_REFERENCES_TAG: &str = "externalReferences";
const PROPERTIES_TAG: &str = "properties";

impl ToXml for Component {
    fn write_xml_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
    ) -> Result<(), XmlWriteError> {
        let mut component_start_element =
            XmlEvent::start_element(COMPONENT_TAG).attr(TYPE_ATTR, &self.component_type);

        if let Some(mime_type) = &self.mime_type {
            component_start_element = component_start_element.attr(MIME_TYPE_ATTR, mime_type);
        }

        if let Some(bom_ref) = &self.bom_ref {
            component_start_element = component_start_element.attr(BOM_REF_ATTR, bom_ref);
        }

        writer
            .write(component_start_element)
            .map_err(to_xml_write_error(COMPONENT_TAG))?;

        if let Some(supplier) = &self.supplier {
            supplier.write_xml_named_element(writer, SUPPLIER_TAG)?;
        }

        if let Some(author) = &self.author {
            write_simple_tag(writer, AUTHOR_TAG, author)?;
        }

        if let Some(publisher) = &self.publisher {
            write_simple_tag(writer, PUBLISHER_TAG, publisher)?;
        }

        if let Some(group) = &self.group {
            write_simple_tag(writer, GROUP_TAG, group)?;
        }

        write_simple_tag(writer, NAME_TAG, &self.name)?;

        write_simple_tag(writer, VERSION_TAG, &self.version)?;

        if let Some(description) = &self.description {
            write_simple_tag(writer, DESCRIPTION_TAG, description)?;
        }

        if let Some(scope) = &self.scope {
            write_simple_tag(writer, SCOPE_TAG, scope)?;
        }

        if let Some(hashes) = &self.hashes {
            hashes.write_xml_element(writer)?;
        }

        if let Some(licenses) = &self.licenses {
            licenses.write_xml_element(writer)?;
        }

        if let Some(copyright) = &self.copyright {
            write_simple_tag(writer, COPYRIGHT_TAG, copyright)?;
        }

        if let Some(cpe) = &self.cpe {
            write_simple_tag(writer, CPE_TAG, cpe)?;
        }

        if let Some(purl) = &self.purl {
            write_simple_tag(writer, PURL_TAG, purl)?;
        }

        if let Some(external_references) = &self.external_references {
            external_references.write_xml_element(writer)?;
        }

        if let Some(properties) = &self.properties {
            properties.write_xml_element(writer)?;
        }

        if let Some(components) = &self.components {
            components.write_xml_element(writer)?;
        }

        write_close_tag(writer, COMPONENT_TAG)?;

        Ok(())
    }
}

impl FromXml for Component {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        let component_type = attribute_or_error(element_name, attributes, TYPE_ATTR)?;
        let mime_type = optional_attribute(attributes, MIME_TYPE_ATTR);
        let bom_ref = optional_attribute(attributes, BOM_REF_ATTR);

        let mut supplier: Option<OrganizationalEntity> = None;
        let mut author: Option<String> = None;
        let mut publisher: Option<String> = None;
        let mut group: Option<String> = None;
        let mut name: Option<String> = None;
        let mut version: Option<String> = None;
        let mut description: Option<String> = None;
        let mut scope: Option<String> = None;
        let mut hashes: Option<Hashes> = None;
        let mut licenses: Option<Licenses> = None;
        let mut copyright: Option<String> = None;
        let mut cpe: Option<String> = None;
        let mut purl: Option<String> = None;
        let mut external_references: Option<ExternalReferences> = None;
        let mut properties: Option<Properties> = None;
        let mut components: Option<Components> = None;

        let mut got_end_tag = false;
        while !got_end_tag {
            let next_element = event_reader
                .next()
                .map_err(to_xml_read_error(COMPONENT_TAG))?;
            match next_element {
                reader::XmlEvent::StartElement {
                    name: tag,
                    attributes,
                    ..
                } if tag.local_name == SUPPLIER_TAG => {
                    supplier = Some(OrganizationalEntity::read_xml_element(
                        event_reader,
                        &tag,
                        &attributes,
                    )?);
                }
                reader::XmlEvent::StartElement { name: tag, .. }
                    if tag.local_name == AUTHOR_TAG =>
                {
                    author = Some(read_simple_tag(event_reader, &tag)?);
                }
                reader::XmlEvent::StartElement { name: tag, .. }
                    if tag.local_name == PUBLISHER_TAG =>
                {
                    publisher = Some(read_simple_tag(event_reader, &tag)?);
                }
                reader::XmlEvent::StartElement { name: tag, .. }
                    if tag.local_name == GROUP_TAG =>
                {
                    group = Some(read_simple_tag(event_reader, &tag)?);
                }
                reader::XmlEvent::StartElement { name: tag, .. } if tag.local_name == NAME_TAG => {
                    name = Some(read_simple_tag(event_reader, &tag)?);
                }
                reader::XmlEvent::StartElement { name: tag, .. }
                    if tag.local_name == VERSION_TAG =>
                {
                    version = Some(read_simple_tag(event_reader, &tag)?);
                }
                reader::XmlEvent::StartElement { name: tag, .. }
                    if tag.local_name == DESCRIPTION_TAG =>
                {
                    description = Some(read_simple_tag(event_reader, &tag)?);
                }
                reader::XmlEvent::StartElement { name: tag, .. }
                    if tag.local_name == SCOPE_TAG =>
                {
                    scope = Some(read_simple_tag(event_reader, &tag)?);
                }
                reader::XmlEvent::StartElement {
                    name: tag,
                    attributes,
                    ..
                } if tag.local_name == HASHES_TAG => {
                    hashes = Some(Hashes::read_xml_element(event_reader, &tag, &attributes)?);
                }
                reader::XmlEvent::StartElement {
                    name: tag,
                    attributes,
                    ..
                } if tag.local_name == LICENSES_TAG => {
                    licenses = Some(Licenses::read_xml_element(
                        event_reader,
                        &tag,
                        &attributes,
                    )?);
                }
                reader::XmlEvent::StartElement { name: tag, .. }
                    if tag.local_name == COPYRIGHT_TAG =>
                {
                    copyright = Some(read_simple_tag(event_reader, &tag)?);
                }
                reader::XmlEvent::StartElement { name: tag, .. } if tag.local_name == CPE_TAG => {
                    cpe = Some(read_simple_tag(event_reader, &tag)?);
                }
                reader::XmlEvent::StartElement { name: tag, .. } if tag.local_name == PURL_TAG => {
                    purl = Some(read_simple_tag(event_reader, &tag)?);
                }
                reader::XmlEvent::StartElement {
                    name: tag,
                    attributes,
                    ..
                } if tag.local_name == EXTERNAL_REFERENCES_TAG => {
                    external_references = Some(ExternalReferences::read_xml_element(
                        event_reader,
                        &tag,
                        &attributes,
                    )?);
                }
                reader::XmlEvent::StartElement {
                    name: tag,
                    attributes,
                    ..
                } if tag.local_name == PROPERTIES_TAG => {
                    properties = Some(Properties::read_xml_element(
                        event_reader,
                        &tag,
                        &attributes,
                    )?);
                }
                reader::XmlEvent::StartElement {
                    name: tag,
                    attributes,
                    ..
                } if tag.local_name == COMPONENTS_TAG => {
                    components = Some(Components::read_xml_element(
                        event_reader,
                        &tag,
                        &attributes,
                    )?);
                }
                reader::XmlEvent::StartElement { name: tag, .. } => {
                    read_lax_validation_tag(event_reader, &tag)?
                }
                reader::XmlEvent::EndElement { name: tag } if &tag == element_name => {
                    got_end_tag = true;
                }
                reader::XmlEvent::Whitespace(_) | reader::XmlEvent::Characters(_) => (),
                unexpected => return Err(unexpected_element_error(COMPONENT_TAG, unexpected)),
            }
        }

        let name = name.ok_or_else(|| XmlReadError::RequiredDataMissing {
            required_field: NAME_TAG.to_string(),
            element: COMPONENT_TAG.to_string(),
        })?;
        let version = version.ok_or_else(|| XmlReadError::RequiredDataMissing {
            required_field: VERSION_TAG.to_string(),
            element: COMPONENT_TAG.to_string(),
        })?;

        Ok(Self {
            component_type,
            mime_type,
            bom_ref,
            supplier,
            author,
            publisher,
            group,
            name,
            version,
            description,
            scope,
            hashes,
            licenses,
            copyright,
            cpe,
            purl,
            external_references,
            properties,
            components,
        })
    }
}

#[cfg(test)]
pub(crate) mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::spec::hash::test::{corresponding_hashes, example_hashes};
    use crate::spec::license::test::{corresponding_licenses, example_licenses};
    use crate::xml::test::{read_element_from_string, write_element_to_string};

    pub(crate) fn example_components() -> Components {
        Components(vec![example_component()])
    }

    pub(crate) fn corresponding_components() -> models::component::Components {
        models::component::Components(vec![corresponding_component()])
    }

    pub(crate) fn example_component() -> Component {
        Component {
            component_type: "library".to_string(),
            mime_type: Some("mime type".to_string()),
            bom_ref: Some("bom-ref".to_string()),
            supplier: None,
            author: Some("author".to_string()),
            publisher: Some("publisher".to_string()),
            group: Some("group".to_string()),
            name: "name".to_string(),
            version: "version".to_string(),
            description: Some("description".to_string()),
            scope: Some("required".to_string()),
            hashes: Some(example_hashes()),
            licenses: Some(example_licenses()),
            copyright: Some("copyright".to_string()),
            cpe: Some("cpe".to_string()),
            purl: Some("purl".to_string()),
            external_references: None,
            properties: None,
            components: None,
        }
    }

    pub(crate) fn corresponding_component() -> models::component::Component {
        models::component::Component {
            component_type: models::component::Classification::Library,
            mime_type: Some(models::component::MimeType("mime type".to_string())),
            bom_ref: Some("bom-ref".to_string()),
            supplier: None,
            author: Some(NormalizedString::new_unchecked("author".to_string())),
            publisher: Some(NormalizedString::new_unchecked("publisher".to_string())),
            group: Some(NormalizedString::new_unchecked("group".to_string())),
            name: NormalizedString::new_unchecked("name".to_string()),
            version: NormalizedString::new_unchecked("version".to_string()),
            description: Some(NormalizedString::new_unchecked("description".to_string())),
            scope: Some(models::component::Scope::Required),
            hashes: Some(corresponding_hashes()),
            licenses: Some(corresponding_licenses()),
            copyright: Some(NormalizedString::new_unchecked("copyright".to_string())),
            cpe: Some(models::component::Cpe("cpe".to_string())),
            purl: Some(Uri::new_unchecked("purl".to_string())),
            external_references: None,
            properties: None,
            components: None,
        }
    }

    #[test]
    fn it_should_round_trip_the_model_conversion() {
        let model: models::component::Components = example_components().into();
        assert_eq!(model, corresponding_components());
        let spec: Components = model.into();
        assert_eq!(spec, example_components());
    }

    #[test]
    fn it_should_read_xml_full() {
        let input = r#"
<components>
  <component type="library" mime-type="mime type" bom-ref="bom-ref">
    <author>author</author>
    <publisher>publisher</publisher>
    <group>group</group>
    <name>name</name>
    <version>version</version>
    <description>description</description>
    <scope>required</scope>
    <hashes>
      <hash alg="SHA-256">hash value</hash>
    </hashes>
    <licenses>
      <license>
        <id>Apache-2.0</id>
      </license>
      <expression>MIT OR Apache-2.0</expression>
    </licenses>
    <copyright>copyright</copyright>
    <cpe>cpe</cpe>
    <purl>purl</purl>
  </component>
</components>
"#;
        let actual: Components = read_element_from_string(input);
        let expected = example_components();
        assert_eq!(actual, expected);
    }

    #[test]
    fn it_should_write_then_read_back() {
        let xml_output = write_element_to_string(example_components());
        let actual: Components = read_element_from_string(xml_output);
        assert_eq!(actual, example_components());
    }

    #[test]
    fn it_should_read_nested_components() {
        let input = r#"
<components>
  <component type="library">
    <name>outer</name>
    <version>1.0.0</version>
    <components>
      <component type="library">
        <name>inner</name>
        <version>2.0.0</version>
      </component>
    </components>
  </component>
</components>
"#;
        let actual: Components = read_element_from_string(input);
        let inner = &actual.0[0].components;
        assert!(inner.is_some());
        assert_eq!(
            inner.as_ref().map(|components| components.0[0].name.as_str()),
            Some("inner")
        );
    }
}
