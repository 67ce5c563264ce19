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
use crate::spec::organization::OrganizationalEntity;
use crate::utilities::convert_optional;
use crate::xml::{
    optional_attribute, read_lax_validation_list_tag, read_lax_validation_tag, read_simple_tag,
    to_xml_read_error, to_xml_write_error, unexpected_element_error, write_close_tag,
    write_simple_tag, write_start_tag, FromXml, FromXmlType, ToInnerXml, ToXml,
};

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Services(pub(crate) Vec<Service>);

impl From<models::service::Services> for Services {
    fn from(other: models::service::Services) -> Self {
        Self(other.0.into_iter().map(std::convert::Into::into).collect())
    }
}

impl From<Services> for models::service::Services {
    fn from(other: Services) -> Self {
        Self(other.0.into_iter().map(std::convert::Into::into).collect())
    }
}

const SERVICES_TAG: &str = "services";

impl ToXml for Services {
    fn write_xml_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
    ) -> Result<(), XmlWriteError> {
        write_start_tag(writer, SERVICES_TAG)?;

        for service in &self.0 {
            service.write_xml_element(writer)?;
        }

        write_close_tag(writer, SERVICES_TAG)?;

        Ok(())
    }
}

impl FromXml for Services {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        _attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        read_lax_validation_list_tag(event_reader, element_name, SERVICE_TAG).map(Services)
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Service {
    #[serde(rename = "bom-ref", skip_serializing_if = "Option::is_none")]
    pub(crate) bom_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) provider: Option<OrganizationalEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) group: Option<String>,
    pub(crate) name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) endpoints: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) authenticated: Option<bool>,
}

impl From<models::service::Service> for Service {
    fn from(other: models::service::Service) -> Self {
        Self {
            bom_ref: other.bom_ref,
            provider: convert_optional(other.provider),
            group: other.group.map(|group| group.to_string()),
            name: other.name.to_string(),
            version: other.version.map(|version| version.to_string()),
            description: other.description.map(|description| description.to_string()),
            endpoints: other
                .endpoints
                .map(|endpoints| endpoints.into_iter().map(|uri| uri.to_string()).collect()),
            authenticated: other.authenticated,
        }
    }
}

impl From<Service> for models::service::Service {
    fn from(other: Service) -> Self {
        Self {
            bom_ref: other.bom_ref,
            provider: convert_optional(other.provider),
            group: other.group.map(NormalizedString::new_unchecked),
            name: NormalizedString::new_unchecked(other.name),
            version: other.version.map(NormalizedString::new_unchecked),
            description: other.description.map(NormalizedString::new_unchecked),
            endpoints: other
                .endpoints
                .map(|endpoints| endpoints.into_iter().map(Uri::new_unchecked).collect()),
            authenticated: other.authenticated,
        }
    }
}

const SERVICE_TAG: &str = "service";
const BOM_REF_ATTR: &str = "bom-ref";
const PROVIDER_TAG: &str = "provider";
const GROUP_TAG: &str = "group";
const NAME_TAG: &str = "name";
const VERSION_TAG: &str = "version";
const DESCRIPTION_TAG: &str = "description";
const ENDPOINTS_TAG: &str = "endpoints";
const ENDPOINT_TAG: &str = "endpoint";
const AUTHENTICATED_TAG: &str = "authenticated";

impl ToXml for Service {
    fn write_xml_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
    ) -> Result<(), XmlWriteError> {
        let mut service_start_element = XmlEvent::start_element(SERVICE_TAG);
        if let Some(bom_ref) = &self.bom_ref {
            service_start_element = service_start_element.attr(BOM_REF_ATTR, bom_ref);
        }
        writer
            .write(service_start_element)
            .map_err(to_xml_write_error(SERVICE_TAG))?;

        if let Some(provider) = &self.provider {
            provider.write_xml_named_element(writer, PROVIDER_TAG)?;
        }

        if let Some(group) = &self.group {
            write_simple_tag(writer, GROUP_TAG, group)?;
        }

        write_simple_tag(writer, NAME_TAG, &self.name)?;

        if let Some(version) = &self.version {
            write_simple_tag(writer, VERSION_TAG, version)?;
        }

        if let Some(description) = &self.description {
            write_simple_tag(writer, DESCRIPTION_TAG, description)?;
        }

        if let Some(endpoints) = &self.endpoints {
            write_start_tag(writer, ENDPOINTS_TAG)?;
            for endpoint in endpoints {
                write_simple_tag(writer, ENDPOINT_TAG, endpoint)?;
            }
            write_close_tag(writer, ENDPOINTS_TAG)?;
        }

        if let Some(authenticated) = &self.authenticated {
            write_simple_tag(writer, AUTHENTICATED_TAG, &authenticated.to_string())?;
        }

        write_close_tag(writer, SERVICE_TAG)?;

        Ok(())
    }
}

impl FromXml for Service {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        let bom_ref = optional_attribute(attributes, BOM_REF_ATTR);
        let mut provider: Option<OrganizationalEntity> = None;
        let mut group: Option<String> = None;
        let mut name: Option<String> = None;
        let mut version: Option<String> = None;
        let mut description: Option<String> = None;
        let mut endpoints: Option<Vec<String>> = None;
        let mut authenticated: Option<bool> = None;

        let mut got_end_tag = false;
        while !got_end_tag {
            let next_element = event_reader
                .next()
                .map_err(to_xml_read_error(SERVICE_TAG))?;
            match next_element {
                reader::XmlEvent::StartElement {
                    name: tag,
                    attributes,
                    ..
                } if tag.local_name == PROVIDER_TAG => {
                    provider = Some(OrganizationalEntity::read_xml_element(
                        event_reader,
                        &tag,
                        &attributes,
                    )?);
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
                    if tag.local_name == ENDPOINTS_TAG =>
                {
                    endpoints = Some(read_endpoints(event_reader, &tag)?);
                }
                reader::XmlEvent::StartElement { name: tag, .. }
                    if tag.local_name == AUTHENTICATED_TAG =>
                {
                    let value = read_simple_tag(event_reader, &tag)?;
                    authenticated = Some(bool::from_xml_value(AUTHENTICATED_TAG, value)?);
                }
                reader::XmlEvent::StartElement { name: tag, .. } => {
                    read_lax_validation_tag(event_reader, &tag)?
                }
                reader::XmlEvent::EndElement { name: tag } if &tag == element_name => {
                    got_end_tag = true;
                }
                reader::XmlEvent::Whitespace(_) | reader::XmlEvent::Characters(_) => (),
                unexpected => return Err(unexpected_element_error(SERVICE_TAG, unexpected)),
            }
        }

        let name = name.ok_or_else(|| XmlReadError::RequiredDataMissing {
            required_field: NAME_TAG.to_string(),
            element: SERVICE_TAG.to_string(),
        })?;

        Ok(Self {
            bom_ref,
            provider,
            group,
            name,
            version,
            description,
            endpoints,
            authenticated,
        })
    }
}

fn read_endpoints<R: std::io::Read>(
    event_reader: &mut xml::EventReader<R>,
    element_name: &xml::name::OwnedName,
) -> Result<Vec<String>, XmlReadError> {
    let mut endpoints = Vec::new();
    let mut got_end_tag = false;
    while !got_end_tag {
        let next_element = event_reader
            .next()
            .map_err(to_xml_read_error(ENDPOINTS_TAG))?;
        match next_element {
            reader::XmlEvent::StartElement { name, .. } if name.local_name == ENDPOINT_TAG => {
                endpoints.push(read_simple_tag(event_reader, &name)?);
            }
            reader::XmlEvent::StartElement { name, .. } => {
                read_lax_validation_tag(event_reader, &name)?
            }
            reader::XmlEvent::EndElement { name } if &name == element_name => {
                got_end_tag = true;
            }
            reader::XmlEvent::Whitespace(_) | reader::XmlEvent::Characters(_) => (),
            unexpected => return Err(unexpected_element_error(ENDPOINTS_TAG, unexpected)),
        }
    }
    Ok(endpoints)
}

#[cfg(test)]
pub(crate) mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::xml::test::{read_element_from_string, write_element_to_string};

    pub(crate) fn example_services() -> Services {
        Services(vec![Service {
            bom_ref: Some("bom-ref".to_string()),
            provider: None,
            group: Some("group".to_string()),
            name: "name".to_string(),
            version: Some("version".to_string()),
            description: Some("description".to_string()),
            endpoints: Some(vec!["endpoint".to_string()]),
            authenticated: Some(true),
        }])
    }

    pub(crate) fn corresponding_services() -> models::service::Services {
        models::service::Services(vec![models::service::Service {
            bom_ref: Some("bom-ref".to_string()),
            provider: None,
            group: Some(NormalizedString::new_unchecked("group".to_string())),
            name: NormalizedString::new_unchecked("name".to_string()),
            version: Some(NormalizedString::new_unchecked("version".to_string())),
            description: Some(NormalizedString::new_unchecked("description".to_string())),
            endpoints: Some(vec![Uri::new_unchecked("endpoint".to_string())]),
            authenticated: Some(true),
        }])
    }

    #[test]
    fn it_should_read_xml_full() {
        let input = r#"
<services>
  <service bom-ref="bom-ref">
    <group>group</group>
    <name>name</name>
    <version>version</version>
    <description>description</description>
    <endpoints>
      <endpoint>endpoint</endpoint>
    </endpoints>
    <authenticated>true</authenticated>
  </service>
</services>
"#;
        let actual: Services = read_element_from_string(input);
        let expected = example_services();
        assert_eq!(actual, expected);
    }

    #[test]
    fn it_should_write_then_read_back() {
        let xml_output = write_element_to_string(example_services());
        let actual: Services = read_element_from_string(xml_output);
        assert_eq!(actual, example_services());
    }
}
