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

use crate::errors::{XmlReadError, XmlWriteError};
use crate::external_models::date_time::DateTime;
use crate::models;
use crate::spec::component::Component;
use crate::spec::organization::OrganizationalContact;
use crate::spec::property::Properties;
use crate::spec::tool::Tools;
use crate::utilities::convert_optional;
use crate::xml::{
    read_lax_validation_tag, read_simple_tag, to_xml_read_error, unexpected_element_error,
    write_close_tag, write_simple_tag, write_start_tag, FromXml, ToInnerXml, ToXml,
};

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) tools: Option<Tools>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) authors: Option<Vec<OrganizationalContact>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) component: Option<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) properties: Option<Properties>,
}

impl From<models::metadata::Metadata> for Metadata {
    fn from(other: models::metadata::Metadata) -> Self {
        Self {
            timestamp: other.timestamp.map(|timestamp| timestamp.to_string()),
            tools: convert_optional(other.tools),
            authors: other
                .authors
                .map(|authors| authors.into_iter().map(std::convert::Into::into).collect()),
            component: convert_optional(other.component),
            properties: convert_optional(other.properties),
        }
    }
}

impl From<Metadata> for models::metadata::Metadata {
    fn from(other: Metadata) -> Self {
        Self {
            timestamp: other.timestamp.map(DateTime::new_unchecked),
            tools: convert_optional(other.tools),
            authors: other
                .authors
                .map(|authors| authors.into_iter().map(std::convert::Into::into).collect()),
            component: convert_optional(other.component),
            properties: convert_optional(other.properties),
        }
    }
}

const METADATA_TAG: &str = "metadata";
const TIMESTAMP_TAG: &str = "timestamp";
const TOOLS_TAG: &str = "tools";
const AUTHORS_TAG: &str = "authors";
const AUTHOR_TAG: &str = "author";
const COMPONENT_TAG: &str = "component";
const PROPERTIES_TAG: &str = "properties";

impl ToXml for Metadata {
    fn write_xml_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
    ) -> Result<(), XmlWriteError> {
        write_start_tag(writer, METADATA_TAG)?;

        if let Some(timestamp) = &self.timestamp {
            write_simple_tag(writer, TIMESTAMP_TAG, timestamp)?;
        }

        if let Some(tools) = &self.tools {
            tools.write_xml_element(writer)?;
        }

        if let Some(authors) = &self.authors {
            write_start_tag(writer, AUTHORS_TAG)?;
            for author in authors {
                author.write_xml_named_element(writer, AUTHOR_TAG)?;
            }
            write_close_tag(writer, AUTHORS_TAG)?;
        }

        if let Some(component) = &self.component {
            component.write_xml_element(writer)?;
        }

        if let Some(properties) = &self.properties {
            properties.write_xml_element(writer)?;
        }

        write_close_tag(writer, METADATA_TAG)?;

        Ok(())
    }
}

impl FromXml for Metadata {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        _attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        let mut timestamp: Option<String> = None;
        let mut tools: Option<Tools> = None;
        let mut authors: Option<Vec<OrganizationalContact>> = None;
        let mut component: Option<Component> = None;
        let mut properties: Option<Properties> = None;

        let mut got_end_tag = false;
        while !got_end_tag {
            let next_element = event_reader
                .next()
                .map_err(to_xml_read_error(METADATA_TAG))?;
            match next_element {
                reader::XmlEvent::StartElement { name, .. }
                    if name.local_name == TIMESTAMP_TAG =>
                {
                    timestamp = Some(read_simple_tag(event_reader, &name)?);
                }
                reader::XmlEvent::StartElement {
                    name, attributes, ..
                } if name.local_name == TOOLS_TAG => {
                    tools = Some(Tools::read_xml_element(event_reader, &name, &attributes)?);
                }
                reader::XmlEvent::StartElement { name, .. } if name.local_name == AUTHORS_TAG => {
                    authors = Some(read_authors(event_reader, &name)?);
                }
                reader::XmlEvent::StartElement {
                    name, attributes, ..
                } if name.local_name == COMPONENT_TAG => {
                    component = Some(Component::read_xml_element(
                        event_reader,
                        &name,
                        &attributes,
                    )?);
                }
                reader::XmlEvent::StartElement {
                    name, attributes, ..
                } if name.local_name == PROPERTIES_TAG => {
                    properties = Some(Properties::read_xml_element(
                        event_reader,
                        &name,
                        &attributes,
                    )?);
                }
                reader::XmlEvent::StartElement { name, .. } => {
                    read_lax_validation_tag(event_reader, &name)?
                }
                reader::XmlEvent::EndElement { name } if &name == element_name => {
                    got_end_tag = true;
                }
                reader::XmlEvent::Whitespace(_) | reader::XmlEvent::Characters(_) => (),
                unexpected => return Err(unexpected_element_error(METADATA_TAG, unexpected)),
            }
        }

        Ok(Self {
            timestamp,
            tools,
            authors,
            component,
            properties,
        })
    }
}

fn read_authors<R: std::io::Read>(
    event_reader: &mut xml::EventReader<R>,
    element_name: &xml::name::OwnedName,
) -> Result<Vec<OrganizationalContact>, XmlReadError> {
    let mut authors = Vec::new();
    let mut got_end_tag = false;
    while !got_end_tag {
        let next_element = event_reader
            .next()
            .map_err(to_xml_read_error(AUTHORS_TAG))?;
        match next_element {
            reader::XmlEvent::StartElement {
                name, attributes, ..
            } if name.local_name == AUTHOR_TAG => {
                authors.push(OrganizationalContact::read_xml_element(
                    event_reader,
                    &name,
                    &attributes,
                )?);
            }
            reader::XmlEvent::StartElement { name, .. } => {
                read_lax_validation_tag(event_reader, &name)?
            }
            reader::XmlEvent::EndElement { name } if &name == element_name => {
                got_end_tag = true;
            }
            reader::XmlEvent::Whitespace(_) | reader::XmlEvent::Characters(_) => (),
            unexpected => return Err(unexpected_element_error(AUTHORS_TAG, unexpected)),
        }
    }
    Ok(authors)
}

#[cfg(test)]
pub(crate) mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::spec::organization::test::{corresponding_contact, example_contact};
    use crate::spec::tool::test::{corresponding_tools, example_tools};
    use crate::xml::test::{read_element_from_string, write_element_to_string};

    pub(crate) fn example_metadata() -> Metadata {
        Metadata {
            timestamp: Some("1970-01-01T00:00:00Z".to_string()),
            tools: Some(example_tools()),
            authors: Some(vec![example_contact()]),
            component: None,
            properties: None,
        }
    }

    pub(crate) fn corresponding_metadata() -> models::metadata::Metadata {
        models::metadata::Metadata {
            timestamp: Some(DateTime::new_unchecked("1970-01-01T00:00:00Z".to_string())),
            tools: Some(corresponding_tools()),
            authors: Some(vec![corresponding_contact()]),
            component: None,
            properties: None,
        }
    }

    #[test]
    fn it_should_round_trip_the_model_conversion() {
        let model: models::metadata::Metadata = example_metadata().into();
        assert_eq!(model, corresponding_metadata());
        let spec: Metadata = model.into();
        assert_eq!(spec, example_metadata());
    }

    #[test]
    fn it_should_read_xml_full() {
        let input = r#"
<metadata>
  <timestamp>1970-01-01T00:00:00Z</timestamp>
  <tools>
    <tool>
      <vendor>vendor</vendor>
      <name>name</name>
      <version>version</version>
    </tool>
  </tools>
  <authors>
    <author>
      <name>name</name>
      <email>email</email>
      <phone>phone</phone>
    </author>
  </authors>
</metadata>
"#;
        let actual: Metadata = read_element_from_string(input);
        let expected = example_metadata();
        assert_eq!(actual, expected);
    }

    #[test]
    fn it_should_write_then_read_back() {
        let xml_output = write_element_to_string(example_metadata());
        let actual: Metadata = read_element_from_string(xml_output);
        assert_eq!(actual, example_metadata());
    }
}
