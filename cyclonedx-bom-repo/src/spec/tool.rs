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
use crate::external_models::normalized_string::NormalizedString;
use crate::models;
use crate::spec::hash::Hashes;
use crate::utilities::convert_optional;
use crate::xml::{
    read_lax_validation_list_tag, read_lax_validation_tag, read_simple_tag, to_xml_read_error,
    unexpected_element_error, write_close_tag, write_simple_tag, write_start_tag, FromXml, ToXml,
};

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Tools(pub(crate) Vec<Tool>);

impl From<models::tool::Tools> for Tools {
    fn from(other: models::tool::Tools) -> Self {
        Self(other.0.into_iter().map(std::convert::Into::into).collect())
    }
}

impl From<Tools> for models::tool::Tools {
    fn from(other: Tools) -> Self {
        Self(other.0.into_iter().map(std::convert::Into::into).collect())
    }
}

const TOOLS_TAG: &str = "tools";

impl ToXml for Tools {
    fn write_xml_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
    ) -> Result<(), XmlWriteError> {
        write_start_tag(writer, TOOLS_TAG)?;

        for tool in &self.0 {
            tool.write_xml_element(writer)?;
        }

        write_close_tag(writer, TOOLS_TAG)?;

        Ok(())
    }
}

impl FromXml for Tools {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        _attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        read_lax_validation_list_tag(event_reader, element_name, TOOL_TAG).map(Tools)
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Tool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) hashes: Option<Hashes>,
}

impl From<models::tool::Tool> for Tool {
    fn from(other: models::tool::Tool) -> Self {
        Self {
            vendor: other.vendor.map(|vendor| vendor.to_string()),
            name: other.name.map(|name| name.to_string()),
            version: other.version.map(|version| version.to_string()),
            hashes: convert_optional(other.hashes),
        }
    }
}

impl From<Tool> for models::tool::Tool {
    fn from(other: Tool) -> Self {
        Self {
            vendor: other.vendor.map(NormalizedString::new_unchecked),
            name: other.name.map(NormalizedString::new_unchecked),
            version: other.version.map(NormalizedString::new_unchecked),
            hashes: convert_optional(other.hashes),
        }
    }
}

const TOOL_TAG: &str = "tool";
const VENDOR_TAG: &str = "vendor";
const NAME_TAG: &str = "name";
const VERSION_TAG: &str = "version";
const HASHES_TAG: &str = "hashes";

impl ToXml for Tool {
    fn write_xml_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
    ) -> Result<(), XmlWriteError> {
        write_start_tag(writer, TOOL_TAG)?;

        if let Some(vendor) = &self.vendor {
            write_simple_tag(writer, VENDOR_TAG, vendor)?;
        }

        if let Some(name) = &self.name {
            write_simple_tag(writer, NAME_TAG, name)?;
        }

        if let Some(version) = &self.version {
            write_simple_tag(writer, VERSION_TAG, version)?;
        }

        if let Some(hashes) = &self.hashes {
            hashes.write_xml_element(writer)?;
        }

        write_close_tag(writer, TOOL_TAG)?;

        Ok(())
    }
}

impl FromXml for Tool {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        _attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        let mut vendor: Option<String> = None;
        let mut name: Option<String> = None;
        let mut version: Option<String> = None;
        let mut hashes: Option<Hashes> = None;

        let mut got_end_tag = false;
        while !got_end_tag {
            let next_element = event_reader.next().map_err(to_xml_read_error(TOOL_TAG))?;
            match next_element {
                reader::XmlEvent::StartElement { name: tag, .. }
                    if tag.local_name == VENDOR_TAG =>
                {
                    vendor = Some(read_simple_tag(event_reader, &tag)?);
                }
                reader::XmlEvent::StartElement { name: tag, .. }
                    if tag.local_name == NAME_TAG =>
                {
                    name = Some(read_simple_tag(event_reader, &tag)?);
                }
                reader::XmlEvent::StartElement { name: tag, .. }
                    if tag.local_name == VERSION_TAG =>
                {
                    version = Some(read_simple_tag(event_reader, &tag)?);
                }
                reader::XmlEvent::StartElement {
                    name: tag,
                    attributes,
                    ..
                } if tag.local_name == HASHES_TAG => {
                    hashes = Some(Hashes::read_xml_element(event_reader, &tag, &attributes)?);
                }
                reader::XmlEvent::StartElement { name: tag, .. } => {
                    read_lax_validation_tag(event_reader, &tag)?
                }
                reader::XmlEvent::EndElement { name: tag } if &tag == element_name => {
                    got_end_tag = true;
                }
                reader::XmlEvent::Whitespace(_) | reader::XmlEvent::Characters(_) => (),
                unexpected => return Err(unexpected_element_error(TOOL_TAG, unexpected)),
            }
        }

        Ok(Self {
            vendor,
            name,
            version,
            hashes,
        })
    }
}

#[cfg(test)]
pub(crate) mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::xml::test::{read_element_from_string, write_element_to_string};

    pub(crate) fn example_tools() -> Tools {
        Tools(vec![Tool {
            vendor: Some("vendor".to_string()),
            name: Some("name".to_string()),
            version: Some("version".to_string()),
            hashes: None,
        }])
    }

    pub(crate) fn corresponding_tools() -> models::tool::Tools {
        models::tool::Tools(vec![models::tool::Tool {
            vendor: Some(NormalizedString::new_unchecked("vendor".to_string())),
            name: Some(NormalizedString::new_unchecked("name".to_string())),
            version: Some(NormalizedString::new_unchecked("version".to_string())),
            hashes: None,
        }])
    }

    #[test]
    fn it_should_write_xml_full() {
        let xml_output = write_element_to_string(example_tools());
        assert_eq!(
            xml_output,
            r#"<?xml version="1.0" encoding="utf-8"?>
<tools>
  <tool>
    <vendor>vendor</vendor>
    <name>name</name>
    <version>version</version>
  </tool>
</tools>"#
        );
    }

    #[test]
    fn it_should_read_xml_full() {
        let input = r#"
<tools>
  <tool>
    <vendor>vendor</vendor>
    <name>name</name>
    <version>version</version>
  </tool>
</tools>
"#;
        let actual: Tools = read_element_from_string(input);
        let expected = example_tools();
        assert_eq!(actual, expected);
    }
}
