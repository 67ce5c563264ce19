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
use crate::external_models::uri::Uri;
use crate::models;
use crate::spec::hash::Hashes;
use crate::utilities::convert_optional;
use crate::xml::{
    attribute_or_error, read_lax_validation_list_tag, read_lax_validation_tag, read_simple_tag,
    to_xml_read_error, to_xml_write_error, unexpected_element_error, write_close_tag,
    write_simple_tag, write_start_tag, FromXml, ToXml,
};

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExternalReferences(pub(crate) Vec<ExternalReference>);

impl From<models::external_reference::ExternalReferences> for ExternalReferences {
    fn from(other: models::external_reference::ExternalReferences) -> Self {
        Self(other.0.into_iter().map(std::convert::Into::into).collect())
    }
}

impl From<ExternalReferences> for models::external_reference::ExternalReferences {
    fn from(other: ExternalReferences) -> Self {
        Self(other.0.into_iter().map(std::convert::Into::into).collect())
    }
}

const EXTERNAL_REFERENCES_TAG: &str = "externalReferences";

impl ToXml for ExternalReferences {
    fn write_xml_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
    ) -> Result<(), XmlWriteError> {
        write_start_tag(writer, EXTERNAL_REFERENCES_TAG)?;

        for external_reference in &self.0 {
            external_reference.write_xml_element(writer)?;
        }

        write_close_tag(writer, EXTERNAL_REFERENCES_TAG)?;

        Ok(())
    }
}

impl FromXml for ExternalReferences {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        _attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        read_lax_validation_list_tag(event_reader, element_name, REFERENCE_TAG)
            .map(ExternalReferences)
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExternalReference {
    #[serde(rename = "type")]
    pub(crate) external_reference_type: String,
    pub(crate) url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) hashes: Option<Hashes>,
}

impl From<models::external_reference::ExternalReference> for ExternalReference {
    fn from(other: models::external_reference::ExternalReference) -> Self {
        Self {
            external_reference_type: other.external_reference_type.to_string(),
            url: other.url.to_string(),
            comment: other.comment,
            hashes: convert_optional(other.hashes),
        }
    }
}

impl From<ExternalReference> for models::external_reference::ExternalReference {
    fn from(other: ExternalReference) -> Self {
        Self {
            external_reference_type:
                models::external_reference::ExternalReferenceType::new_unchecked(
                    other.external_reference_type,
                ),
            url: Uri::new_unchecked(other.url),
            comment: other.comment,
            hashes: convert_optional(other.hashes),
        }
    }
}

const REFERENCE_TAG: &str = "reference";
const TYPE_ATTR: &str = "type";
const URL_TAG: &str = "url";
const COMMENT_TAG: &str = "comment";
const HASHES_TAG: &str = "hashes";

impl ToXml for ExternalReference {
    fn write_xml_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
    ) -> Result<(), XmlWriteError> {
        writer
            .write(
                XmlEvent::start_element(REFERENCE_TAG)
                    .attr(TYPE_ATTR, &self.external_reference_type),
            )
            .map_err(to_xml_write_error(REFERENCE_TAG))?;

        write_simple_tag(writer, URL_TAG, &self.url)?;

        if let Some(comment) = &self.comment {
            write_simple_tag(writer, COMMENT_TAG, comment)?;
        }

        if let Some(hashes) = &self.hashes {
            hashes.write_xml_element(writer)?;
        }

        write_close_tag(writer, REFERENCE_TAG)?;

        Ok(())
    }
}

impl FromXml for ExternalReference {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        let external_reference_type = attribute_or_error(element_name, attributes, TYPE_ATTR)?;
        let mut url: Option<String> = None;
        let mut comment: Option<String> = None;
        let mut hashes: Option<Hashes> = None;

        let mut got_end_tag = false;
        while !got_end_tag {
            let next_element = event_reader
                .next()
                .map_err(to_xml_read_error(REFERENCE_TAG))?;
            match next_element {
                reader::XmlEvent::StartElement { name, .. } if name.local_name == URL_TAG => {
                    url = Some(read_simple_tag(event_reader, &name)?);
                }
                reader::XmlEvent::StartElement { name, .. } if name.local_name == COMMENT_TAG => {
                    comment = Some(read_simple_tag(event_reader, &name)?);
                }
                reader::XmlEvent::StartElement {
                    name, attributes, ..
                } if name.local_name == HASHES_TAG => {
                    hashes = Some(Hashes::read_xml_element(event_reader, &name, &attributes)?);
                }
                reader::XmlEvent::StartElement { name, .. } => {
                    read_lax_validation_tag(event_reader, &name)?
                }
                reader::XmlEvent::EndElement { name } if &name == element_name => {
                    got_end_tag = true;
                }
                reader::XmlEvent::Whitespace(_) | reader::XmlEvent::Characters(_) => (),
                unexpected => return Err(unexpected_element_error(REFERENCE_TAG, unexpected)),
            }
        }

        let url = url.ok_or_else(|| XmlReadError::RequiredDataMissing {
            required_field: URL_TAG.to_string(),
            element: REFERENCE_TAG.to_string(),
        })?;

        Ok(Self {
            external_reference_type,
            url,
            comment,
            hashes,
        })
    }
}

#[cfg(test)]
pub(crate) mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::spec::hash::test::{corresponding_hashes, example_hashes};
    use crate::xml::test::{read_element_from_string, write_element_to_string};

    pub(crate) fn example_external_references() -> ExternalReferences {
        ExternalReferences(vec![example_external_reference()])
    }

    pub(crate) fn corresponding_external_references(
    ) -> models::external_reference::ExternalReferences {
        models::external_reference::ExternalReferences(vec![corresponding_external_reference()])
    }

    pub(crate) fn example_external_reference() -> ExternalReference {
        ExternalReference {
            external_reference_type: "vcs".to_string(),
            url: "url".to_string(),
            comment: Some("comment".to_string()),
            hashes: Some(example_hashes()),
        }
    }

    pub(crate) fn corresponding_external_reference(
    ) -> models::external_reference::ExternalReference {
        models::external_reference::ExternalReference {
            external_reference_type: models::external_reference::ExternalReferenceType::Vcs,
            url: Uri::new_unchecked("url".to_string()),
            comment: Some("comment".to_string()),
            hashes: Some(corresponding_hashes()),
        }
    }

    #[test]
    fn it_should_round_trip_the_model_conversion() {
        let model: models::external_reference::ExternalReferences =
            example_external_references().into();
        assert_eq!(model, corresponding_external_references());
        let spec: ExternalReferences = model.into();
        assert_eq!(spec, example_external_references());
    }

    #[test]
    fn it_should_read_xml_full() {
        let input = r#"
<externalReferences>
  <reference type="vcs">
    <url>url</url>
    <comment>comment</comment>
    <hashes>
      <hash alg="SHA-256">hash value</hash>
    </hashes>
  </reference>
</externalReferences>
"#;
        let actual: ExternalReferences = read_element_from_string(input);
        let expected = example_external_references();
        assert_eq!(actual, expected);
    }

    #[test]
    fn it_should_write_then_read_back() {
        let xml_output = write_element_to_string(example_external_references());
        let actual: ExternalReferences = read_element_from_string(xml_output);
        assert_eq!(actual, example_external_references());
    }
}
