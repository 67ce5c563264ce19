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
use crate::external_models::uri::Uri;
use crate::models;
use crate::xml::{
    read_lax_validation_tag, read_simple_tag, to_xml_read_error, unexpected_element_error,
    write_close_tag, write_simple_tag, write_start_tag, FromXml, ToXml,
};

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Licenses(pub(crate) Vec<LicenseChoice>);

impl From<models::license::Licenses> for Licenses {
    fn from(other: models::license::Licenses) -> Self {
        Self(other.0.into_iter().map(std::convert::Into::into).collect())
    }
}

impl From<Licenses> for models::license::Licenses {
    fn from(other: Licenses) -> Self {
        Self(other.0.into_iter().map(std::convert::Into::into).collect())
    }
}

const LICENSES_TAG: &str = "licenses";

impl ToXml for Licenses {
    fn write_xml_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
    ) -> Result<(), XmlWriteError> {
        write_start_tag(writer, LICENSES_TAG)?;

        for license in &self.0 {
            license.write_xml_element(writer)?;
        }

        write_close_tag(writer, LICENSES_TAG)?;

        Ok(())
    }
}

impl FromXml for Licenses {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        _attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        let mut licenses = Vec::new();

        let mut got_end_tag = false;
        while !got_end_tag {
            let next_element = event_reader
                .next()
                .map_err(to_xml_read_error(LICENSES_TAG))?;
            match next_element {
                reader::XmlEvent::StartElement {
                    name, attributes, ..
                } if name.local_name == LICENSE_TAG => {
                    licenses.push(LicenseChoice::License(LicenseHolder {
                        license: License::read_xml_element(event_reader, &name, &attributes)?,
                    }));
                }
                reader::XmlEvent::StartElement { name, .. }
                    if name.local_name == EXPRESSION_TAG =>
                {
                    licenses.push(LicenseChoice::Expression(ExpressionHolder {
                        expression: read_simple_tag(event_reader, &name)?,
                    }));
                }
                reader::XmlEvent::StartElement { name, .. } => {
                    read_lax_validation_tag(event_reader, &name)?
                }
                reader::XmlEvent::EndElement { name } if &name == element_name => {
                    got_end_tag = true;
                }
                reader::XmlEvent::Whitespace(_) | reader::XmlEvent::Characters(_) => (),
                unexpected => return Err(unexpected_element_error(LICENSES_TAG, unexpected)),
            }
        }

        Ok(Self(licenses))
    }
}

/// Licenses appear in documents either as a concrete license or as a single
/// SPDX expression covering several.
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", untagged)]
pub(crate) enum LicenseChoice {
    License(LicenseHolder),
    Expression(ExpressionHolder),
}

/// JSON wraps each license object in `{"license": {...}}`.
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub(crate) struct LicenseHolder {
    pub(crate) license: License,
}

/// JSON wraps each expression in `{"expression": "..."}`.
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub(crate) struct ExpressionHolder {
    pub(crate) expression: String,
}

impl From<models::license::LicenseChoice> for LicenseChoice {
    fn from(other: models::license::LicenseChoice) -> Self {
        match other {
            models::license::LicenseChoice::License(license) => {
                Self::License(LicenseHolder {
                    license: license.into(),
                })
            }
            models::license::LicenseChoice::Expression(expression) => {
                Self::Expression(ExpressionHolder {
                    expression: expression.to_string(),
                })
            }
        }
    }
}

impl From<LicenseChoice> for models::license::LicenseChoice {
    fn from(other: LicenseChoice) -> Self {
        match other {
            LicenseChoice::License(holder) => Self::License(holder.license.into()),
            LicenseChoice::Expression(holder) => {
                Self::Expression(NormalizedString::new_unchecked(holder.expression))
            }
        }
    }
}

const LICENSE_TAG: &str = "license";
const EXPRESSION_TAG: &str = "expression";

impl ToXml for LicenseChoice {
    fn write_xml_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
    ) -> Result<(), XmlWriteError> {
        match self {
            LicenseChoice::License(holder) => holder.license.write_xml_element(writer),
            LicenseChoice::Expression(holder) => {
                write_simple_tag(writer, EXPRESSION_TAG, &holder.expression)
            }
        }
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct License {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) url: Option<String>,
}

impl From<models::license::License> for License {
    fn from(other: models::license::License) -> Self {
        let (id, name) = match other.license_identifier {
            models::license::LicenseIdentifier::SpdxId(id) => (Some(id.to_string()), None),
            models::license::LicenseIdentifier::Name(name) => (None, Some(name.to_string())),
        };
        Self {
            id,
            name,
            url: other.url.map(|url| url.to_string()),
        }
    }
}

impl From<License> for models::license::License {
    fn from(other: License) -> Self {
        let license_identifier = match (other.id, other.name) {
            (Some(id), _) => {
                models::license::LicenseIdentifier::SpdxId(NormalizedString::new_unchecked(id))
            }
            (None, Some(name)) => {
                models::license::LicenseIdentifier::Name(NormalizedString::new_unchecked(name))
            }
            (None, None) => {
                models::license::LicenseIdentifier::Name(NormalizedString::default())
            }
        };
        Self {
            license_identifier,
            url: other.url.map(Uri::new_unchecked),
        }
    }
}

const ID_TAG: &str = "id";
const NAME_TAG: &str = "name";
const URL_TAG: &str = "url";

impl ToXml for License {
    fn write_xml_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
    ) -> Result<(), XmlWriteError> {
        write_start_tag(writer, LICENSE_TAG)?;

        if let Some(id) = &self.id {
            write_simple_tag(writer, ID_TAG, id)?;
        }

        if let Some(name) = &self.name {
            write_simple_tag(writer, NAME_TAG, name)?;
        }

        if let Some(url) = &self.url {
            write_simple_tag(writer, URL_TAG, url)?;
        }

        write_close_tag(writer, LICENSE_TAG)?;

        Ok(())
    }
}

impl FromXml for License {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        _attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        let mut id: Option<String> = None;
        let mut name: Option<String> = None;
        let mut url: Option<String> = None;

        let mut got_end_tag = false;
        while !got_end_tag {
            let next_element = event_reader
                .next()
                .map_err(to_xml_read_error(LICENSE_TAG))?;
            match next_element {
                reader::XmlEvent::StartElement { name: tag, .. } if tag.local_name == ID_TAG => {
                    id = Some(read_simple_tag(event_reader, &tag)?);
                }
                reader::XmlEvent::StartElement { name: tag, .. }
                    if tag.local_name == NAME_TAG =>
                {
                    name = Some(read_simple_tag(event_reader, &tag)?);
                }
                reader::XmlEvent::StartElement { name: tag, .. } if tag.local_name == URL_TAG => {
                    url = Some(read_simple_tag(event_reader, &tag)?);
                }
                reader::XmlEvent::StartElement { name: tag, .. } => {
                    read_lax_validation_tag(event_reader, &tag)?
                }
                reader::XmlEvent::EndElement { name: tag } if &tag == element_name => {
                    got_end_tag = true;
                }
                reader::XmlEvent::Whitespace(_) | reader::XmlEvent::Characters(_) => (),
                unexpected => return Err(unexpected_element_error(LICENSE_TAG, unexpected)),
            }
        }

        Ok(Self { id, name, url })
    }
}

#[cfg(test)]
pub(crate) mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::xml::test::{read_element_from_string, write_element_to_string};

    pub(crate) fn example_licenses() -> Licenses {
        Licenses(vec![
            LicenseChoice::License(LicenseHolder {
                license: License {
                    id: Some("Apache-2.0".to_string()),
                    name: None,
                    url: None,
                },
            }),
            LicenseChoice::Expression(ExpressionHolder {
                expression: "MIT OR Apache-2.0".to_string(),
            }),
        ])
    }

    pub(crate) fn corresponding_licenses() -> models::license::Licenses {
        models::license::Licenses(vec![
            models::license::LicenseChoice::License(models::license::License {
                license_identifier: models::license::LicenseIdentifier::SpdxId(
                    NormalizedString::new_unchecked("Apache-2.0".to_string()),
                ),
                url: None,
            }),
            models::license::LicenseChoice::Expression(NormalizedString::new_unchecked(
                "MIT OR Apache-2.0".to_string(),
            )),
        ])
    }

    #[test]
    fn it_should_serialize_licenses_to_json() {
        let actual = serde_json::to_value(example_licenses()).expect("Failed to serialize");
        let expected = serde_json::json!([
            {"license": {"id": "Apache-2.0"}},
            {"expression": "MIT OR Apache-2.0"}
        ]);
        assert_eq!(actual, expected);
    }

    #[test]
    fn it_should_read_xml_full() {
        let input = r#"
<licenses>
  <license>
    <id>Apache-2.0</id>
  </license>
  <expression>MIT OR Apache-2.0</expression>
</licenses>
"#;
        let actual: Licenses = read_element_from_string(input);
        let expected = example_licenses();
        assert_eq!(actual, expected);
    }

    #[test]
    fn it_should_write_then_read_back() {
        let xml_output = write_element_to_string(example_licenses());
        let actual: Licenses = read_element_from_string(xml_output);
        assert_eq!(actual, example_licenses());
    }
}
