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
use crate::models;
use crate::utilities::convert_optional_vec;
use crate::xml::{
    attribute_or_error, read_lax_validation_list_tag, read_lax_validation_tag, read_simple_tag,
    to_xml_read_error, to_xml_write_error, unexpected_element_error, write_close_tag,
    write_simple_tag, write_start_tag, FromXml, ToXml,
};

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Compositions(pub(crate) Vec<Composition>);

impl From<models::composition::Compositions> for Compositions {
    fn from(other: models::composition::Compositions) -> Self {
        Self(other.0.into_iter().map(std::convert::Into::into).collect())
    }
}

impl From<Compositions> for models::composition::Compositions {
    fn from(other: Compositions) -> Self {
        Self(other.0.into_iter().map(std::convert::Into::into).collect())
    }
}

const COMPOSITIONS_TAG: &str = "compositions";

impl ToXml for Compositions {
    fn write_xml_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
    ) -> Result<(), XmlWriteError> {
        write_start_tag(writer, COMPOSITIONS_TAG)?;

        for composition in &self.0 {
            composition.write_xml_element(writer)?;
        }

        write_close_tag(writer, COMPOSITIONS_TAG)?;

        Ok(())
    }
}

impl FromXml for Compositions {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        _attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        read_lax_validation_list_tag(event_reader, element_name, COMPOSITION_TAG).map(Compositions)
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Composition {
    pub(crate) aggregate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) assemblies: Option<Vec<BomReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) dependencies: Option<Vec<BomReference>>,
}

impl From<models::composition::Composition> for Composition {
    fn from(other: models::composition::Composition) -> Self {
        Self {
            aggregate: other.aggregate.to_string(),
            assemblies: convert_optional_vec(other.assemblies),
            dependencies: convert_optional_vec(other.dependencies),
        }
    }
}

impl From<Composition> for models::composition::Composition {
    fn from(other: Composition) -> Self {
        Self {
            aggregate: models::composition::AggregateType::new_unchecked(other.aggregate),
            assemblies: convert_optional_vec(other.assemblies),
            dependencies: convert_optional_vec(other.dependencies),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(transparent)]
pub(crate) struct BomReference(pub(crate) String);

impl From<models::composition::BomReference> for BomReference {
    fn from(other: models::composition::BomReference) -> Self {
        Self(other.0)
    }
}

impl From<BomReference> for models::composition::BomReference {
    fn from(other: BomReference) -> Self {
        Self(other.0)
    }
}

const COMPOSITION_TAG: &str = "composition";
const AGGREGATE_TAG: &str = "aggregate";
const ASSEMBLIES_TAG: &str = "assemblies";
const ASSEMBLY_TAG: &str = "assembly";
const DEPENDENCIES_TAG: &str = "dependencies";
const DEPENDENCY_TAG: &str = "dependency";
const REF_ATTR: &str = "ref";

impl ToXml for Composition {
    fn write_xml_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
    ) -> Result<(), XmlWriteError> {
        write_start_tag(writer, COMPOSITION_TAG)?;

        write_simple_tag(writer, AGGREGATE_TAG, &self.aggregate)?;

        if let Some(assemblies) = &self.assemblies {
            write_start_tag(writer, ASSEMBLIES_TAG)?;
            for assembly in assemblies {
                writer
                    .write(XmlEvent::start_element(ASSEMBLY_TAG).attr(REF_ATTR, &assembly.0))
                    .map_err(to_xml_write_error(ASSEMBLY_TAG))?;
                write_close_tag(writer, ASSEMBLY_TAG)?;
            }
            write_close_tag(writer, ASSEMBLIES_TAG)?;
        }

        if let Some(dependencies) = &self.dependencies {
            write_start_tag(writer, DEPENDENCIES_TAG)?;
            for dependency in dependencies {
                writer
                    .write(XmlEvent::start_element(DEPENDENCY_TAG).attr(REF_ATTR, &dependency.0))
                    .map_err(to_xml_write_error(DEPENDENCY_TAG))?;
                write_close_tag(writer, DEPENDENCY_TAG)?;
            }
            write_close_tag(writer, DEPENDENCIES_TAG)?;
        }

        write_close_tag(writer, COMPOSITION_TAG)?;

        Ok(())
    }
}

impl FromXml for Composition {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        _attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        let mut aggregate: Option<String> = None;
        let mut assemblies: Option<Vec<BomReference>> = None;
        let mut dependencies: Option<Vec<BomReference>> = None;

        let mut got_end_tag = false;
        while !got_end_tag {
            let next_element = event_reader
                .next()
                .map_err(to_xml_read_error(COMPOSITION_TAG))?;
            match next_element {
                reader::XmlEvent::StartElement { name, .. }
                    if name.local_name == AGGREGATE_TAG =>
                {
                    aggregate = Some(read_simple_tag(event_reader, &name)?);
                }
                reader::XmlEvent::StartElement { name, .. }
                    if name.local_name == ASSEMBLIES_TAG =>
                {
                    assemblies = Some(read_bom_references(event_reader, &name, ASSEMBLY_TAG)?);
                }
                reader::XmlEvent::StartElement { name, .. }
                    if name.local_name == DEPENDENCIES_TAG =>
                {
                    dependencies = Some(read_bom_references(event_reader, &name, DEPENDENCY_TAG)?);
                }
                reader::XmlEvent::StartElement { name, .. } => {
                    read_lax_validation_tag(event_reader, &name)?
                }
                reader::XmlEvent::EndElement { name } if &name == element_name => {
                    got_end_tag = true;
                }
                reader::XmlEvent::Whitespace(_) | reader::XmlEvent::Characters(_) => (),
                unexpected => return Err(unexpected_element_error(COMPOSITION_TAG, unexpected)),
            }
        }

        let aggregate = aggregate.ok_or_else(|| XmlReadError::RequiredDataMissing {
            required_field: AGGREGATE_TAG.to_string(),
            element: COMPOSITION_TAG.to_string(),
        })?;

        Ok(Self {
            aggregate,
            assemblies,
            dependencies,
        })
    }
}

fn read_bom_references<R: std::io::Read>(
    event_reader: &mut xml::EventReader<R>,
    element_name: &xml::name::OwnedName,
    inner_tag: &str,
) -> Result<Vec<BomReference>, XmlReadError> {
    let mut references = Vec::new();
    let mut got_end_tag = false;
    while !got_end_tag {
        let next_element = event_reader
            .next()
            .map_err(to_xml_read_error(&element_name.local_name))?;
        match next_element {
            reader::XmlEvent::StartElement {
                name, attributes, ..
            } if name.local_name == inner_tag => {
                references.push(BomReference(attribute_or_error(
                    &name,
                    &attributes,
                    REF_ATTR,
                )?));
                read_lax_validation_tag(event_reader, &name)?;
            }
            reader::XmlEvent::StartElement { name, .. } => {
                read_lax_validation_tag(event_reader, &name)?
            }
            reader::XmlEvent::EndElement { name } if &name == element_name => {
                got_end_tag = true;
            }
            reader::XmlEvent::Whitespace(_) | reader::XmlEvent::Characters(_) => (),
            unexpected => {
                return Err(unexpected_element_error(&element_name.local_name, unexpected))
            }
        }
    }
    Ok(references)
}

#[cfg(test)]
pub(crate) mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::xml::test::{read_element_from_string, write_element_to_string};

    pub(crate) fn example_compositions() -> Compositions {
        Compositions(vec![Composition {
            aggregate: "complete".to_string(),
            assemblies: Some(vec![BomReference("assembly ref".to_string())]),
            dependencies: Some(vec![BomReference("dependency ref".to_string())]),
        }])
    }

    pub(crate) fn corresponding_compositions() -> models::composition::Compositions {
        models::composition::Compositions(vec![models::composition::Composition {
            aggregate: models::composition::AggregateType::Complete,
            assemblies: Some(vec![models::composition::BomReference(
                "assembly ref".to_string(),
            )]),
            dependencies: Some(vec![models::composition::BomReference(
                "dependency ref".to_string(),
            )]),
        }])
    }

    #[test]
    fn it_should_read_xml_full() {
        let input = r#"
<compositions>
  <composition>
    <aggregate>complete</aggregate>
    <assemblies>
      <assembly ref="assembly ref" />
    </assemblies>
    <dependencies>
      <dependency ref="dependency ref" />
    </dependencies>
  </composition>
</compositions>
"#;
        let actual: Compositions = read_element_from_string(input);
        let expected = example_compositions();
        assert_eq!(actual, expected);
    }

    #[test]
    fn it_should_write_then_read_back() {
        let xml_output = write_element_to_string(example_compositions());
        let actual: Compositions = read_element_from_string(xml_output);
        assert_eq!(actual, example_compositions());
    }
}
