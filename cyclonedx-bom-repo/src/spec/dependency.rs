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

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use xml::reader;
use xml::writer::XmlEvent;

use crate::errors::{XmlReadError, XmlWriteError};
use crate::models;
use crate::xml::{
    attribute_or_error, read_lax_validation_tag, to_xml_read_error, to_xml_write_error,
    unexpected_element_error, write_close_tag, write_start_tag, FromXml, ToXml,
};

/// The wire form flattens the recursive dependency graph of the model into
/// one `(ref, dependsOn)` row per node, ordered by `ref`. A node reachable
/// through several parents collapses into a single row holding the union of
/// its direct dependencies; leaves only appear inside their parents' rows.
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub(crate) struct Dependencies(pub(crate) Vec<Dependency>);

impl From<models::dependency::Dependencies> for Dependencies {
    fn from(other: models::dependency::Dependencies) -> Self {
        let mut rows: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for dependency in &other.0 {
            collect_rows(dependency, &mut rows);
        }

        Self(
            rows.into_iter()
                .map(|(dependency_ref, depends_on)| Dependency {
                    dependency_ref,
                    depends_on: depends_on.into_iter().collect(),
                })
                .collect(),
        )
    }
}

fn collect_rows(
    node: &models::dependency::Dependency,
    rows: &mut BTreeMap<String, BTreeSet<String>>,
) {
    rows.entry(node.dependency_ref.clone()).or_default().extend(
        node.dependencies
            .iter()
            .map(|child| child.dependency_ref.clone()),
    );
    for child in &node.dependencies {
        if !child.dependencies.is_empty() {
            collect_rows(child, rows);
        }
    }
}

impl From<Dependencies> for models::dependency::Dependencies {
    fn from(other: Dependencies) -> Self {
        Self(other.0.into_iter().map(std::convert::Into::into).collect())
    }
}

const DEPENDENCIES_TAG: &str = "dependencies";

impl ToXml for Dependencies {
    fn write_xml_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
    ) -> Result<(), XmlWriteError> {
        write_start_tag(writer, DEPENDENCIES_TAG)?;

        for dependency in &self.0 {
            dependency.write_xml_element(writer)?;
        }

        write_close_tag(writer, DEPENDENCIES_TAG)?;

        Ok(())
    }
}

impl FromXml for Dependencies {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        _attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        let mut dependencies = Vec::new();
        let mut got_end_tag = false;
        while !got_end_tag {
            let next_element = event_reader
                .next()
                .map_err(to_xml_read_error(DEPENDENCIES_TAG))?;
            match next_element {
                reader::XmlEvent::StartElement {
                    name, attributes, ..
                } if name.local_name == DEPENDENCY_TAG => {
                    dependencies.push(Dependency::read_xml_element(
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
                unexpected => {
                    return Err(unexpected_element_error(DEPENDENCIES_TAG, unexpected))
                }
            }
        }
        Ok(Self(dependencies))
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Dependency {
    #[serde(rename = "ref")]
    pub(crate) dependency_ref: String,
    pub(crate) depends_on: Vec<String>,
}

impl From<Dependency> for models::dependency::Dependency {
    fn from(other: Dependency) -> Self {
        // A flat row only names its direct dependencies, so they come back
        // as leaves; the full graph shape is implied by the other rows.
        Self {
            dependency_ref: other.dependency_ref,
            dependencies: other.depends_on.into_iter().map(leaf).collect(),
        }
    }
}

fn leaf(dependency_ref: String) -> models::dependency::Dependency {
    models::dependency::Dependency {
        dependency_ref,
        dependencies: Vec::new(),
    }
}

const DEPENDENCY_TAG: &str = "dependency";
const REF_ATTR: &str = "ref";

impl ToXml for Dependency {
    fn write_xml_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
    ) -> Result<(), XmlWriteError> {
        writer
            .write(XmlEvent::start_element(DEPENDENCY_TAG).attr(REF_ATTR, &self.dependency_ref))
            .map_err(to_xml_write_error(DEPENDENCY_TAG))?;

        for depends_on in &self.depends_on {
            writer
                .write(XmlEvent::start_element(DEPENDENCY_TAG).attr(REF_ATTR, depends_on))
                .map_err(to_xml_write_error(DEPENDENCY_TAG))?;
            write_close_tag(writer, DEPENDENCY_TAG)?;
        }

        write_close_tag(writer, DEPENDENCY_TAG)?;

        Ok(())
    }
}

impl FromXml for Dependency {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        let dependency_ref = attribute_or_error(element_name, attributes, REF_ATTR)?;
        let mut depends_on = Vec::new();

        let mut got_end_tag = false;
        while !got_end_tag {
            let next_element = event_reader
                .next()
                .map_err(to_xml_read_error(DEPENDENCY_TAG))?;
            match next_element {
                reader::XmlEvent::StartElement {
                    name, attributes, ..
                } if name.local_name == DEPENDENCY_TAG => {
                    depends_on.push(attribute_or_error(&name, &attributes, REF_ATTR)?);
                    read_lax_validation_tag(event_reader, &name)?;
                }
                reader::XmlEvent::StartElement { name, .. } => {
                    read_lax_validation_tag(event_reader, &name)?
                }
                reader::XmlEvent::EndElement { name } if &name == element_name => {
                    got_end_tag = true;
                }
                reader::XmlEvent::Whitespace(_) | reader::XmlEvent::Characters(_) => (),
                unexpected => return Err(unexpected_element_error(DEPENDENCY_TAG, unexpected)),
            }
        }

        Ok(Self {
            dependency_ref,
            depends_on,
        })
    }
}

#[cfg(test)]
pub(crate) mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::xml::test::{read_element_from_string, write_element_to_string};

    pub(crate) fn example_dependencies() -> Dependencies {
        Dependencies(vec![Dependency {
            dependency_ref: "ref".to_string(),
            depends_on: vec!["depends on".to_string()],
        }])
    }

    pub(crate) fn corresponding_dependencies() -> models::dependency::Dependencies {
        models::dependency::Dependencies(vec![models::dependency::Dependency {
            dependency_ref: "ref".to_string(),
            dependencies: vec![models::dependency::Dependency {
                dependency_ref: "depends on".to_string(),
                dependencies: Vec::new(),
            }],
        }])
    }

    #[test]
    fn it_flattens_dependencies() {
        let actual: Dependencies = models::dependency::Dependencies(vec![
            models::dependency::Dependency {
                dependency_ref: "a".to_string(),
                dependencies: vec![
                    models::dependency::Dependency {
                        dependency_ref: "b".to_string(),
                        dependencies: Vec::new(),
                    },
                    models::dependency::Dependency {
                        dependency_ref: "c".to_string(),
                        dependencies: Vec::new(),
                    },
                ],
            },
        ])
        .into();

        let expected = Dependencies(vec![Dependency {
            dependency_ref: "a".to_string(),
            depends_on: vec!["b".to_string(), "c".to_string()],
        }]);

        assert_eq!(actual, expected);
    }

    #[test]
    fn it_merges_shared_children_when_flattening() {
        // "c" is nested under both parents; it must come out as one row,
        // not two.
        let shared = models::dependency::Dependency {
            dependency_ref: "c".to_string(),
            dependencies: vec![models::dependency::Dependency {
                dependency_ref: "d".to_string(),
                dependencies: Vec::new(),
            }],
        };
        let actual: Dependencies = models::dependency::Dependencies(vec![
            models::dependency::Dependency {
                dependency_ref: "a".to_string(),
                dependencies: vec![shared.clone()],
            },
            models::dependency::Dependency {
                dependency_ref: "b".to_string(),
                dependencies: vec![shared],
            },
        ])
        .into();

        let expected = Dependencies(vec![
            Dependency {
                dependency_ref: "a".to_string(),
                depends_on: vec!["c".to_string()],
            },
            Dependency {
                dependency_ref: "b".to_string(),
                depends_on: vec!["c".to_string()],
            },
            Dependency {
                dependency_ref: "c".to_string(),
                depends_on: vec!["d".to_string()],
            },
        ]);

        assert_eq!(actual, expected);
    }

    #[test]
    fn it_should_write_xml_full() {
        let xml_output = write_element_to_string(example_dependencies());
        assert_eq!(
            xml_output,
            r#"<?xml version="1.0" encoding="utf-8"?>
<dependencies>
  <dependency ref="ref">
    <dependency ref="depends on" />
  </dependency>
</dependencies>"#
        );
    }

    #[test]
    fn it_should_read_xml_full() {
        let input = r#"
<dependencies>
  <dependency ref="ref">
    <dependency ref="depends on" />
  </dependency>
</dependencies>
"#;
        let actual: Dependencies = read_element_from_string(input);
        let expected = example_dependencies();
        assert_eq!(actual, expected);
    }
}
