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
use crate::external_models::date_time::DateTime;
use crate::external_models::normalized_string::NormalizedString;
use crate::external_models::uri::Uri;
use crate::models;
use crate::utilities::convert_optional;
use crate::xml::{
    optional_attribute, read_lax_validation_list_tag, read_lax_validation_tag, read_simple_tag,
    to_xml_read_error, to_xml_write_error, unexpected_element_error, write_close_tag,
    write_simple_tag, write_start_tag, FromXml, FromXmlType, ToXml,
};

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Vulnerabilities(pub(crate) Vec<Vulnerability>);

impl From<models::vulnerability::Vulnerabilities> for Vulnerabilities {
    fn from(other: models::vulnerability::Vulnerabilities) -> Self {
        Self(other.0.into_iter().map(std::convert::Into::into).collect())
    }
}

impl From<Vulnerabilities> for models::vulnerability::Vulnerabilities {
    fn from(other: Vulnerabilities) -> Self {
        Self(other.0.into_iter().map(std::convert::Into::into).collect())
    }
}

const VULNERABILITIES_TAG: &str = "vulnerabilities";

impl ToXml for Vulnerabilities {
    fn write_xml_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
    ) -> Result<(), XmlWriteError> {
        write_start_tag(writer, VULNERABILITIES_TAG)?;

        for vulnerability in &self.0 {
            vulnerability.write_xml_element(writer)?;
        }

        write_close_tag(writer, VULNERABILITIES_TAG)?;

        Ok(())
    }
}

impl FromXml for Vulnerabilities {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        _attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        read_lax_validation_list_tag(event_reader, element_name, VULNERABILITY_TAG)
            .map(Vulnerabilities)
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Vulnerability {
    #[serde(rename = "bom-ref", skip_serializing_if = "Option::is_none")]
    pub(crate) bom_ref: Option<String>,
    pub(crate) id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) source: Option<VulnerabilitySource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) ratings: Option<Vec<Rating>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) cwes: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) recommendation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) affects: Option<Vec<Target>>,
}

impl From<models::vulnerability::Vulnerability> for Vulnerability {
    fn from(other: models::vulnerability::Vulnerability) -> Self {
        Self {
            bom_ref: other.bom_ref,
            id: other.id.to_string(),
            source: convert_optional(other.source),
            ratings: other
                .ratings
                .map(|ratings| ratings.into_iter().map(std::convert::Into::into).collect()),
            cwes: other.cwes,
            description: other.description.map(|description| description.to_string()),
            recommendation: other
                .recommendation
                .map(|recommendation| recommendation.to_string()),
            published: other.published.map(|published| published.to_string()),
            updated: other.updated.map(|updated| updated.to_string()),
            affects: other
                .affects
                .map(|affects| affects.into_iter().map(std::convert::Into::into).collect()),
        }
    }
}

impl From<Vulnerability> for models::vulnerability::Vulnerability {
    fn from(other: Vulnerability) -> Self {
        Self {
            bom_ref: other.bom_ref,
            id: NormalizedString::new_unchecked(other.id),
            source: convert_optional(other.source),
            ratings: other
                .ratings
                .map(|ratings| ratings.into_iter().map(std::convert::Into::into).collect()),
            cwes: other.cwes,
            description: other.description.map(NormalizedString::new_unchecked),
            recommendation: other.recommendation.map(NormalizedString::new_unchecked),
            published: other.published.map(DateTime::new_unchecked),
            updated: other.updated.map(DateTime::new_unchecked),
            affects: other
                .affects
                .map(|affects| affects.into_iter().map(std::convert::Into::into).collect()),
        }
    }
}

const VULNERABILITY_TAG: &str = "vulnerability";
const BOM_REF_ATTR: &str = "bom-ref";
const ID_TAG: &str = "id";
const SOURCE_TAG: &str = "source";
const NAME_TAG: &str = "name";
const URL_TAG: &str = "url";
const RATINGS_TAG: &str = "ratings";
const RATING_TAG: &str = "rating";
const SCORE_TAG: &str = "score";
const SEVERITY_TAG: &str = "severity";
const METHOD_TAG: &str = "method";
const VECTOR_TAG: &str = "vector";
const CWES_TAG: &str = "cwes";
const CWE_TAG: &str = "cwe";
const DESCRIPTION_TAG: &str = "description";
const RECOMMENDATION_TAG: &str = "recommendation";
const PUBLISHED_TAG: &str = "published";
const UPDATED_TAG: &str = "updated";
const AFFECTS_TAG: &str = "affects";
const TARGET_TAG: &str = "target";
const REF_TAG: &str = "ref";

impl ToXml for Vulnerability {
    fn write_xml_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
    ) -> Result<(), XmlWriteError> {
        let mut vulnerability_start_element = XmlEvent::start_element(VULNERABILITY_TAG);
        if let Some(bom_ref) = &self.bom_ref {
            vulnerability_start_element = vulnerability_start_element.attr(BOM_REF_ATTR, bom_ref);
        }
        writer
            .write(vulnerability_start_element)
            .map_err(to_xml_write_error(VULNERABILITY_TAG))?;

        write_simple_tag(writer, ID_TAG, &self.id)?;

        if let Some(source) = &self.source {
            source.write_xml_element(writer)?;
        }

        if let Some(ratings) = &self.ratings {
            write_start_tag(writer, RATINGS_TAG)?;
            for rating in ratings {
                rating.write_xml_element(writer)?;
            }
            write_close_tag(writer, RATINGS_TAG)?;
        }

        if let Some(cwes) = &self.cwes {
            write_start_tag(writer, CWES_TAG)?;
            for cwe in cwes {
                write_simple_tag(writer, CWE_TAG, &cwe.to_string())?;
            }
            write_close_tag(writer, CWES_TAG)?;
        }

        if let Some(description) = &self.description {
            write_simple_tag(writer, DESCRIPTION_TAG, description)?;
        }

        if let Some(recommendation) = &self.recommendation {
            write_simple_tag(writer, RECOMMENDATION_TAG, recommendation)?;
        }

        if let Some(published) = &self.published {
            write_simple_tag(writer, PUBLISHED_TAG, published)?;
        }

        if let Some(updated) = &self.updated {
            write_simple_tag(writer, UPDATED_TAG, updated)?;
        }

        if let Some(affects) = &self.affects {
            write_start_tag(writer, AFFECTS_TAG)?;
            for target in affects {
                target.write_xml_element(writer)?;
            }
            write_close_tag(writer, AFFECTS_TAG)?;
        }

        write_close_tag(writer, VULNERABILITY_TAG)?;

        Ok(())
    }
}

impl FromXml for Vulnerability {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        let bom_ref = optional_attribute(attributes, BOM_REF_ATTR);
        let mut id: Option<String> = None;
        let mut source: Option<VulnerabilitySource> = None;
        let mut ratings: Option<Vec<Rating>> = None;
        let mut cwes: Option<Vec<u32>> = None;
        let mut description: Option<String> = None;
        let mut recommendation: Option<String> = None;
        let mut published: Option<String> = None;
        let mut updated: Option<String> = None;
        let mut affects: Option<Vec<Target>> = None;

        let mut got_end_tag = false;
        while !got_end_tag {
            let next_element = event_reader
                .next()
                .map_err(to_xml_read_error(VULNERABILITY_TAG))?;
            match next_element {
                reader::XmlEvent::StartElement { name, .. } if name.local_name == ID_TAG => {
                    id = Some(read_simple_tag(event_reader, &name)?);
                }
                reader::XmlEvent::StartElement {
                    name, attributes, ..
                } if name.local_name == SOURCE_TAG => {
                    source = Some(VulnerabilitySource::read_xml_element(
                        event_reader,
                        &name,
                        &attributes,
                    )?);
                }
                reader::XmlEvent::StartElement { name, .. } if name.local_name == RATINGS_TAG => {
                    ratings = Some(read_lax_validation_list_tag(
                        event_reader,
                        &name,
                        RATING_TAG,
                    )?);
                }
                reader::XmlEvent::StartElement { name, .. } if name.local_name == CWES_TAG => {
                    cwes = Some(read_cwes(event_reader, &name)?);
                }
                reader::XmlEvent::StartElement { name, .. }
                    if name.local_name == DESCRIPTION_TAG =>
                {
                    description = Some(read_simple_tag(event_reader, &name)?);
                }
                reader::XmlEvent::StartElement { name, .. }
                    if name.local_name == RECOMMENDATION_TAG =>
                {
                    recommendation = Some(read_simple_tag(event_reader, &name)?);
                }
                reader::XmlEvent::StartElement { name, .. }
                    if name.local_name == PUBLISHED_TAG =>
                {
                    published = Some(read_simple_tag(event_reader, &name)?);
                }
                reader::XmlEvent::StartElement { name, .. } if name.local_name == UPDATED_TAG => {
                    updated = Some(read_simple_tag(event_reader, &name)?);
                }
                reader::XmlEvent::StartElement { name, .. } if name.local_name == AFFECTS_TAG => {
                    affects = Some(read_lax_validation_list_tag(
                        event_reader,
                        &name,
                        TARGET_TAG,
                    )?);
                }
                reader::XmlEvent::StartElement { name, .. } => {
                    read_lax_validation_tag(event_reader, &name)?
                }
                reader::XmlEvent::EndElement { name } if &name == element_name => {
                    got_end_tag = true;
                }
                reader::XmlEvent::Whitespace(_) | reader::XmlEvent::Characters(_) => (),
                unexpected => return Err(unexpected_element_error(VULNERABILITY_TAG, unexpected)),
            }
        }

        let id = id.ok_or_else(|| XmlReadError::RequiredDataMissing {
            required_field: ID_TAG.to_string(),
            element: VULNERABILITY_TAG.to_string(),
        })?;

        Ok(Self {
            bom_ref,
            id,
            source,
            ratings,
            cwes,
            description,
            recommendation,
            published,
            updated,
            affects,
        })
    }
}

fn read_cwes<R: std::io::Read>(
    event_reader: &mut xml::EventReader<R>,
    element_name: &xml::name::OwnedName,
) -> Result<Vec<u32>, XmlReadError> {
    let mut cwes = Vec::new();
    let mut got_end_tag = false;
    while !got_end_tag {
        let next_element = event_reader.next().map_err(to_xml_read_error(CWES_TAG))?;
        match next_element {
            reader::XmlEvent::StartElement { name, .. } if name.local_name == CWE_TAG => {
                let value = read_simple_tag(event_reader, &name)?;
                cwes.push(u32::from_xml_value(CWE_TAG, value)?);
            }
            reader::XmlEvent::StartElement { name, .. } => {
                read_lax_validation_tag(event_reader, &name)?
            }
            reader::XmlEvent::EndElement { name } if &name == element_name => {
                got_end_tag = true;
            }
            reader::XmlEvent::Whitespace(_) | reader::XmlEvent::Characters(_) => (),
            unexpected => return Err(unexpected_element_error(CWES_TAG, unexpected)),
        }
    }
    Ok(cwes)
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VulnerabilitySource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) url: Option<String>,
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

impl ToXml for VulnerabilitySource {
    fn write_xml_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
    ) -> Result<(), XmlWriteError> {
        write_start_tag(writer, SOURCE_TAG)?;

        if let Some(name) = &self.name {
            write_simple_tag(writer, NAME_TAG, name)?;
        }

        if let Some(url) = &self.url {
            write_simple_tag(writer, URL_TAG, url)?;
        }

        write_close_tag(writer, SOURCE_TAG)?;

        Ok(())
    }
}

impl FromXml for VulnerabilitySource {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        _attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        let mut name: Option<String> = None;
        let mut url: Option<String> = None;

        let mut got_end_tag = false;
        while !got_end_tag {
            let next_element = event_reader
                .next()
                .map_err(to_xml_read_error(SOURCE_TAG))?;
            match next_element {
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
                unexpected => return Err(unexpected_element_error(SOURCE_TAG, unexpected)),
            }
        }

        Ok(Self { name, url })
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Rating {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) source: Option<VulnerabilitySource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) vector: Option<String>,
}

impl From<models::vulnerability::VulnerabilityRating> for Rating {
    fn from(other: models::vulnerability::VulnerabilityRating) -> Self {
        Self {
            source: convert_optional(other.source),
            score: other.score,
            severity: other.severity.map(|severity| severity.to_string()),
            method: other.method.map(|method| method.to_string()),
            vector: other.vector.map(|vector| vector.to_string()),
        }
    }
}

impl From<Rating> for models::vulnerability::VulnerabilityRating {
    fn from(other: Rating) -> Self {
        Self {
            source: convert_optional(other.source),
            score: other.score,
            severity: other
                .severity
                .map(models::vulnerability::Severity::new_unchecked),
            method: other.method.map(NormalizedString::new_unchecked),
            vector: other.vector.map(NormalizedString::new_unchecked),
        }
    }
}

impl ToXml for Rating {
    fn write_xml_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
    ) -> Result<(), XmlWriteError> {
        write_start_tag(writer, RATING_TAG)?;

        if let Some(source) = &self.source {
            source.write_xml_element(writer)?;
        }

        if let Some(score) = &self.score {
            write_simple_tag(writer, SCORE_TAG, &score.to_string())?;
        }

        if let Some(severity) = &self.severity {
            write_simple_tag(writer, SEVERITY_TAG, severity)?;
        }

        if let Some(method) = &self.method {
            write_simple_tag(writer, METHOD_TAG, method)?;
        }

        if let Some(vector) = &self.vector {
            write_simple_tag(writer, VECTOR_TAG, vector)?;
        }

        write_close_tag(writer, RATING_TAG)?;

        Ok(())
    }
}

impl FromXml for Rating {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        _attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        let mut source: Option<VulnerabilitySource> = None;
        let mut score: Option<f64> = None;
        let mut severity: Option<String> = None;
        let mut method: Option<String> = None;
        let mut vector: Option<String> = None;

        let mut got_end_tag = false;
        while !got_end_tag {
            let next_element = event_reader
                .next()
                .map_err(to_xml_read_error(RATING_TAG))?;
            match next_element {
                reader::XmlEvent::StartElement {
                    name, attributes, ..
                } if name.local_name == SOURCE_TAG => {
                    source = Some(VulnerabilitySource::read_xml_element(
                        event_reader,
                        &name,
                        &attributes,
                    )?);
                }
                reader::XmlEvent::StartElement { name, .. } if name.local_name == SCORE_TAG => {
                    let value = read_simple_tag(event_reader, &name)?;
                    score = Some(f64::from_xml_value(SCORE_TAG, value)?);
                }
                reader::XmlEvent::StartElement { name, .. } if name.local_name == SEVERITY_TAG => {
                    severity = Some(read_simple_tag(event_reader, &name)?);
                }
                reader::XmlEvent::StartElement { name, .. } if name.local_name == METHOD_TAG => {
                    method = Some(read_simple_tag(event_reader, &name)?);
                }
                reader::XmlEvent::StartElement { name, .. } if name.local_name == VECTOR_TAG => {
                    vector = Some(read_simple_tag(event_reader, &name)?);
                }
                reader::XmlEvent::StartElement { name, .. } => {
                    read_lax_validation_tag(event_reader, &name)?
                }
                reader::XmlEvent::EndElement { name } if &name == element_name => {
                    got_end_tag = true;
                }
                reader::XmlEvent::Whitespace(_) | reader::XmlEvent::Characters(_) => (),
                unexpected => return Err(unexpected_element_error(RATING_TAG, unexpected)),
            }
        }

        Ok(Self {
            source,
            score,
            severity,
            method,
            vector,
        })
    }
}

/// A `bom-ref` affected by a vulnerability. XML nests it in
/// `<affects><target><ref>`, JSON flattens it to `{"ref": ...}`.
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Target {
    #[serde(rename = "ref")]
    pub(crate) dependency_ref: String,
}

impl From<models::vulnerability::VulnerabilityTarget> for Target {
    fn from(other: models::vulnerability::VulnerabilityTarget) -> Self {
        Self {
            dependency_ref: other.dependency_ref,
        }
    }
}

impl From<Target> for models::vulnerability::VulnerabilityTarget {
    fn from(other: Target) -> Self {
        Self {
            dependency_ref: other.dependency_ref,
        }
    }
}

impl ToXml for Target {
    fn write_xml_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
    ) -> Result<(), XmlWriteError> {
        write_start_tag(writer, TARGET_TAG)?;
        write_simple_tag(writer, REF_TAG, &self.dependency_ref)?;
        write_close_tag(writer, TARGET_TAG)?;
        Ok(())
    }
}

impl FromXml for Target {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        _attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        let mut dependency_ref: Option<String> = None;

        let mut got_end_tag = false;
        while !got_end_tag {
            let next_element = event_reader
                .next()
                .map_err(to_xml_read_error(TARGET_TAG))?;
            match next_element {
                reader::XmlEvent::StartElement { name, .. } if name.local_name == REF_TAG => {
                    dependency_ref = Some(read_simple_tag(event_reader, &name)?);
                }
                reader::XmlEvent::StartElement { name, .. } => {
                    read_lax_validation_tag(event_reader, &name)?
                }
                reader::XmlEvent::EndElement { name } if &name == element_name => {
                    got_end_tag = true;
                }
                reader::XmlEvent::Whitespace(_) | reader::XmlEvent::Characters(_) => (),
                unexpected => return Err(unexpected_element_error(TARGET_TAG, unexpected)),
            }
        }

        let dependency_ref = dependency_ref.ok_or_else(|| XmlReadError::RequiredDataMissing {
            required_field: REF_TAG.to_string(),
            element: TARGET_TAG.to_string(),
        })?;

        Ok(Self { dependency_ref })
    }
}

#[cfg(test)]
pub(crate) mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::xml::test::{read_element_from_string, write_element_to_string};

    pub(crate) fn example_vulnerabilities() -> Vulnerabilities {
        Vulnerabilities(vec![Vulnerability {
            bom_ref: None,
            id: "CVE-2024-0001".to_string(),
            source: Some(VulnerabilitySource {
                name: Some("NVD".to_string()),
                url: Some("https://nvd.nist.gov".to_string()),
            }),
            ratings: Some(vec![Rating {
                source: None,
                score: Some(9.8),
                severity: Some("critical".to_string()),
                method: Some("CVSSv31".to_string()),
                vector: Some("vector".to_string()),
            }]),
            cwes: Some(vec![79]),
            description: Some("description".to_string()),
            recommendation: Some("recommendation".to_string()),
            published: Some("1970-01-01T00:00:00Z".to_string()),
            updated: None,
            affects: Some(vec![Target {
                dependency_ref: "dependency".to_string(),
            }]),
        }])
    }

    pub(crate) fn corresponding_vulnerabilities() -> models::vulnerability::Vulnerabilities {
        models::vulnerability::Vulnerabilities(vec![models::vulnerability::Vulnerability {
            bom_ref: None,
            id: NormalizedString::new_unchecked("CVE-2024-0001".to_string()),
            source: Some(models::vulnerability::VulnerabilitySource {
                name: Some(NormalizedString::new_unchecked("NVD".to_string())),
                url: Some(Uri::new_unchecked("https://nvd.nist.gov".to_string())),
            }),
            ratings: Some(vec![models::vulnerability::VulnerabilityRating {
                source: None,
                score: Some(9.8),
                severity: Some(models::vulnerability::Severity::Critical),
                method: Some(NormalizedString::new_unchecked("CVSSv31".to_string())),
                vector: Some(NormalizedString::new_unchecked("vector".to_string())),
            }]),
            cwes: Some(vec![79]),
            description: Some(NormalizedString::new_unchecked("description".to_string())),
            recommendation: Some(NormalizedString::new_unchecked(
                "recommendation".to_string(),
            )),
            published: Some(DateTime::new_unchecked("1970-01-01T00:00:00Z".to_string())),
            updated: None,
            affects: Some(vec![models::vulnerability::VulnerabilityTarget {
                dependency_ref: "dependency".to_string(),
            }]),
        }])
    }

    #[test]
    fn it_should_round_trip_the_model_conversion() {
        let model: models::vulnerability::Vulnerabilities = example_vulnerabilities().into();
        assert_eq!(model, corresponding_vulnerabilities());
        let spec: Vulnerabilities = model.into();
        assert_eq!(spec, example_vulnerabilities());
    }

    #[test]
    fn it_should_read_xml_full() {
        let input = r#"
<vulnerabilities>
  <vulnerability>
    <id>CVE-2024-0001</id>
    <source>
      <name>NVD</name>
      <url>https://nvd.nist.gov</url>
    </source>
    <ratings>
      <rating>
        <score>9.8</score>
        <severity>critical</severity>
        <method>CVSSv31</method>
        <vector>vector</vector>
      </rating>
    </ratings>
    <cwes>
      <cwe>79</cwe>
    </cwes>
    <description>description</description>
    <recommendation>recommendation</recommendation>
    <published>1970-01-01T00:00:00Z</published>
    <affects>
      <target>
        <ref>dependency</ref>
      </target>
    </affects>
  </vulnerability>
</vulnerabilities>
"#;
        let actual: Vulnerabilities = read_element_from_string(input);
        let expected = example_vulnerabilities();
        assert_eq!(actual, expected);
    }

    #[test]
    fn it_should_write_then_read_back() {
        let xml_output = write_element_to_string(example_vulnerabilities());
        let actual: Vulnerabilities = read_element_from_string(xml_output);
        assert_eq!(actual, example_vulnerabilities());
    }
}
