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
use xml::writer::XmlEvent;

use crate::errors::{XmlReadError, XmlWriteError};
use crate::models;
use crate::xml::{
    attribute_or_error, read_lax_validation_list_tag, read_simple_tag, to_xml_write_error,
    write_close_tag, FromXml, ToXml,
};

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Hashes(pub(crate) Vec<Hash>);

impl From<models::hash::Hashes> for Hashes {
    fn from(other: models::hash::Hashes) -> Self {
        Self(other.0.into_iter().map(std::convert::Into::into).collect())
    }
}

impl From<Hashes> for models::hash::Hashes {
    fn from(other: Hashes) -> Self {
        Self(other.0.into_iter().map(std::convert::Into::into).collect())
    }
}

const HASHES_TAG: &str = "hashes";

impl ToXml for Hashes {
    fn write_xml_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
    ) -> Result<(), XmlWriteError> {
        writer
            .write(XmlEvent::start_element(HASHES_TAG))
            .map_err(to_xml_write_error(HASHES_TAG))?;

        for hash in &self.0 {
            hash.write_xml_element(writer)?;
        }

        write_close_tag(writer, HASHES_TAG)?;

        Ok(())
    }
}

impl FromXml for Hashes {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        _attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        read_lax_validation_list_tag(event_reader, element_name, HASH_TAG).map(Hashes)
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Hash {
    pub(crate) alg: String,
    pub(crate) content: HashValue,
}

impl From<models::hash::Hash> for Hash {
    fn from(other: models::hash::Hash) -> Self {
        Self {
            alg: other.alg.to_string(),
            content: other.content.into(),
        }
    }
}

impl From<Hash> for models::hash::Hash {
    fn from(other: Hash) -> Self {
        Self {
            alg: models::hash::HashAlgorithm::new_unchecked(other.alg),
            content: other.content.into(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(transparent)]
pub(crate) struct HashValue(pub(crate) String);

impl From<models::hash::HashValue> for HashValue {
    fn from(other: models::hash::HashValue) -> Self {
        Self(other.0)
    }
}

impl From<HashValue> for models::hash::HashValue {
    fn from(other: HashValue) -> Self {
        Self(other.0)
    }
}

const HASH_TAG: &str = "hash";
const ALG_ATTR: &str = "alg";

impl ToXml for Hash {
    fn write_xml_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
    ) -> Result<(), XmlWriteError> {
        writer
            .write(XmlEvent::start_element(HASH_TAG).attr(ALG_ATTR, &self.alg))
            .map_err(to_xml_write_error(HASH_TAG))?;

        writer
            .write(XmlEvent::characters(&self.content.0))
            .map_err(to_xml_write_error(HASH_TAG))?;

        write_close_tag(writer, HASH_TAG)?;

        Ok(())
    }
}

impl FromXml for Hash {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        let alg = attribute_or_error(element_name, attributes, ALG_ATTR)?;
        let content = read_simple_tag(event_reader, element_name)?;
        Ok(Self {
            alg,
            content: HashValue(content),
        })
    }
}

#[cfg(test)]
pub(crate) mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::xml::test::{read_element_from_string, write_element_to_string};

    pub(crate) fn example_hashes() -> Hashes {
        Hashes(vec![example_hash()])
    }

    pub(crate) fn corresponding_hashes() -> models::hash::Hashes {
        models::hash::Hashes(vec![corresponding_hash()])
    }

    pub(crate) fn example_hash() -> Hash {
        Hash {
            alg: "SHA-256".to_string(),
            content: HashValue("hash value".to_string()),
        }
    }

    pub(crate) fn corresponding_hash() -> models::hash::Hash {
        models::hash::Hash {
            alg: models::hash::HashAlgorithm::SHA256,
            content: models::hash::HashValue("hash value".to_string()),
        }
    }

    #[test]
    fn it_should_write_xml_full() {
        let xml_output = write_element_to_string(example_hashes());
        assert_eq!(
            xml_output,
            r#"<?xml version="1.0" encoding="utf-8"?>
<hashes>
  <hash alg="SHA-256">hash value</hash>
</hashes>"#
        );
    }

    #[test]
    fn it_should_read_xml_full() {
        let input = r#"
<hashes>
  <hash alg="SHA-256">hash value</hash>
</hashes>
"#;
        let actual: Hashes = read_element_from_string(input);
        let expected = example_hashes();
        assert_eq!(actual, expected);
    }
}
