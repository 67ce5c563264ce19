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
    write_close_tag, write_simple_tag, write_start_tag, FromXml, ToInnerXml,
};

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrganizationalEntity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) url: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) contact: Option<Vec<OrganizationalContact>>,
}

impl From<models::organization::OrganizationalEntity> for OrganizationalEntity {
    fn from(other: models::organization::OrganizationalEntity) -> Self {
        Self {
            name: other.name.map(|name| name.to_string()),
            url: other
                .url
                .map(|urls| urls.into_iter().map(|url| url.to_string()).collect()),
            contact: other
                .contact
                .map(|contacts| contacts.into_iter().map(std::convert::Into::into).collect()),
        }
    }
}

impl From<OrganizationalEntity> for models::organization::OrganizationalEntity {
    fn from(other: OrganizationalEntity) -> Self {
        Self {
            name: other.name.map(NormalizedString::new_unchecked),
            url: other
                .url
                .map(|urls| urls.into_iter().map(Uri::new_unchecked).collect()),
            contact: other
                .contact
                .map(|contacts| contacts.into_iter().map(std::convert::Into::into).collect()),
        }
    }
}

const NAME_TAG: &str = "name";
const URL_TAG: &str = "url";
const CONTACT_TAG: &str = "contact";

impl ToInnerXml for OrganizationalEntity {
    fn write_xml_named_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
        tag: &str,
    ) -> Result<(), XmlWriteError> {
        write_start_tag(writer, tag)?;

        if let Some(name) = &self.name {
            write_simple_tag(writer, NAME_TAG, name)?;
        }

        if let Some(urls) = &self.url {
            for url in urls {
                write_simple_tag(writer, URL_TAG, url)?;
            }
        }

        if let Some(contacts) = &self.contact {
            for contact in contacts {
                contact.write_xml_named_element(writer, CONTACT_TAG)?;
            }
        }

        write_close_tag(writer, tag)?;

        Ok(())
    }
}

impl FromXml for OrganizationalEntity {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        _attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        let mut name: Option<String> = None;
        let mut urls: Vec<String> = Vec::new();
        let mut contacts: Vec<OrganizationalContact> = Vec::new();

        let mut got_end_tag = false;
        while !got_end_tag {
            let next_element = event_reader
                .next()
                .map_err(to_xml_read_error(&element_name.local_name))?;
            match next_element {
                reader::XmlEvent::StartElement { name: tag, .. }
                    if tag.local_name == NAME_TAG =>
                {
                    name = Some(read_simple_tag(event_reader, &tag)?);
                }
                reader::XmlEvent::StartElement { name: tag, .. } if tag.local_name == URL_TAG => {
                    urls.push(read_simple_tag(event_reader, &tag)?);
                }
                reader::XmlEvent::StartElement {
                    name: tag,
                    attributes,
                    ..
                } if tag.local_name == CONTACT_TAG => {
                    contacts.push(OrganizationalContact::read_xml_element(
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
                unexpected => {
                    return Err(unexpected_element_error(&element_name.local_name, unexpected))
                }
            }
        }

        Ok(Self {
            name,
            url: (!urls.is_empty()).then_some(urls),
            contact: (!contacts.is_empty()).then_some(contacts),
        })
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrganizationalContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) phone: Option<String>,
}

impl From<models::organization::OrganizationalContact> for OrganizationalContact {
    fn from(other: models::organization::OrganizationalContact) -> Self {
        Self {
            name: other.name.map(|name| name.to_string()),
            email: other.email.map(|email| email.to_string()),
            phone: other.phone.map(|phone| phone.to_string()),
        }
    }
}

impl From<OrganizationalContact> for models::organization::OrganizationalContact {
    fn from(other: OrganizationalContact) -> Self {
        Self {
            name: other.name.map(NormalizedString::new_unchecked),
            email: other.email.map(NormalizedString::new_unchecked),
            phone: other.phone.map(NormalizedString::new_unchecked),
        }
    }
}

const EMAIL_TAG: &str = "email";
const PHONE_TAG: &str = "phone";

impl ToInnerXml for OrganizationalContact {
    fn write_xml_named_element<W: std::io::Write>(
        &self,
        writer: &mut xml::EventWriter<W>,
        tag: &str,
    ) -> Result<(), XmlWriteError> {
        write_start_tag(writer, tag)?;

        if let Some(name) = &self.name {
            write_simple_tag(writer, NAME_TAG, name)?;
        }

        if let Some(email) = &self.email {
            write_simple_tag(writer, EMAIL_TAG, email)?;
        }

        if let Some(phone) = &self.phone {
            write_simple_tag(writer, PHONE_TAG, phone)?;
        }

        write_close_tag(writer, tag)?;

        Ok(())
    }
}

impl FromXml for OrganizationalContact {
    fn read_xml_element<R: std::io::Read>(
        event_reader: &mut xml::EventReader<R>,
        element_name: &xml::name::OwnedName,
        _attributes: &[xml::attribute::OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized,
    {
        let mut name: Option<String> = None;
        let mut email: Option<String> = None;
        let mut phone: Option<String> = None;

        let mut got_end_tag = false;
        while !got_end_tag {
            let next_element = event_reader
                .next()
                .map_err(to_xml_read_error(&element_name.local_name))?;
            match next_element {
                reader::XmlEvent::StartElement { name: tag, .. }
                    if tag.local_name == NAME_TAG =>
                {
                    name = Some(read_simple_tag(event_reader, &tag)?);
                }
                reader::XmlEvent::StartElement { name: tag, .. }
                    if tag.local_name == EMAIL_TAG =>
                {
                    email = Some(read_simple_tag(event_reader, &tag)?);
                }
                reader::XmlEvent::StartElement { name: tag, .. }
                    if tag.local_name == PHONE_TAG =>
                {
                    phone = Some(read_simple_tag(event_reader, &tag)?);
                }
                reader::XmlEvent::StartElement { name: tag, .. } => {
                    read_lax_validation_tag(event_reader, &tag)?
                }
                reader::XmlEvent::EndElement { name: tag } if &tag == element_name => {
                    got_end_tag = true;
                }
                reader::XmlEvent::Whitespace(_) | reader::XmlEvent::Characters(_) => (),
                unexpected => {
                    return Err(unexpected_element_error(&element_name.local_name, unexpected))
                }
            }
        }

        Ok(Self { name, email, phone })
    }
}
