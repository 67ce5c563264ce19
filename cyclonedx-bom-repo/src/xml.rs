use std::io::{Read, Write};

use xml::attribute::OwnedAttribute;
use xml::name::OwnedName;
use xml::namespace::Namespace;
use xml::reader::{self, EventReader};
use xml::writer::{EventWriter, XmlEvent};

use crate::errors::{XmlReadError, XmlWriteError};
use crate::models::bom::SpecVersion;

pub(crate) trait ToXmlDocument {
    fn write_xml_document<W: Write>(
        &self,
        writer: &mut EventWriter<W>,
    ) -> Result<(), XmlWriteError>;
}

pub(crate) trait FromXmlDocument {
    fn read_xml_document<R: Read>(
        event_reader: &mut EventReader<R>,
        version: SpecVersion,
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized;
}

pub(crate) trait ToXml {
    fn write_xml_element<W: Write>(&self, writer: &mut EventWriter<W>)
        -> Result<(), XmlWriteError>;

    fn will_write(&self) -> bool {
        true
    }
}

pub(crate) trait ToInnerXml {
    fn write_xml_named_element<W: Write>(
        &self,
        writer: &mut EventWriter<W>,
        tag: &str,
    ) -> Result<(), XmlWriteError>;
}

pub(crate) trait FromXml {
    fn read_xml_element<R: Read>(
        event_reader: &mut EventReader<R>,
        element_name: &OwnedName,
        attributes: &[OwnedAttribute],
    ) -> Result<Self, XmlReadError>
    where
        Self: Sized;
}

/// Parse a value out of an XML attribute or element body.
pub(crate) trait FromXmlType: Sized {
    fn from_xml_value(element: &str, value: String) -> Result<Self, XmlReadError>;
}

impl FromXmlType for u32 {
    fn from_xml_value(element: &str, value: String) -> Result<Self, XmlReadError> {
        value
            .parse::<u32>()
            .map_err(|_| XmlReadError::InvalidParseError {
                value,
                data_type: "u32".to_string(),
                element: element.to_string(),
            })
    }
}

impl FromXmlType for bool {
    fn from_xml_value(element: &str, value: String) -> Result<Self, XmlReadError> {
        match value.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(XmlReadError::InvalidParseError {
                value,
                data_type: "bool".to_string(),
                element: element.to_string(),
            }),
        }
    }
}

impl FromXmlType for f64 {
    fn from_xml_value(element: &str, value: String) -> Result<Self, XmlReadError> {
        value
            .parse::<f64>()
            .map_err(|_| XmlReadError::InvalidParseError {
                value,
                data_type: "f64".to_string(),
                element: element.to_string(),
            })
    }
}

pub(crate) fn to_xml_write_error(
    element: impl AsRef<str>,
) -> impl FnOnce(xml::writer::Error) -> XmlWriteError {
    let element = element.as_ref().to_owned();
    |error| XmlWriteError::XmlElementWriteError { error, element }
}

pub(crate) fn to_xml_read_error(
    element: impl AsRef<str>,
) -> impl FnOnce(xml::reader::Error) -> XmlReadError {
    let element = element.as_ref().to_owned();
    |error| XmlReadError::ElementReadError { error, element }
}

pub(crate) fn unexpected_element_error(
    element: impl AsRef<str>,
    event: reader::XmlEvent,
) -> XmlReadError {
    XmlReadError::UnexpectedElementReadError {
        error: format!("{:?}", event),
        element: element.as_ref().to_owned(),
    }
}

pub(crate) fn expected_namespace_or_error(
    version: SpecVersion,
    namespace: &Namespace,
) -> Result<(), XmlReadError> {
    let expected = version.xml_namespace();
    let actual = namespace
        .get("")
        .filter(|uri| uri.starts_with("http://cyclonedx.org/schema/bom/"));
    match actual {
        Some(uri) if uri == expected => Ok(()),
        actual => Err(XmlReadError::InvalidNamespaceError {
            expected_namespace: expected.to_string(),
            actual_namespace: actual.map(std::string::ToString::to_string),
        }),
    }
}

pub(crate) fn optional_attribute(
    attributes: &[OwnedAttribute],
    attribute_name: &str,
) -> Option<String> {
    attributes
        .iter()
        .find(|attribute| attribute.name.local_name == attribute_name)
        .map(|attribute| attribute.value.clone())
}

pub(crate) fn attribute_or_error(
    element_name: &OwnedName,
    attributes: &[OwnedAttribute],
    attribute_name: &str,
) -> Result<String, XmlReadError> {
    optional_attribute(attributes, attribute_name).ok_or_else(|| {
        XmlReadError::RequiredDataMissing {
            required_field: attribute_name.to_string(),
            element: element_name.local_name.clone(),
        }
    })
}

/// Read the text content of an element that holds no child elements, consuming
/// its closing tag.
pub(crate) fn read_simple_tag<R: Read>(
    event_reader: &mut EventReader<R>,
    element_name: &OwnedName,
) -> Result<String, XmlReadError> {
    let mut content = String::new();
    loop {
        match event_reader
            .next()
            .map_err(to_xml_read_error(&element_name.local_name))?
        {
            reader::XmlEvent::Characters(value) | reader::XmlEvent::CData(value) => {
                content.push_str(&value)
            }
            reader::XmlEvent::Whitespace(_) => (),
            reader::XmlEvent::EndElement { name } if &name == element_name => return Ok(content),
            unexpected => {
                return Err(unexpected_element_error(&element_name.local_name, unexpected))
            }
        }
    }
}

/// Skip over the current element and everything nested inside it without
/// validating the contents.
pub(crate) fn read_lax_validation_tag<R: Read>(
    event_reader: &mut EventReader<R>,
    element_name: &OwnedName,
) -> Result<(), XmlReadError> {
    let mut depth: u32 = 1;
    while depth > 0 {
        match event_reader
            .next()
            .map_err(to_xml_read_error(&element_name.local_name))?
        {
            reader::XmlEvent::StartElement { .. } => depth += 1,
            reader::XmlEvent::EndElement { .. } => depth -= 1,
            reader::XmlEvent::EndDocument => {
                return Err(unexpected_element_error(
                    &element_name.local_name,
                    reader::XmlEvent::EndDocument,
                ))
            }
            _ => (),
        }
    }
    Ok(())
}

/// Read a list element, parsing every child with the expected tag and skipping
/// anything else.
pub(crate) fn read_lax_validation_list_tag<R: Read, X: FromXml>(
    event_reader: &mut EventReader<R>,
    element_name: &OwnedName,
    inner_element_tag: &str,
) -> Result<Vec<X>, XmlReadError> {
    let mut items = Vec::new();
    loop {
        match event_reader
            .next()
            .map_err(to_xml_read_error(&element_name.local_name))?
        {
            reader::XmlEvent::StartElement {
                name, attributes, ..
            } if name.local_name == inner_element_tag => {
                items.push(X::read_xml_element(event_reader, &name, &attributes)?);
            }
            reader::XmlEvent::StartElement { name, .. } => {
                read_lax_validation_tag(event_reader, &name)?
            }
            reader::XmlEvent::EndElement { name } if &name == element_name => return Ok(items),
            reader::XmlEvent::Whitespace(_) | reader::XmlEvent::Characters(_) => (),
            unexpected => {
                return Err(unexpected_element_error(&element_name.local_name, unexpected))
            }
        }
    }
}

pub(crate) fn write_start_tag<W: Write>(
    writer: &mut EventWriter<W>,
    tag: &str,
) -> Result<(), XmlWriteError> {
    writer
        .write(XmlEvent::start_element(tag))
        .map_err(to_xml_write_error(tag))
}

pub(crate) fn write_close_tag<W: Write>(
    writer: &mut EventWriter<W>,
    tag: &str,
) -> Result<(), XmlWriteError> {
    writer
        .write(XmlEvent::end_element())
        .map_err(to_xml_write_error(tag))
}

pub(crate) fn write_simple_tag<W: Write>(
    writer: &mut EventWriter<W>,
    tag: &str,
    content: &str,
) -> Result<(), XmlWriteError> {
    write_start_tag(writer, tag)?;
    writer
        .write(XmlEvent::characters(content))
        .map_err(to_xml_write_error(tag))?;
    write_close_tag(writer, tag)
}
