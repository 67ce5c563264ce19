use cyclonedx_bom_repo::format::SerializationFormat;
use cyclonedx_bom_repo::models::bom::SpecVersion;
use pretty_assertions::assert_eq;

use crate::negotiation::{
    negotiate_accept, negotiate_content_type, response_content_type, NegotiationError,
};

#[test]
fn every_alias_is_recognized_on_content_type() {
    for (header, format) in [
        ("text/xml", SerializationFormat::Xml),
        ("application/xml", SerializationFormat::Xml),
        ("application/vnd.cyclonedx+xml", SerializationFormat::Xml),
        ("application/json", SerializationFormat::Json),
        ("application/vnd.cyclonedx+json", SerializationFormat::Json),
        (
            "application/x.vnd.cyclonedx+protobuf",
            SerializationFormat::Protobuf,
        ),
        ("application/octet-stream", SerializationFormat::Protobuf),
    ] {
        let encoding = negotiate_content_type(header).unwrap();
        assert_eq!(encoding.format, format, "for {}", header);
        // Without a version parameter the newest supported version wins.
        assert_eq!(encoding.version, SpecVersion::V1_4, "for {}", header);
        assert_eq!(encoding.media_type, format.media_type(), "for {}", header);
    }
}

#[test]
fn the_version_parameter_pins_the_schema_version() {
    let encoding = negotiate_content_type("application/vnd.cyclonedx+xml; version=1.2").unwrap();
    assert_eq!(encoding.format, SerializationFormat::Xml);
    assert_eq!(encoding.version, SpecVersion::V1_2);
}

#[test]
fn unsupported_cells_of_the_matrix_are_rejected() {
    for header in [
        "application/vnd.cyclonedx+json; version=1.1",
        "application/x.vnd.cyclonedx+protobuf; version=1.2",
        "application/vnd.cyclonedx+xml; version=2.0",
        "text/plain",
    ] {
        let result = negotiate_content_type(header);
        assert_eq!(
            result,
            Err(NegotiationError::UnsupportedMediaType(header.to_string())),
            "for {}",
            header
        );
    }
}

#[test]
fn accept_entries_are_walked_in_quality_order() {
    let encoding = negotiate_accept(Some(
        "application/vnd.cyclonedx+json;q=0.5, application/vnd.cyclonedx+xml;q=0.9",
    ))
    .unwrap();
    assert_eq!(encoding.format, SerializationFormat::Xml);
}

#[test]
fn unsupported_accept_entries_are_skipped() {
    let encoding = negotiate_accept(Some(
        "application/x.vnd.cyclonedx+protobuf; version=1.1, application/json",
    ))
    .unwrap();
    assert_eq!(encoding.format, SerializationFormat::Json);
    assert_eq!(encoding.version, SpecVersion::V1_4);
}

#[test]
fn an_absent_accept_header_defaults_to_xml() {
    let encoding = negotiate_accept(None).unwrap();
    assert_eq!(encoding.format, SerializationFormat::Xml);
    assert_eq!(encoding.version, SpecVersion::V1_4);
    assert_eq!(encoding.media_type, "application/vnd.cyclonedx+xml");
}

#[test]
fn a_wildcard_accept_selects_the_default_encoding() {
    let encoding = negotiate_accept(Some("*/*")).unwrap();
    assert_eq!(encoding.format, SerializationFormat::Xml);
    assert_eq!(encoding.media_type, "application/vnd.cyclonedx+xml");
}

#[test]
fn nothing_acceptable_is_an_error() {
    let result = negotiate_accept(Some("text/plain, image/png"));
    assert_eq!(result, Err(NegotiationError::NotAcceptable));
}

#[test]
fn generic_aliases_are_echoed_with_the_version_parameter() {
    let encoding = negotiate_accept(Some("text/xml; version=1.3")).unwrap();
    assert_eq!(encoding.media_type, "text/xml");
    assert_eq!(
        response_content_type(&encoding),
        "text/xml; version=1.3".to_string()
    );
}
