//! Content negotiation between HTTP media types and concrete encodings.
//!
//! Clients name formats through a handful of interchangeable media type
//! aliases and pin a schema version with the `version` media type parameter.
//! When the parameter is absent the highest schema version the format can
//! express is selected. On responses the server echoes a generic alias when
//! the client asked with one, and uses the canonical CycloneDX vendor type
//! otherwise; the `version` parameter is always present.

#[cfg(test)]
#[path = "negotiation_test.rs"]
mod negotiation_test;

use std::str::FromStr;

use cyclonedx_bom_repo::format::SerializationFormat;
use cyclonedx_bom_repo::models::bom::SpecVersion;
use mime::Mime;

/// The outcome of negotiation: which encoding to use, and which media type
/// to put in the response `Content-Type`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NegotiatedEncoding {
    /// The wire format to encode with.
    pub format: SerializationFormat,
    /// The schema version to encode at.
    pub version: SpecVersion,
    /// The media type to echo, without parameters.
    pub media_type: String,
}

/// Why negotiation failed.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum NegotiationError {
    /// The `Content-Type` names no supported `(format, version)` pair.
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// No `Accept` entry names a supported `(format, version)` pair.
    #[error("None of the accepted media types are supported")]
    NotAcceptable,
}

/// The `Content-Type` header to respond with.
pub fn response_content_type(encoding: &NegotiatedEncoding) -> String {
    format!("{}; version={}", encoding.media_type, encoding.version)
}

/// Select the encoding a POST body is declared in.
pub fn negotiate_content_type(header: &str) -> Result<NegotiatedEncoding, NegotiationError> {
    let unsupported = || NegotiationError::UnsupportedMediaType(header.to_string());
    let mime: Mime = header.trim().parse().map_err(|_| unsupported())?;
    let format = format_for_mime(&mime).ok_or_else(unsupported)?;
    let version = requested_version(&mime, format).ok_or_else(unsupported)?;
    Ok(NegotiatedEncoding {
        format,
        version,
        media_type: format.media_type().to_string(),
    })
}

/// Select the encoding a GET response should use, walking the `Accept`
/// entries in quality factor order. An absent header selects XML at the
/// newest schema version.
pub fn negotiate_accept(header: Option<&str>) -> Result<NegotiatedEncoding, NegotiationError> {
    let Some(header) = header else {
        return Ok(default_encoding());
    };

    let mut entries: Vec<(Mime, f32)> = header
        .split(',')
        .filter_map(|entry| entry.trim().parse::<Mime>().ok())
        .map(|mime| {
            let quality = mime
                .get_param("q")
                .and_then(|quality| quality.as_str().parse::<f32>().ok())
                .unwrap_or(1.0);
            (mime, quality)
        })
        .collect();
    // A stable sort keeps the client's ordering among entries of equal
    // quality.
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    for (mime, _) in entries {
        if mime.essence_str() == "*/*" {
            return Ok(default_encoding());
        }
        let Some(format) = format_for_mime(&mime) else {
            continue;
        };
        let Some(version) = requested_version(&mime, format) else {
            continue;
        };
        return Ok(NegotiatedEncoding {
            format,
            version,
            media_type: mime.essence_str().to_string(),
        });
    }

    Err(NegotiationError::NotAcceptable)
}

fn default_encoding() -> NegotiatedEncoding {
    let format = SerializationFormat::Xml;
    NegotiatedEncoding {
        format,
        version: format.max_spec_version(),
        media_type: format.media_type().to_string(),
    }
}

/// The alias table. Parameters have already been stripped by
/// [`Mime::essence_str`].
fn format_for_mime(mime: &Mime) -> Option<SerializationFormat> {
    match mime.essence_str() {
        "text/xml" | "application/xml" | "application/vnd.cyclonedx+xml" => {
            Some(SerializationFormat::Xml)
        }
        "application/json" | "application/vnd.cyclonedx+json" => Some(SerializationFormat::Json),
        "application/x.vnd.cyclonedx+protobuf" | "application/octet-stream" => {
            Some(SerializationFormat::Protobuf)
        }
        _ => None,
    }
}

/// The schema version pinned by the `version` parameter, or the format's
/// newest supported version when the parameter is absent. `None` when the
/// requested pair falls outside the supported matrix.
fn requested_version(mime: &Mime, format: SerializationFormat) -> Option<SpecVersion> {
    match mime.get_param("version") {
        Some(value) => {
            let version = SpecVersion::from_str(value.as_str()).ok()?;
            format.supports(version).then_some(version)
        }
        None => Some(format.max_spec_version()),
    }
}
