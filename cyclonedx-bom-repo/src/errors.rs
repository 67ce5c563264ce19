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

use crate::format::SerializationFormat;
use crate::models::bom::SpecVersion;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BomError {
    #[error("{format} is not supported at spec version {version}")]
    UnsupportedSpecVersion {
        format: SerializationFormat,
        version: SpecVersion,
    },

    #[error("Failed to serialize BOM to JSON: {0}")]
    JsonWriteError(#[from] JsonWriteError),

    #[error("Failed to deserialize BOM from JSON: {0}")]
    JsonReadError(#[from] JsonReadError),

    #[error("Failed to serialize BOM to XML: {0}")]
    XmlWriteError(#[from] XmlWriteError),

    #[error("Failed to deserialize BOM from XML: {0}")]
    XmlReadError(#[from] XmlReadError),

    #[error("Failed to deserialize BOM from protobuf: {0}")]
    ProtoReadError(#[from] ProtoReadError),

    #[error("Failed to write BOM: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum JsonWriteError {
    #[error("Failed to serialize JSON: {error}")]
    JsonElementWriteError {
        #[from]
        error: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum JsonReadError {
    #[error("Failed to deserialize JSON: {error}")]
    JsonElementReadError {
        #[from]
        error: serde_json::Error,
    },

    #[error("Document declares spec version {document}, but {declared} was requested")]
    SpecVersionMismatch { document: String, declared: String },
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum XmlWriteError {
    #[error("Failed to serialize XML while writing {element}: {error}")]
    XmlElementWriteError {
        #[source]
        error: xml::writer::Error,
        element: String,
    },
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum XmlReadError {
    #[error("Failed to deserialize XML while reading {element}: {error}")]
    ElementReadError {
        #[source]
        error: xml::reader::Error,
        element: String,
    },

    #[error("Got unexpected XML element when reading {element}: {error}")]
    UnexpectedElementReadError { error: String, element: String },

    #[error("Ended element {element} without data for required field {required_field}")]
    RequiredDataMissing {
        required_field: String,
        element: String,
    },

    #[error("Could not parse {value} as {data_type} on {element}")]
    InvalidParseError {
        value: String,
        data_type: String,
        element: String,
    },

    #[error(
        "Expected document to be in the namespace {expected_namespace}, but received {}", .actual_namespace.as_ref().unwrap_or(&"no CycloneDX namespace".to_string())
    )]
    InvalidNamespaceError {
        expected_namespace: String,
        actual_namespace: Option<String>,
    },
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ProtoReadError {
    #[error("Failed to decode protobuf message: {error}")]
    ProtoDecodeError {
        #[from]
        error: prost::DecodeError,
    },

    #[error("Could not parse {value} as {data_type} on {field}")]
    InvalidParseError {
        value: String,
        data_type: String,
        field: String,
    },

    #[error("Unknown enumeration value {value} for {field}")]
    UnknownEnumValue { value: i32, field: String },

    #[error("Document declares spec version {document}, but {declared} was requested")]
    SpecVersionMismatch { document: String, declared: String },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum UrnUuidError {
    #[error("Serial number does not match the urn:uuid format: {0}")]
    InvalidUrnUuid(String),
}
