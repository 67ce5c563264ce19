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

#![deny(clippy::all)]

//! The `cyclonedx-bom-repo` library provides the schema-version-independent
//! CycloneDX object model used by the BOM repository server, together with
//! codecs for every supported `(format, spec version)` pair.
//!
//! [CycloneDX](https://cyclonedx.org/) is a lightweight SBOM specification that is easily created,
//! human and machine readable, and simple to parse. Documents exist in three
//! interchangeable serializations, each covering a range of schema versions:
//!
//! | Format   | 1.0 | 1.1 | 1.2 | 1.3 | 1.4 |
//! |----------|-----|-----|-----|-----|-----|
//! | XML      | ✓   | ✓   | ✓   | ✓   | ✓   |
//! | JSON     |     |     | ✓   | ✓   | ✓   |
//! | Protobuf |     |     |     | ✓   | ✓   |
//!
//! ## Read a BOM
//!
//! ```rust
//! use cyclonedx_bom_repo::format::SerializationFormat;
//! use cyclonedx_bom_repo::models::bom::{Bom, SpecVersion};
//!
//! let bom_json = br#"{
//!   "bomFormat": "CycloneDX",
//!   "specVersion": "1.3",
//!   "serialNumber": "urn:uuid:3e671687-395b-41f5-a30f-a58921a69b79",
//!   "version": 1
//! }"#;
//! let bom = Bom::parse(bom_json, SerializationFormat::Json, SpecVersion::V1_3)
//!     .expect("Failed to parse BOM");
//! assert_eq!(bom.version, Some(1));
//! ```
//!
//! ## Write a BOM
//!
//! Re-encoding to an older schema version is a projection: fields the target
//! version cannot express are dropped, and the output remains a valid
//! document at that version.
//!
//! ```rust
//! use cyclonedx_bom_repo::format::SerializationFormat;
//! use cyclonedx_bom_repo::models::bom::{Bom, SpecVersion};
//!
//! let bom = Bom::default();
//! let mut output = Vec::<u8>::new();
//! bom.output(&mut output, SerializationFormat::Xml, SpecVersion::V1_2)
//!     .expect("Failed to write BOM");
//! ```

pub mod errors;
pub mod external_models;
pub mod format;
pub mod models;

mod proto;
mod spec;
mod utilities;
mod xml;
