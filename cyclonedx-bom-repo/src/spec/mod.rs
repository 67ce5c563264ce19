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

//! Wire representation of BOM documents.
//!
//! The structs in this module track the CycloneDX schemas: serde derives
//! produce the JSON form, the [`ToXml`](crate::xml::ToXml) and
//! [`FromXml`](crate::xml::FromXml) impls produce the XML form. Documents are
//! projected down to the target schema version on the model side before they
//! reach this module, so a single struct set serves every supported revision.

pub(crate) mod bom;
pub(crate) mod component;
pub(crate) mod composition;
pub(crate) mod dependency;
pub(crate) mod external_reference;
pub(crate) mod hash;
pub(crate) mod license;
pub(crate) mod metadata;
pub(crate) mod organization;
pub(crate) mod property;
pub(crate) mod service;
pub(crate) mod tool;
pub(crate) mod vulnerability;
