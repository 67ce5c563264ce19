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

use crate::external_models::normalized_string::NormalizedString;
use crate::external_models::uri::Uri;

#[derive(Clone, Debug, PartialEq)]
pub struct Licenses(pub Vec<LicenseChoice>);

/// Either a single named license or an SPDX license expression.
#[derive(Clone, Debug, PartialEq)]
pub enum LicenseChoice {
    License(License),
    Expression(NormalizedString),
}

#[derive(Clone, Debug, PartialEq)]
pub struct License {
    pub license_identifier: LicenseIdentifier,
    pub url: Option<Uri>,
}

/// Licenses are identified either by an SPDX identifier or a free-form name.
#[derive(Clone, Debug, PartialEq)]
pub enum LicenseIdentifier {
    /// An SPDX license short identifier, carried as submitted.
    SpdxId(NormalizedString),
    Name(NormalizedString),
}
