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
use crate::models::organization::OrganizationalEntity;

#[derive(Clone, Debug, PartialEq)]
pub struct Services(pub Vec<Service>);

#[derive(Clone, Debug, PartialEq)]
pub struct Service {
    pub bom_ref: Option<String>,
    pub provider: Option<OrganizationalEntity>,
    pub group: Option<NormalizedString>,
    pub name: NormalizedString,
    pub version: Option<NormalizedString>,
    pub description: Option<NormalizedString>,
    pub endpoints: Option<Vec<Uri>>,
    pub authenticated: Option<bool>,
}

impl Service {
    pub fn new(name: &str, bom_ref: Option<String>) -> Self {
        Self {
            name: NormalizedString::new(name),
            bom_ref,
            provider: None,
            group: None,
            version: None,
            description: None,
            endpoints: None,
            authenticated: None,
        }
    }
}
