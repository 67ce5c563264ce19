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

use crate::external_models::date_time::DateTime;
use crate::models::bom::SpecVersion;
use crate::models::component::Component;
use crate::models::organization::OrganizationalContact;
use crate::models::property::Properties;
use crate::models::tool::Tools;

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Metadata {
    pub timestamp: Option<DateTime>,
    pub tools: Option<Tools>,
    pub authors: Option<Vec<OrganizationalContact>>,
    pub component: Option<Component>,
    pub properties: Option<Properties>,
}

impl Metadata {
    pub(crate) fn project_to(mut self, version: SpecVersion) -> Self {
        if version < SpecVersion::V1_3 {
            self.properties = None;
        }
        self.component = self.component.map(|c| c.project_to(version));
        self
    }
}
