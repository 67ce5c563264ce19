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
use crate::models::bom::SpecVersion;
use crate::models::external_reference::ExternalReferences;
use crate::models::hash::Hashes;
use crate::models::license::Licenses;
use crate::models::organization::OrganizationalEntity;
use crate::models::property::Properties;

#[derive(Clone, Debug, PartialEq)]
pub struct Components(pub Vec<Component>);

impl Components {
    pub(crate) fn project_to(self, version: SpecVersion) -> Self {
        Self(
            self.0
                .into_iter()
                .map(|component| component.project_to(version))
                .collect(),
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Component {
    pub component_type: Classification,
    pub mime_type: Option<MimeType>,
    pub bom_ref: Option<String>,
    pub supplier: Option<OrganizationalEntity>,
    pub author: Option<NormalizedString>,
    pub publisher: Option<NormalizedString>,
    pub group: Option<NormalizedString>,
    pub name: NormalizedString,
    pub version: NormalizedString,
    pub description: Option<NormalizedString>,
    pub scope: Option<Scope>,
    pub hashes: Option<Hashes>,
    pub licenses: Option<Licenses>,
    pub copyright: Option<NormalizedString>,
    pub cpe: Option<Cpe>,
    pub purl: Option<Uri>,
    pub external_references: Option<ExternalReferences>,
    pub properties: Option<Properties>,
    pub components: Option<Components>,
}

impl Component {
    pub fn new(
        component_type: Classification,
        name: &str,
        version: &str,
        bom_ref: Option<String>,
    ) -> Self {
        Self {
            component_type,
            name: NormalizedString::new(name),
            version: NormalizedString::new(version),
            bom_ref,
            mime_type: None,
            supplier: None,
            author: None,
            publisher: None,
            group: None,
            description: None,
            scope: None,
            hashes: None,
            licenses: None,
            copyright: None,
            cpe: None,
            purl: None,
            external_references: None,
            properties: None,
            components: None,
        }
    }

    pub(crate) fn project_to(mut self, version: SpecVersion) -> Self {
        if version < SpecVersion::V1_3 {
            self.properties = None;
        }
        if version < SpecVersion::V1_2 {
            self.mime_type = None;
            self.author = None;
            self.supplier = None;
        }
        if version < SpecVersion::V1_1 {
            self.external_references = None;
        }
        self.components = self
            .components
            .map(|components| components.project_to(version));
        self
    }
}

/// The type of a component, `library` being the most common for SBOMs
/// describing software dependencies.
#[derive(Clone, Debug, PartialEq)]
pub enum Classification {
    Application,
    Framework,
    Library,
    Container,
    OperatingSystem,
    Device,
    Firmware,
    File,
    #[doc(hidden)]
    UnknownClassification(String),
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            Classification::Application => "application",
            Classification::Framework => "framework",
            Classification::Library => "library",
            Classification::Container => "container",
            Classification::OperatingSystem => "operating-system",
            Classification::Device => "device",
            Classification::Firmware => "firmware",
            Classification::File => "file",
            Classification::UnknownClassification(uc) => uc,
        };
        f.write_str(value)
    }
}

impl Classification {
    pub(crate) fn new_unchecked<A: AsRef<str>>(value: A) -> Self {
        match value.as_ref() {
            "application" => Self::Application,
            "framework" => Self::Framework,
            "library" => Self::Library,
            "container" => Self::Container,
            "operating-system" => Self::OperatingSystem,
            "device" => Self::Device,
            "firmware" => Self::Firmware,
            "file" => Self::File,
            unknown => Self::UnknownClassification(unknown.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Scope {
    Required,
    Optional,
    Excluded,
    #[doc(hidden)]
    UnknownScope(String),
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            Scope::Required => "required",
            Scope::Optional => "optional",
            Scope::Excluded => "excluded",
            Scope::UnknownScope(us) => us,
        };
        f.write_str(value)
    }
}

impl Scope {
    pub(crate) fn new_unchecked<A: AsRef<str>>(value: A) -> Self {
        match value.as_ref() {
            "required" => Self::Required,
            "optional" => Self::Optional,
            "excluded" => Self::Excluded,
            unknown => Self::UnknownScope(unknown.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MimeType(pub(crate) String);

impl AsRef<str> for MimeType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A Common Platform Enumeration identifier, carried as submitted.
#[derive(Clone, Debug, PartialEq)]
pub struct Cpe(pub(crate) String);

impl AsRef<str> for Cpe {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_should_project_away_newer_component_fields() {
        let mut component = Component::new(Classification::Library, "lib", "1.0.0", None);
        component.author = Some(NormalizedString::new("author"));
        component.properties = Some(Properties(Vec::new()));

        let projected = component.clone().project_to(SpecVersion::V1_2);
        assert_eq!(projected.author, Some(NormalizedString::new("author")));
        assert!(projected.properties.is_none());

        let projected = component.project_to(SpecVersion::V1_1);
        assert!(projected.author.is_none());
    }
}
