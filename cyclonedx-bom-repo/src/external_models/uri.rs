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

/// A uniform resource identifier, carried as submitted.
///
/// CycloneDX documents reference a lot of URIs that exist outside of the
/// control of the document author. They are kept verbatim so that re-encoding
/// a document does not alter them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Uri(pub(crate) String);

impl Uri {
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Uri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
