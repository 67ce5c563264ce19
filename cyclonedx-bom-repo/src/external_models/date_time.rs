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

use std::convert::TryFrom;

use thiserror::Error;
use time::{format_description::well_known::Iso8601, OffsetDateTime};

/// For the purposes of CycloneDX SBOM documents, `DateTime` is an ISO 8601 formatted timestamp
///
/// The corresponding CycloneDX XML schema definition is the
/// [`dateTime`](https://www.w3.org/TR/xmlschema11-2/#dateTime) format.
///
/// A valid timestamp can be created from a [`String`](std::string::String) using the
/// [`TryFrom`](std::convert::TryFrom) / [`TryInto`](std::convert::TryInto) traits.
///
/// ```
/// use cyclonedx_bom_repo::external_models::date_time::DateTime;
/// use std::convert::TryInto;
///
/// let timestamp = String::from("1970-01-01T00:00:00Z");
/// let date_time: DateTime = timestamp.clone().try_into().expect("Failed to parse as DateTime");
///
/// assert_eq!(date_time.to_string(), timestamp);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DateTime(pub(crate) String);

impl DateTime {
    pub fn now() -> Result<Self, DateTimeError> {
        let now = OffsetDateTime::now_utc()
            .format(&Iso8601::DEFAULT)
            .map_err(|_| DateTimeError::FailedCurrentTime)?;
        Ok(Self(now))
    }

    /// Allow for the existence of invalid inputs from other data sources
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }
}

impl TryFrom<String> for DateTime {
    type Error = DateTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match OffsetDateTime::parse(&value, &Iso8601::DEFAULT) {
            Ok(_) => Ok(Self(value)),
            Err(e) => Err(DateTimeError::InvalidDateTime(format!(
                "DateTime does not conform to ISO 8601: {}",
                e
            ))),
        }
    }
}

impl std::fmt::Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DateTime {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DateTimeError {
    #[error("Failed to get the current time")]
    FailedCurrentTime,

    #[error("Invalid DateTime: {}", .0)]
    InvalidDateTime(String),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn valid_timestamps_are_accepted() {
        let actual = DateTime::try_from("1969-06-28T01:20:00.00-04:00".to_string());
        assert!(actual.is_ok());
    }

    #[test]
    fn invalid_timestamps_are_rejected() {
        let actual = DateTime::try_from("not a timestamp".to_string());
        assert!(matches!(actual, Err(DateTimeError::InvalidDateTime(_))));
    }

    #[test]
    fn now_is_a_valid_timestamp() {
        let now = DateTime::now().expect("Failed to get the current time");
        assert!(DateTime::try_from(now.to_string()).is_ok());
    }
}
