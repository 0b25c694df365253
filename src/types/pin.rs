// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pin identifiers.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Identifier of one outlet on the managed device.
///
/// The identifier is the outlet number as it appears in the outlet table OID,
/// but the driver treats it as an opaque string. Surrounding whitespace is
/// stripped at construction and empty identifiers are rejected.
///
/// # Examples
///
/// ```
/// use snmp_outlet::types::Pin;
///
/// let pin = Pin::new(" 3 ").unwrap();
/// assert_eq!(pin.as_str(), "3");
///
/// assert!(Pin::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pin(String);

impl Pin {
    /// Creates a pin from an identifier.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::EmptyPin` if the identifier is empty after trimming.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ValueError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValueError::EmptyPin);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Pin {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Pin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
