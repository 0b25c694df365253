// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outlet status response parsing.

use crate::error::ParseError;
use crate::types::{Pin, Reading};

/// Decoded outlet status returned by a status query or a set request.
///
/// The tools print one varbind per line, for example:
///
/// ```text
/// SNMPv2-SMI::enterprises.3808.1.1.3.3.3.1.1.4.1 = INTEGER: 1
/// ```
///
/// Decoding is deliberately narrow: the output must start with the exact OID
/// of the addressed outlet, and only the final character is used as the code.
///
/// # Examples
///
/// ```
/// use snmp_outlet::response::PowerResponse;
/// use snmp_outlet::types::Pin;
///
/// let pin = Pin::new("3").unwrap();
/// let text = ".1.3.6.1.4.1.3808.1.1.3.3.3.1.1.4.3 = INTEGER: 2\n";
/// let response = PowerResponse::parse(".1.3.6.1.4.1.3808.1.1.3.3.3.1.1", &pin, text).unwrap();
/// assert!(!response.is_on());
///
/// assert!(PowerResponse::parse(".1.3.6", &pin, "Timeout: No Response").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerResponse {
    on: bool,
}

impl PowerResponse {
    /// Decodes the output produced for `pin`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnexpectedFormat` if the OID prefix does not match
    /// and `ParseError::UnknownCode` if the trailing code is neither on nor off.
    pub fn parse(oid_outlets: &str, pin: &Pin, text: &str) -> Result<Self, ParseError> {
        let stripped = text.trim();
        let prefix = format!("{oid_outlets}.4.{pin} = INTEGER: ");
        if !stripped.starts_with(&prefix) {
            return Err(ParseError::UnexpectedFormat(text.to_string()));
        }
        // The prefix ends in a space that trimming cannot remove, so a code is present.
        let code = stripped
            .chars()
            .next_back()
            .ok_or_else(|| ParseError::UnexpectedFormat(text.to_string()))?;
        match Reading::from_code(code).and_then(Reading::as_bool) {
            Some(on) => Ok(Self { on }),
            None => Err(ParseError::UnknownCode(code)),
        }
    }

    /// Returns `true` if the outlet is on.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.on
    }

    /// Returns the decoded reading.
    #[must_use]
    pub fn reading(&self) -> Reading {
        Reading::from(self.on)
    }
}
