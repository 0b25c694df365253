// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outlet power readings and control actions.
//!
//! The outlet table exposes one integer per outlet. Reads return `1` (on) or
//! `2` (off); writes accept the same two codes plus `3` to power-cycle.

use std::fmt;

/// Last observed power state of an outlet.
///
/// `Unknown` means there has been no successful read since the driver started
/// or since the last transport failure.
///
/// # Examples
///
/// ```
/// use snmp_outlet::types::Reading;
///
/// assert_eq!(Reading::from(true), Reading::On);
/// assert_eq!(Reading::from(None), Reading::Unknown);
/// assert_eq!(Reading::Off.as_bool(), Some(false));
/// assert_eq!(Reading::Unknown.as_bool(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Reading {
    /// The outlet is powered.
    On,
    /// The outlet is not powered.
    Off,
    /// No recent successful read.
    #[default]
    Unknown,
}

impl Reading {
    /// Returns the reading as a boolean, or `None` if unknown.
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::On => Some(true),
            Self::Off => Some(false),
            Self::Unknown => None,
        }
    }

    /// Returns `true` if the reading is unknown.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Decodes a status code reported by the outlet table.
    ///
    /// Returns `None` for anything but the on (`'1'`) and off (`'2'`) codes.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            '1' => Some(Self::On),
            '2' => Some(Self::Off),
            _ => None,
        }
    }
}

impl From<bool> for Reading {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl From<Option<bool>> for Reading {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::Unknown, Self::from)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Unknown => "unknown",
        })
    }
}

/// Control action written to an outlet.
///
/// # Examples
///
/// ```
/// use snmp_outlet::types::OutletAction;
///
/// assert_eq!(OutletAction::from(true).code(), "1");
/// assert_eq!(OutletAction::Off.code(), "2");
/// assert_eq!(OutletAction::Cycle.code(), "3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutletAction {
    /// Switch the outlet on.
    On,
    /// Switch the outlet off.
    Off,
    /// Power-cycle the outlet.
    ///
    /// Only reachable through the command renderer; the boolean write path
    /// never produces it.
    Cycle,
}

impl OutletAction {
    /// Returns the integer code sent in the set request.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::On => "1",
            Self::Off => "2",
            Self::Cycle => "3",
        }
    }
}

impl From<bool> for OutletAction {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl fmt::Display for OutletAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Cycle => "cycle",
        })
    }
}
