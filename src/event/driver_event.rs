// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Driver event types.

use crate::state::StateTable;
use crate::types::Pin;

/// Change notifications raised by a driver.
///
/// Either event tells the host that its view of the pins may be stale and
/// should be re-read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverEvent {
    /// A reconciliation pass observed a table different from the previous pass.
    StateChanged {
        /// Display name of the driver.
        driver: String,
        /// The table as observed at the end of the pass.
        state: StateTable,
    },

    /// A write finished its settle delay.
    ///
    /// Raised whether or not the set command succeeded.
    WriteSettled {
        /// Display name of the driver.
        driver: String,
        /// The pin that was written.
        pin: Pin,
        /// The requested state.
        state: bool,
        /// Whether the device acknowledged the set command.
        confirmed: bool,
    },
}

impl DriverEvent {
    /// Returns the display name of the driver that raised the event.
    #[must_use]
    pub fn driver(&self) -> &str {
        match self {
            Self::StateChanged { driver, .. } | Self::WriteSettled { driver, .. } => driver,
        }
    }

    /// Returns the observed table for state change events.
    #[must_use]
    pub fn state(&self) -> Option<&StateTable> {
        match self {
            Self::StateChanged { state, .. } => Some(state),
            Self::WriteSettled { .. } => None,
        }
    }

    /// Returns `true` if this is a state change event.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Self::StateChanged { .. })
    }
}
