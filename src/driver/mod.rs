// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host-facing driver interface.
//!
//! A host that aggregates many pin drivers sees each one through three
//! capabilities:
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`PinRegistry`] | Declare pins before the driver starts |
//! | [`StatePoller`] | Probe the device and keep state fresh |
//! | [`PinIo`] | Read and write individual pins |
//!
//! [`OutletDriver`] implements all three for an SNMP outlet bank. Host
//! integrations only need to forward their own lifecycle calls to these
//! traits.

mod outlet_driver;

pub use outlet_driver::OutletDriver;

use std::future::Future;
use std::time::Duration;

use crate::error::Result;
use crate::types::Pin;

/// Pin registration, done before the driver runs.
pub trait PinRegistry {
    /// Registers an input pin with an unknown initial state.
    fn register_input(&mut self, pin: Pin, debounce: Duration);

    /// Registers an output pin with an initial state (`None` for unknown).
    fn register_output(&mut self, pin: Pin, initial: Option<bool>);
}

/// Background state maintenance.
pub trait StatePoller {
    /// One-time diagnostic hook called before [`run`](Self::run).
    fn prepare(&self);

    /// Keeps pin state in sync with the device until the future is dropped.
    fn run(&self) -> impl Future<Output = ()> + Send;
}

/// Per-pin access.
pub trait PinIo {
    /// Returns the last known state of `pin`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Offline` if the state is unknown.
    fn read(&self, pin: &Pin) -> Result<bool>;

    /// Drives `pin` to `state`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Offline` if the device did not accept the request.
    fn write(&self, pin: &Pin, state: bool) -> impl Future<Output = Result<()>> + Send;
}
