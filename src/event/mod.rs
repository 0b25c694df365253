// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Change notifications.
//!
//! A driver raises a [`DriverEvent`] when a reconciliation pass sees a new
//! state table and after every write. Hosts subscribe through the driver's
//! [`Notifier`], which uses tokio's broadcast channel so any number of
//! listeners receive each event.

mod driver_event;
mod notifier;

pub use driver_event::DriverEvent;
pub use notifier::Notifier;
