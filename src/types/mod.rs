// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for outlet control.
//!
//! - [`Pin`] - Validated outlet identifier
//! - [`Reading`] - On/Off/Unknown view of an outlet
//! - [`OutletAction`] - On/Off/Cycle request written to an outlet

mod pin;
mod power;

pub use pin::Pin;
pub use power::{OutletAction, Reading};
