// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outlet state tracking.
//!
//! [`StateTable`] holds one [`Reading`](crate::types::Reading) per registered
//! pin. The driver keeps a live table and compares it against a snapshot of
//! the previous reconciliation pass to decide whether to notify.

mod state_table;

pub use state_table::StateTable;
