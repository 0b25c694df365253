// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `snmp_outlet` - drive SNMP-managed power outlet banks as boolean pins.
//!
//! Each outlet of a switched PDU is exposed as a pin that a host can read and
//! write. The library does not implement SNMP: it renders command lines for
//! the net-snmp tools (`snmpwalk`, `snmpset`) from configurable templates,
//! runs them, and decodes their output.
//!
//! # Features
//!
//! - **Reconciliation loop**: polls every outlet on a fixed interval and
//!   raises an event when the observed state changes
//! - **Confirmed writes**: switches an outlet, waits for it to settle, then
//!   asks the host to re-read
//! - **Whole-bank degradation**: any protocol failure marks every outlet
//!   unknown, and reads report the driver offline
//! - **Pluggable transport**: swap the process runner for any [`Transport`]
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use snmp_outlet::{DriverConfig, DriverEvent, OutletDriver, Pin};
//!
//! #[tokio::main]
//! async fn main() -> snmp_outlet::Result<()> {
//!     let config = DriverConfig::new("192.168.1.20");
//!     let mut driver = OutletDriver::snmp_tools("rack-pdu", config)?;
//!     driver.register_output(Pin::new("1")?, None);
//!     driver.register_output(Pin::new("2")?, None);
//!     driver.prepare();
//!
//!     let driver = Arc::new(driver);
//!     let mut events = driver.subscribe();
//!     tokio::spawn({
//!         let driver = Arc::clone(&driver);
//!         async move { driver.run().await }
//!     });
//!
//!     while let Ok(event) = events.recv().await {
//!         if let DriverEvent::StateChanged { state, .. } = event {
//!             println!("outlets: {state}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod command;
mod config;
pub mod driver;
pub mod error;
pub mod event;
pub mod protocol;
pub mod response;
pub mod state;
pub mod types;

pub use config::DriverConfig;
pub use driver::{OutletDriver, PinIo, PinRegistry, StatePoller};
pub use error::{Error, ParseError, Result, TransportError, ValueError};
pub use event::{DriverEvent, Notifier};
pub use protocol::{CommandOutput, ProcessTransport, Transport};
pub use state::StateTable;
pub use types::{OutletAction, Pin, Reading};
