// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rendering of query and set command lines.
//!
//! The driver never builds command lines by hand. A [`CommandRenderer`] holds
//! the parsed status and set templates together with the device address and
//! produces the argument list for a given pin and action.
//!
//! # Caching
//!
//! Rendering is a pure function of `(pin, action)`, and a bank has only a few
//! outlets, so every rendered list is kept and shared on later calls.
//!
//! ```
//! use std::sync::Arc;
//! use snmp_outlet::DriverConfig;
//! use snmp_outlet::command::CommandRenderer;
//! use snmp_outlet::types::{OutletAction, Pin};
//!
//! let config = DriverConfig::new("192.168.1.20");
//! let renderer = CommandRenderer::new(&config).unwrap();
//! let pin = Pin::new("1").unwrap();
//!
//! let first = renderer.set(&pin, OutletAction::On);
//! let second = renderer.set(&pin, OutletAction::On);
//! assert!(Arc::ptr_eq(&first, &second));
//! assert_eq!(first.last().map(String::as_str), Some("1"));
//! ```

mod template;

pub use template::{CommandTemplate, Placeholder, RenderContext};

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::DriverConfig;
use crate::error::ValueError;
use crate::types::{OutletAction, Pin};

/// A rendered argument list, shared between cache and callers.
pub type CommandLine = Arc<[String]>;

/// Renders and memoizes command lines for one device.
#[derive(Debug)]
pub struct CommandRenderer {
    host: String,
    port: u16,
    oid_outlets: String,
    status: CommandTemplate,
    set: CommandTemplate,
    cache: Mutex<HashMap<(Pin, Option<OutletAction>), CommandLine>>,
}

impl CommandRenderer {
    /// Creates a renderer from a driver configuration.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` if either command template is malformed.
    pub fn new(config: &DriverConfig) -> Result<Self, ValueError> {
        Ok(Self {
            host: config.host().to_string(),
            port: config.port(),
            oid_outlets: config.oid_outlets().to_string(),
            status: CommandTemplate::parse("status_cmd", config.status_cmd(), false)?,
            set: CommandTemplate::parse("set_cmd", config.set_cmd(), true)?,
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// Returns the command line that queries the state of `pin`.
    #[must_use]
    pub fn status(&self, pin: &Pin) -> CommandLine {
        self.render(pin, None)
    }

    /// Returns the command line that applies `action` to `pin`.
    #[must_use]
    pub fn set(&self, pin: &Pin, action: OutletAction) -> CommandLine {
        self.render(pin, Some(action))
    }

    fn render(&self, pin: &Pin, action: Option<OutletAction>) -> CommandLine {
        let template = if action.is_some() {
            &self.set
        } else {
            &self.status
        };
        let mut cache = self.cache.lock();
        let line = cache.entry((pin.clone(), action)).or_insert_with(|| {
            template
                .render(&RenderContext {
                    host: &self.host,
                    port: self.port,
                    oid_outlets: &self.oid_outlets,
                    pin,
                    action,
                })
                .into()
        });
        Arc::clone(line)
    }
}
