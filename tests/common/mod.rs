// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory outlet bank answering rendered SNMP command lines.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use snmp_outlet::{CommandOutput, DriverConfig, Pin, Transport, TransportError};

pub const OID: &str = ".1.3.6.1.4.1.3808.1.1.3.3.3.1.1";

/// Simulated PDU.
///
/// Understands `snmpget <host> <oid>.4.<pin>` and
/// `snmpset <host> <oid>.4.<pin> i <code>`, the templates from [`config`].
#[derive(Debug, Default)]
pub struct FakePdu {
    outlets: Mutex<HashMap<String, char>>,
    failing: Mutex<HashSet<String>>,
    offline: AtomicBool,
    calls: Mutex<Vec<Vec<String>>>,
}

impl FakePdu {
    pub fn with_outlets(outlets: &[(&str, bool)]) -> Self {
        let pdu = Self::default();
        for (pin, on) in outlets {
            pdu.switch(pin, *on);
        }
        pdu
    }

    /// Flips an outlet behind the driver's back.
    pub fn switch(&self, pin: &str, on: bool) {
        self.outlets
            .lock()
            .insert(pin.to_string(), if on { '1' } else { '2' });
    }

    /// Makes every request for `pin` return garbage.
    pub fn break_outlet(&self, pin: &str) {
        self.failing.lock().insert(pin.to_string());
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().clone()
    }

    fn answer(&self, args: &[String]) -> CommandOutput {
        if self.offline.load(Ordering::SeqCst) {
            return CommandOutput::new(1, "Timeout: No Response from 10.0.0.2.\n");
        }
        let oid = &args[2];
        let Some(pin) = oid.strip_prefix(&format!("{OID}.4.")) else {
            return CommandOutput::new(2, "Unknown Object Identifier\n");
        };
        if self.failing.lock().contains(pin) {
            return CommandOutput::success(format!("{oid} = No Such Instance\n"));
        }

        let mut outlets = self.outlets.lock();
        if args[0] == "snmpset" {
            match args[4].as_str() {
                "1" => outlets.insert(pin.to_string(), '1'),
                "2" => outlets.insert(pin.to_string(), '2'),
                _ => return CommandOutput::new(2, "Error in packet: wrongValue\n"),
            };
        }
        match outlets.get(pin) {
            Some(code) => CommandOutput::success(format!("{oid} = INTEGER: {code}\n")),
            None => CommandOutput::success(format!("{oid} = No Such Object\n")),
        }
    }
}

impl Transport for FakePdu {
    async fn invoke(&self, args: &[String]) -> Result<CommandOutput, TransportError> {
        self.calls.lock().push(args.to_vec());
        Ok(self.answer(args))
    }
}

pub fn config() -> DriverConfig {
    DriverConfig::new("10.0.0.2")
        .with_oid_outlets(OID)
        .with_status_cmd(["snmpget", "{host}", "{oid_outlets}.4.{pin}"])
        .with_set_cmd(["snmpset", "{host}", "{oid_outlets}.4.{pin}", "i", "{action}"])
        .with_state_poll(Duration::from_secs(5))
        .with_switch_delay(Duration::from_secs(1))
}

pub fn pin(id: &str) -> Pin {
    Pin::new(id).unwrap()
}
