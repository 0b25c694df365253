// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Watch the outlets of a PDU and optionally switch one of them.
//!
//! Requires the net-snmp tools (`snmpwalk`, `snmpset`) in `/usr/bin`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example poll_pdu -- <host> <outlets> [<outlet> <on|off>]
//! ```
//!
//! # Example
//!
//! ```bash
//! cargo run --example poll_pdu -- 192.168.1.20 1,2,3,4 2 on
//! ```

use std::env;
use std::sync::Arc;
use std::time::Duration;

use snmp_outlet::{DriverConfig, DriverEvent, OutletDriver, Pin};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() != 3 && args.len() != 5 {
        eprintln!("Usage: {} <host> <outlets> [<outlet> <on|off>]", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  cargo run --example poll_pdu -- 192.168.1.20 1,2,3,4 2 on");
        std::process::exit(1);
    }

    let config = DriverConfig::new(&args[1]).with_state_poll(Duration::from_secs(2));
    let mut driver = OutletDriver::snmp_tools("demo", config)?;
    for outlet in args[2].split(',') {
        driver.register_output(Pin::new(outlet)?, None);
    }
    driver.prepare();

    let driver = Arc::new(driver);
    let mut events = driver.subscribe();
    tokio::spawn({
        let driver = Arc::clone(&driver);
        async move { driver.run().await }
    });

    if let [_, _, _, outlet, state] = args.as_slice() {
        let pin = Pin::new(outlet)?;
        let on = state == "on";
        println!("Switching outlet {pin} {}...", if on { "on" } else { "off" });
        match driver.write(&pin, on).await {
            Ok(()) => println!("Outlet {pin} settled"),
            Err(e) => eprintln!("Write failed: {e}"),
        }
    }

    println!("Watching outlets for 30s...");
    let deadline = tokio::time::sleep(Duration::from_secs(30));
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            () = &mut deadline => break,
            event = events.recv() => match event {
                Ok(DriverEvent::StateChanged { state, .. }) => println!("Outlets: {state}"),
                Ok(DriverEvent::WriteSettled { pin, confirmed, .. }) => {
                    println!("Write on {pin} settled (confirmed: {confirmed})");
                }
                Err(_) => break,
            },
        }
    }

    Ok(())
}
