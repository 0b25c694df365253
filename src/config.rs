// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Driver configuration.

use std::net::IpAddr;
use std::time::Duration;

use serde::Deserialize;

use crate::command::CommandTemplate;
use crate::error::{Error, ValueError};

/// Configuration for one outlet bank.
///
/// Every option except the host has a default matching a `CyberPower` PDU
/// queried with the net-snmp command-line tools.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use snmp_outlet::DriverConfig;
///
/// let config = DriverConfig::new("192.168.1.20")
///     .with_port(1161)
///     .with_state_poll(Duration::from_secs(2));
/// assert!(config.validate().is_ok());
///
/// let config = DriverConfig::from_json(r#"{"host": "pdu.lan", "switch_delay": 2.5}"#).unwrap();
/// assert_eq!(config.switch_delay(), Duration::from_millis(2500));
/// assert_eq!(config.port(), 161);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    host: String,
    port: u16,
    oid_outlets: String,
    status_cmd: Vec<String>,
    set_cmd: Vec<String>,
    state_poll: Duration,
    switch_delay: Duration,
}

impl DriverConfig {
    /// Default SNMP port.
    pub const DEFAULT_PORT: u16 = 161;
    /// Default base OID of the outlet table (`CyberPower` ePDU).
    pub const DEFAULT_OID_OUTLETS: &'static str = "SNMPv2-SMI::enterprises.3808.1.1.3.3.3.1.1";
    /// Default interval between reconciliation passes.
    pub const DEFAULT_STATE_POLL: Duration = Duration::from_secs(5);
    /// Default settle delay after a write.
    pub const DEFAULT_SWITCH_DELAY: Duration = Duration::from_secs(1);
    /// Lower bound for both intervals.
    pub const MIN_INTERVAL: Duration = Duration::from_millis(100);

    /// Creates a configuration for the device at `host` with default options.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            oid_outlets: Self::DEFAULT_OID_OUTLETS.to_string(),
            status_cmd: default_status_cmd(),
            set_cmd: default_set_cmd(),
            state_poll: Self::DEFAULT_STATE_POLL,
            switch_delay: Self::DEFAULT_SWITCH_DELAY,
        }
    }

    /// Parses a JSON option document.
    ///
    /// Keys mirror the accessor names. Intervals are given in seconds.
    /// Unknown keys are rejected.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the document cannot be deserialized and
    /// `Error::Value` if it fails validation.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let raw: RawOptions = serde_json::from_str(json)?;
        let config = Self {
            host: raw.host,
            port: raw.port.resolve()?,
            oid_outlets: raw.oid_outlets,
            status_cmd: raw.status_cmd,
            set_cmd: raw.set_cmd,
            state_poll: seconds("state_poll", raw.state_poll)?,
            switch_delay: seconds("switch_delay", raw.switch_delay)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the SNMP port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the base OID of the outlet table.
    #[must_use]
    pub fn with_oid_outlets(mut self, oid: impl Into<String>) -> Self {
        self.oid_outlets = oid.into();
        self
    }

    /// Sets the status query command template.
    #[must_use]
    pub fn with_status_cmd<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.status_cmd = args.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the set command template.
    #[must_use]
    pub fn with_set_cmd<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_cmd = args.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the interval between reconciliation passes.
    #[must_use]
    pub fn with_state_poll(mut self, interval: Duration) -> Self {
        self.state_poll = interval;
        self
    }

    /// Sets the settle delay applied after every write.
    #[must_use]
    pub fn with_switch_delay(mut self, delay: Duration) -> Self {
        self.switch_delay = delay;
        self
    }

    /// Returns the device address.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the SNMP port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the base OID of the outlet table.
    #[must_use]
    pub fn oid_outlets(&self) -> &str {
        &self.oid_outlets
    }

    /// Returns the status query command template.
    #[must_use]
    pub fn status_cmd(&self) -> &[String] {
        &self.status_cmd
    }

    /// Returns the set command template.
    #[must_use]
    pub fn set_cmd(&self) -> &[String] {
        &self.set_cmd
    }

    /// Returns the interval between reconciliation passes.
    #[must_use]
    pub fn state_poll(&self) -> Duration {
        self.state_poll
    }

    /// Returns the settle delay applied after every write.
    #[must_use]
    pub fn switch_delay(&self) -> Duration {
        self.switch_delay
    }

    /// Checks every option.
    ///
    /// # Errors
    ///
    /// Returns the first `ValueError` found.
    pub fn validate(&self) -> Result<(), ValueError> {
        if !is_ip_or_host(&self.host) {
            return Err(ValueError::InvalidHost(self.host.clone()));
        }
        if self.port == 0 {
            return Err(ValueError::InvalidPort);
        }
        if self.oid_outlets.trim().is_empty() {
            return Err(ValueError::EmptyOid);
        }
        CommandTemplate::parse("status_cmd", self.status_cmd(), false)?;
        CommandTemplate::parse("set_cmd", self.set_cmd(), true)?;
        check_interval("state_poll", self.state_poll)?;
        check_interval("switch_delay", self.switch_delay)?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawOptions {
    host: String,
    port: PortOption,
    oid_outlets: String,
    status_cmd: Vec<String>,
    set_cmd: Vec<String>,
    state_poll: f64,
    switch_delay: f64,
}

impl Default for RawOptions {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: PortOption::Number(DriverConfig::DEFAULT_PORT),
            oid_outlets: DriverConfig::DEFAULT_OID_OUTLETS.to_string(),
            status_cmd: default_status_cmd(),
            set_cmd: default_set_cmd(),
            state_poll: DriverConfig::DEFAULT_STATE_POLL.as_secs_f64(),
            switch_delay: DriverConfig::DEFAULT_SWITCH_DELAY.as_secs_f64(),
        }
    }
}

/// A port given either as a number or as a numeric string (`"161"`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PortOption {
    Number(u16),
    Text(String),
}

impl PortOption {
    fn resolve(self) -> Result<u16, ValueError> {
        match self {
            Self::Number(port) => Ok(port),
            Self::Text(text) => text.trim().parse().map_err(|_| ValueError::InvalidPort),
        }
    }
}

fn default_status_cmd() -> Vec<String> {
    [
        "/usr/bin/snmpwalk",
        "-v",
        "1",
        "-c",
        "private",
        "{host}",
        "{oid_outlets}.4.{pin}",
    ]
    .map(String::from)
    .to_vec()
}

fn default_set_cmd() -> Vec<String> {
    [
        "/usr/bin/snmpset",
        "-v",
        "1",
        "-c",
        "private",
        "{host}",
        "{oid_outlets}.4.{pin}",
        "i",
        "{action}",
    ]
    .map(String::from)
    .to_vec()
}

#[allow(clippy::cast_possible_truncation)]
fn min_interval_ms() -> u64 {
    DriverConfig::MIN_INTERVAL.as_millis() as u64
}

fn seconds(name: &'static str, value: f64) -> Result<Duration, ValueError> {
    Duration::try_from_secs_f64(value).map_err(|_| ValueError::IntervalTooShort {
        name,
        min_ms: min_interval_ms(),
        actual: value.to_string(),
    })
}

fn check_interval(name: &'static str, value: Duration) -> Result<(), ValueError> {
    if value < DriverConfig::MIN_INTERVAL {
        return Err(ValueError::IntervalTooShort {
            name,
            min_ms: min_interval_ms(),
            actual: format!("{value:?}"),
        });
    }
    Ok(())
}

fn is_ip_or_host(host: &str) -> bool {
    if host.parse::<IpAddr>().is_ok() {
        return true;
    }
    let name = host.strip_suffix('.').unwrap_or(host);
    !name.is_empty()
        && name.len() <= 253
        && name.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}
