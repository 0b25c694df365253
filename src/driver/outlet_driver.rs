// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outlet bank driver.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{Notify, broadcast};
use tracing::{debug, error, info};

use crate::command::CommandRenderer;
use crate::config::DriverConfig;
use crate::error::{Error, Result};
use crate::event::{DriverEvent, Notifier};
use crate::protocol::{ProcessTransport, Transport};
use crate::response::PowerResponse;
use crate::state::StateTable;
use crate::types::{OutletAction, Pin, Reading};

use super::{PinIo, PinRegistry, StatePoller};

/// Drives one SNMP outlet bank as a set of boolean pins.
///
/// Pins are registered first, then [`run`](Self::run) keeps the state table in
/// sync with the device while [`read`](Self::read) and
/// [`write`](Self::write) serve the host.
///
/// # Failure policy
///
/// Every outlet is reached through the same transport, so any failed query or
/// set marks **every** pin unknown, not only the one being addressed. Reads of
/// an unknown pin fail with [`Error::Offline`] until a later pass succeeds.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use snmp_outlet::{DriverConfig, OutletDriver, Pin};
///
/// # async fn example() -> snmp_outlet::Result<()> {
/// let config = DriverConfig::from_json(r#"{"host": "192.168.1.20"}"#)?;
/// let mut driver = OutletDriver::snmp_tools("pdu", config)?;
///
/// let lamp = Pin::new("1")?;
/// driver.register_output(lamp.clone(), Some(false));
/// driver.register_input(Pin::new("2")?, Duration::ZERO);
/// driver.prepare();
///
/// let driver = Arc::new(driver);
/// tokio::spawn({
///     let driver = Arc::clone(&driver);
///     async move { driver.run().await }
/// });
///
/// driver.write(&lamp, true).await?;
/// println!("lamp is on: {}", driver.read(&lamp)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct OutletDriver<T> {
    name: String,
    config: DriverConfig,
    transport: T,
    renderer: CommandRenderer,
    state: Mutex<StateTable>,
    notifier: Notifier,
    wake: Notify,
}

impl OutletDriver<ProcessTransport> {
    /// Creates a driver that runs the configured command-line tools.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if the configuration is invalid.
    pub fn snmp_tools(name: impl Into<String>, config: DriverConfig) -> Result<Self> {
        Self::new(name, config, ProcessTransport::new())
    }
}

impl<T: Transport> OutletDriver<T> {
    /// Creates a driver with a custom transport.
    ///
    /// `name` identifies the driver instance in logs and events.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if the configuration is invalid.
    pub fn new(name: impl Into<String>, config: DriverConfig, transport: T) -> Result<Self> {
        config.validate()?;
        let renderer = CommandRenderer::new(&config)?;
        Ok(Self {
            name: name.into(),
            config,
            transport,
            renderer,
            state: Mutex::new(StateTable::new()),
            notifier: Notifier::new(),
            wake: Notify::new(),
        })
    }

    /// Replaces the notifier, for hosts that share one across drivers.
    ///
    /// Only events go through the shared notifier. Each driver keeps its own
    /// loop wake, so a write never wakes another driver's loop.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = notifier;
        self
    }

    /// Returns the instance name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Returns the notifier used for change events.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Subscribes to change events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DriverEvent> {
        self.notifier.subscribe()
    }

    /// Returns a copy of the current state table.
    #[must_use]
    pub fn state(&self) -> StateTable {
        self.state.lock().clone()
    }

    /// Registers an input pin. It starts unknown.
    ///
    /// Outlets have no contact bounce, so `debounce` is ignored.
    pub fn register_input(&mut self, pin: Pin, debounce: Duration) {
        let _ = debounce;
        self.state.get_mut().insert(pin, Reading::Unknown);
    }

    /// Registers an output pin with an initial reading.
    pub fn register_output(&mut self, pin: Pin, initial: Option<bool>) {
        self.state.get_mut().insert(pin, Reading::from(initial));
    }

    /// Logs the device the driver is about to talk to.
    pub fn prepare(&self) {
        info!(
            "Probing driver {} on {}:{} ...",
            self,
            self.config.host(),
            self.config.port()
        );
    }

    /// Runs the reconciliation loop forever.
    pub async fn run(&self) {
        self.run_until(std::future::pending::<()>()).await;
    }

    /// Runs the reconciliation loop until `shutdown` completes.
    ///
    /// `shutdown` is only observed between passes, so a command that has been
    /// started always runs to completion.
    pub async fn run_until<F: Future>(&self, shutdown: F) {
        let mut shutdown = std::pin::pin!(shutdown);
        let mut prev: Option<StateTable> = None;
        loop {
            self.poll().await;

            let current = self.state();
            if prev.as_ref() != Some(&current) {
                info!(driver = %self, "State changed: {current}");
                self.notifier.publish(DriverEvent::StateChanged {
                    driver: self.to_string(),
                    state: current.clone(),
                });
                prev = Some(current);
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    debug!(driver = %self, "Reconciliation loop stopped");
                    return;
                }
                _ = tokio::time::timeout(self.config.state_poll(), self.wake.notified()) => {}
            }
        }
    }

    /// Queries every registered pin once, in registration order.
    ///
    /// Does not compare against earlier passes and raises no event.
    pub async fn poll(&self) {
        let pins = self.state.lock().pins();
        for pin in &pins {
            self.update_power(pin).await;
        }
    }

    /// Returns the last known state of `pin`.
    ///
    /// Never contacts the device.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownPin` if `pin` was never registered and
    /// `Error::Offline` if its state is unknown.
    pub fn read(&self, pin: &Pin) -> Result<bool> {
        let reading = self
            .state
            .lock()
            .get(pin)
            .ok_or_else(|| Error::UnknownPin(pin.to_string()))?;
        reading.as_bool().ok_or_else(|| self.offline())
    }

    /// Switches `pin` on or off.
    ///
    /// After the set command, successful or not, waits for the configured
    /// switch delay, then raises [`DriverEvent::WriteSettled`] and wakes the
    /// reconciliation loop so the outlet is re-read.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownPin` if `pin` was never registered, without
    /// contacting the device, and `Error::Offline` if the set command failed.
    pub async fn write(&self, pin: &Pin, state: bool) -> Result<()> {
        if !self.state.lock().contains(pin) {
            return Err(Error::UnknownPin(pin.to_string()));
        }

        let result = self.set_power(pin, OutletAction::from(state)).await;

        tokio::time::sleep(self.config.switch_delay()).await;
        self.notifier.publish(DriverEvent::WriteSettled {
            driver: self.to_string(),
            pin: pin.clone(),
            state,
            confirmed: result.is_ok(),
        });
        // A wake raised mid-pass is kept until the next wait.
        self.wake.notify_one();

        result.map_err(|_| self.offline())
    }

    async fn update_power(&self, pin: &Pin) {
        let args = self.renderer.status(pin);
        match self.exchange(&args, pin).await {
            Ok(response) => {
                self.state.lock().set(pin, response.reading());
            }
            Err(err) => {
                error!(
                    driver = %self,
                    pin = %pin,
                    "Can't fetch SNMP power status from {}:{}: {err}",
                    self.config.host(),
                    self.config.port()
                );
                self.state.lock().degrade();
            }
        }
    }

    async fn set_power(&self, pin: &Pin, action: OutletAction) -> Result<()> {
        let args = self.renderer.set(pin, action);
        match self.exchange(&args, pin).await {
            Ok(response) => {
                self.state.lock().set(pin, response.reading());
                Ok(())
            }
            Err(err) => {
                error!(
                    driver = %self,
                    pin = %pin,
                    action = %action,
                    "Can't set SNMP power status on {}:{}: {err}",
                    self.config.host(),
                    self.config.port()
                );
                self.state.lock().degrade();
                Err(err)
            }
        }
    }

    async fn exchange(&self, args: &[String], pin: &Pin) -> Result<PowerResponse> {
        let text = self.transport.invoke(args).await?.into_text()?;
        Ok(PowerResponse::parse(self.config.oid_outlets(), pin, &text)?)
    }

    fn offline(&self) -> Error {
        Error::Offline {
            driver: self.to_string(),
        }
    }
}

impl<T> fmt::Display for OutletDriver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SnmpOutlet({})", self.name)
    }
}

impl<T: Transport> PinRegistry for OutletDriver<T> {
    fn register_input(&mut self, pin: Pin, debounce: Duration) {
        Self::register_input(self, pin, debounce);
    }

    fn register_output(&mut self, pin: Pin, initial: Option<bool>) {
        Self::register_output(self, pin, initial);
    }
}

impl<T: Transport> StatePoller for OutletDriver<T> {
    fn prepare(&self) {
        Self::prepare(self);
    }

    fn run(&self) -> impl Future<Output = ()> + Send {
        Self::run(self)
    }
}

impl<T: Transport> PinIo for OutletDriver<T> {
    fn read(&self, pin: &Pin) -> Result<bool> {
        Self::read(self, pin)
    }

    fn write(&self, pin: &Pin, state: bool) -> impl Future<Output = Result<()>> + Send {
        Self::write(self, pin, state)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::error::TransportError;
    use crate::protocol::CommandOutput;

    const OID: &str = "SNMPv2-SMI::enterprises.3808.1.1.3.3.3.1.1";

    /// Answers status queries from a fixed table of outlet codes.
    #[derive(Debug, Default)]
    struct Bank {
        codes: Mutex<HashMap<String, &'static str>>,
        down: AtomicBool,
    }

    impl Bank {
        fn with(codes: &[(&str, &'static str)]) -> Self {
            Self {
                codes: Mutex::new(codes.iter().map(|(p, c)| ((*p).to_string(), *c)).collect()),
                down: AtomicBool::new(false),
            }
        }
    }

    impl Transport for Bank {
        async fn invoke(&self, args: &[String]) -> std::result::Result<CommandOutput, TransportError> {
            if self.down.load(Ordering::SeqCst) {
                return Ok(CommandOutput::new(1, "Timeout: No Response"));
            }
            let oid = &args[6];
            let pin = oid.rsplit('.').next().unwrap_or_default();
            let codes = self.codes.lock();
            Ok(match codes.get(pin) {
                Some(code) => CommandOutput::success(format!("{oid} = INTEGER: {code}\n")),
                None => CommandOutput::success("No Such Instance currently exists at this OID"),
            })
        }
    }

    fn pin(id: &str) -> Pin {
        Pin::new(id).unwrap()
    }

    fn driver(bank: Bank) -> OutletDriver<Bank> {
        let mut driver = OutletDriver::new("test", DriverConfig::new("10.0.0.2"), bank).unwrap();
        driver.register_output(pin("1"), Some(false));
        driver.register_output(pin("2"), Some(false));
        driver
    }

    #[test]
    fn registration_sets_initial_readings() {
        let mut driver = OutletDriver::new("t", DriverConfig::new("pdu"), Bank::default()).unwrap();
        driver.register_input(pin("1"), Duration::from_millis(10));
        driver.register_output(pin("2"), Some(true));
        driver.register_output(pin("3"), None);

        let state = driver.state();
        assert_eq!(state.get(&pin("1")), Some(Reading::Unknown));
        assert_eq!(state.get(&pin("2")), Some(Reading::On));
        assert_eq!(state.get(&pin("3")), Some(Reading::Unknown));
    }

    #[test]
    fn invalid_config_rejected() {
        let result = OutletDriver::new("t", DriverConfig::new("not a host"), Bank::default());
        assert!(matches!(result, Err(Error::Value(_))));
    }

    #[test]
    fn display_name() {
        let driver = driver(Bank::default());
        assert_eq!(driver.to_string(), "SnmpOutlet(test)");
    }

    #[tokio::test]
    async fn poll_updates_each_pin() {
        let driver = driver(Bank::with(&[("1", "1"), ("2", "2")]));
        driver.poll().await;
        assert!(driver.read(&pin("1")).unwrap());
        assert!(!driver.read(&pin("2")).unwrap());
    }

    #[tokio::test]
    async fn one_bad_response_degrades_every_pin() {
        let driver = driver(Bank::with(&[("1", "1")]));
        driver.poll().await;

        let state = driver.state();
        assert_eq!(state.get(&pin("1")), Some(Reading::Unknown));
        assert_eq!(state.get(&pin("2")), Some(Reading::Unknown));
        assert!(matches!(driver.read(&pin("1")), Err(Error::Offline { .. })));
    }

    #[tokio::test]
    async fn unexpected_code_degrades_every_pin() {
        let driver = driver(Bank::with(&[("1", "1"), ("2", "3")]));
        driver.poll().await;
        assert!(driver.state().iter().all(|(_, r)| r.is_unknown()));
    }

    #[tokio::test]
    async fn transport_failure_degrades_every_pin() {
        let bank = Bank::with(&[("1", "1"), ("2", "1")]);
        bank.down.store(true, Ordering::SeqCst);
        let driver = driver(bank);
        driver.poll().await;
        assert!(driver.state().iter().all(|(_, r)| r.is_unknown()));
    }

    #[tokio::test]
    async fn later_success_recovers_polled_pins() {
        let driver = driver(Bank::with(&[("1", "1"), ("2", "2")]));
        driver.transport.down.store(true, Ordering::SeqCst);
        driver.poll().await;
        assert!(driver.read(&pin("2")).is_err());

        driver.transport.down.store(false, Ordering::SeqCst);
        driver.poll().await;
        assert!(driver.read(&pin("1")).unwrap());
        assert!(!driver.read(&pin("2")).unwrap());
    }

    #[test]
    fn read_unregistered_pin() {
        let driver = driver(Bank::default());
        assert!(matches!(driver.read(&pin("9")), Err(Error::UnknownPin(p)) if p == "9"));
    }

    #[test]
    fn read_is_offline_only_when_unknown() {
        let mut driver = driver(Bank::default());
        driver.register_input(pin("3"), Duration::ZERO);
        assert!(!driver.read(&pin("1")).unwrap());
        assert!(matches!(driver.read(&pin("3")), Err(Error::Offline { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn write_unregistered_pin_skips_device() {
        let driver = driver(Bank::default());
        driver.transport.down.store(true, Ordering::SeqCst);

        let result = driver.write(&pin("9"), true).await;
        assert!(matches!(result, Err(Error::UnknownPin(_))));
        // No degradation: the device was never contacted.
        assert!(!driver.read(&pin("1")).unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_write_degrades_and_reports_offline() {
        let driver = driver(Bank::default());
        driver.transport.down.store(true, Ordering::SeqCst);
        let mut rx = driver.subscribe();

        let result = driver.write(&pin("1"), true).await;
        assert!(matches!(result, Err(Error::Offline { .. })));
        assert!(driver.state().iter().all(|(_, r)| r.is_unknown()));

        let event = rx.try_recv().unwrap();
        let DriverEvent::WriteSettled { confirmed, state, .. } = event else {
            panic!("unexpected event: {event:?}");
        };
        assert!(!confirmed);
        assert!(state);
    }

    #[tokio::test]
    async fn exchange_checks_oid_prefix() {
        let driver = driver(Bank::with(&[("1", "1")]));
        let args: Vec<String> = ["snmpwalk", "-v", "1", "-c", "private", "pdu"]
            .into_iter()
            .map(String::from)
            .chain([format!("{OID}.4.1")])
            .collect();
        assert!(driver.exchange(&args, &pin("1")).await.unwrap().is_on());
        assert!(matches!(
            driver.exchange(&args, &pin("2")).await,
            Err(Error::Parse(_))
        ));
    }
}
