// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-outlet reading table.

use std::fmt;

use crate::types::{Pin, Reading};

/// Readings for every registered pin, in registration order.
///
/// The key set is fixed by registration: updating a pin that was never
/// registered does nothing, and degrading keeps every key while blanking its
/// value. Two tables are equal only if every pin has the same reading.
///
/// # Examples
///
/// ```
/// use snmp_outlet::state::StateTable;
/// use snmp_outlet::types::{Pin, Reading};
///
/// let one = Pin::new("1").unwrap();
/// let two = Pin::new("2").unwrap();
///
/// let mut table = StateTable::new();
/// table.insert(one.clone(), Reading::Off);
/// table.insert(two.clone(), Reading::Unknown);
///
/// table.set(&one, Reading::On);
/// assert_eq!(table.get(&one), Some(Reading::On));
///
/// table.degrade();
/// assert!(table.iter().all(|(_, reading)| reading.is_unknown()));
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateTable {
    // A bank has a handful of outlets; a vector keeps registration order.
    entries: Vec<(Pin, Reading)>,
}

impl StateTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `pin` with an initial reading.
    ///
    /// Registering the same pin again replaces its reading in place.
    pub fn insert(&mut self, pin: Pin, reading: Reading) {
        match self.position(&pin) {
            Some(idx) => self.entries[idx].1 = reading,
            None => self.entries.push((pin, reading)),
        }
    }

    /// Returns the reading for `pin`, or `None` if it was never registered.
    #[must_use]
    pub fn get(&self, pin: &Pin) -> Option<Reading> {
        self.position(pin).map(|idx| self.entries[idx].1)
    }

    /// Updates the reading of a registered pin.
    ///
    /// Returns `false` if the pin was never registered.
    pub fn set(&mut self, pin: &Pin, reading: Reading) -> bool {
        match self.position(pin) {
            Some(idx) => {
                self.entries[idx].1 = reading;
                true
            }
            None => false,
        }
    }

    /// Marks every pin unknown.
    pub fn degrade(&mut self) {
        for (_, reading) in &mut self.entries {
            *reading = Reading::Unknown;
        }
    }

    /// Returns `true` if `pin` is registered.
    #[must_use]
    pub fn contains(&self, pin: &Pin) -> bool {
        self.position(pin).is_some()
    }

    /// Returns the registered pins in registration order.
    #[must_use]
    pub fn pins(&self) -> Vec<Pin> {
        self.entries.iter().map(|(pin, _)| pin.clone()).collect()
    }

    /// Iterates over `(pin, reading)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Pin, Reading)> {
        self.entries.iter().map(|(pin, reading)| (pin, *reading))
    }

    /// Returns the number of registered pins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no pin is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, pin: &Pin) -> Option<usize> {
        self.entries.iter().position(|(p, _)| p == pin)
    }
}

impl fmt::Display for StateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (pin, reading)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{pin}: {reading}")?;
        }
        f.write_str("}")
    }
}
