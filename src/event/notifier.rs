// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Change notification.

use tokio::sync::broadcast;

use super::DriverEvent;

/// Default channel capacity for driver events.
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Broadcasts [`DriverEvent`]s to the host.
///
/// Cloning yields a handle to the same channel, so several drivers can
/// publish into one stream. Every event names the driver that raised it.
///
/// Slow subscribers lose the oldest events (`RecvError::Lagged`).
///
/// # Examples
///
/// ```
/// use snmp_outlet::event::{DriverEvent, Notifier};
/// use snmp_outlet::types::Pin;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let notifier = Notifier::new();
/// let mut rx = notifier.subscribe();
///
/// notifier.publish(DriverEvent::WriteSettled {
///     driver: "SnmpOutlet(pdu)".to_string(),
///     pin: Pin::new("1").unwrap(),
///     state: true,
///     confirmed: true,
/// });
///
/// let event = rx.recv().await.unwrap();
/// assert!(!event.is_state_change());
/// assert_eq!(event.driver(), "SnmpOutlet(pdu)");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<DriverEvent>,
}

impl Notifier {
    /// Creates a notifier with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a notifier buffering up to `capacity` events per subscriber.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to events published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DriverEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Delivers `event` to every subscriber.
    pub fn publish(&self, event: DriverEvent) {
        // No subscribers is fine
        let _ = self.sender.send(event);
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
