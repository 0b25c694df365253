// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transports that carry rendered commands to the device.
//!
//! The driver does not speak SNMP itself. It hands a rendered argument list to
//! a [`Transport`] and decodes the text that comes back.
//!
//! # Transports
//!
//! - [`ProcessTransport`]: runs the argument list as a child process, for use
//!   with the net-snmp command-line tools
//!
//! Anything else that can answer with an exit status and a line of text, such
//! as a native SNMP client or a test double, implements the same trait.

mod process;

pub use process::ProcessTransport;

use std::future::Future;
use std::sync::Arc;

use crate::error::TransportError;

/// Exit status and captured output of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    status: i32,
    text: String,
}

impl CommandOutput {
    /// Creates an output with the given exit status and text.
    #[must_use]
    pub fn new(status: i32, text: impl Into<String>) -> Self {
        Self {
            status,
            text: text.into(),
        }
    }

    /// Creates a successful output.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(0, text)
    }

    /// Returns the exit status.
    #[must_use]
    pub fn status(&self) -> i32 {
        self.status
    }

    /// Returns the captured text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `true` if the exit status is zero.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == 0
    }

    /// Returns the captured text, or an error for a non-zero exit status.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::ExitStatus` if the status is not zero.
    pub fn into_text(self) -> Result<String, TransportError> {
        if self.is_success() {
            Ok(self.text)
        } else {
            Err(TransportError::ExitStatus { code: self.status })
        }
    }
}

/// Executes a rendered command line.
///
/// Implementations must not retry or interpret the output; a non-zero status
/// is reported through [`CommandOutput`], and only a failure to run at all is
/// an `Err`.
pub trait Transport: Send + Sync {
    /// Runs `args` and returns the exit status and captured text.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the command could not be run.
    fn invoke(
        &self,
        args: &[String],
    ) -> impl Future<Output = Result<CommandOutput, TransportError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn invoke(
        &self,
        args: &[String],
    ) -> impl Future<Output = Result<CommandOutput, TransportError>> + Send {
        (**self).invoke(args)
    }
}
