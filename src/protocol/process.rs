// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Child-process transport.

use std::process::Stdio;

use tokio::process::Command;

use crate::error::TransportError;
use crate::protocol::{CommandOutput, Transport};

/// Runs each command line as a child process.
///
/// The first argument is the program, the rest are passed verbatim; no shell
/// is involved. Standard output is captured as the response text. Standard
/// error is only logged.
///
/// There is no timeout: the SNMP tools enforce their own (`-t`/`-r`).
///
/// # Examples
///
/// ```no_run
/// use snmp_outlet::protocol::{ProcessTransport, Transport};
///
/// # async fn example() -> Result<(), snmp_outlet::error::TransportError> {
/// let args = ["/usr/bin/snmpwalk", "-v", "1", "-c", "private", "10.0.0.2", ".1.3.6.1.2.1.1.5"]
///     .map(String::from);
/// let output = ProcessTransport::new().invoke(&args).await?;
/// println!("{} -> {}", output.status(), output.text());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessTransport;

impl ProcessTransport {
    /// Creates a process transport.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Transport for ProcessTransport {
    async fn invoke(&self, args: &[String]) -> Result<CommandOutput, TransportError> {
        let (program, rest) = args.split_first().ok_or(TransportError::EmptyCommand)?;
        tracing::debug!(command = ?args, "Running transport command");

        let output = Command::new(program)
            .args(rest)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| TransportError::Spawn {
                program: program.clone(),
                source,
            })?;

        // Killed by a signal
        let status = output.status.code().unwrap_or(-1);
        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        if !stderr.is_empty() {
            if status == 0 {
                tracing::warn!(program = %program, stderr = %stderr, "Command wrote to stderr");
            } else {
                tracing::debug!(program = %program, status, stderr = %stderr, "Command failed");
            }
        }

        Ok(CommandOutput::new(status, text))
    }
}
