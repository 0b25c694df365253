// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `snmp_outlet` library.
//!
//! Protocol-level failures ([`TransportError`], [`ParseError`]) are absorbed
//! by the driver and turned into unknown readings. Only [`Error::Offline`] and
//! [`Error::UnknownPin`] cross the driver boundary from `read`/`write`, so a
//! host can tell an unreachable device apart from bad input.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value failed validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The external tool could not be run or reported failure.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The external tool's output did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A configuration document could not be deserialized.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The outlet state is unknown, usually because the device is unreachable.
    #[error("driver {driver} is offline")]
    Offline {
        /// Display name of the driver that reported the condition.
        driver: String,
    },

    /// The pin was never registered with the driver.
    #[error("unknown pin: {0}")]
    UnknownPin(String),
}

/// Errors related to value validation and constraints.
///
/// These are raised while building pins and driver configuration, never
/// while the driver is running.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A pin identifier was empty after trimming whitespace.
    #[error("pin identifier must not be empty")]
    EmptyPin,

    /// The host is neither an IP address nor a valid hostname.
    #[error("invalid host: {0:?}")]
    InvalidHost(String),

    /// Port zero is not addressable.
    #[error("port must be in range [1, 65535]")]
    InvalidPort,

    /// The outlet table OID was empty.
    #[error("outlet OID must not be empty")]
    EmptyOid,

    /// An interval is shorter than allowed, or not a finite number.
    #[error("{name} must be at least {min_ms} ms, got {actual}")]
    IntervalTooShort {
        /// Name of the offending option.
        name: &'static str,
        /// Lower bound in milliseconds.
        min_ms: u64,
        /// The value as configured.
        actual: String,
    },

    /// A command template has no arguments.
    #[error("{0} must not be empty")]
    EmptyTemplate(&'static str),

    /// A command template has unbalanced braces.
    #[error("malformed template argument {argument:?}: {reason}")]
    MalformedTemplate {
        /// The template argument as written.
        argument: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// A command template refers to a placeholder that cannot be filled.
    #[error("placeholder {{{placeholder}}} is not allowed in {template}")]
    UnknownPlaceholder {
        /// The placeholder name without braces.
        placeholder: String,
        /// Name of the template containing it.
        template: &'static str,
    },
}

/// Errors raised while invoking the external command-line tool.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No program was given to run.
    #[error("empty command line")]
    EmptyCommand,

    /// The process could not be started or waited on.
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// The program that failed to start.
        program: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The tool exited with a non-zero status.
    #[error("SNMP error: retcode={code}")]
    ExitStatus {
        /// Exit code, or -1 when the process was killed by a signal.
        code: i32,
    },
}

/// Errors related to decoding the tool's output.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The output did not start with the expected OID prefix.
    #[error("unexpected response: {0:?}")]
    UnexpectedFormat(String),

    /// The trailing status code is not an on or off code.
    #[error("unknown outlet status code {0:?}")]
    UnknownCode(char),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
