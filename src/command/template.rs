// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command-line templates with `{placeholder}` substitution.
//!
//! Templates are parsed once, when the configuration is validated. Rendering a
//! parsed template cannot fail.

use crate::error::ValueError;
use crate::types::{OutletAction, Pin};

/// A value that can be substituted into a command template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `{host}` - device address.
    Host,
    /// `{port}` - device SNMP port.
    Port,
    /// `{oid_outlets}` - base OID of the outlet table.
    OidOutlets,
    /// `{pin}` - outlet identifier.
    Pin,
    /// `{action}` - integer action code, set templates only.
    Action,
}

impl Placeholder {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "host" => Some(Self::Host),
            "port" => Some(Self::Port),
            "oid_outlets" => Some(Self::OidOutlets),
            "pin" => Some(Self::Pin),
            "action" => Some(Self::Action),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Placeholder),
}

/// Values substituted into a template for one invocation.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Device address.
    pub host: &'a str,
    /// Device SNMP port.
    pub port: u16,
    /// Base OID of the outlet table.
    pub oid_outlets: &'a str,
    /// Outlet being addressed.
    pub pin: &'a Pin,
    /// Requested action, for set commands.
    pub action: Option<OutletAction>,
}

/// A parsed command template: one entry per argument.
///
/// `{{` and `}}` stand for literal braces.
///
/// # Examples
///
/// ```
/// use snmp_outlet::command::{CommandTemplate, RenderContext};
/// use snmp_outlet::types::{OutletAction, Pin};
///
/// let template = CommandTemplate::parse(
///     "set_cmd",
///     &["snmpset", "{host}:{port}", "{oid_outlets}.4.{pin}", "i", "{action}"],
///     true,
/// )
/// .unwrap();
///
/// let pin = Pin::new("2").unwrap();
/// let args = template.render(&RenderContext {
///     host: "10.0.0.5",
///     port: 161,
///     oid_outlets: ".1.3.6",
///     pin: &pin,
///     action: Some(OutletAction::Off),
/// });
/// assert_eq!(args, ["snmpset", "10.0.0.5:161", ".1.3.6.4.2", "i", "2"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    args: Vec<Vec<Segment>>,
}

impl CommandTemplate {
    /// Parses a template.
    ///
    /// `name` identifies the template in error messages. `allow_action`
    /// controls whether `{action}` may appear.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` if the template is empty, has unbalanced braces,
    /// or uses a placeholder that is unknown or not allowed.
    pub fn parse<S: AsRef<str>>(
        name: &'static str,
        args: &[S],
        allow_action: bool,
    ) -> Result<Self, ValueError> {
        if args.is_empty() {
            return Err(ValueError::EmptyTemplate(name));
        }
        let args = args
            .iter()
            .map(|arg| parse_arg(arg.as_ref(), name, allow_action))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { args })
    }

    /// Renders the argument list.
    #[must_use]
    pub fn render(&self, ctx: &RenderContext<'_>) -> Vec<String> {
        self.args
            .iter()
            .map(|segments| {
                let mut out = String::new();
                for segment in segments {
                    match segment {
                        Segment::Literal(text) => out.push_str(text),
                        Segment::Field(Placeholder::Host) => out.push_str(ctx.host),
                        Segment::Field(Placeholder::Port) => out.push_str(&ctx.port.to_string()),
                        Segment::Field(Placeholder::OidOutlets) => out.push_str(ctx.oid_outlets),
                        Segment::Field(Placeholder::Pin) => out.push_str(ctx.pin.as_str()),
                        Segment::Field(Placeholder::Action) => {
                            out.push_str(ctx.action.map_or("", OutletAction::code));
                        }
                    }
                }
                out
            })
            .collect()
    }
}

fn parse_arg(
    arg: &str,
    template: &'static str,
    allow_action: bool,
) -> Result<Vec<Segment>, ValueError> {
    let malformed = |reason| ValueError::MalformedTemplate {
        argument: arg.to_string(),
        reason,
    };

    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = arg.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                literal.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                literal.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') | None => return Err(malformed("unclosed '{'")),
                        Some(ch) => name.push(ch),
                    }
                }
                let field = Placeholder::from_name(&name)
                    .filter(|p| allow_action || *p != Placeholder::Action)
                    .ok_or(ValueError::UnknownPlaceholder {
                        placeholder: name,
                        template,
                    })?;
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Field(field));
            }
            '}' => return Err(malformed("single '}' encountered")),
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(pin: &Pin, action: Option<OutletAction>) -> RenderContext<'_> {
        RenderContext {
            host: "pdu.lan",
            port: 1161,
            oid_outlets: "SNMPv2-SMI::enterprises.3808.1.1.3.3.3.1.1",
            pin,
            action,
        }
    }

    #[test]
    fn renders_every_placeholder() {
        let template = CommandTemplate::parse(
            "set_cmd",
            &["-p", "{port}", "{host}", "{oid_outlets}.4.{pin}", "i", "{action}"],
            true,
        )
        .unwrap();
        let pin = Pin::new("7").unwrap();

        let args = template.render(&ctx(&pin, Some(OutletAction::Cycle)));
        assert_eq!(
            args,
            [
                "-p",
                "1161",
                "pdu.lan",
                "SNMPv2-SMI::enterprises.3808.1.1.3.3.3.1.1.4.7",
                "i",
                "3"
            ]
        );
    }

    #[test]
    fn escaped_braces_are_literal() {
        let template = CommandTemplate::parse("status_cmd", &["{{{pin}}}"], false).unwrap();
        let pin = Pin::new("1").unwrap();
        assert_eq!(template.render(&ctx(&pin, None)), ["{1}"]);
    }

    #[test]
    fn action_rejected_in_status_template() {
        let err = CommandTemplate::parse("status_cmd", &["{action}"], false).unwrap_err();
        assert_eq!(
            err,
            ValueError::UnknownPlaceholder {
                placeholder: "action".to_string(),
                template: "status_cmd",
            }
        );
    }

    #[test]
    fn unknown_placeholder_rejected() {
        let err = CommandTemplate::parse("set_cmd", &["{community}"], true).unwrap_err();
        assert!(matches!(err, ValueError::UnknownPlaceholder { .. }));
    }

    #[test]
    fn unbalanced_braces_rejected() {
        assert!(matches!(
            CommandTemplate::parse("set_cmd", &["{host"], true),
            Err(ValueError::MalformedTemplate { .. })
        ));
        assert!(matches!(
            CommandTemplate::parse("set_cmd", &["host}"], true),
            Err(ValueError::MalformedTemplate { .. })
        ));
    }

    #[test]
    fn empty_template_rejected() {
        let args: [&str; 0] = [];
        assert_eq!(
            CommandTemplate::parse("status_cmd", &args, false),
            Err(ValueError::EmptyTemplate("status_cmd"))
        );
    }
}
