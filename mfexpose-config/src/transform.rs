//! Rewriting of re-export source specifiers.
//!
//! Facades live one directory below the barrel in most layouts, so the quoted
//! specifier copied from the barrel usually needs its relative prefix
//! adjusted before it is embedded in a facade.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Replace the first occurrence of `from` with `to`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReplaceRule {
    pub from: String,
    pub to: String,
}

impl ReplaceRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn apply(&self, specifier: &str) -> String {
        specifier.replacen(&self.from, &self.to, 1)
    }
}

impl fmt::Display for ReplaceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.from, self.to)
    }
}

/// Parses `FROM=TO`, as accepted by `--replace` on the command line.
impl FromStr for ReplaceRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((from, to)) if !from.is_empty() => Ok(ReplaceRule::new(from, to)),
            _ => Err(format!("invalid replace rule '{}', expected FROM=TO", s)),
        }
    }
}

/// An ordered list of replace rules applied to every quoted source
/// specifier, quotes included. An empty transform is the identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transform {
    rules: Vec<ReplaceRule>,
}

impl Transform {
    pub fn new(rules: Vec<ReplaceRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[ReplaceRule] {
        &self.rules
    }

    pub fn is_identity(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn push(&mut self, rule: ReplaceRule) {
        self.rules.push(rule);
    }

    pub fn apply(&self, specifier: &str) -> String {
        self.rules
            .iter()
            .fold(specifier.to_string(), |acc, rule| rule.apply(&acc))
    }
}
