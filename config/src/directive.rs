//! DIST_REPOS directives
//!
//! A directive list is a whitespace-separated set of repo or group names:
//! - `name` or `+name` enables
//! - `-name` disables

use crate::{ConfigError, Result};
use std::fmt;
use std::str::FromStr;

/// Requested state for a repository
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Sign {
    #[default]
    Enable,
    Disable,
}

impl Sign {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sign::Enable => "enable",
            Sign::Disable => "disable",
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single signed token from the directive list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Name with the sign prefix removed
    pub raw_name: String,
    /// Whether the named repos are enabled or disabled
    pub sign: Sign,
}

impl Directive {
    /// Create a directive
    pub fn new(raw_name: impl Into<String>, sign: Sign) -> Self {
        Self {
            raw_name: raw_name.into(),
            sign,
        }
    }

    /// Create an enabling directive
    pub fn enable(raw_name: impl Into<String>) -> Self {
        Self::new(raw_name, Sign::Enable)
    }

    /// Create a disabling directive
    pub fn disable(raw_name: impl Into<String>) -> Self {
        Self::new(raw_name, Sign::Disable)
    }
}

impl FromStr for Directive {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        let (sign, name) = if let Some(rest) = token.strip_prefix('-') {
            (Sign::Disable, rest)
        } else if let Some(rest) = token.strip_prefix('+') {
            (Sign::Enable, rest)
        } else {
            (Sign::Enable, token)
        };

        if name.is_empty() {
            return Err(ConfigError::InvalidDirective(s.to_string()));
        }

        Ok(Self::new(name, sign))
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sign {
            Sign::Enable => write!(f, "+{}", self.raw_name),
            Sign::Disable => write!(f, "-{}", self.raw_name),
        }
    }
}

/// Parse a directive list such as `"-STX +OS -updates"`
///
/// Empty or whitespace-only input yields no directives.
pub fn parse_directives(input: &str) -> Result<Vec<Directive>> {
    input.split_whitespace().map(Directive::from_str).collect()
}
