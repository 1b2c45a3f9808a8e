use std::fmt;

use crate::address::ParsedAddress;

/// A root-relative position in a block tree, one key per level.
///
/// Moving with `child` goes one pscale deeper (X-), `parent` one pscale up
/// (X+). Siblings are the spread of the parent (X~).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    digits: Vec<String>,
}

impl Address {
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dot-separated path such as `2.3.4`; empty means root
    pub fn from_path(path: &str) -> Self {
        Self {
            digits: path
                .split('.')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn child(&self, digit: impl Into<String>) -> Self {
        let mut digits = self.digits.clone();
        digits.push(digit.into());
        Self { digits }
    }

    /// `None` at the root
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.digits.split_last()?;
        Some(Self {
            digits: rest.to_vec(),
        })
    }

    pub fn is_root(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn digits(&self) -> &[String] {
        &self.digits
    }

    /// Last key on the path
    pub fn last_digit(&self) -> Option<&str> {
        self.digits.last().map(String::as_str)
    }

    /// Pscale of the node this address points at, in delineation terms
    pub fn pscale(&self) -> i32 {
        -(self.digits.len() as i32)
    }

    /// Dot path for navigation and spread views, `None` at the root
    pub fn path(&self) -> Option<String> {
        (!self.is_root()).then(|| self.digits.join("."))
    }

    /// Delineation spindle string: `0` for the root, else `0.` plus the keys.
    ///
    /// A trailing `0` key is lost when this string is parsed back, since
    /// trailing zeros are stripped from the fractional part; walk with
    /// [`Address::to_parsed`] instead when that matters.
    pub fn spindle(&self) -> String {
        if self.is_root() {
            "0".to_string()
        } else {
            format!("0.{}", self.digits.concat())
        }
    }

    pub fn to_parsed(&self) -> ParsedAddress {
        ParsedAddress {
            walk_digits: self.digits.clone(),
            ..ParsedAddress::root()
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spindle())
    }
}
