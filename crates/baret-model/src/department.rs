// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const DEPARTMENT_MAX_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Empty(&'static str),
    Trimmed(&'static str),
    TooLong(&'static str, usize),
    InvalidFormat(&'static str),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::Trimmed(name) => {
                write!(f, "{name} must not contain leading/trailing whitespace")
            }
            Self::TooLong(name, max) => write!(f, "{name} exceeds max length {max}"),
            Self::InvalidFormat(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ParseError {}

/// Department tag used to scope listings and exports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct Department(String);

impl Department {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("department"));
        }
        if input.trim() != input {
            return Err(ParseError::Trimmed("department"));
        }
        if input.len() > DEPARTMENT_MAX_LEN {
            return Err(ParseError::TooLong("department", DEPARTMENT_MAX_LEN));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_plain_names() {
        let d = Department::parse("Üretim").unwrap();
        assert_eq!(d.as_str(), "Üretim");
    }

    #[test]
    fn parse_rejects_empty_and_padded() {
        assert_eq!(Department::parse(""), Err(ParseError::Empty("department")));
        assert_eq!(
            Department::parse(" Depo"),
            Err(ParseError::Trimmed("department"))
        );
    }

    #[test]
    fn parse_rejects_over_limit() {
        let long = "d".repeat(DEPARTMENT_MAX_LEN + 1);
        assert_eq!(
            Department::parse(&long),
            Err(ParseError::TooLong("department", DEPARTMENT_MAX_LEN))
        );
    }
}
