//! Operator types for ranges

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::TokenKind;

/// Comparison operator of a range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeOperator {
    /// Equivalent (=)
    Eq,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Lte,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Gte,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid operator: {0}")]
pub struct InvalidOperatorError(pub String);

impl RangeOperator {
    /// Get the string representation of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeOperator::Eq => "=",
            RangeOperator::Lt => "<",
            RangeOperator::Lte => "<=",
            RangeOperator::Gt => ">",
            RangeOperator::Gte => ">=",
        }
    }

    /// Map a comparison token onto its operator
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Eq => Some(RangeOperator::Eq),
            TokenKind::Lt => Some(RangeOperator::Lt),
            TokenKind::Lte => Some(RangeOperator::Lte),
            TokenKind::Gt => Some(RangeOperator::Gt),
            TokenKind::Gte => Some(RangeOperator::Gte),
            _ => None,
        }
    }
}

impl FromStr for RangeOperator {
    type Err = InvalidOperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" | "==" => Ok(RangeOperator::Eq),
            "<" => Ok(RangeOperator::Lt),
            "<=" => Ok(RangeOperator::Lte),
            ">" => Ok(RangeOperator::Gt),
            ">=" => Ok(RangeOperator::Gte),
            _ => Err(InvalidOperatorError(s.to_string())),
        }
    }
}

impl fmt::Display for RangeOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
