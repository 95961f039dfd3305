//! Error type shared by version and requirement parsing

use thiserror::Error;

use crate::Scheme;

/// Error raised when a version or requirement string cannot be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid version string \"{input}\": {reason}")]
    InvalidVersion { input: String, reason: String },
    #[error("Invalid version string \"{input}\": missing {component} component")]
    MissingComponent { input: String, component: &'static str },
    #[error("Invalid version string \"{0}\": build metadata is empty")]
    EmptyBuild(String),
    #[error("Invalid version string \"{0}\": empty prerelease identifier")]
    EmptyIdentifier(String),
    #[error("Operator \"{operator}\" is not supported by the {scheme} scheme in \"{input}\"")]
    UnsupportedOperator { input: String, operator: char, scheme: Scheme },
    #[error("{kind} requirements are not supported by the {scheme} scheme: \"{input}\"")]
    UnsupportedScheme { input: String, kind: &'static str, scheme: Scheme },
    #[error("Unbalanced parentheses in requirement \"{0}\"")]
    UnbalancedGroup(String),
    #[error("Could not parse requirement \"{input}\": {reason}")]
    MissingOperand { input: String, reason: String },
    #[error("Invalid requirement \"{0}\"")]
    InvalidRequirement(String),
}

impl ParseError {
    pub(crate) fn invalid_version(input: &str, reason: impl Into<String>) -> Self {
        ParseError::InvalidVersion {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn missing_operand(input: &str, reason: impl Into<String>) -> Self {
        ParseError::MissingOperand {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Get the text that failed to parse
    pub fn input(&self) -> &str {
        match self {
            ParseError::InvalidVersion { input, .. }
            | ParseError::MissingComponent { input, .. }
            | ParseError::UnsupportedOperator { input, .. }
            | ParseError::UnsupportedScheme { input, .. }
            | ParseError::MissingOperand { input, .. } => input,
            ParseError::EmptyBuild(input)
            | ParseError::EmptyIdentifier(input)
            | ParseError::UnbalancedGroup(input)
            | ParseError::InvalidRequirement(input) => input,
        }
    }
}
