//! Version schemes (dialects)

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The dialect a version or requirement string is written in
///
/// The scheme decides which version shapes are accepted and which requirement
/// operators are recognized:
///
/// * `Strict` - `major.minor.patch` is mandatory, requirements are exact versions
/// * `Loose` - minor and patch are optional, requirements are exact versions
/// * `Npm` - wildcards, `v` prefixes and the full npm range grammar
/// * `CocoaPods` - comparison operators and the `~>` optimistic operator
/// * `Ivy` - bracket intervals and `+` dynamic revisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Scheme {
    #[default]
    Strict,
    Loose,
    Npm,
    CocoaPods,
    Ivy,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown version scheme: {0}")]
pub struct UnknownSchemeError(pub String);

impl Scheme {
    /// Get all schemes
    pub fn all() -> &'static [Scheme] {
        &[
            Scheme::Strict,
            Scheme::Loose,
            Scheme::Npm,
            Scheme::CocoaPods,
            Scheme::Ivy,
        ]
    }

    /// Get the lowercase name of the scheme
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Strict => "strict",
            Scheme::Loose => "loose",
            Scheme::Npm => "npm",
            Scheme::CocoaPods => "cocoapods",
            Scheme::Ivy => "ivy",
        }
    }

    /// Whether a version of this scheme requires all three numeric components
    pub fn requires_full_version(&self) -> bool {
        matches!(self, Scheme::Strict)
    }

    /// Whether requirement strings of this scheme go through the tokenizer
    pub fn is_tokenized(&self) -> bool {
        matches!(self, Scheme::Npm | Scheme::CocoaPods)
    }
}

impl FromStr for Scheme {
    type Err = UnknownSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Scheme::all()
            .iter()
            .copied()
            .find(|scheme| scheme.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownSchemeError(s.to_string()))
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
