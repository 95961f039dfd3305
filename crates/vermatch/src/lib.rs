//! Version parsing, ordering and requirement matching
//!
//! This crate parses versions and requirement strings written in several
//! dialects (strict semver, loose semver, npm, CocoaPods and Ivy) and checks
//! whether a version satisfies a requirement.
//!
//! ```
//! use vermatch::{Requirement, Version};
//!
//! let requirement = Requirement::npm("^1.2.3 || 2.x").unwrap();
//! assert!(requirement.is_satisfied_by(&Version::npm("1.4.0").unwrap()));
//! assert_eq!(requirement.to_string(), ">=1.2.3 <2.0.0 || >=2.0.0 <3.0.0");
//! ```

mod comparator;
pub mod constraint;
mod error;
mod scheme;
mod semver;
pub mod tokenizer;
mod version;

pub use comparator::Comparator;
pub use constraint::{Connective, InvalidOperatorError, Range, RangeOperator, Requirement};
pub use error::ParseError;
pub use scheme::{Scheme, UnknownSchemeError};
pub use semver::Semver;
pub use tokenizer::{tokenize, Token, TokenKind};
pub use version::{Identifier, Version, VersionDiff};

/// Parse a version in the given scheme
pub fn parse_version(input: &str, scheme: Scheme) -> Result<Version, ParseError> {
    Version::parse(input, scheme)
}

/// Parse a requirement in the given scheme
pub fn parse_requirement(input: &str, scheme: Scheme) -> Result<Requirement, ParseError> {
    Requirement::parse(input, scheme)
}
