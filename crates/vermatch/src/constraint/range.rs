//! A single comparison against an anchor version

use std::fmt;

use super::RangeOperator;
use crate::{ParseError, Scheme, Version};

/// An operator paired with the version it compares against
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Range {
    version: Version,
    operator: RangeOperator,
}

impl Range {
    /// Create a new range
    pub fn new(version: Version, operator: RangeOperator) -> Self {
        Range { version, operator }
    }

    /// Parse the anchor version in the given scheme and create a range
    pub fn parse(version: &str, operator: RangeOperator, scheme: Scheme) -> Result<Self, ParseError> {
        Ok(Range::new(Version::parse(version, scheme)?, operator))
    }

    /// Get the anchor version
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Get the operator
    pub fn operator(&self) -> RangeOperator {
        self.operator
    }

    /// Check if the candidate lies within the range
    pub fn is_satisfied_by(&self, candidate: &Version) -> bool {
        match self.operator {
            RangeOperator::Eq => candidate.is_equivalent_to(&self.version),
            RangeOperator::Lt => candidate.is_lower_than(&self.version),
            RangeOperator::Lte => candidate.is_lower_than_or_equal_to(&self.version),
            RangeOperator::Gt => candidate.is_greater_than(&self.version),
            RangeOperator::Gte => candidate.is_greater_than_or_equal_to(&self.version),
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}
