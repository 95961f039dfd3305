//! Requirement trees and their evaluation

use std::fmt;

use super::{Range, RangeOperator};
use crate::{Identifier, ParseError, Scheme, Version};

/// How the two children of a compound requirement combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    pub fn as_str(&self) -> &'static str {
        match self {
            Connective::And => " ",
            Connective::Or => " || ",
        }
    }
}

/// A version requirement: a single range or two requirements joined by
/// AND/OR
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Requirement {
    Range(Range),
    Compound {
        left: Box<Requirement>,
        connective: Connective,
        right: Box<Requirement>,
    },
}

impl Requirement {
    /// Parse a strict requirement (an exact version)
    pub fn strict(input: &str) -> Result<Self, ParseError> {
        Self::parse(input, Scheme::Strict)
    }

    /// Parse a loose requirement (an exact, possibly partial, version)
    pub fn loose(input: &str) -> Result<Self, ParseError> {
        Self::parse(input, Scheme::Loose)
    }

    /// Parse an npm range
    pub fn npm(input: &str) -> Result<Self, ParseError> {
        Self::parse(input, Scheme::Npm)
    }

    /// Parse a CocoaPods requirement
    pub fn cocoapods(input: &str) -> Result<Self, ParseError> {
        Self::parse(input, Scheme::CocoaPods)
    }

    /// Parse an Ivy requirement
    pub fn ivy(input: &str) -> Result<Self, ParseError> {
        Self::parse(input, Scheme::Ivy)
    }

    /// Requirement matching versions equivalent to the given one
    pub fn exact(version: Version) -> Self {
        Requirement::Range(Range::new(version, RangeOperator::Eq))
    }

    /// Join two requirements with AND
    pub fn and(left: Requirement, right: Requirement) -> Self {
        Self::compound(left, Connective::And, right)
    }

    /// Join two requirements with OR
    pub fn or(left: Requirement, right: Requirement) -> Self {
        Self::compound(left, Connective::Or, right)
    }

    /// A leaf without allocations, swapped in while tearing down a tree
    fn placeholder() -> Self {
        Requirement::Range(Range::new(Version::placeholder(), RangeOperator::Eq))
    }

    pub(crate) fn compound(left: Requirement, connective: Connective, right: Requirement) -> Self {
        Requirement::Compound {
            left: Box::new(left),
            connective,
            right: Box::new(right),
        }
    }

    /// Get the range if this is a leaf
    pub fn as_range(&self) -> Option<&Range> {
        match self {
            Requirement::Range(range) => Some(range),
            Requirement::Compound { .. } => None,
        }
    }

    /// Get all leaf ranges, left to right
    pub fn ranges(&self) -> Vec<&Range> {
        let mut ranges = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Requirement::Range(range) => ranges.push(range),
                Requirement::Compound { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        ranges
    }

    /// Get the maximal sub-requirements joined by `connective`, left to right
    fn operands(&self, connective: Connective) -> Vec<&Requirement> {
        let mut operands = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Requirement::Compound {
                    left,
                    connective: c,
                    right,
                } if *c == connective => {
                    stack.push(right);
                    stack.push(left);
                }
                _ => operands.push(node),
            }
        }
        operands
    }

    fn contains_or(&self) -> bool {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Requirement::Range(_) => {}
                Requirement::Compound {
                    connective: Connective::Or,
                    ..
                } => return true,
                Requirement::Compound { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        false
    }

    /// Get the scheme the requirement's versions were parsed with
    pub fn scheme(&self) -> Scheme {
        let mut node = self;
        loop {
            match node {
                Requirement::Range(range) => return range.version().scheme(),
                Requirement::Compound { left, .. } => node = left.as_ref(),
            }
        }
    }

    /// Check if the version satisfies the requirement
    ///
    /// Inside an AND, a prerelease candidate is only accepted when one of
    /// the ranges names a prerelease of the same `major.minor.patch`. An AND
    /// with an OR somewhere below it requires both sides separately.
    pub fn is_satisfied_by(&self, version: &Version) -> bool {
        match self {
            Requirement::Range(range) => range.is_satisfied_by(version),
            Requirement::Compound {
                connective: Connective::Or,
                ..
            } => self
                .operands(Connective::Or)
                .into_iter()
                .any(|alternative| alternative.is_satisfied_by(version)),
            Requirement::Compound { .. } => self.and_is_satisfied_by(version),
        }
    }

    /// Walk the left spine of an AND; the first node with no OR below it is
    /// matched as one gated conjunction, every right child above it on its own
    fn and_is_satisfied_by(&self, version: &Version) -> bool {
        let mut spine = Vec::new();
        let mut node = self;
        while let Requirement::Compound {
            left,
            connective: Connective::And,
            right,
        } = node
        {
            spine.push((node, right.as_ref()));
            node = left.as_ref();
        }

        let mut has_or = node.contains_or();
        let mut or_below = vec![false; spine.len()];
        for (index, (_, right)) in spine.iter().enumerate().rev() {
            has_or = has_or || right.contains_or();
            or_below[index] = has_or;
        }

        for ((compound, right), or_below) in spine.into_iter().zip(or_below) {
            if !or_below {
                return conjunction_accepts(&compound.ranges(), version);
            }
            if !right.is_satisfied_by(version) {
                return false;
            }
        }
        node.is_satisfied_by(version)
    }

    /// Parse the version in the requirement's scheme and check it
    pub fn is_satisfied_by_str(&self, version: &str) -> Result<bool, ParseError> {
        Ok(self.is_satisfied_by(&Version::parse(version, self.scheme())?))
    }

    /// Get the lowest version that satisfies the requirement
    ///
    /// Releases come first: `0.0.0` and then `0.0.0-0` are tried, and a `>`
    /// anchor without a prerelease yields the next release rather than its
    /// `-0` prerelease. Otherwise the answer is the smallest accepted version
    /// at or just above one of the lower anchors, always with minor and patch
    /// filled in.
    pub fn min_version(&self) -> Option<Version> {
        let scheme = self.scheme();
        let floors = [
            Version::from_parts(scheme, 0, Some(0), Some(0), Vec::new(), None),
            Version::from_parts(scheme, 0, Some(0), Some(0), vec![Identifier::Numeric(0)], None),
        ];
        if let Some(floor) = floors.into_iter().find(|floor| self.is_satisfied_by(floor)) {
            return Some(floor);
        }

        let mut candidates = Vec::new();
        for range in self.ranges() {
            let anchor = range.version();
            match range.operator() {
                RangeOperator::Eq | RangeOperator::Gte => candidates.push(anchor.extrapolate()),
                RangeOperator::Gt if anchor.prerelease().is_empty() => {
                    candidates.push(anchor.next_increment());
                    // An npm partial anchor also covers every release at its precision
                    match (anchor.minor(), anchor.patch()) {
                        (None, _) => candidates.push(anchor.next_major().extrapolate()),
                        (Some(_), None) => candidates.push(anchor.next_minor().extrapolate()),
                        (Some(_), Some(_)) => {}
                    }
                }
                RangeOperator::Gt => {
                    let mut prerelease = anchor.prerelease().to_vec();
                    prerelease.push(Identifier::Numeric(0));
                    candidates.push(Version::from_parts(
                        anchor.scheme(),
                        anchor.major(),
                        Some(anchor.minor().unwrap_or(0)),
                        Some(anchor.patch().unwrap_or(0)),
                        prerelease,
                        None,
                    ));
                }
                RangeOperator::Lt | RangeOperator::Lte => {}
            }
        }

        candidates
            .into_iter()
            .filter(|candidate| self.is_satisfied_by(candidate))
            .min_by(|a, b| a.compare_to(b))
    }
}

fn conjunction_accepts(ranges: &[&Range], version: &Version) -> bool {
    ranges.iter().all(|range| range.is_satisfied_by(version))
        && (version.prerelease().is_empty()
            || ranges.iter().any(|range| admits_prerelease_of(range.version(), version)))
}

fn admits_prerelease_of(anchor: &Version, candidate: &Version) -> bool {
    !anchor.prerelease().is_empty()
        && anchor.major() == candidate.major()
        && anchor.minor().unwrap_or(0) == candidate.minor().unwrap_or(0)
        && anchor.patch().unwrap_or(0) == candidate.patch().unwrap_or(0)
}

/// Long chains are torn down through a worklist instead of nested drops
impl Drop for Requirement {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut node) = pending.pop() {
            detach_children(&mut node, &mut pending);
        }
    }
}

fn detach_children(node: &mut Requirement, pending: &mut Vec<Requirement>) {
    if let Requirement::Compound { left, right, .. } = node {
        for child in [left, right] {
            if matches!(**child, Requirement::Compound { .. }) {
                pending.push(std::mem::replace(&mut **child, Requirement::placeholder()));
            }
        }
    }
}

impl From<Range> for Requirement {
    fn from(range: Range) -> Self {
        Requirement::Range(range)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Part<'a> {
            Node(&'a Requirement),
            Separator(Connective),
        }

        let mut stack = vec![Part::Node(self)];
        while let Some(part) = stack.pop() {
            match part {
                Part::Node(Requirement::Range(range)) => write!(f, "{}", range)?,
                Part::Node(Requirement::Compound {
                    left,
                    connective,
                    right,
                }) => {
                    stack.push(Part::Node(right));
                    stack.push(Part::Separator(*connective));
                    stack.push(Part::Node(left));
                }
                Part::Separator(connective) => f.write_str(connective.as_str())?,
            }
        }
        Ok(())
    }
}
