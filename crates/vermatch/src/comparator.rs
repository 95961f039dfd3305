//! Version comparison utilities

use std::cmp::Ordering;

use crate::{Identifier, Scheme, Version};

/// Comparator for ordering versions
pub struct Comparator;

impl Comparator {
    /// Check if version1 > version2
    pub fn greater_than(version1: &Version, version2: &Version) -> bool {
        Self::compare(version1, version2) == Ordering::Greater
    }

    /// Check if version1 >= version2
    pub fn greater_than_or_equal_to(version1: &Version, version2: &Version) -> bool {
        Self::compare(version1, version2) != Ordering::Less
    }

    /// Check if version1 < version2
    pub fn less_than(version1: &Version, version2: &Version) -> bool {
        Self::compare(version1, version2) == Ordering::Less
    }

    /// Check if version1 <= version2
    pub fn less_than_or_equal_to(version1: &Version, version2: &Version) -> bool {
        Self::compare(version1, version2) != Ordering::Greater
    }

    /// Check if version1 and version2 sort the same
    pub fn equal_to(version1: &Version, version2: &Version) -> bool {
        Self::compare(version1, version2) == Ordering::Equal
    }

    /// Compare version1 to version2
    ///
    /// Numeric components are compared first, absent ones counting as zero.
    /// When either side is an npm version, an absent minor or patch acts as a
    /// wildcard and ends the comparison as equal. Build metadata never counts.
    pub fn compare(version1: &Version, version2: &Version) -> Ordering {
        let partial = version1.scheme() == Scheme::Npm || version2.scheme() == Scheme::Npm;

        match version1.major().cmp(&version2.major()) {
            Ordering::Equal => {}
            ord => return ord,
        }

        if partial && (version1.minor().is_none() || version2.minor().is_none()) {
            return Ordering::Equal;
        }
        match version1.minor().unwrap_or(0).cmp(&version2.minor().unwrap_or(0)) {
            Ordering::Equal => {}
            ord => return ord,
        }

        if partial && (version1.patch().is_none() || version2.patch().is_none()) {
            return Ordering::Equal;
        }
        match version1.patch().unwrap_or(0).cmp(&version2.patch().unwrap_or(0)) {
            Ordering::Equal => {}
            ord => return ord,
        }

        Self::compare_prerelease(version1.prerelease(), version2.prerelease())
    }

    /// Compare two prerelease identifier lists
    ///
    /// An empty list (a release) sorts above any prerelease. Otherwise the
    /// first differing identifier decides, and when one list is a prefix of
    /// the other the longer one is greater.
    pub fn compare_prerelease(left: &[Identifier], right: &[Identifier]) -> Ordering {
        match (left.is_empty(), right.is_empty()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }

        left.iter()
            .zip(right)
            .map(|(a, b)| Self::compare_identifiers(a, b))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or_else(|| left.len().cmp(&right.len()))
    }

    /// Numeric identifiers compare as numbers, anything else case-insensitively
    pub fn compare_identifiers(left: &Identifier, right: &Identifier) -> Ordering {
        if let (Some(a), Some(b)) = (left.as_number(), right.as_number()) {
            return a.cmp(&b);
        }
        let a = left.as_text();
        let b = right.as_text();
        a.bytes()
            .map(|c| c.to_ascii_lowercase())
            .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
    }
}
