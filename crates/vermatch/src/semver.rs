//! Semver facade providing one-shot version operations

use crate::{Requirement, Scheme, Version};

/// Main facade for string-in, answer-out version operations
pub struct Semver;

impl Semver {
    /// Check if a version satisfies a requirement, both written in `scheme`
    ///
    /// Anything that fails to parse does not satisfy.
    pub fn satisfies(version: &str, requirement: &str, scheme: Scheme) -> bool {
        let version = match Version::parse(version, scheme) {
            Ok(v) => v,
            Err(_) => return false,
        };

        match Requirement::parse(requirement, scheme) {
            Ok(requirement) => requirement.is_satisfied_by(&version),
            Err(_) => false,
        }
    }

    /// Return all versions that satisfy the given requirement
    pub fn satisfied_by(versions: &[&str], requirement: &str, scheme: Scheme) -> Vec<String> {
        let requirement = match Requirement::parse(requirement, scheme) {
            Ok(r) => r,
            Err(_) => return Vec::new(),
        };

        versions
            .iter()
            .filter_map(|v| {
                let version = Version::parse(v, scheme).ok()?;
                requirement.is_satisfied_by(&version).then(|| v.to_string())
            })
            .collect()
    }

    /// Return the highest version that satisfies the given requirement
    pub fn max_satisfying(versions: &[&str], requirement: &str, scheme: Scheme) -> Option<String> {
        Self::rsort(&Self::as_refs(&Self::satisfied_by(versions, requirement, scheme)), scheme)
            .into_iter()
            .next()
    }

    /// Sort versions in ascending order
    pub fn sort(versions: &[&str], scheme: Scheme) -> Vec<String> {
        Self::usort(versions, scheme, true)
    }

    /// Sort versions in descending order (reverse sort)
    pub fn rsort(versions: &[&str], scheme: Scheme) -> Vec<String> {
        Self::usort(versions, scheme, false)
    }

    fn usort(versions: &[&str], scheme: Scheme, ascending: bool) -> Vec<String> {
        // Unparseable versions are dropped
        let mut parsed: Vec<(Version, usize)> = versions
            .iter()
            .enumerate()
            .filter_map(|(i, v)| Some((Version::parse(v, scheme).ok()?, i)))
            .collect();

        parsed.sort_by(|(a, _), (b, _)| {
            let cmp = a.compare_to(b);
            if ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });

        parsed
            .into_iter()
            .map(|(_, i)| versions[i].to_string())
            .collect()
    }

    fn as_refs(versions: &[String]) -> Vec<&str> {
        versions.iter().map(String::as_str).collect()
    }
}
