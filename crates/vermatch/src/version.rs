//! Version parsing, inspection and derivation

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::{Comparator, ParseError, Requirement, Scheme};

/// A single dot-separated prerelease identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// Canonical decimal number (no leading zeros)
    Numeric(u64),
    /// Anything else, kept verbatim
    AlphaNumeric(String),
}

impl Identifier {
    /// Parse an identifier, keeping its text when it is not a canonical number
    pub fn parse(text: &str) -> Self {
        let canonical = !text.is_empty()
            && text.bytes().all(|b| b.is_ascii_digit())
            && (text.len() == 1 || !text.starts_with('0'));
        match canonical.then(|| text.parse::<u64>().ok()).flatten() {
            Some(n) => Identifier::Numeric(n),
            None => Identifier::AlphaNumeric(text.to_string()),
        }
    }

    /// Get the numeric value if the identifier consists of digits only
    pub fn as_number(&self) -> Option<u64> {
        match self {
            Identifier::Numeric(n) => Some(*n),
            Identifier::AlphaNumeric(s) if s.bytes().all(|b| b.is_ascii_digit()) => s.parse().ok(),
            Identifier::AlphaNumeric(_) => None,
        }
    }

    /// Get the textual form of the identifier
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Identifier::Numeric(n) => Cow::Owned(n.to_string()),
            Identifier::AlphaNumeric(s) => Cow::Borrowed(s),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::AlphaNumeric(s) => f.write_str(s),
        }
    }
}

/// The most significant field in which two versions differ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionDiff {
    None,
    Major,
    Minor,
    Patch,
    Suffix,
    Build,
}

/// A parsed version
///
/// Equality and hashing look at the raw text only, so `1.0.0+a` and `1.0.0+b`
/// are different values while still being equivalent (see
/// [`Version::is_equivalent_to`]). Ordering is exposed through
/// [`Version::compare_to`] rather than `Ord` for the same reason.
#[derive(Debug, Clone)]
pub struct Version {
    major: u64,
    minor: Option<u64>,
    patch: Option<u64>,
    prerelease: Vec<Identifier>,
    build: Option<String>,
    scheme: Scheme,
    raw: String,
}

impl Version {
    /// Parse a version string according to the given scheme
    pub fn parse(input: &str, scheme: Scheme) -> Result<Self, ParseError> {
        let mut text = input.trim();
        if scheme == Scheme::Npm {
            text = strip_npm_prefix(text);
        }
        if text.is_empty() {
            return Err(ParseError::invalid_version(input, "version is empty"));
        }

        // A dash only opens the prerelease when it comes before any build marker
        let plus = text.find('+');
        let dash = text.find('-').filter(|d| plus.map_or(true, |p| *d < p));

        let (head, build) = match plus {
            Some(p) => {
                let build = &text[p + 1..];
                if build.is_empty() {
                    return Err(ParseError::EmptyBuild(input.to_string()));
                }
                (&text[..p], Some(build.to_string()))
            }
            None => (text, None),
        };

        let (core, prerelease) = match dash {
            Some(d) => (&head[..d], parse_identifiers(&head[d + 1..], input)?),
            None => (head, Vec::new()),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() > 3 {
            return Err(ParseError::invalid_version(input, "too many numeric components"));
        }

        let major = parse_number(parts[0])
            .ok_or_else(|| ParseError::invalid_version(input, "major is not numeric"))?;
        let minor = parse_component(parts.get(1).copied(), "minor", scheme, input)?;
        let patch = parse_component(parts.get(2).copied(), "patch", scheme, input)?;

        Ok(Version {
            major,
            minor,
            // A wildcard minor swallows whatever follows it
            patch: minor.and(patch),
            prerelease,
            build,
            scheme,
            raw: text.to_string(),
        })
    }

    /// Parse a version that must carry major, minor and patch
    pub fn strict(text: &str) -> Result<Self, ParseError> {
        Self::parse(text, Scheme::Strict)
    }

    /// Parse a version whose minor and patch are optional
    pub fn loose(text: &str) -> Result<Self, ParseError> {
        Self::parse(text, Scheme::Loose)
    }

    /// Parse an npm version (`v` prefixes and `x`/`*` wildcards allowed)
    pub fn npm(text: &str) -> Result<Self, ParseError> {
        Self::parse(text, Scheme::Npm)
    }

    /// Parse a CocoaPods version
    pub fn cocoapods(text: &str) -> Result<Self, ParseError> {
        Self::parse(text, Scheme::CocoaPods)
    }

    /// Parse an Ivy version
    pub fn ivy(text: &str) -> Result<Self, ParseError> {
        Self::parse(text, Scheme::Ivy)
    }

    /// An empty `0` that owns no heap memory
    pub(crate) fn placeholder() -> Self {
        Version {
            major: 0,
            minor: None,
            patch: None,
            prerelease: Vec::new(),
            build: None,
            scheme: Scheme::Strict,
            raw: String::new(),
        }
    }

    pub(crate) fn from_parts(
        scheme: Scheme,
        major: u64,
        minor: Option<u64>,
        patch: Option<u64>,
        prerelease: Vec<Identifier>,
        build: Option<String>,
    ) -> Self {
        let patch = minor.and(patch);
        let mut raw = major.to_string();
        if let Some(minor) = minor {
            raw.push_str(&format!(".{}", minor));
        }
        if let Some(patch) = patch {
            raw.push_str(&format!(".{}", patch));
        }
        if !prerelease.is_empty() {
            raw.push('-');
            raw.push_str(&join_identifiers(&prerelease));
        }
        if let Some(build) = &build {
            raw.push('+');
            raw.push_str(build);
        }

        Version {
            major,
            minor,
            patch,
            prerelease,
            build,
            scheme,
            raw,
        }
    }

    /// Get the major component
    pub fn major(&self) -> u64 {
        self.major
    }

    /// Get the minor component, `None` when omitted or a wildcard
    pub fn minor(&self) -> Option<u64> {
        self.minor
    }

    /// Get the patch component, `None` when omitted or a wildcard
    pub fn patch(&self) -> Option<u64> {
        self.patch
    }

    /// Get the prerelease identifiers
    pub fn prerelease(&self) -> &[Identifier] {
        &self.prerelease
    }

    /// Get the build metadata
    pub fn build(&self) -> Option<&str> {
        self.build.as_deref()
    }

    /// Get the scheme the version was parsed with
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Get the raw text of the version
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// A version is stable when its major is above zero and it has no prerelease
    pub fn is_stable(&self) -> bool {
        self.major > 0 && self.prerelease.is_empty()
    }

    /// Compare two versions, ignoring build metadata
    pub fn compare_to(&self, other: &Version) -> Ordering {
        Comparator::compare(self, other)
    }

    pub fn is_greater_than(&self, other: &Version) -> bool {
        Comparator::greater_than(self, other)
    }

    pub fn is_greater_than_or_equal_to(&self, other: &Version) -> bool {
        Comparator::greater_than_or_equal_to(self, other)
    }

    pub fn is_lower_than(&self, other: &Version) -> bool {
        Comparator::less_than(self, other)
    }

    pub fn is_lower_than_or_equal_to(&self, other: &Version) -> bool {
        Comparator::less_than_or_equal_to(self, other)
    }

    /// Check whether both versions sort the same
    pub fn is_equivalent_to(&self, other: &Version) -> bool {
        Comparator::equal_to(self, other)
    }

    /// Check whether both versions have identical raw text
    pub fn is_equal_to(&self, other: &Version) -> bool {
        self.raw == other.raw
    }

    /// Get the most significant field that differs between two versions
    pub fn diff(&self, other: &Version) -> VersionDiff {
        if self.major != other.major {
            VersionDiff::Major
        } else if self.minor != other.minor {
            VersionDiff::Minor
        } else if self.patch != other.patch {
            VersionDiff::Patch
        } else if self.prerelease != other.prerelease {
            VersionDiff::Suffix
        } else if self.build != other.build {
            VersionDiff::Build
        } else {
            VersionDiff::None
        }
    }

    /// Get the next version in the canonical successor sequence
    ///
    /// With a prerelease the last numeric identifier is bumped (or `.0` is
    /// appended). Otherwise the patch is bumped, supplying absent minor and
    /// patch as zero first, so loose `1` becomes `1.0.1`. Build metadata is
    /// kept.
    pub fn next_increment(&self) -> Version {
        if let Some(last) = self.prerelease.last() {
            let mut prerelease = self.prerelease.clone();
            match last.as_number() {
                Some(n) => {
                    let index = prerelease.len() - 1;
                    prerelease[index] = Identifier::Numeric(n.saturating_add(1));
                }
                None => prerelease.push(Identifier::Numeric(0)),
            }
            return self.rebuild(self.major, self.minor, self.patch, prerelease, self.build.clone());
        }

        self.rebuild(
            self.major,
            Some(self.minor.unwrap_or(0)),
            Some(self.patch.unwrap_or(0).saturating_add(1)),
            Vec::new(),
            self.build.clone(),
        )
    }

    /// Get the next major release, resetting present minor and patch to zero
    pub fn next_major(&self) -> Version {
        self.rebuild(
            self.major.saturating_add(1),
            self.minor.map(|_| 0),
            self.patch.map(|_| 0),
            Vec::new(),
            None,
        )
    }

    /// Get the next minor release
    pub fn next_minor(&self) -> Version {
        self.rebuild(
            self.major,
            Some(self.minor.unwrap_or(0).saturating_add(1)),
            self.patch.map(|_| 0),
            Vec::new(),
            None,
        )
    }

    /// Get the next patch release
    pub fn next_patch(&self) -> Version {
        self.rebuild(
            self.major,
            Some(self.minor.unwrap_or(0)),
            Some(self.patch.unwrap_or(0).saturating_add(1)),
            Vec::new(),
            None,
        )
    }

    pub fn with_inc_major(&self, by: u64) -> Version {
        self.rebuild(
            self.major.saturating_add(by),
            self.minor,
            self.patch,
            self.prerelease.clone(),
            self.build.clone(),
        )
    }

    pub fn with_inc_minor(&self, by: u64) -> Version {
        self.rebuild(
            self.major,
            self.minor.map(|m| m.saturating_add(by)),
            self.patch,
            self.prerelease.clone(),
            self.build.clone(),
        )
    }

    pub fn with_inc_patch(&self, by: u64) -> Version {
        self.rebuild(
            self.major,
            self.minor,
            self.patch.map(|p| p.saturating_add(by)),
            self.prerelease.clone(),
            self.build.clone(),
        )
    }

    pub fn with_cleared_suffix(&self) -> Version {
        self.rebuild(self.major, self.minor, self.patch, Vec::new(), self.build.clone())
    }

    pub fn with_cleared_build(&self) -> Version {
        self.rebuild(self.major, self.minor, self.patch, self.prerelease.clone(), None)
    }

    pub fn with_cleared_suffix_and_build(&self) -> Version {
        self.rebuild(self.major, self.minor, self.patch, Vec::new(), None)
    }

    /// Replace the prerelease with dot-separated identifiers (empty clears it)
    pub fn with_suffix(&self, suffix: &str) -> Result<Version, ParseError> {
        let prerelease = if suffix.is_empty() {
            Vec::new()
        } else {
            parse_identifiers(suffix, suffix)?
        };
        Ok(self.rebuild(self.major, self.minor, self.patch, prerelease, self.build.clone()))
    }

    /// Replace the build metadata (empty clears it)
    pub fn with_build(&self, build: &str) -> Version {
        let build = (!build.is_empty()).then(|| build.to_string());
        self.rebuild(self.major, self.minor, self.patch, self.prerelease.clone(), build)
    }

    /// Fill absent components with zero, keeping the scheme
    pub fn extrapolate(&self) -> Version {
        self.rebuild(
            self.major,
            Some(self.minor.unwrap_or(0)),
            Some(self.patch.unwrap_or(0)),
            self.prerelease.clone(),
            self.build.clone(),
        )
    }

    /// Convert to a complete strict version, filling absent components with zero
    pub fn to_strict(&self) -> Version {
        Version::from_parts(
            Scheme::Strict,
            self.major,
            Some(self.minor.unwrap_or(0)),
            Some(self.patch.unwrap_or(0)),
            self.prerelease.clone(),
            self.build.clone(),
        )
    }

    /// Check whether the version satisfies a requirement
    pub fn satisfies(&self, requirement: &Requirement) -> bool {
        requirement.is_satisfied_by(self)
    }

    /// Parse a requirement in this version's scheme and check it
    pub fn satisfies_str(&self, requirement: &str) -> Result<bool, ParseError> {
        Ok(Requirement::parse(requirement, self.scheme)?.is_satisfied_by(self))
    }

    fn rebuild(
        &self,
        major: u64,
        minor: Option<u64>,
        patch: Option<u64>,
        prerelease: Vec<Identifier>,
        build: Option<String>,
    ) -> Version {
        Version::from_parts(self.scheme, major, minor, patch, prerelease, build)
    }
}

fn strip_npm_prefix(text: &str) -> &str {
    let text = text.strip_prefix('=').map(str::trim_start).unwrap_or(text);
    text.strip_prefix(['v', 'V']).map(str::trim_start).unwrap_or(text)
}

fn parse_number(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn parse_component(
    part: Option<&str>,
    component: &'static str,
    scheme: Scheme,
    input: &str,
) -> Result<Option<u64>, ParseError> {
    let Some(part) = part else {
        if scheme.requires_full_version() {
            return Err(ParseError::MissingComponent {
                input: input.to_string(),
                component,
            });
        }
        return Ok(None);
    };

    if scheme == Scheme::Npm && matches!(part, "x" | "X" | "*") {
        return Ok(None);
    }

    parse_number(part)
        .map(Some)
        .ok_or_else(|| ParseError::invalid_version(input, format!("{} is not numeric", component)))
}

fn parse_identifiers(text: &str, input: &str) -> Result<Vec<Identifier>, ParseError> {
    text.split('.')
        .map(|id| {
            if id.is_empty() {
                Err(ParseError::EmptyIdentifier(input.to_string()))
            } else {
                Ok(Identifier::parse(id))
            }
        })
        .collect()
}

fn join_identifiers(identifiers: &[Identifier]) -> String {
    identifiers
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::strict(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Version {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Version {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Version::strict(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn strict(s: &str) -> Version {
        Version::strict(s).unwrap()
    }

    fn loose(s: &str) -> Version {
        Version::loose(s).unwrap()
    }

    fn npm(s: &str) -> Version {
        Version::npm(s).unwrap()
    }

    #[test]
    fn test_parse_components() {
        let v = strict("1.2.3-alpha.1+build.7");
        assert_eq!(v.major(), 1);
        assert_eq!(v.minor(), Some(2));
        assert_eq!(v.patch(), Some(3));
        assert_eq!(
            v.prerelease(),
            &[Identifier::AlphaNumeric("alpha".to_string()), Identifier::Numeric(1)]
        );
        assert_eq!(v.build(), Some("build.7"));
        assert_eq!(v.scheme(), Scheme::Strict);
        assert_eq!(v.as_str(), "1.2.3-alpha.1+build.7");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(strict("  1.2.3 \n").as_str(), "1.2.3");
    }

    #[test]
    fn test_parse_dash_after_build_is_build() {
        let v = strict("1.0.0+21AF26D3---117B344092BD");
        assert!(v.prerelease().is_empty());
        assert_eq!(v.build(), Some("21AF26D3---117B344092BD"));

        let v = strict("1.0.0-beta-1+exp.sha.5114f85");
        assert_eq!(v.prerelease(), &[Identifier::AlphaNumeric("beta-1".to_string())]);
        assert_eq!(v.build(), Some("exp.sha.5114f85"));
    }

    #[test]
    fn test_parse_loose() {
        let v = loose("1.2");
        assert_eq!(v.minor(), Some(2));
        assert_eq!(v.patch(), None);

        let v = loose("3-rc");
        assert_eq!(v.major(), 3);
        assert_eq!(v.minor(), None);
        assert_eq!(v.prerelease().len(), 1);
    }

    #[test]
    fn test_parse_npm() {
        assert_eq!(npm("v1.2.3").as_str(), "1.2.3");
        assert_eq!(npm("V1.2.3").as_str(), "1.2.3");
        assert_eq!(npm("v 1.2.3").as_str(), "1.2.3");
        assert_eq!(npm("=1.2.3").as_str(), "1.2.3");
        assert_eq!(npm("=v1.2.3").as_str(), "1.2.3");

        let v = npm("1.x");
        assert_eq!(v.minor(), None);
        assert_eq!(v.patch(), None);

        let v = npm("1.2.*");
        assert_eq!(v.minor(), Some(2));
        assert_eq!(v.patch(), None);

        let v = npm("1.X.3");
        assert_eq!(v.minor(), None);
        assert_eq!(v.patch(), None);
    }

    #[test]
    fn test_parse_failures() {
        assert!(matches!(
            Version::strict("1.2"),
            Err(ParseError::MissingComponent { component: "patch", .. })
        ));
        assert!(matches!(
            Version::strict("1"),
            Err(ParseError::MissingComponent { component: "minor", .. })
        ));
        assert!(matches!(Version::strict("1.0.0+"), Err(ParseError::EmptyBuild(_))));
        assert!(matches!(Version::strict("1.0.0-beta+"), Err(ParseError::EmptyBuild(_))));
        assert!(matches!(Version::strict("1.0.0-"), Err(ParseError::EmptyIdentifier(_))));
        assert!(matches!(Version::strict("1.0.0-a..b"), Err(ParseError::EmptyIdentifier(_))));
        assert!(Version::strict("").is_err());
        assert!(Version::strict("   ").is_err());
        assert!(Version::strict("a.b.c").is_err());
        assert!(Version::strict("1.2.3.4").is_err());
        assert!(Version::strict("1.x.0").is_err());
        assert!(Version::strict("v1.2.3").is_err());
        assert!(Version::loose("1.").is_err());
        assert!(Version::npm("x.1.2").is_err());

        let err = Version::strict("1.a.3").unwrap_err();
        assert_eq!(err.input(), "1.a.3");
    }

    #[test]
    fn test_semver_precedence_chain() {
        let chain = [
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.beta",
            "1.0.0-beta",
            "1.0.0-beta.2",
            "1.0.0-beta.11",
            "1.0.0-rc.1",
            "1.0.0",
            "1.0.1",
            "1.1.0",
            "2.0.0",
        ];
        for pair in chain.windows(2) {
            let (lower, upper) = (strict(pair[0]), strict(pair[1]));
            assert!(lower.is_lower_than(&upper), "{} < {}", lower, upper);
            assert!(upper.is_greater_than(&lower), "{} > {}", upper, lower);
        }
    }

    #[test]
    fn test_equivalence_and_equality() {
        let a = strict("1.0.0+a");
        let b = strict("1.0.0+b");
        assert!(a.is_equivalent_to(&b));
        assert!(!a.is_equal_to(&b));
        assert_ne!(a, b);

        assert!(strict("1.0.0-ALPHA").is_equivalent_to(&strict("1.0.0-alpha")));
        assert!(loose("1.2").is_equivalent_to(&strict("1.2.0")));
        assert!(!loose("1.2").is_equal_to(&strict("1.2.0")));

        // Scheme does not take part in equality
        assert_eq!(strict("1.2.3"), loose("1.2.3"));
        let mut set = HashSet::new();
        set.insert(strict("1.2.3"));
        assert!(set.contains(&loose("1.2.3")));
    }

    #[test]
    fn test_npm_wildcard_comparison() {
        assert!(npm("1.2").is_equivalent_to(&npm("1.2.5")));
        assert!(npm("1.x").is_equivalent_to(&strict("1.9.9")));
        assert!(npm("1").is_equivalent_to(&strict("1.0.0-beta")));
        assert!(npm("1.2").is_lower_than(&npm("1.3.0")));
        assert!(!loose("1.2").is_equivalent_to(&loose("1.2.5")));
    }

    #[test]
    fn test_compare_is_antisymmetric() {
        let versions = ["0.0.0", "1.0.0-1", "1.0.0-a", "1.0.0", "1.2.3+b", "2.0.0"];
        for a in versions {
            for b in versions {
                let (x, y) = (strict(a), strict(b));
                assert_eq!(x.compare_to(&y), y.compare_to(&x).reverse(), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_is_stable() {
        assert!(strict("1.0.0").is_stable());
        assert!(strict("1.0.0+build").is_stable());
        assert!(!strict("0.1.0").is_stable());
        assert!(!strict("1.0.0-rc.1").is_stable());
    }

    #[test]
    fn test_diff() {
        let base = strict("1.0.0");
        assert_eq!(base.diff(&strict("2.0.0")), VersionDiff::Major);
        assert_eq!(base.diff(&strict("1.1.0")), VersionDiff::Minor);
        assert_eq!(base.diff(&strict("1.0.1")), VersionDiff::Patch);
        assert_eq!(strict("1.0.0-a").diff(&strict("1.0.0-b")), VersionDiff::Suffix);
        assert_eq!(strict("1.0.0+a").diff(&strict("1.0.0+b")), VersionDiff::Build);
        assert_eq!(base.diff(&strict("1.0.0")), VersionDiff::None);
        assert_eq!(strict("1.0.0-a+x").diff(&strict("2.0.0")), VersionDiff::Major);
    }

    #[test]
    fn test_next_increment() {
        assert_eq!(
            strict("1.0.0-beta.4+sha.899d8c").next_increment().as_str(),
            "1.0.0-beta.5+sha.899d8c"
        );
        assert_eq!(strict("1.0.0-beta").next_increment().as_str(), "1.0.0-beta.0");
        assert_eq!(strict("1.0.0").next_increment().as_str(), "1.0.1");
        assert_eq!(strict("1.0.0+b").next_increment().as_str(), "1.0.1+b");
        assert_eq!(loose("1").next_increment().as_str(), "1.0.1");
        assert_eq!(loose("1.1").next_increment().as_str(), "1.1.1");

        // Nothing fits between a partial version and its successor
        let one = loose("1");
        assert!(one.next_increment().is_greater_than(&one));
        assert!(loose("1.0.1").is_equivalent_to(&one.next_increment()));

        let v = strict("1.0.0-rc");
        assert!(v.next_increment().is_greater_than(&v));
    }

    #[test]
    fn test_next_releases() {
        let v = strict("1.2.3-beta+b");
        assert_eq!(v.next_major().as_str(), "2.0.0");
        assert_eq!(v.next_minor().as_str(), "1.3.0");
        assert_eq!(v.next_patch().as_str(), "1.2.4");

        let v = loose("1");
        assert_eq!(v.next_major().as_str(), "2");
        assert_eq!(v.next_minor().as_str(), "1.1");
        assert_eq!(v.next_patch().as_str(), "1.0.1");
        assert_eq!(v.next_major().scheme(), Scheme::Loose);
    }

    #[test]
    fn test_with_derivations() {
        let v = strict("1.2.3-beta+b");
        assert_eq!(v.with_inc_major(1).as_str(), "2.2.3-beta+b");
        assert_eq!(v.with_inc_minor(2).as_str(), "1.4.3-beta+b");
        assert_eq!(v.with_inc_patch(3).as_str(), "1.2.6-beta+b");
        assert_eq!(v.with_cleared_suffix().as_str(), "1.2.3+b");
        assert_eq!(v.with_cleared_build().as_str(), "1.2.3-beta");
        assert_eq!(v.with_cleared_suffix_and_build().as_str(), "1.2.3");
        assert_eq!(v.with_suffix("rc.1").unwrap().as_str(), "1.2.3-rc.1+b");
        assert_eq!(v.with_suffix("").unwrap().as_str(), "1.2.3+b");
        assert!(v.with_suffix("rc..1").is_err());
        assert_eq!(v.with_build("linux").as_str(), "1.2.3-beta+linux");
        assert_eq!(v.with_build("").as_str(), "1.2.3-beta");

        // Absent fields stay absent
        let v = loose("1");
        assert_eq!(v.with_inc_minor(1).as_str(), "1");
        assert_eq!(v.with_inc_patch(1).as_str(), "1");
        assert_eq!(v.with_inc_major(4).as_str(), "5");
    }

    #[test]
    fn test_to_strict_and_extrapolate() {
        let v = loose("1-rc+b");
        let s = v.to_strict();
        assert_eq!(s.as_str(), "1.0.0-rc+b");
        assert_eq!(s.scheme(), Scheme::Strict);

        let e = npm("2.x").extrapolate();
        assert_eq!(e.as_str(), "2.0.0");
        assert_eq!(e.scheme(), Scheme::Npm);
    }

    #[test]
    fn test_identifier_numeric_detection() {
        assert_eq!(Identifier::parse("12"), Identifier::Numeric(12));
        assert_eq!(Identifier::parse("0"), Identifier::Numeric(0));
        assert_eq!(Identifier::parse("01"), Identifier::AlphaNumeric("01".to_string()));
        assert_eq!(Identifier::parse("01").as_number(), Some(1));
        assert_eq!(Identifier::parse("rc1").as_number(), None);

        // Leading zeros survive a derivation
        assert_eq!(strict("1.0.0-rc.01").with_inc_patch(1).as_str(), "1.0.1-rc.01");
    }

    #[test]
    fn test_from_str_and_display() {
        let v: Version = "1.2.3-beta".parse().unwrap();
        assert_eq!(v.to_string(), "1.2.3-beta");
        assert!("1.2".parse::<Version>().is_err());
    }

    #[test]
    fn test_satisfies() {
        let v = npm("1.2.5");
        assert!(v.satisfies_str("^1.2.0").unwrap());
        assert!(!v.satisfies_str("~1.3").unwrap());
        assert!(v.satisfies_str("^^").is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_string_form() {
        let v = strict("1.2.3-rc.1");
        assert_eq!(serde_json::to_string(&v).unwrap(), "\"1.2.3-rc.1\"");
        let back: Version = serde_json::from_str("\"1.2.3-rc.1\"").unwrap();
        assert_eq!(back, v);
        assert!(serde_json::from_str::<Version>("\"1.2\"").is_err());
    }
}
