//! Ivy requirement grammar
//!
//! Supports plain versions, dynamic revisions (`1.2.+`, `1.+`, `+`,
//! `latest.release`) and interval notation (`[1.0,2.0[`, `(,2.0]`, `[1.0,)`).

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::{Range, RangeOperator, Requirement};
use crate::{ParseError, Scheme, Version};

lazy_static! {
    static ref DYNAMIC_PATCH_RE: Regex = Regex::new(r"^(\d+)\.(\d+)\.\+$").unwrap();
    static ref DYNAMIC_MINOR_RE: Regex = Regex::new(r"^(\d+)\.\+$").unwrap();
    static ref LATEST_RE: Regex = Regex::new(r"^(?:\+|latest\.\w+)$").unwrap();

    // [1.0,2.0]  ]1.0,2.0[  (1.0,2.0)
    static ref BOUNDED_RE: Regex = Regex::new(
        r"^([\[\]\(])\s*([^,\s\[\]\(\)]+)\s*,\s*([^,\s\[\]\(\)]+)\s*([\[\]\)])$"
    ).unwrap();

    // (,2.0]  (,2.0[
    static ref LOWER_UNBOUNDED_RE: Regex = Regex::new(
        r"^[\(\]]\s*,\s*([^,\s\[\]\(\)]+)\s*([\[\]\)])$"
    ).unwrap();

    // [1.0,)  ]1.0,)
    static ref UPPER_UNBOUNDED_RE: Regex = Regex::new(
        r"^([\[\]\(])\s*([^,\s\[\]\(\)]+)\s*,\s*[\)\[]$"
    ).unwrap();
}

pub(super) fn parse(input: &str) -> Result<Requirement, ParseError> {
    let text = input.trim();

    if let Ok(version) = Version::parse(text, Scheme::Ivy) {
        return Ok(Requirement::exact(version));
    }
    log::debug!("\"{}\" is not a plain version, trying Ivy range forms", text);

    if let Some(caps) = DYNAMIC_PATCH_RE.captures(text) {
        let major = number(&caps, 1, input)?;
        let minor = number(&caps, 2, input)?;
        return Ok(between(release(major, minor), release(major, minor.saturating_add(1))));
    }

    if let Some(caps) = DYNAMIC_MINOR_RE.captures(text) {
        let major = number(&caps, 1, input)?;
        return Ok(between(release(major, 0), release(major.saturating_add(1), 0)));
    }

    if LATEST_RE.is_match(text) {
        return Ok(Range::new(release(0, 0), RangeOperator::Gte).into());
    }

    if let Some(caps) = BOUNDED_RE.captures(text) {
        let lower = lower_bound(&caps[1], &caps[2])?;
        let upper = upper_bound(&caps[4], &caps[3])?;
        return Ok(Requirement::and(lower.into(), upper.into()));
    }

    if let Some(caps) = LOWER_UNBOUNDED_RE.captures(text) {
        return Ok(upper_bound(&caps[2], &caps[1])?.into());
    }

    if let Some(caps) = UPPER_UNBOUNDED_RE.captures(text) {
        return Ok(lower_bound(&caps[1], &caps[2])?.into());
    }

    Err(ParseError::InvalidRequirement(input.to_string()))
}

fn number(caps: &Captures<'_>, group: usize, input: &str) -> Result<u64, ParseError> {
    caps[group]
        .parse()
        .map_err(|_| ParseError::InvalidRequirement(input.to_string()))
}

fn release(major: u64, minor: u64) -> Version {
    Version::from_parts(Scheme::Ivy, major, Some(minor), Some(0), Vec::new(), None)
}

fn between(lower: Version, upper: Version) -> Requirement {
    Requirement::and(
        Range::new(lower, RangeOperator::Gte).into(),
        Range::new(upper, RangeOperator::Lt).into(),
    )
}

/// `[` includes the lower end, `]` and `(` exclude it
fn lower_bound(bracket: &str, version: &str) -> Result<Range, ParseError> {
    let operator = if bracket == "[" {
        RangeOperator::Gte
    } else {
        RangeOperator::Gt
    };
    Ok(Range::new(Version::parse(version, Scheme::Ivy)?.extrapolate(), operator))
}

/// `]` includes the upper end, `[` and `)` exclude it
fn upper_bound(bracket: &str, version: &str) -> Result<Range, ParseError> {
    let operator = if bracket == "]" {
        RangeOperator::Lte
    } else {
        RangeOperator::Lt
    };
    Ok(Range::new(Version::parse(version, Scheme::Ivy)?.extrapolate(), operator))
}
