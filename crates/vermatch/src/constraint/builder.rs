//! Building requirements from npm and CocoaPods range strings
//!
//! The token stream goes through four stages: hyphen false-positive repair,
//! OR parenthesization, shunting-yard conversion to postfix, and a
//! stack-based evaluation of the postfix form into a [`Requirement`] tree.

use super::{ivy, Range, RangeOperator, Requirement};
use crate::tokenizer::{self, Token, TokenKind};
use crate::{Connective, ParseError, Scheme, Version};

impl Requirement {
    /// Parse a requirement string according to the given scheme
    pub fn parse(input: &str, scheme: Scheme) -> Result<Self, ParseError> {
        match scheme {
            Scheme::Strict | Scheme::Loose => Ok(Requirement::exact(Version::parse(input, scheme)?)),
            Scheme::Npm | Scheme::CocoaPods => RequirementBuilder::new(input, scheme).build(),
            Scheme::Ivy => ivy::parse(input),
        }
    }

    /// Expand a tilde requirement (`~1.2.3`, or `~> 1.2.3` in CocoaPods)
    pub fn tilde(version: &str, scheme: Scheme) -> Result<Self, ParseError> {
        if !TokenKind::Tilde.is_supported_by(scheme) {
            return Err(unsupported(version, "Tilde", scheme));
        }
        Ok(tilde_of(&Version::parse(version, scheme)?))
    }

    /// Expand an npm caret requirement (`^1.2.3`)
    pub fn caret(version: &str, scheme: Scheme) -> Result<Self, ParseError> {
        if !TokenKind::Caret.is_supported_by(scheme) {
            return Err(unsupported(version, "Caret", scheme));
        }
        let version = Version::parse(version, scheme)?;

        let (major, minor, patch) = match (version.major(), version.minor(), version.patch()) {
            (0, None, _) => (1, 0, 0),
            (0, Some(0), None) => (0, 1, 0),
            (0, Some(0), Some(patch)) => (0, 0, patch.saturating_add(1)),
            (0, Some(minor), _) => (0, minor.saturating_add(1), 0),
            (major, _, _) => (major.saturating_add(1), 0, 0),
        };

        Ok(bounded(&version, release(scheme, major, minor, patch)))
    }

    /// Expand an npm hyphen range (`1.2.3 - 2.3.4`)
    ///
    /// A partial upper bound excludes the next release at its precision:
    /// `1.2.3 - 2.3` is `>=1.2.3 <2.4.0`.
    pub fn hyphen(lower: &str, upper: &str, scheme: Scheme) -> Result<Self, ParseError> {
        if !TokenKind::Hyphen.is_supported_by(scheme) {
            return Err(unsupported(&format!("{} - {}", lower, upper), "Hyphen", scheme));
        }
        let lower = Version::parse(lower, scheme)?;
        let upper = Version::parse(upper, scheme)?;

        let upper = match (upper.minor(), upper.patch()) {
            (Some(_), Some(_)) => Range::new(upper, RangeOperator::Lte),
            (None, _) => Range::new(
                upper.extrapolate().with_inc_major(1).with_cleared_suffix_and_build(),
                RangeOperator::Lt,
            ),
            (Some(_), None) => Range::new(
                upper.extrapolate().with_inc_minor(1).with_cleared_suffix_and_build(),
                RangeOperator::Lt,
            ),
        };

        Ok(Requirement::and(
            Range::new(lower.extrapolate(), RangeOperator::Gte).into(),
            upper.into(),
        ))
    }
}

fn unsupported(input: &str, kind: &'static str, scheme: Scheme) -> ParseError {
    ParseError::UnsupportedScheme {
        input: input.to_string(),
        kind,
        scheme,
    }
}

fn release(scheme: Scheme, major: u64, minor: u64, patch: u64) -> Version {
    Version::from_parts(scheme, major, Some(minor), Some(patch), Vec::new(), None)
}

/// `>=version` (extrapolated) AND `<upper`
fn bounded(version: &Version, upper: Version) -> Requirement {
    Requirement::and(
        Range::new(version.extrapolate(), RangeOperator::Gte).into(),
        Range::new(upper, RangeOperator::Lt).into(),
    )
}

fn tilde_of(version: &Version) -> Requirement {
    let scheme = version.scheme();
    let major = version.major();

    let upper = match (scheme, version.minor(), version.patch()) {
        (Scheme::CocoaPods, Some(minor), Some(_)) => Some((major, minor.saturating_add(1))),
        (Scheme::CocoaPods, Some(_), None) => Some((major.saturating_add(1), 0)),
        (Scheme::CocoaPods, None, _) => None,
        (_, Some(minor), _) => Some((major, minor.saturating_add(1))),
        (_, None, _) => Some((major.saturating_add(1), 0)),
    };

    match upper {
        Some((major, minor)) => bounded(version, release(scheme, major, minor, 0)),
        None => Range::new(version.extrapolate(), RangeOperator::Gte).into(),
    }
}

/// Deepest bracket nesting accepted in a requirement string
pub const MAX_GROUP_DEPTH: usize = 64;

/// An entry on the evaluation stack
enum Operand<'t> {
    /// A version token no operator has consumed yet
    Text(&'t str),
    Built(Requirement),
}

/// Turns a tokenized npm or CocoaPods range string into a requirement tree
struct RequirementBuilder<'a> {
    input: &'a str,
    scheme: Scheme,
}

impl<'a> RequirementBuilder<'a> {
    fn new(input: &'a str, scheme: Scheme) -> Self {
        RequirementBuilder { input, scheme }
    }

    fn build(&self) -> Result<Requirement, ParseError> {
        let input = if self.scheme == Scheme::Npm && self.input.trim().is_empty() {
            "*"
        } else {
            self.input
        };

        let tokens = tokenizer::tokenize(input, self.scheme)?;
        if tokens.is_empty() {
            return Err(ParseError::InvalidRequirement(self.input.to_string()));
        }

        self.check_nesting(&tokens)?;

        let tokens = self.repair_false_positive_ranges(tokens);
        let postfix = self.to_postfix(Self::parenthesize_or(tokens))?;
        log::trace!("Postfix form of \"{}\": {}", self.input, tokenizer::join(&postfix));

        self.evaluate(&postfix)
    }

    /// Merge `version - word` back into one version when `word` cannot be a
    /// version on its own, e.g. `1.0.0 - SNAPSHOT`
    fn repair_false_positive_ranges(&self, tokens: Vec<Token>) -> Vec<Token> {
        let mut repaired: Vec<Token> = Vec::with_capacity(tokens.len());
        let mut iter = tokens.into_iter().peekable();

        while let Some(token) = iter.next() {
            let merged = match (repaired.last(), token.kind(), iter.peek()) {
                (Some(left), TokenKind::Hyphen, Some(right))
                    if left.kind() == TokenKind::Version
                        && right.kind() == TokenKind::Version
                        && Version::parse(right.text().unwrap_or_default(), Scheme::Npm).is_err() =>
                {
                    Some(format!(
                        "{}-{}",
                        left.text().unwrap_or_default(),
                        right.text().unwrap_or_default()
                    ))
                }
                _ => None,
            };

            match merged {
                Some(text) => {
                    iter.next();
                    repaired.pop();
                    repaired.push(Token::version(text));
                }
                None => repaired.push(token),
            }
        }

        repaired
    }

    /// Wrap the stream in brackets and close/reopen them around every OR so
    /// that OR binds loosest
    fn parenthesize_or(tokens: Vec<Token>) -> Vec<Token> {
        let mut out = Vec::with_capacity(tokens.len() + 2);
        out.push(Token::new(TokenKind::Opening));
        for token in tokens {
            if token.kind() == TokenKind::Or {
                out.push(Token::new(TokenKind::Closing));
                out.push(token);
                out.push(Token::new(TokenKind::Opening));
            } else {
                out.push(token);
            }
        }
        out.push(Token::new(TokenKind::Closing));
        out
    }

    /// Shunting-yard conversion to postfix
    ///
    /// A unary operator is emitted right after its version operand. If it
    /// precedes a bracket instead, it waits on the stack until that bracket
    /// closes.
    fn to_postfix(&self, tokens: Vec<Token>) -> Result<Vec<Token>, ParseError> {
        let mut output = Vec::with_capacity(tokens.len());
        let mut stack: Vec<Token> = Vec::new();
        let mut iter = tokens.into_iter().peekable();

        while let Some(token) = iter.next() {
            let kind = token.kind();
            match kind {
                TokenKind::Version => output.push(token),
                TokenKind::Opening => stack.push(token),
                TokenKind::Closing => {
                    loop {
                        match stack.pop() {
                            Some(top) if top.kind() == TokenKind::Opening => break,
                            Some(top) => output.push(top),
                            None => return Err(ParseError::UnbalancedGroup(self.input.to_string())),
                        }
                    }
                    if stack.last().map_or(false, |top| top.kind().is_unary()) {
                        output.extend(stack.pop());
                    }
                }
                _ if kind.is_unary() => match iter.peek().map(Token::kind) {
                    Some(TokenKind::Version) => {
                        if let Some(operand) = iter.next() {
                            output.push(operand);
                        }
                        output.push(token);
                    }
                    Some(TokenKind::Opening) => stack.push(token),
                    _ => {
                        return Err(ParseError::missing_operand(
                            self.input,
                            format!("operator {} expects a version", kind.as_str()),
                        ))
                    }
                },
                _ => {
                    while let Some(top) = stack.last() {
                        if top.kind().is_binary() && top.kind().precedence() >= kind.precedence() {
                            output.extend(stack.pop());
                        } else {
                            break;
                        }
                    }
                    stack.push(token);
                }
            }
        }

        while let Some(top) = stack.pop() {
            if top.kind() == TokenKind::Opening {
                return Err(ParseError::UnbalancedGroup(self.input.to_string()));
            }
            output.push(top);
        }

        Ok(output)
    }

    /// Evaluate the postfix tokens left to right over an operand stack
    ///
    /// Version tokens stay as text until an operator consumes them, so a
    /// unary operator or a hyphen can insist on a plain version operand.
    fn evaluate(&self, postfix: &[Token]) -> Result<Requirement, ParseError> {
        let mut operands: Vec<Operand<'_>> = Vec::with_capacity(postfix.len());

        for token in postfix {
            let kind = token.kind();
            let requirement = match kind {
                TokenKind::Version => {
                    operands.push(Operand::Text(token.text().unwrap_or_default()));
                    continue;
                }
                TokenKind::And | TokenKind::Or => {
                    let connective = if kind == TokenKind::And {
                        Connective::And
                    } else {
                        Connective::Or
                    };
                    let right = self.pop_requirement(&mut operands)?;
                    let left = self.pop_requirement(&mut operands)?;
                    Requirement::compound(left, connective, right)
                }
                TokenKind::Hyphen => {
                    let upper = self.pop_version(&mut operands, kind)?;
                    let lower = self.pop_version(&mut operands, kind)?;
                    Requirement::hyphen(lower, upper, self.scheme)?
                }
                TokenKind::Tilde => Requirement::tilde(self.pop_version(&mut operands, kind)?, self.scheme)?,
                TokenKind::Caret => Requirement::caret(self.pop_version(&mut operands, kind)?, self.scheme)?,
                kind => match RangeOperator::from_token(kind) {
                    Some(operator) => {
                        Range::parse(self.pop_version(&mut operands, kind)?, operator, self.scheme)?.into()
                    }
                    None => return Err(ParseError::UnbalancedGroup(self.input.to_string())),
                },
            };
            operands.push(Operand::Built(requirement));
        }

        let requirement = self.pop_requirement(&mut operands)?;
        if !operands.is_empty() {
            return Err(ParseError::missing_operand(self.input, "dangling operand"));
        }
        Ok(requirement)
    }

    fn pop_requirement(&self, operands: &mut Vec<Operand<'_>>) -> Result<Requirement, ParseError> {
        match operands.pop() {
            Some(Operand::Text(text)) => self.version_token(text),
            Some(Operand::Built(requirement)) => Ok(requirement),
            None => Err(ParseError::missing_operand(self.input, "unexpected end of requirement")),
        }
    }

    fn pop_version<'t>(&self, operands: &mut Vec<Operand<'t>>, operator: TokenKind) -> Result<&'t str, ParseError> {
        match operands.pop() {
            Some(Operand::Text(text)) => Ok(text),
            _ => Err(ParseError::missing_operand(
                self.input,
                format!("operator {} expects a version", operator.as_str()),
            )),
        }
    }

    /// Reject bracket nesting deeper than [`MAX_GROUP_DEPTH`]
    fn check_nesting(&self, tokens: &[Token]) -> Result<(), ParseError> {
        let mut depth = 0usize;
        for token in tokens {
            match token.kind() {
                TokenKind::Opening => {
                    depth += 1;
                    if depth > MAX_GROUP_DEPTH {
                        return Err(ParseError::InvalidRequirement(self.input.to_string()));
                    }
                }
                TokenKind::Closing => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        Ok(())
    }

    /// A bare version: `*` matches everything, a complete version is exact,
    /// a partial one expands like a tilde
    fn version_token(&self, text: &str) -> Result<Requirement, ParseError> {
        let any = text == "*" || (self.scheme == Scheme::Npm && matches!(text, "x" | "X" | "latest"));
        if any {
            return Ok(Range::new(release(self.scheme, 0, 0, 0), RangeOperator::Gte).into());
        }

        let version = Version::parse(text, self.scheme)?;
        if version.minor().is_some() && version.patch().is_some() {
            Ok(Requirement::exact(version))
        } else {
            Ok(tilde_of(&version))
        }
    }
}
