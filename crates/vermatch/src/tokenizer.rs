//! Requirement string tokenizer

use std::collections::HashMap;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use lazy_static::lazy_static;

use crate::{ParseError, Scheme};

/// Kinds of tokens in a requirement string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Version,
    Tilde,
    Caret,
    Eq,
    Lt,
    Lte,
    Gt,
    Gte,
    Hyphen,
    Or,
    And,
    Opening,
    Closing,
}

impl TokenKind {
    const ALL: [TokenKind; 13] = [
        TokenKind::Version,
        TokenKind::Tilde,
        TokenKind::Caret,
        TokenKind::Eq,
        TokenKind::Lt,
        TokenKind::Lte,
        TokenKind::Gt,
        TokenKind::Gte,
        TokenKind::Hyphen,
        TokenKind::Or,
        TokenKind::And,
        TokenKind::Opening,
        TokenKind::Closing,
    ];

    /// Get the textual form of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Version => "<version>",
            TokenKind::Tilde => "~",
            TokenKind::Caret => "^",
            TokenKind::Eq => "=",
            TokenKind::Lt => "<",
            TokenKind::Lte => "<=",
            TokenKind::Gt => ">",
            TokenKind::Gte => ">=",
            TokenKind::Hyphen => "-",
            TokenKind::Or => "||",
            TokenKind::And => "&&",
            TokenKind::Opening => "(",
            TokenKind::Closing => ")",
        }
    }

    /// Operators that take the single version following them
    pub fn is_unary(&self) -> bool {
        matches!(
            self,
            TokenKind::Tilde
                | TokenKind::Caret
                | TokenKind::Eq
                | TokenKind::Lt
                | TokenKind::Lte
                | TokenKind::Gt
                | TokenKind::Gte
        )
    }

    /// Operators that join two operands
    pub fn is_binary(&self) -> bool {
        matches!(self, TokenKind::Hyphen | TokenKind::Or | TokenKind::And)
    }

    /// Binding strength of a binary operator, higher binds tighter
    pub(crate) fn precedence(&self) -> u8 {
        match self {
            TokenKind::Hyphen => 3,
            TokenKind::And => 2,
            TokenKind::Or => 1,
            _ => 0,
        }
    }

    /// Character that introduces the operator, if it has one
    fn lead_char(&self) -> Option<char> {
        match self {
            TokenKind::Tilde => Some('~'),
            TokenKind::Caret => Some('^'),
            TokenKind::Eq => Some('='),
            TokenKind::Lt => Some('<'),
            TokenKind::Gt => Some('>'),
            TokenKind::Hyphen => Some('-'),
            TokenKind::Or => Some('|'),
            TokenKind::Opening => Some('('),
            TokenKind::Closing => Some(')'),
            // <= and >= are read as < and > followed by '='
            TokenKind::Version | TokenKind::Lte | TokenKind::Gte | TokenKind::And => None,
        }
    }

    /// Check if the operator is recognized by the given scheme
    pub fn is_supported_by(&self, scheme: Scheme) -> bool {
        match self {
            TokenKind::Tilde | TokenKind::Lt | TokenKind::Lte | TokenKind::Gt | TokenKind::Gte => {
                matches!(scheme, Scheme::Npm | Scheme::CocoaPods)
            }
            TokenKind::Caret
            | TokenKind::Eq
            | TokenKind::Hyphen
            | TokenKind::Or
            | TokenKind::Opening
            | TokenKind::Closing => scheme == Scheme::Npm,
            TokenKind::Version | TokenKind::And => true,
        }
    }
}

lazy_static! {
    /// Lead characters recognized by each scheme
    static ref OPERATORS: HashMap<Scheme, HashMap<char, TokenKind>> = Scheme::all()
        .iter()
        .map(|scheme| {
            let table = TokenKind::ALL
                .iter()
                .filter(|kind| kind.is_supported_by(*scheme))
                .filter_map(|kind| kind.lead_char().map(|c| (c, *kind)))
                .collect();
            (*scheme, table)
        })
        .collect();
}

/// Characters that are operators in at least one scheme, except '-' which
/// is also legal inside versions
fn is_foreign_operator(c: char) -> bool {
    matches!(c, '~' | '^' | '=' | '<' | '>' | '|' | '(' | ')')
}

/// A lexical token of a requirement string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    text: Option<String>,
}

impl Token {
    /// Create an operator token
    pub fn new(kind: TokenKind) -> Self {
        Token { kind, text: None }
    }

    /// Create a version token
    pub fn version(text: impl Into<String>) -> Self {
        Token {
            kind: TokenKind::Version,
            text: Some(text.into()),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Get the version text (only set on version tokens)
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => f.write_str(text),
            None => f.write_str(self.kind.as_str()),
        }
    }
}

/// Split a requirement string into tokens for the given scheme
///
/// Whitespace separates tokens and is otherwise dropped. A `-` directly
/// attached to a version belongs to that version unless whitespace follows
/// it; anywhere else (in npm) it is the hyphen-range operator. An implicit `And` is inserted between two
/// adjacent operands, e.g. between `>=1.2.9` and `<2.0.0`.
pub fn tokenize(input: &str, scheme: Scheme) -> Result<Vec<Token>, ParseError> {
    let table = OPERATORS.get(&scheme);
    let has_hyphen = table.map_or(false, |t| t.get(&'-') == Some(&TokenKind::Hyphen));
    let mut tokens = Vec::new();
    let mut pending = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            // "v 1.2.3" is one version
            if matches!(pending.as_str(), "v" | "V") {
                continue;
            }
            // "1.2.3- 2.3.4": a dash left dangling before whitespace is the hyphen operator
            let dangling = has_hyphen && pending.len() > 1 && pending.ends_with('-');
            if dangling {
                pending.pop();
            }
            flush(&mut tokens, &mut pending);
            if dangling {
                push(&mut tokens, Token::new(TokenKind::Hyphen));
            }
            continue;
        }

        match table.and_then(|t| t.get(&c)).copied() {
            Some(TokenKind::Hyphen) if !pending.is_empty() => pending.push(c),
            Some(kind) => {
                let kind = read_digraph(kind, &mut chars, scheme);
                flush(&mut tokens, &mut pending);
                push(&mut tokens, Token::new(kind));
            }
            None if scheme.is_tokenized() && is_foreign_operator(c) => {
                return Err(ParseError::UnsupportedOperator {
                    input: input.to_string(),
                    operator: c,
                    scheme,
                });
            }
            None => pending.push(c),
        }
    }
    flush(&mut tokens, &mut pending);

    log::trace!("Tokenized \"{}\" ({}): {}", input, scheme, join(&tokens));
    Ok(tokens)
}

fn read_digraph(kind: TokenKind, chars: &mut Peekable<Chars<'_>>, scheme: Scheme) -> TokenKind {
    let upgraded = match (kind, chars.peek()) {
        (TokenKind::Lt, Some('=')) => TokenKind::Lte,
        (TokenKind::Gt, Some('=')) => TokenKind::Gte,
        (TokenKind::Tilde, Some('>')) => TokenKind::Tilde,
        (TokenKind::Or, Some('|')) => TokenKind::Or,
        _ => return kind,
    };
    if upgraded.is_supported_by(scheme) {
        chars.next();
    }
    upgraded
}

fn flush(tokens: &mut Vec<Token>, pending: &mut String) {
    if !pending.is_empty() {
        push(tokens, Token::version(std::mem::take(pending)));
    }
}

fn push(tokens: &mut Vec<Token>, token: Token) {
    let follows_operand = tokens
        .last()
        .map_or(false, |last| matches!(last.kind, TokenKind::Version | TokenKind::Closing));
    let starts_operand =
        token.kind.is_unary() || matches!(token.kind, TokenKind::Version | TokenKind::Opening);
    if follows_operand && starts_operand {
        tokens.push(Token::new(TokenKind::And));
    }
    tokens.push(token);
}

pub(crate) fn join(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind::*;

    fn kinds(input: &str, scheme: Scheme) -> Vec<TokenKind> {
        tokenize(input, scheme).unwrap().iter().map(|t| t.kind()).collect()
    }

    #[test]
    fn test_tokenize_npm_or_and() {
        let tokens = tokenize("1.2.7 || >=1.2.9 <2.0.0", Scheme::Npm).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::version("1.2.7"),
                Token::new(Or),
                Token::new(Gte),
                Token::version("1.2.9"),
                Token::new(And),
                Token::new(Lt),
                Token::version("2.0.0"),
            ]
        );
    }

    #[test]
    fn test_tokenize_attached_dash_is_prerelease() {
        let tokens = tokenize("1.2.7-rc.1 || >=1.2.9-beta <2.0.0", Scheme::Npm).unwrap();
        assert_eq!(tokens[0], Token::version("1.2.7-rc.1"));
        assert_eq!(tokens[3], Token::version("1.2.9-beta"));
        assert_eq!(tokens.len(), 7);
    }

    #[test]
    fn test_tokenize_hyphen_range() {
        assert_eq!(kinds("1.2.3 - 2.3.4", Scheme::Npm), vec![Version, Hyphen, Version]);
        assert_eq!(
            kinds("1.2.3-beta - 2.3.4", Scheme::Npm),
            vec![Version, Hyphen, Version]
        );
        assert_eq!(
            tokenize("1.2.3- 2.3.4", Scheme::Npm).unwrap(),
            vec![Token::version("1.2.3"), Token::new(Hyphen), Token::version("2.3.4")]
        );
        assert_eq!(kinds("1.2.3 -2.3.4", Scheme::Npm), vec![Version, Hyphen, Version]);
        // A trailing dash with nothing after it stays part of the version
        assert_eq!(tokenize("1.2.3-", Scheme::Npm).unwrap(), vec![Token::version("1.2.3-")]);
    }

    #[test]
    fn test_tokenize_digraphs() {
        assert_eq!(kinds("<=1 >=2", Scheme::Npm), vec![Lte, Version, And, Gte, Version]);
        assert_eq!(kinds("1 | 2", Scheme::Npm), vec![Version, Or, Version]);
        assert_eq!(kinds("~> 1.2", Scheme::CocoaPods), vec![Tilde, Version]);
        assert_eq!(kinds("~>1.2", Scheme::Npm), vec![Tilde, Version]);
    }

    #[test]
    fn test_tokenize_groups() {
        assert_eq!(
            kinds("(>=1 <2) || 3", Scheme::Npm),
            vec![Opening, Gte, Version, And, Lt, Version, Closing, Or, Version]
        );
        assert_eq!(
            kinds("(1) (2)", Scheme::Npm),
            vec![Opening, Version, Closing, And, Opening, Version, Closing]
        );
    }

    #[test]
    fn test_tokenize_spaces() {
        assert_eq!(tokenize("v 1.2.3", Scheme::Npm).unwrap(), vec![Token::version("v1.2.3")]);
        assert_eq!(tokenize("~ 1.2.7", Scheme::Npm).unwrap(), vec![Token::new(Tilde), Token::version("1.2.7")]);
        assert_eq!(kinds("1.2.3 1.2.4", Scheme::Npm), vec![Version, And, Version]);
        assert!(tokenize("   ", Scheme::Npm).unwrap().is_empty());
    }

    #[test]
    fn test_tokenize_foreign_operators() {
        assert!(matches!(
            tokenize("^1.2", Scheme::CocoaPods),
            Err(ParseError::UnsupportedOperator { operator: '^', .. })
        ));
        assert!(matches!(
            tokenize("1.0 || 2.0", Scheme::CocoaPods),
            Err(ParseError::UnsupportedOperator { operator: '|', .. })
        ));
        // CocoaPods has no hyphen operator
        assert_eq!(tokenize("1.0-beta", Scheme::CocoaPods).unwrap(), vec![Token::version("1.0-beta")]);
    }

    #[test]
    fn test_tokenize_untokenized_schemes() {
        assert_eq!(tokenize(">1.2.3", Scheme::Strict).unwrap(), vec![Token::version(">1.2.3")]);
    }

    #[test]
    fn test_operator_table() {
        assert!(Caret.is_supported_by(Scheme::Npm));
        assert!(!Caret.is_supported_by(Scheme::CocoaPods));
        assert!(Tilde.is_supported_by(Scheme::CocoaPods));
        assert!(!Tilde.is_supported_by(Scheme::Ivy));
        assert!(!Hyphen.is_supported_by(Scheme::Loose));
    }
}
