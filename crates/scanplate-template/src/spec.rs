//! Match specifications: what one template segment accepts.

use scanplate_interval::Interval;
use std::fmt;

/// Identity of a field in the match result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldName {
    /// Matched and validated, but left out of the result.
    Anonymous,
    Named(String),
}

impl FieldName {
    /// `_` and the empty string are anonymous; anything else is taken
    /// verbatim.
    pub fn parse(text: &str) -> Self {
        match text {
            "" | "_" => FieldName::Anonymous,
            name => FieldName::Named(name.to_string()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldName::Anonymous => None,
            FieldName::Named(name) => Some(name),
        }
    }
}

/// A set of bytes listed explicitly in a `[...]` type code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ByteSet(Vec<u8>);

impl ByteSet {
    pub fn new(members: &[u8]) -> Self {
        Self(members.to_vec())
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.0.contains(&byte)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Per-byte character classes selectable by type code.
///
/// Every class is judged byte by byte, so any prefix of an accepted segment
/// is accepted too. The empty segment is accepted by every class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ByteClass {
    Any,
    NonWhitespace,
    Whitespace,
    /// Digits, with an optional `+`/`-` at position 0.
    SignedInt,
    UnsignedInt,
    /// Like `SignedInt`, plus at most one `.`.
    Decimal,
    OneOf(ByteSet),
    NoneOf(ByteSet),
}

impl ByteClass {
    /// Whether `byte` may appear at offset `pos` of a segment.
    fn admits(&self, pos: usize, byte: u8) -> bool {
        match self {
            ByteClass::Any => true,
            ByteClass::NonWhitespace => !byte.is_ascii_whitespace(),
            ByteClass::Whitespace => byte.is_ascii_whitespace(),
            ByteClass::SignedInt => byte.is_ascii_digit() || (pos == 0 && is_sign(byte)),
            ByteClass::UnsignedInt => byte.is_ascii_digit(),
            ByteClass::Decimal => {
                byte.is_ascii_digit() || byte == b'.' || (pos == 0 && is_sign(byte))
            }
            ByteClass::OneOf(set) => set.contains(byte),
            ByteClass::NoneOf(set) => !set.contains(byte),
        }
    }

    /// Length of the longest prefix of `input` made of admissible bytes.
    fn run_len(&self, input: &[u8]) -> usize {
        match self {
            ByteClass::Any => input.len(),
            ByteClass::Decimal => {
                let mut dots = 0;
                input
                    .iter()
                    .enumerate()
                    .take_while(|&(pos, &byte)| {
                        if byte == b'.' {
                            dots += 1;
                        }
                        dots <= 1 && self.admits(pos, byte)
                    })
                    .count()
            }
            class => input
                .iter()
                .enumerate()
                .take_while(|&(pos, &byte)| class.admits(pos, byte))
                .count(),
        }
    }

    fn accepts(&self, segment: &[u8]) -> bool {
        self.run_len(segment) == segment.len()
    }

    fn code(&self) -> String {
        match self {
            ByteClass::Any => "*".to_string(),
            ByteClass::NonWhitespace => "w".to_string(),
            ByteClass::Whitespace => "b".to_string(),
            ByteClass::SignedInt => "i".to_string(),
            ByteClass::UnsignedInt => "u".to_string(),
            ByteClass::Decimal => "d".to_string(),
            ByteClass::OneOf(set) => format!("[{}]", String::from_utf8_lossy(set.as_bytes())),
            ByteClass::NoneOf(set) => format!("[^{}]", String::from_utf8_lossy(set.as_bytes())),
        }
    }
}

fn is_sign(byte: u8) -> bool {
    byte == b'+' || byte == b'-'
}

/// Acceptance rule for one segment of input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Matcher {
    /// Every byte must belong to the class.
    Class(ByteClass),
    /// The segment must equal these bytes exactly.
    Literal(Vec<u8>),
}

impl Matcher {
    pub fn any() -> Self {
        Matcher::Class(ByteClass::Any)
    }

    pub fn accepts(&self, segment: &[u8]) -> bool {
        match self {
            Matcher::Class(class) => class.accepts(segment),
            Matcher::Literal(literal) => segment == literal.as_slice(),
        }
    }

    /// Upper bound on the length of any prefix of `input` this matcher can
    /// accept.
    ///
    /// For classes the bound is exact: every prefix up to this length is
    /// accepted, so callers that stay within it need not call `accepts`.
    pub fn longest_prefix(&self, input: &[u8]) -> usize {
        match self {
            Matcher::Class(class) => class.run_len(input),
            Matcher::Literal(literal) if input.starts_with(literal) => literal.len(),
            Matcher::Literal(_) => 0,
        }
    }

    /// Whether every prefix within `longest_prefix` is accepted.
    pub fn is_prefix_closed(&self) -> bool {
        matches!(self, Matcher::Class(_))
    }

    /// The type code that selects this matcher, if it has one.
    pub fn type_code(&self) -> Option<String> {
        match self {
            Matcher::Class(class) => Some(class.code()),
            Matcher::Literal(_) => None,
        }
    }
}

/// One unit of a template: a field name, a length constraint and a matcher.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Spec {
    pub field_name: FieldName,
    pub length: Interval<usize>,
    pub matcher: Matcher,
}

impl Spec {
    pub fn new(field_name: FieldName, length: Interval<usize>, matcher: Matcher) -> Self {
        Self {
            field_name,
            length,
            matcher,
        }
    }

    /// Anonymous spec accepting exactly `text`.
    pub fn literal(text: &str) -> Self {
        Self::new(
            FieldName::Anonymous,
            Interval::exact(text.len()),
            Matcher::Literal(text.as_bytes().to_vec()),
        )
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.matcher, Matcher::Literal(_))
    }

    pub fn name(&self) -> Option<&str> {
        self.field_name.as_str()
    }
}

/// Renders the spec back into template syntax.
///
/// Only lengths that are unbounded or exact have a template spelling; other
/// intervals are left out.
impl fmt::Display for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class = match &self.matcher {
            Matcher::Literal(bytes) => return write!(f, "{}", String::from_utf8_lossy(bytes)),
            Matcher::Class(class) => class,
        };
        let name = self.name().unwrap_or("");
        let exact = self.length.as_exact();

        match (class, exact) {
            (ByteClass::Any, None) if name.is_empty() => write!(f, "{{}}"),
            (ByteClass::Any, None) => write!(f, "{{{}}}", name),
            (class, None) => write!(f, "{{{}:{}}}", name, class.code()),
            (class, Some(len)) => write!(f, "{{{}:{}:{}}}", name, class.code(), len),
        }
    }
}
