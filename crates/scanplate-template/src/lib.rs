//! Template parsing for scanplate.
//!
//! A template is literal text interleaved with `{...}` tokens. Each token
//! names a field and may constrain which bytes it accepts and how long it is:
//!
//! ```text
//! {}              anonymous, any bytes, any length
//! {name}          named, any bytes, any length
//! {name:i}        named, signed integer
//! {name:[abc]:3}  named, exactly three bytes from {a, b, c}
//! ```
//!
//! Type codes: `*` / `s` any byte, `w` non-whitespace, `b` whitespace,
//! `i` signed integer, `u` unsigned integer, `d` decimal, `[chars]` and
//! `[^chars]` byte sets. A name of `_` (or no name) makes the field
//! anonymous.
//!
//! # Example
//!
//! ```
//! use scanplate_template::{FieldName, Template};
//!
//! let template = Template::parse("{a:i}-{b:i}").unwrap();
//! assert_eq!(template.len(), 3);
//! assert_eq!(template.specs()[0].field_name, FieldName::Named("a".to_string()));
//! assert_eq!(template.to_string(), "{a:i}-{b:i}");
//! ```

mod parser;
mod spec;

pub use parser::parse_specs;
pub use spec::{ByteClass, ByteSet, FieldName, Matcher, Spec};

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("missing closing bracket '}}' in template")]
    MissingClosingBracket,
    #[error("invalid token length '{0}' (expected an unsigned integer)")]
    InvalidTokenLength(String),
    #[error("invalid token type '{0}'")]
    InvalidTokenType(String),
    #[error("too many ':'-separated parts in token '{0}'")]
    TooManyTokenParts(String),
}

/// A parsed template: specs in the order they must match the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Template {
    specs: Vec<Spec>,
}

impl Template {
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        parse_specs(template).map(Self::from_specs)
    }

    pub fn from_specs(specs: Vec<Spec>) -> Self {
        Self { specs }
    }

    pub fn specs(&self) -> &[Spec] {
        &self.specs
    }

    pub fn into_specs(self) -> Vec<Spec> {
        self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Names of the fields that will appear in a match result, in template
    /// order. Repeated names are listed each time they occur.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().filter_map(Spec::name)
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for spec in &self.specs {
            write!(f, "{}", spec)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Template {
    type Item = &'a Spec;
    type IntoIter = std::slice::Iter<'a, Spec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_field_names() {
        let template: Template = "x={x:d}, {_}, y={y}".parse().unwrap();
        assert_eq!(template.field_names().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let template = Template::parse("{a}-{a}").unwrap();
        assert_eq!(template.field_names().collect::<Vec<_>>(), vec!["a", "a"]);
    }

    #[test]
    fn test_display_canonical_form() {
        let cases = [
            ("Hello, {name}!", "Hello, {name}!"),
            ("{_}", "{}"),
            ("{x:s}", "{x}"),
            ("{x:i}", "{x:i}"),
            ("{x:}", "{x}"),
            ("{_:u:4}", "{:u:4}"),
            ("{c:[^,]}", "{c:[^,]}"),
        ];
        for (input, expected) in cases {
            assert_eq!(Template::parse(input).unwrap().to_string(), expected);
        }
    }

    #[test]
    fn test_display_reparses_to_same_template() {
        let template = Template::parse("{a:i}-{_:w:2} {b:[xy]}").unwrap();
        let reparsed = Template::parse(&template.to_string()).unwrap();
        assert_eq!(template, reparsed);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TemplateError::MissingClosingBracket.to_string(),
            "missing closing bracket '}' in template"
        );
        assert_eq!(
            TemplateError::InvalidTokenType("q".to_string()).to_string(),
            "invalid token type 'q'"
        );
    }
}
