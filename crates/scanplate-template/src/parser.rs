//! Template text to spec sequence.

use crate::spec::{ByteClass, ByteSet, FieldName, Matcher, Spec};
use crate::TemplateError;
use scanplate_interval::Interval;
use winnow::combinator::{alt, cut_err, preceded, repeat, terminated};
use winnow::prelude::*;
use winnow::token::take_till;

/// A raw piece of template text.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Segment<'a> {
    Literal(&'a str),
    /// Interior of a `{...}` token, braces stripped.
    Token(&'a str),
}

// ============ Winnow Parsers ============

fn literal<'a>(input: &mut &'a str) -> ModalResult<Segment<'a>> {
    take_till(1.., '{').map(Segment::Literal).parse_next(input)
}

fn token<'a>(input: &mut &'a str) -> ModalResult<Segment<'a>> {
    preceded('{', cut_err(terminated(take_till(0.., '}'), '}')))
        .map(Segment::Token)
        .parse_next(input)
}

fn segments<'a>(input: &mut &'a str) -> ModalResult<Vec<Segment<'a>>> {
    repeat(0.., alt((token, literal))).parse_next(input)
}

// ============ Token Interpretation ============

fn type_matcher(code: &str) -> Result<Matcher, TemplateError> {
    let class = match code {
        "" | "*" | "s" => ByteClass::Any,
        "w" => ByteClass::NonWhitespace,
        "b" => ByteClass::Whitespace,
        "i" => ByteClass::SignedInt,
        "u" => ByteClass::UnsignedInt,
        "d" => ByteClass::Decimal,
        _ => {
            let Some(members) = code.strip_prefix('[').and_then(|c| c.strip_suffix(']')) else {
                return Err(TemplateError::InvalidTokenType(code.to_string()));
            };
            match members.strip_prefix('^') {
                Some(excluded) => ByteClass::NoneOf(ByteSet::new(excluded.as_bytes())),
                None => ByteClass::OneOf(ByteSet::new(members.as_bytes())),
            }
        }
    };
    Ok(Matcher::Class(class))
}

fn exact_length(text: &str) -> Result<Interval<usize>, TemplateError> {
    let invalid = || TemplateError::InvalidTokenLength(text.to_string());
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    text.parse().map(Interval::exact).map_err(|_| invalid())
}

fn token_spec(body: &str) -> Result<Spec, TemplateError> {
    let parts: Vec<&str> = body.split(':').collect();
    match parts.as_slice() {
        [name] => Ok(Spec::new(
            FieldName::parse(name),
            Interval::all(),
            Matcher::any(),
        )),
        [name, code] => Ok(Spec::new(
            FieldName::parse(name),
            Interval::all(),
            type_matcher(code)?,
        )),
        [name, code, length] => Ok(Spec::new(
            FieldName::parse(name),
            exact_length(length)?,
            type_matcher(code)?,
        )),
        _ => Err(TemplateError::TooManyTokenParts(format!("{{{}}}", body))),
    }
}

impl Segment<'_> {
    fn into_spec(self) -> Result<Spec, TemplateError> {
        match self {
            Segment::Literal(text) => Ok(Spec::literal(text)),
            Segment::Token(body) => token_spec(body),
        }
    }
}

// ============ Public API ============

/// Parses template text into specs, in textual order.
pub fn parse_specs(template: &str) -> Result<Vec<Spec>, TemplateError> {
    let mut input = template;
    // Literals consume up to the next `{` and tokens are cut after their `{`,
    // so an unterminated token is the only way to fail here.
    let segments = segments
        .parse_next(&mut input)
        .map_err(|_| TemplateError::MissingClosingBracket)?;

    let specs = segments
        .into_iter()
        .map(Segment::into_spec)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::trace!(template, specs = specs.len(), "parsed template");
    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Vec<Segment<'_>> {
        let mut input = input;
        let result = segments.parse_next(&mut input).unwrap();
        assert!(input.is_empty());
        result
    }

    fn named(name: &str) -> FieldName {
        FieldName::Named(name.to_string())
    }

    #[test]
    fn test_segments_literal_only() {
        assert_eq!(parse("hello world"), vec![Segment::Literal("hello world")]);
    }

    #[test]
    fn test_segments_alternate() {
        assert_eq!(
            parse("Hello, {name}!"),
            vec![
                Segment::Literal("Hello, "),
                Segment::Token("name"),
                Segment::Literal("!"),
            ]
        );
    }

    #[test]
    fn test_segments_adjacent_tokens() {
        assert_eq!(
            parse("{a}{}{b:i}"),
            vec![Segment::Token("a"), Segment::Token(""), Segment::Token("b:i")]
        );
    }

    #[test]
    fn test_segments_stray_close_brace_is_literal() {
        assert_eq!(parse("a}b"), vec![Segment::Literal("a}b")]);
    }

    #[test]
    fn test_empty_template() {
        assert_eq!(parse_specs("").unwrap(), vec![]);
    }

    #[test]
    fn test_missing_closing_bracket() {
        assert_eq!(
            parse_specs("{field1"),
            Err(TemplateError::MissingClosingBracket)
        );
        assert_eq!(
            parse_specs("ok {a} then {b"),
            Err(TemplateError::MissingClosingBracket)
        );
    }

    #[test]
    fn test_unclosed_brace_inside_token() {
        // The token ends at the first `}`; the `{` inside it is part of the name.
        let specs = parse_specs("{a{b}").unwrap();
        assert_eq!(specs[0].field_name, named("a{b"));
    }

    #[test]
    fn test_token_parts() {
        let specs = parse_specs("{}{x}{y:i}{z:u:3}").unwrap();
        assert_eq!(specs.len(), 4);

        assert_eq!(specs[0].field_name, FieldName::Anonymous);
        assert_eq!(specs[0].length, Interval::all());
        assert_eq!(specs[0].matcher, Matcher::any());

        assert_eq!(specs[1].field_name, named("x"));
        assert_eq!(specs[1].matcher, Matcher::any());

        assert_eq!(specs[2].field_name, named("y"));
        assert_eq!(specs[2].matcher, Matcher::Class(ByteClass::SignedInt));
        assert_eq!(specs[2].length, Interval::all());

        assert_eq!(specs[3].field_name, named("z"));
        assert_eq!(specs[3].matcher, Matcher::Class(ByteClass::UnsignedInt));
        assert_eq!(specs[3].length, Interval::exact(3));
    }

    #[test]
    fn test_anonymous_tokens() {
        for template in ["{}", "{_}", "{_:i}", "{_:i:3}", "{:w}"] {
            let specs = parse_specs(template).unwrap();
            assert_eq!(specs[0].field_name, FieldName::Anonymous, "{}", template);
        }
    }

    #[test]
    fn test_type_codes() {
        let cases = [
            ("*", ByteClass::Any),
            ("s", ByteClass::Any),
            ("", ByteClass::Any),
            ("w", ByteClass::NonWhitespace),
            ("b", ByteClass::Whitespace),
            ("i", ByteClass::SignedInt),
            ("u", ByteClass::UnsignedInt),
            ("d", ByteClass::Decimal),
            ("[abc]", ByteClass::OneOf(ByteSet::new(b"abc"))),
            ("[^abc]", ByteClass::NoneOf(ByteSet::new(b"abc"))),
            ("[]", ByteClass::OneOf(ByteSet::new(b""))),
        ];
        for (code, expected) in cases {
            assert_eq!(type_matcher(code).unwrap(), Matcher::Class(expected), "{}", code);
        }
    }

    #[test]
    fn test_invalid_type_code() {
        assert_eq!(
            parse_specs("{x:q}"),
            Err(TemplateError::InvalidTokenType("q".to_string()))
        );
        assert_eq!(
            parse_specs("{x:[abc}"),
            Err(TemplateError::InvalidTokenType("[abc".to_string()))
        );
        assert_eq!(
            parse_specs("{x:ii}"),
            Err(TemplateError::InvalidTokenType("ii".to_string()))
        );
    }

    #[test]
    fn test_invalid_length() {
        assert_eq!(
            parse_specs("{n:i:abc}"),
            Err(TemplateError::InvalidTokenLength("abc".to_string()))
        );
        assert_eq!(
            parse_specs("{n:i:}"),
            Err(TemplateError::InvalidTokenLength("".to_string()))
        );
        assert_eq!(
            parse_specs("{n:i:+3}"),
            Err(TemplateError::InvalidTokenLength("+3".to_string()))
        );
        assert_eq!(
            parse_specs("{n:i:99999999999999999999999}"),
            Err(TemplateError::InvalidTokenLength(
                "99999999999999999999999".to_string()
            ))
        );
    }

    #[test]
    fn test_too_many_parts() {
        assert_eq!(
            parse_specs("{a:i:3:x}"),
            Err(TemplateError::TooManyTokenParts("{a:i:3:x}".to_string()))
        );
    }

    #[test]
    fn test_literal_specs() {
        let specs = parse_specs("{a:i}-{b:i}").unwrap();
        assert_eq!(specs.len(), 3);
        assert_eq!(specs[1], Spec::literal("-"));
        assert_eq!(specs[1].length, Interval::exact(1));
    }

    #[test]
    fn test_literal_length_counts_bytes() {
        let specs = parse_specs("né{x}").unwrap();
        assert_eq!(specs[0].length, Interval::exact(3));
    }

    #[test]
    fn test_deterministic() {
        let template = "{a:d} + {b:[0-9]:2} = {_}";
        assert_eq!(parse_specs(template), parse_specs(template));
    }
}
