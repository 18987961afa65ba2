// Shared lexing helpers for the directive DSL

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{alpha1, alphanumeric1, char, multispace0},
    combinator::{map, recognize, value},
    multi::many0,
    number::complete::double,
    sequence::{delimited, pair},
    IResult,
};

/// Wrap a parser so it eats surrounding whitespace.
pub fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parse an identifier: letter or underscore, then letters/digits/underscores.
pub fn identifier(input: &str) -> IResult<&str, String> {
    map(
        recognize(pair(
            alt((alpha1, tag("_"))),
            many0(alt((alphanumeric1, tag("_")))),
        )),
        |s: &str| s.to_string(),
    )(input)
}

/// Parse a double-quoted string literal (no escape handling).
pub fn string_literal(input: &str) -> IResult<&str, String> {
    map(
        delimited(char('"'), take_while(|c| c != '"'), char('"')),
        |s: &str| s.to_string(),
    )(input)
}

/// Parse a numeric literal as f64.
pub fn number_literal(input: &str) -> IResult<&str, f64> {
    double(input)
}

/// Parse a bare `true`/`false`.
pub fn bool_literal(input: &str) -> IResult<&str, bool> {
    alt((value(true, tag("true")), value(false, tag("false"))))(input)
}
