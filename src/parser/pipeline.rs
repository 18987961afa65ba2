// Top-level parser for the directive DSL

use super::ast::{Directive, DirectivePipeline};
use super::command::parse_chart_command;
use super::labels::parse_labs;
use super::lexer::ws;
use super::mapping::parse_map;
use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::{eof, map},
    error::{Error, ErrorKind},
    multi::separated_list0,
    IResult,
};

fn parse_directive(input: &str) -> IResult<&str, Directive> {
    alt((
        map(parse_chart_command, Directive::Chart),
        map(parse_map, Directive::Map),
        map(parse_labs, Directive::Labs),
    ))(input)
}

/// Parse a complete directive pipeline
/// Format: component | component | ...
pub fn parse_directives(input: &str) -> IResult<&str, DirectivePipeline> {
    let (input, components) = separated_list0(ws(tag("|")), parse_directive)(input)?;

    // Consume trailing whitespace and ensure end of input
    let (input, _) = ws(eof)(input)?;

    // Aggregate components; later occurrences override earlier ones.
    let mut chart = None;
    let mut role_map = None;
    let mut labels = None;

    for component in components {
        match component {
            Directive::Chart(c) => chart = Some(c),
            Directive::Map(m) => role_map = Some(m),
            Directive::Labs(l) => labels = Some(l),
        }
    }

    // Validation: must select a chart type
    let Some(chart) = chart else {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Verify)));
    };

    Ok((
        input,
        DirectivePipeline {
            chart,
            map: role_map,
            labels: labels.unwrap_or_default(),
        },
    ))
}
