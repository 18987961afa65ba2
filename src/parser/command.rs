// Chart command parsers for the directive DSL

use super::ast::ChartDirective;
use super::lexer::{bool_literal, number_literal, string_literal, ws};
use crate::settings::{ChartOptionSettings, ChartType, LegendPosition};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::{map, map_res},
    multi::separated_list0,
    sequence::preceded,
    IResult,
};

/// One keyed option argument inside a chart command's parentheses.
#[derive(Debug, Clone, PartialEq)]
enum ChartArg {
    XTicks(u32),
    YTicks(u32),
    Legend(LegendPosition),
    ShowLine(bool),
    DotSize(f64),
    TimeFormat(String),
    InnerPadding(u32),
}

fn arg_x_ticks(input: &str) -> IResult<&str, ChartArg> {
    map(preceded(ws(tag("x_ticks:")), ws(number_literal)), |n| {
        ChartArg::XTicks(n as u32)
    })(input)
}

fn arg_y_ticks(input: &str) -> IResult<&str, ChartArg> {
    map(preceded(ws(tag("y_ticks:")), ws(number_literal)), |n| {
        ChartArg::YTicks(n as u32)
    })(input)
}

fn arg_legend(input: &str) -> IResult<&str, ChartArg> {
    map_res(preceded(ws(tag("legend:")), ws(number_literal)), |n| {
        LegendPosition::try_from(n as u8).map(ChartArg::Legend)
    })(input)
}

fn arg_show_line(input: &str) -> IResult<&str, ChartArg> {
    map(preceded(ws(tag("show_line:")), ws(bool_literal)), ChartArg::ShowLine)(input)
}

fn arg_dot_size(input: &str) -> IResult<&str, ChartArg> {
    map(preceded(ws(tag("dot_size:")), ws(number_literal)), ChartArg::DotSize)(input)
}

fn arg_time_format(input: &str) -> IResult<&str, ChartArg> {
    map(
        preceded(ws(tag("time_format:")), ws(string_literal)),
        ChartArg::TimeFormat,
    )(input)
}

fn arg_inner_padding(input: &str) -> IResult<&str, ChartArg> {
    map(
        preceded(ws(tag("inner_padding:")), ws(number_literal)),
        |n| ChartArg::InnerPadding(n as u32),
    )(input)
}

fn fold_args(args: Vec<ChartArg>) -> ChartOptionSettings {
    let mut options = ChartOptionSettings::default();
    for arg in args {
        match arg {
            ChartArg::XTicks(n) => options.x_tick_count = Some(n),
            ChartArg::YTicks(n) => options.y_tick_count = Some(n),
            ChartArg::Legend(p) => options.legend_position = Some(p),
            ChartArg::ShowLine(b) => options.show_line = Some(b),
            ChartArg::DotSize(s) => options.dot_size = Some(s),
            ChartArg::TimeFormat(f) => options.time_format = Some(f),
            ChartArg::InnerPadding(n) => options.inner_padding = Some(n),
        }
    }
    options
}

/// Parse one chart command given its name and the option arguments its chart
/// type accepts; unsupported keys fail the parse.
fn chart_command<'a>(
    name: &'static str,
    chart_type: ChartType,
    mut args: impl FnMut(&'a str) -> IResult<&'a str, ChartArg>,
) -> impl FnMut(&'a str) -> IResult<&'a str, ChartDirective> {
    move |input: &'a str| {
        let (input, _) = ws(tag(name))(input)?;
        let (input, _) = ws(char('('))(input)?;
        let (input, parsed) = separated_list0(ws(char(',')), &mut args)(input)?;
        let (input, _) = ws(char(')'))(input)?;
        Ok((
            input,
            ChartDirective {
                chart_type,
                options: fold_args(parsed),
            },
        ))
    }
}

/// Format: bar() or bar(y_ticks: 5)
pub fn parse_bar(input: &str) -> IResult<&str, ChartDirective> {
    chart_command("bar", ChartType::Bar, arg_y_ticks)(input)
}

/// Format: pie() or pie(legend: 2, inner_padding: 40)
pub fn parse_pie(input: &str) -> IResult<&str, ChartDirective> {
    chart_command("pie", ChartType::Pie, alt((arg_legend, arg_inner_padding)))(input)
}

/// Format: line() or line(y_ticks: 4, legend: 1)
pub fn parse_line(input: &str) -> IResult<&str, ChartDirective> {
    chart_command("line", ChartType::Line, alt((arg_y_ticks, arg_legend)))(input)
}

/// Format: xy() with any of x_ticks, y_ticks, legend, show_line, dot_size,
/// time_format
pub fn parse_xy(input: &str) -> IResult<&str, ChartDirective> {
    chart_command(
        "xy",
        ChartType::Xy,
        alt((
            arg_x_ticks,
            arg_y_ticks,
            arg_legend,
            arg_show_line,
            arg_dot_size,
            arg_time_format,
        )),
    )(input)
}

/// Parse any chart command
pub fn parse_chart_command(input: &str) -> IResult<&str, ChartDirective> {
    alt((parse_bar, parse_pie, parse_line, parse_xy))(input)
}
