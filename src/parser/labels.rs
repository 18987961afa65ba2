use super::ast::Labels;
use super::lexer::{string_literal, ws};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::map,
    multi::separated_list0,
    sequence::preceded,
    IResult,
};

/// Parse a labs command
/// Format: labs(title: "My Chart", x: "Region", y: "Sales")
pub fn parse_labs(input: &str) -> IResult<&str, Labels> {
    let (input, _) = ws(tag("labs"))(input)?;
    let (input, _) = ws(char('('))(input)?;

    let (input, args) = separated_list0(
        ws(char(',')),
        alt((
            map(preceded(ws(tag("title:")), ws(string_literal)), |v| ("title", v)),
            map(preceded(ws(tag("x:")), ws(string_literal)), |v| ("x", v)),
            map(preceded(ws(tag("y:")), ws(string_literal)), |v| ("y", v)),
        )),
    )(input)?;

    let (input, _) = ws(char(')'))(input)?;

    let mut labels = Labels::default();
    for (key, val) in args {
        match key {
            "title" => labels.title = Some(val),
            "x" => labels.x = Some(val),
            "y" => labels.y = Some(val),
            _ => {}
        }
    }

    Ok((input, labels))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labs() {
        let (_, labels) = parse_labs(r#"labs(title: "My Chart", x: "X Axis")"#).unwrap();
        assert_eq!(labels.title, Some("My Chart".to_string()));
        assert_eq!(labels.x, Some("X Axis".to_string()));
        assert_eq!(labels.y, None);
    }

    #[test]
    fn test_parse_labs_requires_string_values() {
        assert!(parse_labs("labs(title: bare)").is_err());
    }
}
