// Role mapping parser: assigns category/measure/series roles to columns

use super::ast::{FieldRef, RoleMap};
use super::lexer::{identifier, ws};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::map,
    multi::separated_list0,
    sequence::{delimited, preceded},
    IResult,
};

#[derive(Debug, Clone, PartialEq)]
enum MapArg {
    Category(FieldRef),
    Measure(FieldRef),
    Series(FieldRef),
}

/// A column reference: a bare identifier, `date(col)` for a date-typed
/// field, or `group(col)` for a numeric grouping field.
fn field_ref(input: &str) -> IResult<&str, FieldRef> {
    alt((
        map(
            preceded(
                ws(tag("date")),
                delimited(ws(char('(')), ws(identifier), ws(char(')'))),
            ),
            |column| FieldRef {
                column,
                date: true,
                grouping: false,
            },
        ),
        map(
            preceded(
                ws(tag("group")),
                delimited(ws(char('(')), ws(identifier), ws(char(')'))),
            ),
            |column| FieldRef {
                column,
                date: false,
                grouping: true,
            },
        ),
        map(ws(identifier), |column| FieldRef {
            column,
            date: false,
            grouping: false,
        }),
    ))(input)
}

/// Parse a map command
/// Format: map(category: region, measure: sales, measure: profit, series: quarter)
pub fn parse_map(input: &str) -> IResult<&str, RoleMap> {
    let (input, _) = ws(tag("map"))(input)?;
    let (input, _) = ws(char('('))(input)?;

    let (input, args) = separated_list0(
        ws(char(',')),
        alt((
            map(preceded(ws(tag("category:")), field_ref), MapArg::Category),
            map(preceded(ws(tag("measure:")), field_ref), MapArg::Measure),
            map(preceded(ws(tag("series:")), field_ref), MapArg::Series),
        )),
    )(input)?;

    let (input, _) = ws(char(')'))(input)?;

    let mut roles = RoleMap::default();
    for arg in args {
        match arg {
            MapArg::Category(field) => roles.category = Some(field),
            MapArg::Measure(field) => roles.measures.push(field),
            MapArg::Series(field) => roles.series = Some(field),
        }
    }

    Ok((input, roles))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_map_simple() {
        let (_, roles) = parse_map("map(category: region, measure: sales)").unwrap();
        assert_eq!(roles.category, Some(FieldRef::plain("region")));
        assert_eq!(roles.measures, vec![FieldRef::plain("sales")]);
        assert_eq!(roles.series, None);
    }

    #[test]
    fn test_parse_map_repeated_measures() {
        let (_, roles) =
            parse_map("map(category: month, measure: low, measure: high, measure: mean)").unwrap();
        assert_eq!(roles.measures.len(), 3);
        assert_eq!(roles.measures[2], FieldRef::plain("mean"));
    }

    #[test]
    fn test_parse_map_with_series() {
        let (_, roles) =
            parse_map("map(category: month, measure: sales, series: region)").unwrap();
        assert_eq!(roles.series, Some(FieldRef::plain("region")));
    }

    #[test]
    fn test_parse_map_date_wrapper() {
        let (_, roles) = parse_map("map(category: date(when), measure: kwh)").unwrap();
        let category = roles.category.unwrap();
        assert_eq!(category.column, "when");
        assert!(category.date);
    }

    #[test]
    fn test_parse_map_group_wrapper() {
        let (_, roles) = parse_map("map(category: year, measure: group(rank))").unwrap();
        assert!(roles.measures[0].grouping);
        assert_eq!(roles.measures[0].column, "rank");
    }

    #[test]
    fn test_parse_map_unknown_key() {
        assert!(parse_map("map(color: region)").is_err());
    }
}
