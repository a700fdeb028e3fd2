//! Decoding of the text of numeric literals

use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_while1};
use nom::character::complete::{char, digit1, hex_digit1, oct_digit1};
use nom::combinator::{all_consuming, cut, map, opt, recognize};
use nom::error::VerboseError;
use nom::multi::{many0, many1};
use nom::sequence::{preceded, terminated, tuple};
use nom::{Finish, IResult, Parser};

type Result<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Decodes an integer literal, which may have a `0x`, `0o` or `0b` prefix and `_` separators.
pub fn decode_int(text: &str) -> std::result::Result<i64, String> {
    let (_, (radix, digits)) = all_consuming(int_literal)(text)
        .finish()
        .map_err(describe)?;
    i64::from_str_radix(&digits, radix).map_err(|e| e.to_string())
}

/// Decodes a float literal of the form `digits.digits`, where the fraction may be empty.
pub fn decode_float(text: &str) -> std::result::Result<f64, String> {
    let (_, (whole, _, fraction)) =
        all_consuming(tuple((separated(digit1), char('.'), opt(separated(digit1)))))(text)
            .finish()
            .map_err(describe)?;
    format!("{whole}.{}", fraction.unwrap_or_default())
        .parse::<f64>()
        .map_err(|e| e.to_string())
}

fn int_literal(input: &str) -> Result<(u32, String)> {
    alt((
        preceded(tag_no_case("0x"), cut(map(separated(hex_digit1), |d| (16, d)))),
        preceded(tag_no_case("0o"), cut(map(separated(oct_digit1), |d| (8, d)))),
        preceded(tag_no_case("0b"), cut(map(separated(binary_digit1), |d| (2, d)))),
        map(separated(digit1), |d| (10, d)),
    ))(input)
}

fn binary_digit1(input: &str) -> Result<&str> {
    take_while1(|c: char| c == '0' || c == '1')(input)
}

/// Runs of digits that may be followed by `_`, with the separators removed
fn separated<'a, P>(digits: P) -> impl FnMut(&'a str) -> Result<'a, String>
where
    P: Parser<&'a str, &'a str, VerboseError<&'a str>>,
{
    map(
        recognize(many1(terminated(digits, many0(char('_'))))),
        |s: &str| s.replace('_', ""),
    )
}

fn describe(error: VerboseError<&str>) -> String {
    match error.errors.first() {
        Some((rest, _)) if rest.is_empty() => "expected more digits".to_string(),
        Some((rest, _)) => format!("unexpected {rest:?}"),
        None => "invalid literal".to_string(),
    }
}
