//! Text parsers for TLE sets, TLE lookup payloads and sexagesimal angles

use crate::SEXAGESIMAL_SEPARATOR;
use nom::{
    bytes::complete::tag,
    character::complete::{line_ending, not_line_ending, one_of},
    combinator::{eof, opt},
    error::ErrorKind,
    multi::fold_many0,
    number::complete::double,
    Err::Error,
};
use sattypes::prelude::*;
use tracing::debug;

pub type Result<I, O, E = ParseError<I>> = std::result::Result<(I, O), nom::Err<E>>;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ParseError<I> {
    #[error("Angle field is not a finite number")]
    NonFiniteAngle,
    #[error("Empty TLE element line")]
    EmptyElementLine,
    #[error("Parse error")]
    Nom(I, ErrorKind),
}

/// Parses a file of `name / line 1 / line 2` entries, blank lines between entries are allowed
pub fn parse_tle_set(set: &str) -> Result<&str, Vec<Tle>> {
    let (s, tle_set) = fold_many0(tle, Vec::new, |mut tle_set: Vec<Tle>, tle| {
        tle_set.push(tle);
        tle_set
    })(set)?;
    debug!(entries = tle_set.len(), "Parsed TLE set");
    Ok((s, tle_set))
}

fn tle(s: &str) -> Result<&str, Tle> {
    let (s, _) = opt(line_ending)(s)?;
    let (s, name) = not_line_ending(s)?;
    let (s, _) = line_ending(s)?;
    let (s, (line1, line2)) = element_lines(s)?;
    let (s, _) = line_ending(s)?;
    Ok((s, Tle::new(name.trim_end(), line1, line2)))
}

/// Splits a lookup payload `"<line1>\r\n<line2>"` into its element lines.
///
/// A bare `\n` delimiter and a trailing line ending are tolerated.
pub fn parse_tle_lines(payload: &str) -> Result<&str, (&str, &str)> {
    let (s, lines) = element_lines(payload)?;
    let (s, _) = opt(line_ending)(s)?;
    Ok((s, lines))
}

fn element_lines(s: &str) -> Result<&str, (&str, &str)> {
    let (s, line1) = element_line(s)?;
    let (s, _) = line_ending(s)?;
    let (s, line2) = element_line(s)?;
    Ok((s, (line1, line2)))
}

fn element_line(s: &str) -> Result<&str, &str> {
    let (s, line) = not_line_ending(s)?;
    let line = line.trim_end();
    if line.is_empty() {
        Err(Error(ParseError::EmptyElementLine))
    } else {
        Ok((s, line))
    }
}

/// Parses exactly `D:M:S`, the sign on `D` applies to the whole angle
pub fn parse_sexagesimal(s: &str) -> Result<&str, Sexagesimal> {
    let (s, sign) = opt(one_of("+-"))(s)?;
    let (s, degrees) = field(s)?;
    let (s, _) = separator(s)?;
    let (s, minutes) = field(s)?;
    let (s, _) = separator(s)?;
    let (s, seconds) = field(s)?;
    let (s, _) = eof(s)?;
    Ok((
        s,
        Sexagesimal::new(sign == Some('-'), degrees, minutes, seconds),
    ))
}

fn separator(s: &str) -> Result<&str, &str> {
    tag(SEXAGESIMAL_SEPARATOR)(s)
}

fn field(s: &str) -> Result<&str, f64> {
    // The sign was already consumed for the degrees field
    let (rest, _) = opt(one_of("+-"))(s)?;
    if rest.len() != s.len() {
        return Err(Error(ParseError::Nom(s, ErrorKind::Float)));
    }
    let (s, v) = double(s)?;
    if v.is_finite() {
        Ok((s, v))
    } else {
        Err(Error(ParseError::NonFiniteAngle))
    }
}

impl<I> nom::error::ParseError<I> for ParseError<I> {
    fn from_error_kind(s: I, kind: ErrorKind) -> Self {
        ParseError::Nom(s, kind)
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}
