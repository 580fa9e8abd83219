pub use crate::parser::{parse_sexagesimal, parse_tle_lines, parse_tle_set, ParseError};

pub mod parser;

/// Separates the two element lines of a TLE lookup payload
pub const TLE_LINE_DELIMITER: &str = "\r\n";
/// Separates the degree, minute and second fields of an angle
pub const SEXAGESIMAL_SEPARATOR: &str = ":";
