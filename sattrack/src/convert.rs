use crate::units::round_to;
use satproto::parse_sexagesimal;
use sattypes::prelude::Sexagesimal;
use std::fmt;

/// Decimal places kept when converting from sexagesimal
pub const DECIMAL_DEGREES_PLACES: i32 = 6;

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("Malformed sexagesimal angle '{input}', expected 'D:M:S'")]
pub struct FormatError {
    pub input: String,
}

/// Signed decimal degrees rounded to 6 places.
///
/// `Display` gives the shortest representation, suitable for embedding in a URL query.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
pub struct DecimalDegrees(f64);

impl DecimalDegrees {
    pub fn new(degrees: f64) -> Self {
        DecimalDegrees(round_to(degrees, DECIMAL_DEGREES_PLACES) + 0.0)
    }

    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl From<Sexagesimal> for DecimalDegrees {
    fn from(value: Sexagesimal) -> Self {
        DecimalDegrees::new(value.as_degrees())
    }
}

impl fmt::Display for DecimalDegrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn to_decimal_degrees(angle: &str) -> Result<DecimalDegrees, FormatError> {
    let (_, sexagesimal) = parse_sexagesimal(angle).map_err(|_| FormatError {
        input: angle.to_owned(),
    })?;
    Ok(sexagesimal.into())
}
