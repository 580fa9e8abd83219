use serde::{Serialize, Serializer};
use std::fmt;

const ARC_SECONDS_PER_DEGREE: f64 = 3600.0;

/// Sexagesimal angle, rendered as `D:MM:SS.s`.
///
/// The sign belongs to the whole angle, so `-0:30:00.0` is half a degree
/// south/west and not `-0 + 30/60`.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
pub struct Sexagesimal {
    pub negative: bool,
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl Sexagesimal {
    pub fn new(negative: bool, degrees: f64, minutes: f64, seconds: f64) -> Self {
        Self {
            negative,
            degrees,
            minutes,
            seconds,
        }
    }

    /// Rounds to the nearest tenth of an arc-second
    pub fn from_degrees(degrees: f64) -> Self {
        let tenths = (degrees.abs() * ARC_SECONDS_PER_DEGREE * 10.0).round() as u64;
        let whole = tenths / 36_000;
        let rem = tenths % 36_000;
        Self {
            negative: degrees.is_sign_negative() && tenths != 0,
            degrees: whole as f64,
            minutes: (rem / 600) as f64,
            seconds: (rem % 600) as f64 / 10.0,
        }
    }

    /// Signed decimal degrees, unrounded
    pub fn as_degrees(&self) -> f64 {
        let magnitude =
            self.degrees + (self.minutes / 60.0) + (self.seconds / ARC_SECONDS_PER_DEGREE);
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl fmt::Display for Sexagesimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        write!(
            f,
            "{sign}{}:{:02}:{:04.1}",
            self.degrees, self.minutes, self.seconds
        )
    }
}

impl Serialize for Sexagesimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_degrees_rounds_to_tenth_arcsec() {
        let a = Sexagesimal::from_degrees(28.263861);
        assert!(!a.negative);
        assert_eq!(a.degrees, 28.0);
        assert_eq!(a.minutes, 15.0);
        assert_relative_eq!(a.seconds, 49.9);
        assert_eq!(a.to_string(), "28:15:49.9");
    }

    #[test]
    fn seconds_carry_into_minutes() {
        // 59.96" rounds up to a whole minute
        let a = Sexagesimal::from_degrees(10.0 + 59.0 / 60.0 + 59.96 / 3600.0);
        assert_eq!(a.to_string(), "11:00:00.0");
    }

    #[test]
    fn small_negative_angles_keep_their_sign() {
        let a = Sexagesimal::from_degrees(-0.5);
        assert!(a.negative);
        assert_eq!(a.to_string(), "-0:30:00.0");
        assert_relative_eq!(a.as_degrees(), -0.5);

        let z = Sexagesimal::from_degrees(-0.000001);
        assert!(!z.negative);
        assert_eq!(z.to_string(), "0:00:00.0");
    }

    #[test]
    fn serializes_as_display_string() {
        let a = Sexagesimal::from_degrees(-122.5);
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"-122:30:00.0\"");
    }
}
