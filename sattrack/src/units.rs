//! A lightweight uom-ish set of units for the propagation math.

use std::ops::{Add, Div, Mul, Sub};

#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct Length {
    meters: f64,
}

impl std::fmt::Debug for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} m", self.meters)
    }
}

impl Length {
    pub const fn from_meters(meters: f64) -> Length {
        Length { meters }
    }

    pub const fn from_kilometers(km: f64) -> Length {
        Length {
            meters: km * 1000.0,
        }
    }

    pub fn as_meters(&self) -> f64 {
        self.meters
    }

    pub fn as_kilometers(&self) -> f64 {
        self.meters / 1000.0
    }

    pub fn max(self, other: Length) -> Length {
        Length::from_meters(self.meters.max(other.meters))
    }
}

impl Add<Length> for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Self::Output {
        Length::from_meters(self.as_meters() + rhs.as_meters())
    }
}

impl Sub<Length> for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Self::Output {
        Length::from_meters(self.as_meters() - rhs.as_meters())
    }
}

impl Div<Length> for Length {
    type Output = Ratio;

    fn div(self, rhs: Length) -> Self::Output {
        Ratio::from_f64(self.as_meters() / rhs.as_meters())
    }
}

#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct Ratio {
    ratio: f64,
}

impl std::fmt::Debug for Ratio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ratio)
    }
}

impl Ratio {
    pub fn from_f64(ratio: f64) -> Ratio {
        Ratio { ratio }
    }

    pub fn as_f64(&self) -> f64 {
        self.ratio
    }
}

#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct Velocity {
    meters_per_second: f64,
}

impl std::fmt::Debug for Velocity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} m·s⁻¹", self.meters_per_second)
    }
}

impl Velocity {
    pub const fn from_meters_per_second(meters_per_second: f64) -> Velocity {
        Velocity { meters_per_second }
    }

    pub fn from_kilometers_per_second(kilometers_per_second: f64) -> Velocity {
        Velocity::from_meters_per_second(kilometers_per_second * 1000.0)
    }

    pub fn as_meters_per_second(&self) -> f64 {
        self.meters_per_second
    }

    pub fn as_kilometers_per_second(&self) -> f64 {
        self.meters_per_second / 1000.0
    }
}

impl Mul<Ratio> for Velocity {
    type Output = Velocity;

    fn mul(self, rhs: Ratio) -> Self::Output {
        Velocity::from_meters_per_second(self.as_meters_per_second() * rhs.as_f64())
    }
}

/// Standard gravitational parameter, km³·s⁻²
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
pub struct GravitationalParameter {
    cubic_kilometers_per_square_second: f64,
}

impl GravitationalParameter {
    pub const fn from_cubic_kilometers_per_square_second(v: f64) -> Self {
        Self {
            cubic_kilometers_per_square_second: v,
        }
    }

    /// Circular orbit speed at radius `r`, sqrt(μ / r)
    pub fn circular_velocity(&self, r: Length) -> Velocity {
        Velocity::from_kilometers_per_second(
            (self.cubic_kilometers_per_square_second / r.as_kilometers()).sqrt(),
        )
    }
}

/// Rounds to `places` decimal places, half away from zero
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10_f64.powi(places);
    (value * scale).round() / scale
}
