//! SGP4 based sub-point, elevation and ground speed derivation

use crate::convert::DecimalDegrees;
use crate::units::{round_to, GravitationalParameter, Length};
use na::{Rotation3, Vector3};
use nav_types::{ECEF, WGS84};
use sattypes::prelude::*;
use tracing::debug;

/// Mean sphere, not the WGS-84 ellipsoid
pub const EARTH_RADIUS: Length = Length::from_kilometers(6371.0);

pub const EARTH_GRAVITATIONAL_PARAMETER: GravitationalParameter =
    GravitationalParameter::from_cubic_kilometers_per_square_second(398600.4418);

pub const GROUND_SPEED_PLACES: i32 = 2;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum PropagationError {
    #[error("Malformed TLE for '{name}': {reason}")]
    InvalidTle { name: String, reason: String },
    #[error("SGP4 failed for '{name}': {reason}")]
    Sgp4 { name: String, reason: String },
    #[error("Timestamp {timestamp} can't be expressed relative to the epoch of '{name}'")]
    Timestamp {
        name: String,
        timestamp: UtcTimestamp,
    },
}

/// Immutable SGP4 state for a single TLE.
///
/// Built per request, nothing is shared or mutated between propagations.
pub struct OrbitPropagator {
    name: String,
    elements: sgp4::Elements,
    constants: sgp4::Constants,
}

impl OrbitPropagator {
    pub fn new(tle: &Tle) -> Result<Self, PropagationError> {
        let elements = sgp4::Elements::from_tle(
            Some(tle.name.clone()),
            tle.line1.as_bytes(),
            tle.line2.as_bytes(),
        )
        .map_err(|e| PropagationError::InvalidTle {
            name: tle.name.clone(),
            reason: e.to_string(),
        })?;
        let constants =
            sgp4::Constants::from_elements(&elements).map_err(|e| PropagationError::Sgp4 {
                name: tle.name.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            name: tle.name.clone(),
            elements,
            constants,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn epoch(&self) -> UtcTimestamp {
        self.elements.datetime.and_utc()
    }

    /// Earth-fixed satellite position at `at`
    pub fn ecef_position(&self, at: UtcTimestamp) -> Result<ECEF<f64>, PropagationError> {
        let t = at.naive_utc();
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&t)
            .map_err(|_| PropagationError::Timestamp {
                name: self.name.clone(),
                timestamp: at,
            })?;
        let prediction = self
            .constants
            .propagate(minutes)
            .map_err(|e| PropagationError::Sgp4 {
                name: self.name.clone(),
                reason: e.to_string(),
            })?;

        // TEME -> pseudo Earth-fixed, rotate by GMST about the polar axis
        let gmst = sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&t));
        let teme_km = Vector3::from(prediction.position);
        let ecef_km = Rotation3::from_axis_angle(&Vector3::z_axis(), -gmst) * teme_km;
        let ecef_m = ecef_km * 1000.0;
        Ok(ECEF::new(ecef_m.x, ecef_m.y, ecef_m.z))
    }

    /// Geodetic point directly beneath the satellite
    pub fn sub_point(&self, at: UtcTimestamp) -> Result<WGS84<f64>, PropagationError> {
        Ok(WGS84::from(self.ecef_position(at)?))
    }

    /// Satellite height as seen by an observer at `observer`
    pub fn height_above(
        &self,
        observer: WGS84<f64>,
        at: UtcTimestamp,
    ) -> Result<Length, PropagationError> {
        let sat = self.ecef_position(at)?;
        let obs = ECEF::from(observer);
        Ok(Length::from_meters(obs.distance(&sat)))
    }
}

/// Propagate `tle` to `at` and derive the sub-point sample.
///
/// The altitude is read out in a second pass with an observer standing on the
/// sub-point at sea level.
pub fn propagate(tle: &Tle, at: UtcTimestamp) -> Result<PositionSample, PropagationError> {
    let propagator = OrbitPropagator::new(tle)?;

    let sub = propagator.sub_point(at)?;
    let sub_latitude = Sexagesimal::from_degrees(sub.latitude_degrees());
    let sub_longitude = Sexagesimal::from_degrees(sub.longitude_degrees());

    let observer =
        WGS84::from_degrees_and_meters(sub.latitude_degrees(), sub.longitude_degrees(), 0.0);
    let elevation = propagator
        .height_above(observer, at)?
        .max(Length::from_meters(0.0));

    let radius = EARTH_RADIUS + elevation;
    let orbital_velocity = EARTH_GRAVITATIONAL_PARAMETER.circular_velocity(radius);
    let ground_speed = orbital_velocity * (EARTH_RADIUS / radius);

    let sample = PositionSample {
        sub_latitude,
        sub_longitude,
        latitude: DecimalDegrees::from(sub_latitude).as_f64(),
        longitude: DecimalDegrees::from(sub_longitude).as_f64(),
        elevation_km: elevation.as_kilometers(),
        ground_speed_kmps: round_to(
            ground_speed.as_kilometers_per_second(),
            GROUND_SPEED_PLACES,
        ),
    };

    debug!(
        satellite = propagator.name(),
        timestamp = %at,
        position = %sample,
        "Propagated TLE"
    );

    Ok(sample)
}

/// Same as [`propagate`] at the current wall-clock time
pub fn propagate_now(tle: &Tle) -> Result<PositionSample, PropagationError> {
    propagate(tle, chrono::Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn iss() -> Tle {
        Tle::new(
            "ISS (ZARYA)",
            "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927",
            "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537",
        )
    }

    fn geo() -> Tle {
        Tle::new(
            "GEO1",
            "1 37481U 11019A   23190.45078927 -.00000009  00000-0  00000+0 0  9991",
            "2 37481   2.3847  40.6385 0001640  70.7486  43.7146  1.00272292 44578",
        )
    }

    #[test]
    fn deterministic_for_fixed_instant() {
        let at = chrono::Utc.with_ymd_and_hms(2008, 9, 20, 13, 0, 0).unwrap();
        let a = propagate(&iss(), at).unwrap();
        let b = propagate(&iss(), at).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn leo_sanity_bounds() {
        let at = chrono::Utc.with_ymd_and_hms(2008, 9, 20, 13, 0, 0).unwrap();
        let s = propagate(&iss(), at).unwrap();
        assert!((200.0..=500.0).contains(&s.elevation_km), "{s}");
        assert!((6.0..=8.0).contains(&s.ground_speed_kmps), "{s}");
        assert!(s.latitude.abs() <= 52.0, "{s}");
        assert!((-180.0..=180.0).contains(&s.longitude), "{s}");
    }

    #[test]
    fn decimal_fields_follow_the_sexagesimal_sub_point() {
        let at = chrono::Utc.with_ymd_and_hms(2008, 9, 20, 14, 30, 0).unwrap();
        let s = propagate(&iss(), at).unwrap();
        let lat = crate::convert::to_decimal_degrees(&s.sub_latitude.to_string()).unwrap();
        let long = crate::convert::to_decimal_degrees(&s.sub_longitude.to_string()).unwrap();
        assert_relative_eq!(lat.as_f64(), s.latitude);
        assert_relative_eq!(long.as_f64(), s.longitude);
    }

    #[test]
    fn ground_speed_is_projected_circular_velocity() {
        let at = chrono::Utc.with_ymd_and_hms(2008, 9, 21, 0, 0, 0).unwrap();
        let s = propagate(&iss(), at).unwrap();
        let r = 6371.0 + s.elevation_km;
        let expected = (398600.4418 / r).sqrt() * (6371.0 / r);
        assert_relative_eq!(s.ground_speed_kmps, expected, epsilon = 0.005);
    }

    #[test]
    fn geostationary_altitude() {
        let at = chrono::Utc.with_ymd_and_hms(2023, 7, 9, 12, 0, 0).unwrap();
        let s = propagate(&geo(), at).unwrap();
        assert!((35_000.0..=36_600.0).contains(&s.elevation_km), "{s}");
        assert!(s.ground_speed_kmps >= 0.0);
        assert!(s.ground_speed_kmps < 1.0, "{s}");
        assert!(s.latitude.abs() < 3.0, "{s}");
    }

    #[test]
    fn malformed_tle_is_an_error() {
        let bad = Tle::new("JUNK", "1 not a tle line", "2 neither is this");
        assert!(matches!(
            propagate(&bad, chrono::Utc::now()),
            Err(PropagationError::InvalidTle { .. })
        ));
    }
}
