use crate::angle::Sexagesimal;
use derive_more::Display;
use serde::{Serialize, Serializer};

/// Sub-satellite point and derived kinematics at a single instant.
#[derive(Copy, Clone, PartialEq, Debug, Display, Serialize)]
#[display(
    fmt = "{{lat: {}, long: {}, elevation: {:.0} km, ground_speed: {} km/s}}",
    "sub_latitude",
    "sub_longitude",
    "elevation_km",
    "ground_speed_kmps"
)]
pub struct PositionSample {
    /// Sub-point latitude as produced by the propagator
    #[serde(rename = "lat")]
    pub sub_latitude: Sexagesimal,
    /// Sub-point longitude as produced by the propagator
    #[serde(rename = "long")]
    pub sub_longitude: Sexagesimal,

    /// Signed decimal degrees, [-90, 90]
    pub latitude: f64,
    /// Signed decimal degrees, [-180, 180]
    pub longitude: f64,

    /// Height above the sub-point [km], rendered without decimals
    #[serde(rename = "elevation", serialize_with = "whole_kilometers")]
    pub elevation_km: f64,

    /// Surface-projected speed [km/s], rounded to 2 decimals
    #[serde(rename = "ground_speed")]
    pub ground_speed_kmps: f64,
}

impl PositionSample {
    pub fn elevation_display(&self) -> String {
        format!("{:.0}", self.elevation_km)
    }
}

fn whole_kilometers<S: Serializer>(km: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&format_args!("{km:.0}"))
}
